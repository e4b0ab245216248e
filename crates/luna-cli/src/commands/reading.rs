use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;

use super::{print_json, today_or, CommandResult, Context};

#[derive(Subcommand)]
pub enum ReadingAction {
    /// Record a waking temperature (in the configured unit) and prune
    /// readings older than retention.days_to_keep
    Add {
        temperature: f64,
        /// Day of the reading (YYYY-MM-DD); defaults to today
        #[arg(long, conflicts_with = "timestamp")]
        date: Option<NaiveDate>,
        /// Unix timestamp in seconds
        #[arg(long)]
        timestamp: Option<i64>,
    },
    /// List recent readings
    List {
        /// Days of history to show; defaults to retention.history_days
        #[arg(long)]
        days: Option<u32>,
    },
    /// Delete readings older than retention.days_to_keep
    Prune,
    /// Fill an empty history with two weeks of demo readings
    Seed {
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

pub fn run(action: ReadingAction) -> CommandResult {
    let ctx = Context::open()?;
    let now = Utc::now();

    match action {
        ReadingAction::Add {
            temperature,
            date,
            timestamp,
        } => {
            let timestamp = match (date, timestamp) {
                (_, Some(secs)) => DateTime::<Utc>::from_timestamp(secs, 0)
                    .ok_or_else(|| format!("timestamp out of range: {secs}"))?,
                (Some(date), None) => date.and_time(now.time()).and_utc(),
                (None, None) => now,
            };
            let unit = ctx.config.preferences.temperature_unit;
            let celsius = unit.to_celsius(temperature);
            let stored = ctx
                .db
                .insert_reading(celsius, timestamp, ctx.analyzer.params())?;
            eprintln!(
                "recorded {:.2} {} on {}",
                unit.from_celsius(stored.temperature),
                unit.symbol(),
                stored.timestamp.date_naive()
            );
            let removed = ctx
                .db
                .prune_older_than(ctx.config.retention.days_to_keep, now)?;
            if removed > 0 {
                eprintln!(
                    "pruned {removed} readings older than {} days",
                    ctx.config.retention.days_to_keep
                );
            }
            print_json(&stored)?;
        }
        ReadingAction::List { days } => {
            let days = days.unwrap_or(ctx.config.retention.history_days);
            print_json(&ctx.db.readings_since(days, now)?)?;
        }
        ReadingAction::Prune => {
            let removed = ctx
                .db
                .prune_older_than(ctx.config.retention.days_to_keep, now)?;
            print_json(&serde_json::json!({ "removed": removed }))?;
        }
        ReadingAction::Seed { seed } => {
            let seeded = ctx.db.seed_sample_data(today_or(None), seed)?;
            if seeded {
                println!("sample readings added");
            } else {
                println!("history not empty, nothing seeded");
            }
        }
    }
    Ok(())
}
