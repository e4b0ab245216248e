use chrono::Datelike;
use clap::Args;
use luna_core::CalendarMonth;

use super::{print_json, today_or, CommandResult, Context};

#[derive(Args)]
pub struct CalendarArgs {
    /// Defaults to the current year
    #[arg(long)]
    pub year: Option<i32>,
    /// Month 1-12; defaults to the current month
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}

pub fn run(args: CalendarArgs) -> CommandResult {
    let ctx = Context::open()?;
    let series = ctx.series()?;
    let today = today_or(None);
    let year = args.year.unwrap_or(today.year());
    let month = args.month.unwrap_or(today.month());

    let view = CalendarMonth::build(&series, &ctx.analyzer, year, month, today)
        .ok_or_else(|| format!("invalid month: {year}-{month:02}"))?;
    print_json(&view)
}
