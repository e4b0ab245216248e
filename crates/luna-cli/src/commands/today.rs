use chrono::NaiveDate;
use clap::Args;
use luna_core::TodaySummary;

use super::{print_json, today_or, CommandResult, Context};

#[derive(Args)]
pub struct TodayArgs {
    /// Day to summarize (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

pub fn run(args: TodayArgs) -> CommandResult {
    let ctx = Context::open()?;
    let series = ctx.series()?;
    let summary = TodaySummary::build(&series, &ctx.analyzer, today_or(args.today));
    print_json(&summary)
}
