use luna_core::ChartData;

use super::{print_json, CommandResult, Context};

pub fn run() -> CommandResult {
    let ctx = Context::open()?;
    let series = ctx.series()?;
    print_json(&ChartData::build(&series, &ctx.analyzer))
}
