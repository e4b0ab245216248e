use chrono::NaiveDate;
use clap::Subcommand;

use super::{print_json, today_or, CommandResult, Context};

#[derive(Subcommand)]
pub enum AnalyzeAction {
    /// Detect ovulation over the stored history
    Ovulation,
    /// Classify the cycle phase
    Phase {
        /// Day to classify (YYYY-MM-DD); defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

pub fn run(action: AnalyzeAction) -> CommandResult {
    let ctx = Context::open()?;
    let series = ctx.series()?;

    match action {
        AnalyzeAction::Ovulation => {
            print_json(&ctx.analyzer.detect_ovulation_in(&series))?;
        }
        AnalyzeAction::Phase { today } => {
            let result = ctx.analyzer.detect_current_phase_in(&series, today_or(today));
            print_json(&result)?;
        }
    }
    Ok(())
}
