use clap::Args;
use luna_core::tips::{tips_for_name, TipsReport};

use super::{print_json, today_or, CommandResult, Context};

#[derive(Args)]
pub struct TipsArgs {
    /// Show tips for this phase (e.g. "luteal") instead of the current one
    #[arg(long)]
    pub phase: Option<String>,
}

pub fn run(args: TipsArgs) -> CommandResult {
    let phase = match args.phase {
        Some(name) => tips_for_name(&name).phase,
        None => {
            let ctx = Context::open()?;
            let series = ctx.series()?;
            ctx.analyzer
                .detect_current_phase_in(&series, today_or(None))
                .phase
        }
    };
    print_json(&TipsReport::for_phase(phase))
}
