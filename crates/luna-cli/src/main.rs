use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "luna", version, about = "Basal body temperature cycle tracker")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Temperature readings
    Reading {
        #[command(subcommand)]
        action: commands::reading::ReadingAction,
    },
    /// Ovulation and phase analysis
    Analyze {
        #[command(subcommand)]
        action: commands::analyze::AnalyzeAction,
    },
    /// Today's summary
    Today(commands::today::TodayArgs),
    /// Month view with phases
    Calendar(commands::calendar::CalendarArgs),
    /// Temperature chart data
    Chart,
    /// Tips for the current phase
    Tips(commands::tips::TipsArgs),
    /// Reading statistics
    Stats,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Reading { action } => commands::reading::run(action),
        Commands::Analyze { action } => commands::analyze::run(action),
        Commands::Today(args) => commands::today::run(args),
        Commands::Calendar(args) => commands::calendar::run(args),
        Commands::Chart => commands::chart::run(),
        Commands::Tips(args) => commands::tips::run(args),
        Commands::Stats => commands::stats::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
