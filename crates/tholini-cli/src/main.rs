use clap::{Parser, Subcommand};
use tholini_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "tholini", version, about = "Tholini skincare assistant CLI")]
struct Cli {
    /// Use a throwaway in-memory store instead of the database
    #[arg(long, global = true)]
    memory: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Routine steps and progress
    Routine {
        #[command(subcommand)]
        action: commands::routine::RoutineAction,
    },
    /// Daily completion history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Talk to the skincare assistant
    Chat {
        #[command(subcommand)]
        action: commands::chat::ChatAction,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> commands::CommandResult {
    let config = Config::load()?;
    init_logging(&config);

    let ctx = Context {
        config,
        memory: cli.memory,
    };
    match cli.command {
        Commands::Routine { action } => commands::routine::run(action, &ctx),
        Commands::History { action } => commands::history::run(action, &ctx),
        Commands::Config { action } => commands::config::run(action, ctx),
        Commands::Chat { action } => commands::chat::run(action, &ctx),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
