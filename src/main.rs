mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use codolio_core::OutputMode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codolio-ics")]
#[command(about = "Turn the Codolio contest feed into subscribable ICS calendars")]
struct Cli {
    /// Config file (defaults to ~/.config/codolio-ics/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the contest feed and write the calendar files
    Generate {
        /// Which files to write: global, per-platform or both
        #[arg(short, long)]
        mode: Option<OutputMode>,

        /// Directory the .ics files are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Platform to write a calendar for (repeatable, replaces the configured list)
        #[arg(short, long = "platform")]
        platforms: Vec<String>,

        /// Feed URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Read the feed from a saved JSON file instead of fetching it
        #[arg(short, long, conflicts_with = "endpoint")]
        input: Option<PathBuf>,

        /// Build every calendar but write nothing
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            mode,
            output_dir,
            platforms,
            endpoint,
            input,
            dry_run,
        } => {
            let overrides = commands::generate::Overrides {
                mode,
                output_dir,
                platforms,
                endpoint,
            };
            let options = commands::generate::RunOptions { input, dry_run };
            commands::generate::run(cli.config.as_deref(), overrides, options).await
        }
        Commands::Config => commands::config::run(cli.config.as_deref()),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
