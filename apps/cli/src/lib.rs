pub mod config;
pub mod shell;
pub mod status;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use palabra_core::{adjusted_today, Mode, TextFileStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::shell::Shell;

/// Palabra - spaced-repetition vocabulary trainer
#[derive(Debug, Parser)]
#[command(name = "palabra")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Practice vocabulary from plain text files with 5- and 15-day review tiers")]
pub struct Cli {
    /// Directory holding dictionary.txt and the queue files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Local hour (0-23) at which a new study day begins
    #[arg(long, global = true)]
    pub reset_hour: Option<u32>,

    /// Mode to start in: new, review, 5day, 15day or today
    #[arg(long, global = true, value_parser = parse_mode)]
    pub mode: Option<Mode>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Practice interactively (default)
    Practice,

    /// Show how many words each mode has due
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn parse_mode(raw: &str) -> Result<Mode, String> {
    Mode::from_str(raw).ok_or_else(|| format!("unknown mode '{raw}'"))
}

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.data_dir, cli.reset_hour, cli.mode)?;
    tracing::debug!(?config, "loaded configuration");

    let store = TextFileStore::open(&config.data_dir);
    let reset_hour = config.daily_reset_hour;

    match cli.command.unwrap_or(Commands::Practice) {
        Commands::Practice => {
            let mut shell = Shell::start(&store, config.start_mode, rand::rng(), move || {
                adjusted_today(reset_hour)
            })?;
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            shell.run(stdin.lock(), &mut stdout)?;
        }
        Commands::Status { json } => {
            let report = status::collect(&store, adjusted_today(reset_hour))?;
            status::render(&report, json, &mut io::stdout())?;
        }
    }

    Ok(())
}
