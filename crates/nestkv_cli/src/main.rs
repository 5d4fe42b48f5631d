//! nestkv shell
//!
//! Reads one command per line from standard input (or a script file) and
//! runs it against an in-memory transactional store.
//!
//! # Commands
//!
//! - `SET name value`, `GET name`, `UNSET name`
//! - `NUMEQUALTO value` - count names currently set to value
//! - `BEGIN`, `ROLLBACK`, `COMMIT` - nested transaction blocks
//! - `HELP`, `END`

mod commands;
mod error;
mod report;
mod shell;

use clap::Parser;
use nestkv_core::{Config, RollbackScope, Store};
use report::StatsReport;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// In-memory key/value shell with nested transactions.
#[derive(Parser)]
#[command(name = "nestkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Script to run instead of reading standard input
    file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Maximum number of nested transaction blocks
    #[arg(long)]
    max_depth: Option<usize>,

    /// Make ROLLBACK discard every open block instead of only the newest
    #[arg(long)]
    rollback_all: bool,

    /// Print session statistics when input ends
    #[arg(long)]
    stats: bool,

    /// Statistics format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,
}

impl Cli {
    /// Store configuration selected by the command-line flags.
    fn config(&self) -> Config {
        let scope = if self.rollback_all {
            RollbackScope::All
        } else {
            RollbackScope::Innermost
        };
        Config::new()
            .max_depth(self.max_depth)
            .rollback_scope(scope)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output only.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut store = Store::with_config(cli.config());

    info!("Started nestkv v{}", nestkv_core::VERSION);

    let stdout = io::stdout();
    let summary = match &cli.file {
        Some(path) => {
            info!("Running script {:?}", path);
            shell::run(&mut store, shell::open_script(path)?, stdout.lock())?
        }
        None => shell::run(&mut store, io::stdin().lock(), stdout.lock())?,
    };

    info!(
        commands = summary.commands,
        rejected = summary.rejected,
        ended_by_command = summary.ended,
        "session finished"
    );

    if cli.stats {
        let report = StatsReport::new(&summary, &store.stats());
        println!("{}", report.render(&cli.format)?);
    }

    Ok(())
}
