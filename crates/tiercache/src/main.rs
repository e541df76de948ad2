//! TierCache - command driver for the multilevel in-memory cache

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;

use config::{Config, LoggingConfig};
use tiercache_core::CacheChain;

/// TierCache - replay cache commands against a configured level chain
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", env = "TIERCACHE_CONFIG")]
    config: String,

    /// Command script to run (reads stdin when omitted)
    #[arg(short, long)]
    script: Option<String>,

    /// Print `list` and `stats` output as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config)?;

    init_logging(&config.logging);

    info!("Starting TierCache v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let mut chain = CacheChain::from_config(&config.levels)
        .with_context(|| format!("Invalid level configuration in {}", args.config))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let rejected = match &args.script {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open script: {}", path))?;
            commands::run_script(&mut chain, BufReader::new(file), &mut out, args.json)?
        }
        None => commands::run_script(&mut chain, io::stdin().lock(), &mut out, args.json)?,
    };

    if rejected > 0 {
        warn!("{} command line(s) could not be parsed", rejected);
    }

    info!("Finished: {}", chain.stats());
    Ok(())
}

/// Initialize logging
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Logs go to stderr so command output on stdout stays clean
    if logging.is_json() {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(filter)
            .init();
    }
}
