//! Lattice CLI - Command-line interface for American option pricing.
//!
//! # Usage
//!
//! ```bash
//! # Price the reference American call at 20% volatility
//! lattice price
//!
//! # Price a European put with 2000 lattice steps
//! lattice price --type put --exercise european --strike 180 --steps 2000
//!
//! # Implied volatility of an observed price
//! lattice implied-vol --target 11.05
//!
//! # Same, with settings from a file and JSON output
//! lattice --config pricing.toml --format json implied-vol --target 11.05
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lattice_config::PricingConfig;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() {
    if let Err(err) = run() {
        output::print_error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.config {
        Some(ref path) => PricingConfig::from_path(path)?,
        None => PricingConfig::default(),
    };
    tracing::debug!(?config, "loaded pricing configuration");

    // Set up output format
    let format = cli.format;

    // Execute command
    match cli.command {
        Commands::Price(args) => commands::price::execute(args, &config, format)?,
        Commands::ImpliedVol(args) => commands::implied_vol::execute(args, &config, format)?,
        Commands::Config(args) => commands::config::execute(args, &config, format)?,
    }

    Ok(())
}

/// Installs the log subscriber. `RUST_LOG` wins over `-v` flags.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
