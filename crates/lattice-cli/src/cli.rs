//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, ImpliedVolArgs, PriceArgs};

/// Lattice - American option pricing and implied volatility
#[derive(Parser)]
#[command(name = "lattice")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Pricing configuration file (.toml or .json)
    #[arg(short, long, global = true, env = "LATTICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Price an option at a given volatility
    Price(PriceArgs),

    /// Solve for the volatility that reproduces an observed option price
    ImpliedVol(ImpliedVolArgs),

    /// Show the effective pricing configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Minimal output (just the value)
    Minimal,
}

/// Pricing engine selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EngineKind {
    /// Cox-Ross-Rubinstein binomial lattice
    #[default]
    Crr,
    /// Black-Scholes-Merton closed form (European exercise only)
    BlackScholes,
}
