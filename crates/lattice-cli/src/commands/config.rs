//! Config command implementation.
//!
//! Shows the effective pricing configuration.

use anyhow::Result;
use clap::{Args, Subcommand};

use lattice_config::PricingConfig;

use crate::cli::OutputFormat;
use crate::output::{print_report, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the configuration in effect (file settings over defaults)
    Show,

    /// Print the default configuration as a TOML document
    Default,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, config: &PricingConfig, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(config, format),
        ConfigCommand::Default => {
            print!("{}", PricingConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn show(config: &PricingConfig, format: OutputFormat) -> Result<()> {
    let solver = &config.solver;
    let rows = vec![
        KeyValue::new("Steps", config.steps.to_string()),
        KeyValue::new("Day count", config.day_count.to_string()),
        KeyValue::new("Method", solver.method.to_string()),
        KeyValue::new("Price tolerance", format!("{:e}", solver.price_tolerance)),
        KeyValue::new(
            "Volatility tolerance",
            format!("{:e}", solver.volatility_tolerance),
        ),
        KeyValue::new("Max iterations", solver.max_iterations.to_string()),
        KeyValue::new(
            "Volatility bounds",
            format!("[{}, {}]", solver.min_volatility, solver.max_volatility),
        ),
        KeyValue::new("Initial guess", solver.initial_guess.to_string()),
    ];

    print_report(
        "Pricing Configuration",
        &rows,
        config,
        &config.to_toml_string()?,
        format,
    )
}
