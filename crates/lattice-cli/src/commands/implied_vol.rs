//! Implied volatility command implementation.
//!
//! Solves for the volatility at which the model reproduces an observed
//! option price.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;

use lattice_config::PricingConfig;
use lattice_core::{OptionSpec, Volatility};
use lattice_pricing::implied_vol::{ImpliedVolResult, ImpliedVolatilitySolver, RootMethod};

use crate::cli::{EngineKind, OutputFormat};
use crate::commands::{build_pricer, ContractArgs};
use crate::output::{print_report, KeyValue};

/// Arguments for the implied-vol command.
#[derive(Args, Debug)]
pub struct ImpliedVolArgs {
    #[command(flatten)]
    pub contract: ContractArgs,

    /// Observed option price
    #[arg(short = 'p', long, default_value_t = 11.05)]
    pub target: f64,

    /// Starting volatility. Overrides the configuration.
    #[arg(short = 'g', long)]
    pub guess: Option<f64>,

    /// Number of lattice steps. Overrides the configuration.
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,

    /// Root-finding method (brent, bisection). Overrides the configuration.
    #[arg(short = 'm', long)]
    pub method: Option<RootMethod>,

    /// Pricing engine
    #[arg(long, value_enum, default_value = "crr")]
    pub engine: EngineKind,
}

/// Implied volatility result.
#[derive(Debug, Serialize)]
pub struct ImpliedVolReport {
    pub engine: &'static str,
    pub method: RootMethod,
    pub contract: OptionSpec,
    pub spot: f64,
    pub risk_free_rate: f64,
    pub dividend_yield: f64,
    pub target_price: f64,
    #[serde(flatten)]
    pub result: ImpliedVolResult,
    pub repriced: f64,
}

/// Execute the implied-vol command.
pub fn execute(args: ImpliedVolArgs, config: &PricingConfig, format: OutputFormat) -> Result<()> {
    let (spec, market) = args.contract.build(config)?;
    let pricer = build_pricer(args.engine, args.steps, config)?;

    let mut settings = config.solver;
    if let Some(method) = args.method {
        settings.method = method;
    }
    let solver = ImpliedVolatilitySolver::new(settings.implied_vol_config())?;
    let guess = args.guess.unwrap_or(settings.initial_guess);

    let result = solver
        .solve_option(pricer.as_ref(), &spec, &market, args.target, guess)
        .with_context(|| {
            format!(
                "no implied volatility for target price {} under {}",
                args.target,
                pricer.name()
            )
        })?;
    let repriced = pricer.price(&spec, &market, result.volatility)?;

    info!(
        volatility = result.volatility,
        iterations = result.iterations,
        "solved implied volatility"
    );

    let volatility = Volatility::new(result.volatility)?;
    let rows = vec![
        KeyValue::new("Engine", pricer.name()),
        KeyValue::new("Method", settings.method.to_string()),
        KeyValue::new(
            "Option",
            format!("{} {}", spec.exercise_style(), spec.option_type()),
        ),
        KeyValue::from_f64("Spot", market.spot(), 2),
        KeyValue::from_f64("Strike", spec.strike(), 2),
        KeyValue::from_f64("Expiry (years)", spec.time_to_expiry(), 6),
        KeyValue::from_f64("Target price", args.target, 6),
        KeyValue::new("Implied volatility", format!("{volatility:.4}")),
        KeyValue::new("Iterations", result.iterations.to_string()),
        KeyValue::from_f64("Repriced", repriced, 6),
    ];

    let report = ImpliedVolReport {
        engine: pricer.name(),
        method: settings.method,
        contract: spec,
        spot: market.spot(),
        risk_free_rate: market.risk_free_rate(),
        dividend_yield: market.dividend_yield(),
        target_price: args.target,
        result,
        repriced,
    };

    print_report(
        "Implied Volatility",
        &rows,
        &report,
        &volatility.to_string(),
        format,
    )
}
