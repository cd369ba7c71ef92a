//! Price command implementation.
//!
//! Prices an option at a given volatility.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use lattice_config::PricingConfig;
use lattice_core::{ExerciseStyle, OptionSpec, Volatility};
use lattice_pricing::{BinomialTreeEngine, BlackScholesEngine, OptionPricer};

use crate::cli::{EngineKind, OutputFormat};
use crate::commands::ContractArgs;
use crate::output::{print_report, KeyValue};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    #[command(flatten)]
    pub contract: ContractArgs,

    /// Volatility (decimal, 0.20 = 20%)
    #[arg(long, visible_alias = "volatility", default_value_t = 0.20)]
    pub vol: f64,

    /// Number of lattice steps. Overrides the configuration.
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,

    /// Pricing engine
    #[arg(long, value_enum, default_value = "crr")]
    pub engine: EngineKind,

    /// Average the lattice prices at n and n + 1 steps
    #[arg(long)]
    pub averaged: bool,

    /// Also report the Black-Scholes European price for comparison
    #[arg(long)]
    pub compare: bool,
}

/// Price calculation result.
#[derive(Debug, Serialize)]
pub struct PriceReport {
    pub engine: &'static str,
    pub contract: OptionSpec,
    pub spot: f64,
    pub risk_free_rate: f64,
    pub dividend_yield: f64,
    pub volatility: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub european_reference: Option<f64>,
}

/// Execute the price command.
pub fn execute(args: PriceArgs, config: &PricingConfig, format: OutputFormat) -> Result<()> {
    let (spec, market) = args.contract.build(config)?;
    let volatility = Volatility::new(args.vol)?;
    let vol = volatility.value();

    let (engine_name, price, steps) = match args.engine {
        EngineKind::Crr => {
            let engine = BinomialTreeEngine::new(args.steps.unwrap_or(config.steps))?;
            let price = if args.averaged {
                engine.price_averaged(&spec, &market, vol)?
            } else {
                engine.price(&spec, &market, vol)?
            };
            (engine.name(), price, Some(engine.steps()))
        }
        EngineKind::BlackScholes => {
            let engine = BlackScholesEngine::new();
            (engine.name(), engine.price(&spec, &market, vol)?, None)
        }
    };

    let european_reference = if args.compare {
        let european = spec.with_exercise_style(ExerciseStyle::European);
        Some(BlackScholesEngine::new().price(&european, &market, vol)?)
    } else {
        None
    };

    info!(engine = engine_name, price, "priced option");

    let mut rows = vec![
        KeyValue::new("Engine", engine_name),
        KeyValue::new(
            "Option",
            format!("{} {}", spec.exercise_style(), spec.option_type()),
        ),
        KeyValue::from_f64("Spot", market.spot(), 2),
        KeyValue::from_f64("Strike", spec.strike(), 2),
        KeyValue::from_f64("Expiry (years)", spec.time_to_expiry(), 6),
        KeyValue::from_percent("Risk-free rate", market.risk_free_rate()),
        KeyValue::from_percent("Dividend yield", market.dividend_yield()),
        KeyValue::new("Volatility", format!("{volatility:.4}")),
    ];
    if let Some(steps) = steps {
        rows.push(KeyValue::new("Steps", steps.to_string()));
    }
    rows.push(KeyValue::from_f64("Price", price, 6));
    if let Some(reference) = european_reference {
        rows.push(KeyValue::from_f64("European (BSM)", reference, 6));
        rows.push(KeyValue::from_f64(
            "Early exercise premium",
            price - reference,
            6,
        ));
    }

    let report = PriceReport {
        engine: engine_name,
        contract: spec,
        spot: market.spot(),
        risk_free_rate: market.risk_free_rate(),
        dividend_yield: market.dividend_yield(),
        volatility: vol,
        steps,
        price,
        european_reference,
    };

    print_report(
        "Option Price",
        &rows,
        &report,
        &format!("{price:.6}"),
        format,
    )
}
