//! CLI command implementations.

pub mod config;
pub mod implied_vol;
pub mod price;

pub use config::ConfigArgs;
pub use implied_vol::ImpliedVolArgs;
pub use price::PriceArgs;

use chrono::NaiveDate;
use clap::Args;

use lattice_config::PricingConfig;
use lattice_core::daycounts::DayCountConvention;
use lattice_core::{ExerciseStyle, MarketInputs, OptionSpec, OptionType};
use lattice_pricing::{BinomialTreeEngine, BlackScholesEngine, OptionPricer};

use crate::cli::EngineKind;
use crate::error::{CliError, CliResult};

/// Contract and market inputs shared by every pricing command.
///
/// Defaults reproduce the reference quote: an American call struck at 190
/// on an underlying at 188.64, 148 days to expiry.
#[derive(Args, Debug, Clone)]
pub struct ContractArgs {
    /// Spot price of the underlying
    #[arg(long, default_value_t = 188.64)]
    pub spot: f64,

    /// Strike price
    #[arg(short = 'k', long, default_value_t = 190.0)]
    pub strike: f64,

    /// Continuously compounded risk-free rate (decimal, 0.0525 = 5.25%)
    #[arg(short, long, default_value_t = 0.0525, allow_negative_numbers = true)]
    pub rate: f64,

    /// Continuous dividend yield (decimal)
    #[arg(short, long, default_value_t = 0.0052, allow_negative_numbers = true)]
    pub dividend: f64,

    /// Calendar days to expiry
    #[arg(long, default_value_t = 148, conflicts_with = "expiry")]
    pub days: i64,

    /// Expiry date (YYYY-MM-DD); replaces --days
    #[arg(long)]
    pub expiry: Option<String>,

    /// Valuation date (YYYY-MM-DD) used with --expiry. Defaults to today.
    #[arg(long, requires = "expiry")]
    pub valuation: Option<String>,

    /// Day count convention (ACT/360, ACT/365F). Overrides the configuration.
    #[arg(long)]
    pub day_count: Option<DayCountConvention>,

    /// Option type (call, put)
    #[arg(short = 't', long = "type", default_value = "call")]
    pub option_type: OptionType,

    /// Exercise style (american, european)
    #[arg(short = 'e', long = "exercise", default_value = "american")]
    pub exercise_style: ExerciseStyle,
}

impl ContractArgs {
    /// Day count to use, the command line taking precedence over `config`.
    pub fn day_count(&self, config: &PricingConfig) -> DayCountConvention {
        self.day_count.unwrap_or(config.day_count)
    }

    /// Time to expiry in years.
    pub fn time_to_expiry(&self, day_count: DayCountConvention) -> CliResult<f64> {
        let Some(ref expiry) = self.expiry else {
            return Ok(day_count.year_fraction_from_days(self.days));
        };

        let expiry = parse_date(expiry)?;
        let valuation = match self.valuation {
            Some(ref valuation) => parse_date(valuation)?,
            None => chrono::Local::now().date_naive(),
        };
        if expiry <= valuation {
            return Err(CliError::ExpiryNotAfterValuation {
                expiry: expiry.to_string(),
                valuation: valuation.to_string(),
            });
        }
        Ok(day_count.year_fraction(valuation, expiry))
    }

    /// Builds the validated contract and market data.
    pub fn build(&self, config: &PricingConfig) -> anyhow::Result<(OptionSpec, MarketInputs)> {
        let expiry = self.time_to_expiry(self.day_count(config))?;
        let spec = OptionSpec::new(self.option_type, self.strike, expiry, self.exercise_style)?;
        let market = MarketInputs::new(self.spot, self.rate, self.dividend)?;
        Ok((spec, market))
    }
}

/// Builds the requested pricing engine.
pub fn build_pricer(
    kind: EngineKind,
    steps: Option<usize>,
    config: &PricingConfig,
) -> anyhow::Result<Box<dyn OptionPricer>> {
    Ok(match kind {
        EngineKind::Crr => Box::new(BinomialTreeEngine::new(steps.unwrap_or(config.steps))?),
        EngineKind::BlackScholes => Box::new(BlackScholesEngine::new()),
    })
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}
