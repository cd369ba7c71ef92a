//! Black-Scholes-Merton analytic engine.
//!
//! Closed-form prices for European options on an underlying paying a
//! continuous dividend yield. Serves as the convergence reference for the
//! binomial lattice and as an inexpensive pricer for the implied volatility
//! solver.

use lattice_core::{LatticeError, LatticeResult, MarketInputs, OptionSpec, OptionType};
use lattice_math::distributions::normal_cdf;

use crate::pricer::OptionPricer;

/// Black-Scholes-Merton pricer for European exercise.
///
/// ```text
/// d1 = (ln(F / K) + vol^2 T / 2) / (vol sqrt(T))
/// d2 = d1 - vol sqrt(T)
/// C  = DF (F N(d1) - K N(d2))
/// P  = DF (K N(-d2) - F N(-d1))
/// ```
///
/// where `F = S exp((r - q) T)` and `DF = exp(-r T)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackScholesEngine;

impl BlackScholesEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }

    /// Prices a European option.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` with field `exercise_style` for American options
    /// - `InvalidInput` with field `volatility` if it is not positive and finite
    pub fn price(
        &self,
        spec: &OptionSpec,
        market: &MarketInputs,
        volatility: f64,
    ) -> LatticeResult<f64> {
        if spec.exercise_style().allows_early_exercise() {
            return Err(LatticeError::invalid_input(
                "exercise_style",
                "closed-form prices exist only for European exercise",
            ));
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(LatticeError::invalid_input(
                "volatility",
                format!("must be positive and finite, got {volatility}"),
            ));
        }

        let t = spec.time_to_expiry();
        let strike = spec.strike();
        let forward = market.forward(t);
        let discount = market.discount_factor(t);

        let std_dev = volatility * t.sqrt();
        let d1 = ((forward / strike).ln() + 0.5 * std_dev * std_dev) / std_dev;
        let d2 = d1 - std_dev;

        let price = match spec.option_type() {
            OptionType::Call => discount * (forward * normal_cdf(d1) - strike * normal_cdf(d2)),
            OptionType::Put => discount * (strike * normal_cdf(-d2) - forward * normal_cdf(-d1)),
        };

        Ok(price.max(0.0))
    }
}

impl OptionPricer for BlackScholesEngine {
    fn price(
        &self,
        spec: &OptionSpec,
        market: &MarketInputs,
        volatility: f64,
    ) -> LatticeResult<f64> {
        BlackScholesEngine::price(self, spec, market, volatility)
    }

    fn name(&self) -> &'static str {
        "Black-Scholes-Merton"
    }
}
