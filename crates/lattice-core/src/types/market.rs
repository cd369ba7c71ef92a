//! Flat market inputs.

use serde::Serialize;

use crate::error::{require_finite, require_positive, LatticeResult};

/// Immutable bundle of market data for a single underlying.
///
/// Rates are annualised and continuously compounded. Only the spot carries a
/// sign constraint; negative rates and yields are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketInputs {
    spot: f64,
    risk_free_rate: f64,
    dividend_yield: f64,
}

impl MarketInputs {
    /// Creates validated market inputs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `spot` is not strictly positive or either rate
    /// is not finite.
    pub fn new(spot: f64, risk_free_rate: f64, dividend_yield: f64) -> LatticeResult<Self> {
        Ok(Self {
            spot: require_positive("spot", spot)?,
            risk_free_rate: require_finite("risk_free_rate", risk_free_rate)?,
            dividend_yield: require_finite("dividend_yield", dividend_yield)?,
        })
    }

    /// Spot price of the underlying.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Risk-free rate.
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Continuous dividend yield.
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Risk-neutral drift `r - q`.
    pub fn carry(&self) -> f64 {
        self.risk_free_rate - self.dividend_yield
    }

    /// Forward price of the underlying at time `t`.
    pub fn forward(&self, t: f64) -> f64 {
        self.spot * (self.carry() * t).exp()
    }

    /// Discount factor to time `t`.
    pub fn discount_factor(&self, t: f64) -> f64 {
        (-self.risk_free_rate * t).exp()
    }
}
