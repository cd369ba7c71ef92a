//! Quoted scalars.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, LatticeError, LatticeResult};

/// An annualised volatility quote, stored as a decimal (0.1889 = 18.89%).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volatility(f64);

impl Volatility {
    /// Creates a volatility from a decimal value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for negative or non-finite values.
    pub fn new(value: f64) -> LatticeResult<Self> {
        let value = require_finite("volatility", value)?;
        if value < 0.0 {
            return Err(LatticeError::invalid_input(
                "volatility",
                format!("must be non-negative, got {value}"),
            ));
        }
        Ok(Self(value))
    }

    /// Creates a volatility from a percentage (18.89 = 0.1889).
    pub fn from_percent(percent: f64) -> LatticeResult<Self> {
        Self::new(percent / 100.0)
    }

    /// The decimal value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// The value in percent.
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        write!(f, "{:.*}%", precision, self.as_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percent_conversion() {
        let vol = Volatility::from_percent(18.89).unwrap();
        assert_relative_eq!(vol.value(), 0.1889, epsilon = 1e-15);
        assert_relative_eq!(vol.as_percent(), 18.89, epsilon = 1e-12);
    }

    #[test]
    fn test_display() {
        let vol = Volatility::new(0.1889).unwrap();
        assert_eq!(vol.to_string(), "18.89%");
        assert_eq!(format!("{:.4}", vol), "18.8900%");
    }

    #[test]
    fn test_negative_rejected() {
        assert!(Volatility::new(-0.01).is_err());
        assert!(Volatility::new(f64::NAN).is_err());
        assert!(Volatility::new(0.0).is_ok());
    }

    #[test]
    fn test_serde_transparent() {
        let vol = Volatility::new(0.25).unwrap();
        assert_eq!(serde_json::to_string(&vol).unwrap(), "0.25");
    }
}
