//! Error types for the Lattice library.
//!
//! Every pricing or solving call either succeeds completely or fails with
//! one of the variants below. Nothing is clamped or defaulted silently.

use thiserror::Error;

/// A specialized Result type for Lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;

/// The main error type for Lattice operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// Malformed option, market or engine input.
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput {
        /// Name of the offending field.
        field: &'static str,
        /// Description of what's invalid.
        reason: String,
    },

    /// Risk-neutral probability outside [0, 1] for the lattice parameters.
    #[error(
        "Invalid model: risk-neutral probability {probability:.6} outside [0, 1] \
         (volatility {volatility}, dt {dt:.6e})"
    )]
    InvalidModel {
        /// The up-move probability that was derived.
        probability: f64,
        /// Volatility used to build the lattice.
        volatility: f64,
        /// Time step of the lattice in years.
        dt: f64,
    },

    /// The objective does not change sign over the searched volatility domain.
    #[error(
        "No bracket: f({lower}) = {f_lower:.6e} and f({upper}) = {f_upper:.6e} have the same sign"
    )]
    NoBracket {
        /// Lower end of the searched volatility domain.
        lower: f64,
        /// Upper end of the searched volatility domain.
        upper: f64,
        /// Objective value at the lower end.
        f_lower: f64,
        /// Objective value at the upper end.
        f_upper: f64,
    },

    /// Numerical solver failed to converge.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },
}

impl LatticeError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Creates an invalid model error.
    #[must_use]
    pub fn invalid_model(probability: f64, volatility: f64, dt: f64) -> Self {
        Self::InvalidModel {
            probability,
            volatility,
            dt,
        }
    }

    /// Creates a no-bracket error.
    #[must_use]
    pub fn no_bracket(lower: f64, upper: f64, f_lower: f64, f_upper: f64) -> Self {
        Self::NoBracket {
            lower,
            upper,
            f_lower,
            f_upper,
        }
    }

    /// Creates a convergence failure error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn require_positive(field: &'static str, value: f64) -> LatticeResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LatticeError::invalid_input(
            field,
            format!("must be positive and finite, got {value}"),
        ))
    }
}

/// Checks that `value` is finite.
pub(crate) fn require_finite(field: &'static str, value: f64) -> LatticeResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LatticeError::invalid_input(
            field,
            format!("must be finite, got {value}"),
        ))
    }
}
