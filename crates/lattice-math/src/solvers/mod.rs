//! Root-finding algorithms.
//!
//! This module provides bracketing solvers for objectives that may fail:
//!
//! - [`brent`]: Robust method combining bisection, secant, and inverse quadratic
//! - [`bisection`]: Simple and reliable bracketing method
//!
//! Both take an objective `FnMut(f64) -> Result<f64, E>`. Errors raised by the
//! objective are returned as-is; solver failures are converted into `E`
//! through `From<MathError>`. For infallible objectives use `MathError` as the
//! error type.
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//!
//! # Example
//!
//! ```rust
//! use lattice_math::solvers::{brent, SolverConfig};
//! use lattice_math::MathError;
//!
//! let f = |x: f64| Ok::<_, MathError>(x * x - 2.0);
//!
//! let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod bisection;
mod brent;

pub use bisection::bisection;
pub use brent::brent;

/// Default tolerance on the objective value.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default tolerance on the bracket width.
pub const DEFAULT_X_TOLERANCE: f64 = 1e-12;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence when `|f(x)|` falls below this value.
    pub tolerance: f64,
    /// Convergence when the bracket half-width falls below this value.
    pub x_tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            x_tolerance: DEFAULT_X_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with the default bracket tolerance.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            x_tolerance: DEFAULT_X_TOLERANCE,
            max_iterations,
        }
    }

    /// Sets the tolerance on the objective value.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the tolerance on the bracket width.
    #[must_use]
    pub fn with_x_tolerance(mut self, x_tolerance: f64) -> Self {
        self.x_tolerance = x_tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

/// Returns true if `fa` and `fb` have strictly the same sign.
#[inline]
pub(crate) fn same_sign(fa: f64, fb: f64) -> bool {
    (fa > 0.0 && fb > 0.0) || (fa < 0.0 && fb < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MathError;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_x_tolerance(1e-9)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert!((config.x_tolerance - 1e-9).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_same_sign() {
        assert!(same_sign(1.0, 2.0));
        assert!(same_sign(-1.0, -2.0));
        assert!(!same_sign(-1.0, 2.0));
        assert!(!same_sign(0.0, 2.0));
    }

    #[test]
    fn test_solvers_agree() {
        // Discount factor: find the rate giving exp(-5r) = 0.8
        let f = |r: f64| Ok::<_, MathError>((-5.0 * r).exp() - 0.8);
        let config = SolverConfig::default();

        let brent_result = brent(f, 0.0, 0.2, &config).unwrap();
        let bisection_result = bisection(f, 0.0, 0.2, &config).unwrap();

        let expected = -(0.8_f64).ln() / 5.0;
        assert_relative_eq!(brent_result.root, expected, epsilon = 1e-9);
        assert_relative_eq!(bisection_result.root, expected, epsilon = 1e-9);
        assert!(brent_result.iterations < bisection_result.iterations);
    }

    #[derive(Debug, PartialEq)]
    enum PricingFailure {
        Model,
        Solver(MathError),
    }

    impl From<MathError> for PricingFailure {
        fn from(err: MathError) -> Self {
            PricingFailure::Solver(err)
        }
    }

    #[test]
    fn test_objective_error_propagates() {
        let f = |x: f64| {
            if x > 1.5 {
                Err(PricingFailure::Model)
            } else {
                Ok(x - 1.0)
            }
        };

        let brent_err = brent(f, 0.0, 2.0, &SolverConfig::default()).unwrap_err();
        assert_eq!(brent_err, PricingFailure::Model);

        let bisection_err = bisection(f, 0.0, 2.0, &SolverConfig::default()).unwrap_err();
        assert_eq!(bisection_err, PricingFailure::Model);
    }

    #[test]
    fn test_solver_failure_converts() {
        let f = |x: f64| Ok::<_, PricingFailure>(x * x + 1.0);

        let err = brent(f, -1.0, 1.0, &SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PricingFailure::Solver(MathError::InvalidBracket { .. })
        ));
    }
}
