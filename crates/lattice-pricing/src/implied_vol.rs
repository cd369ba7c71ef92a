//! Implied volatility solver.
//!
//! Inverts a pricing function in volatility with a bracketed root finder.
//! The pricing function is arbitrary and fallible: any closure
//! `FnMut(f64) -> LatticeResult<f64>` works, and
//! [`solve_option`](ImpliedVolatilitySolver::solve_option) wraps an
//! [`OptionPricer`].
//!
//! # Example
//!
//! ```rust
//! use lattice_pricing::implied_vol::ImpliedVolatilitySolver;
//!
//! // Price linear in volatility: 40 * vol
//! let solver = ImpliedVolatilitySolver::default();
//! let result = solver.solve(10.0, |vol| Ok(40.0 * vol), 0.5).unwrap();
//! assert!((result.volatility - 0.25).abs() < 1e-5);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use lattice_core::{LatticeError, LatticeResult, MarketInputs, OptionSpec};
use lattice_math::solvers::{bisection, brent, SolverConfig};
use lattice_math::MathError;

use crate::pricer::OptionPricer;

/// Default absolute tolerance on the price residual.
pub const DEFAULT_PRICE_TOLERANCE: f64 = 1e-4;

/// Default tolerance on the half-width of the volatility bracket.
pub const DEFAULT_VOLATILITY_TOLERANCE: f64 = 1e-8;

/// Default root-finder iteration budget, counting the initial guess.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Default lower end of the volatility search domain.
pub const DEFAULT_MIN_VOLATILITY: f64 = 1e-6;

/// Default upper end of the volatility search domain.
pub const DEFAULT_MAX_VOLATILITY: f64 = 4.0;

/// Relative margin kept above a pricer's minimum volatility.
pub const VOLATILITY_FLOOR_MARGIN: f64 = 1e-6;

/// Root-finding method used by the solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootMethod {
    /// Brent's method: inverse quadratic and secant steps with a bisection
    /// fallback.
    #[default]
    Brent,
    /// Plain interval halving.
    Bisection,
}

impl std::fmt::Display for RootMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RootMethod::Brent => write!(f, "brent"),
            RootMethod::Bisection => write!(f, "bisection"),
        }
    }
}

impl std::str::FromStr for RootMethod {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "brent" => Ok(RootMethod::Brent),
            "bisection" => Ok(RootMethod::Bisection),
            other => Err(LatticeError::invalid_input(
                "method",
                format!("unknown root method '{other}'"),
            )),
        }
    }
}

/// Settings of the implied volatility search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpliedVolConfig {
    /// Root-finder iteration budget, counting the initial guess as one.
    ///
    /// Evaluations of the search bounds are not counted.
    pub max_iterations: u32,
    /// Converged once `|price(vol) - target| < price_tolerance`.
    pub price_tolerance: f64,
    /// Converged once the bracket half-width is below this value.
    pub volatility_tolerance: f64,
    /// Lower end of the search domain.
    pub min_volatility: f64,
    /// Upper end of the search domain.
    pub max_volatility: f64,
    /// Root-finding method.
    pub method: RootMethod,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            price_tolerance: DEFAULT_PRICE_TOLERANCE,
            volatility_tolerance: DEFAULT_VOLATILITY_TOLERANCE,
            min_volatility: DEFAULT_MIN_VOLATILITY,
            max_volatility: DEFAULT_MAX_VOLATILITY,
            method: RootMethod::default(),
        }
    }
}

impl ImpliedVolConfig {
    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the price tolerance.
    #[must_use]
    pub fn with_price_tolerance(mut self, tolerance: f64) -> Self {
        self.price_tolerance = tolerance;
        self
    }

    /// Sets the volatility tolerance.
    #[must_use]
    pub fn with_volatility_tolerance(mut self, tolerance: f64) -> Self {
        self.volatility_tolerance = tolerance;
        self
    }

    /// Sets the search domain.
    #[must_use]
    pub fn with_bounds(mut self, min_volatility: f64, max_volatility: f64) -> Self {
        self.min_volatility = min_volatility;
        self.max_volatility = max_volatility;
        self
    }

    /// Sets the root-finding method.
    #[must_use]
    pub fn with_method(mut self, method: RootMethod) -> Self {
        self.method = method;
        self
    }

    /// Checks that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending field.
    pub fn validate(&self) -> LatticeResult<()> {
        if self.max_iterations == 0 {
            return Err(LatticeError::invalid_input(
                "max_iterations",
                "must be at least 1",
            ));
        }
        if !(self.price_tolerance.is_finite() && self.price_tolerance > 0.0) {
            return Err(LatticeError::invalid_input(
                "price_tolerance",
                format!("must be positive and finite, got {}", self.price_tolerance),
            ));
        }
        if !(self.volatility_tolerance.is_finite() && self.volatility_tolerance >= 0.0) {
            return Err(LatticeError::invalid_input(
                "volatility_tolerance",
                format!(
                    "must be non-negative and finite, got {}",
                    self.volatility_tolerance
                ),
            ));
        }
        if !(self.min_volatility.is_finite() && self.min_volatility > 0.0) {
            return Err(LatticeError::invalid_input(
                "min_volatility",
                format!("must be positive and finite, got {}", self.min_volatility),
            ));
        }
        if !(self.max_volatility.is_finite() && self.max_volatility > self.min_volatility) {
            return Err(LatticeError::invalid_input(
                "max_volatility",
                format!(
                    "must be finite and above min_volatility {}, got {}",
                    self.min_volatility, self.max_volatility
                ),
            ));
        }
        Ok(())
    }
}

/// Outcome of a successful implied volatility search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpliedVolResult {
    /// Implied volatility as an annualised decimal.
    pub volatility: f64,
    /// Root-finder iterations, counting the initial guess as one. Evaluations
    /// of the search bounds are not counted.
    pub iterations: u32,
    /// `price(volatility) - target` at the returned volatility.
    pub residual: f64,
}

/// Failure inside a bracketed search: either the pricing function or the
/// root finder gave up.
#[derive(Debug)]
enum SearchError {
    Pricing(LatticeError),
    Solver(MathError),
}

impl From<MathError> for SearchError {
    fn from(err: MathError) -> Self {
        SearchError::Solver(err)
    }
}

impl SearchError {
    /// Maps the failure to the public error, adding the evaluations spent
    /// before the root finder started.
    fn into_lattice(self, spent: u32) -> LatticeError {
        match self {
            SearchError::Pricing(err) => err,
            SearchError::Solver(MathError::ConvergenceFailed {
                iterations,
                residual,
            }) => LatticeError::convergence_failed(iterations + spent, residual),
            SearchError::Solver(MathError::InvalidBracket { a, b, fa, fb }) => {
                LatticeError::no_bracket(a, b, fa, fb)
            }
            SearchError::Solver(MathError::InvalidInput { reason }) => {
                LatticeError::invalid_input("solver", reason)
            }
        }
    }
}

/// Implied volatility solver.
///
/// Searches `[min_volatility, max_volatility]` for the volatility at which
/// the pricing function reproduces a target price:
///
/// 1. Evaluate the objective at both bounds. An endpoint already within
///    tolerance is returned; a missing sign change fails with `NoBracket`.
/// 2. Evaluate an interior initial guess and keep the half of the bracket
///    that still contains the sign change.
/// 3. Run Brent's method or bisection on the remaining bracket.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImpliedVolatilitySolver {
    config: ImpliedVolConfig,
}

impl ImpliedVolatilitySolver {
    /// Creates a solver with validated settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the configuration is unusable.
    pub fn new(config: ImpliedVolConfig) -> LatticeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Solver settings.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Lower search bound for a pricer whose smallest admissible volatility
    /// is `model_floor`.
    ///
    /// The floor is raised by [`VOLATILITY_FLOOR_MARGIN`] so the search never
    /// evaluates a lattice sitting exactly on the arbitrage boundary.
    pub fn effective_lower_bound(&self, model_floor: f64) -> f64 {
        self.config
            .min_volatility
            .max(model_floor * (1.0 + VOLATILITY_FLOOR_MARGIN))
    }

    /// Finds the volatility at which `pricing_fn` returns `target_price`.
    ///
    /// # Arguments
    ///
    /// * `target_price` - Observed option price, non-negative
    /// * `pricing_fn` - Price as a function of volatility; its errors abort
    ///   the search unchanged
    /// * `initial_guess` - Starting volatility; ignored unless strictly
    ///   inside the search domain
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a negative or non-finite target or guess
    /// - `NoBracket` if the objective has the same sign at both bounds
    /// - `ConvergenceFailed` if the iteration budget runs out
    /// - any error returned by `pricing_fn`
    pub fn solve<F>(
        &self,
        target_price: f64,
        pricing_fn: F,
        initial_guess: f64,
    ) -> LatticeResult<ImpliedVolResult>
    where
        F: FnMut(f64) -> LatticeResult<f64>,
    {
        self.solve_between(
            target_price,
            pricing_fn,
            initial_guess,
            self.config.min_volatility,
        )
    }

    /// Finds the implied volatility of `spec` under `pricer`.
    ///
    /// The lower bound is raised to the pricer's
    /// [`min_volatility`](OptionPricer::min_volatility), see
    /// [`effective_lower_bound`](Self::effective_lower_bound).
    ///
    /// # Errors
    ///
    /// Same as [`solve`](Self::solve). Fails with `InvalidInput` if the
    /// raised lower bound reaches `max_volatility`.
    pub fn solve_option<P>(
        &self,
        pricer: &P,
        spec: &OptionSpec,
        market: &MarketInputs,
        target_price: f64,
        initial_guess: f64,
    ) -> LatticeResult<ImpliedVolResult>
    where
        P: OptionPricer + ?Sized,
    {
        let lower = self.effective_lower_bound(pricer.min_volatility(spec, market));
        if lower >= self.config.max_volatility {
            return Err(LatticeError::invalid_input(
                "max_volatility",
                format!(
                    "{} admits no volatility below {}, which exceeds the search domain",
                    pricer.name(),
                    lower
                ),
            ));
        }

        self.solve_between(
            target_price,
            |vol| pricer.price(spec, market, vol),
            initial_guess,
            lower,
        )
    }

    fn solve_between<F>(
        &self,
        target_price: f64,
        mut pricing_fn: F,
        initial_guess: f64,
        lower: f64,
    ) -> LatticeResult<ImpliedVolResult>
    where
        F: FnMut(f64) -> LatticeResult<f64>,
    {
        if !(target_price.is_finite() && target_price >= 0.0) {
            return Err(LatticeError::invalid_input(
                "target_price",
                format!("must be non-negative and finite, got {target_price}"),
            ));
        }
        if !initial_guess.is_finite() {
            return Err(LatticeError::invalid_input(
                "initial_guess",
                format!("must be finite, got {initial_guess}"),
            ));
        }

        let tolerance = self.config.price_tolerance;
        let upper = self.config.max_volatility;
        let mut objective = |vol: f64| pricing_fn(vol).map(|price| price - target_price);

        let f_lower = objective(lower)?;
        if f_lower.abs() < tolerance {
            return Ok(self.converged(lower, 0, f_lower));
        }
        let f_upper = objective(upper)?;
        if f_upper.abs() < tolerance {
            return Ok(self.converged(upper, 0, f_upper));
        }
        if f_lower.signum() == f_upper.signum() {
            debug!(lower, upper, f_lower, f_upper, "implied volatility not bracketed");
            return Err(LatticeError::no_bracket(lower, upper, f_lower, f_upper));
        }

        let mut a = lower;
        let mut b = upper;
        let mut spent = 0;
        if initial_guess > lower && initial_guess < upper {
            let f_guess = objective(initial_guess)?;
            spent = 1;
            if f_guess.abs() < tolerance {
                return Ok(self.converged(initial_guess, spent, f_guess));
            }
            if f_guess.signum() == f_lower.signum() {
                a = initial_guess;
            } else {
                b = initial_guess;
            }
        }

        let solver_config =
            SolverConfig::new(tolerance, self.config.max_iterations.saturating_sub(spent))
                .with_x_tolerance(self.config.volatility_tolerance);
        let mut search = |vol: f64| objective(vol).map_err(SearchError::Pricing);

        let outcome = match self.config.method {
            RootMethod::Brent => brent(&mut search, a, b, &solver_config),
            RootMethod::Bisection => bisection(&mut search, a, b, &solver_config),
        };

        match outcome {
            Ok(result) => Ok(self.converged(
                result.root,
                result.iterations + spent,
                result.residual,
            )),
            Err(err) => {
                let err = err.into_lattice(spent);
                debug!(
                    method = %self.config.method,
                    error = %err,
                    "implied volatility search failed"
                );
                Err(err)
            }
        }
    }

    fn converged(&self, volatility: f64, iterations: u32, residual: f64) -> ImpliedVolResult {
        debug!(
            method = %self.config.method,
            volatility,
            iterations,
            residual,
            "implied volatility solved"
        );
        ImpliedVolResult {
            volatility,
            iterations,
            residual,
        }
    }
}
