//! Pricing configuration types.
//!
//! This module defines the settings of the lattice engine and the implied
//! volatility solver, and loads them from TOML or JSON files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use lattice_core::daycounts::DayCountConvention;
use lattice_pricing::binomial::{BinomialTreeEngine, MAX_STEPS};
use lattice_pricing::implied_vol::{ImpliedVolConfig, ImpliedVolatilitySolver, RootMethod};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

// =============================================================================
// PRICING CONFIGURATION
// =============================================================================

/// Pricing configuration for lattice valuation.
///
/// Every field has a default, so an empty file is a valid configuration.
///
/// ```toml
/// steps = 1000
/// day_count = "ACT/360"
///
/// [solver]
/// price_tolerance = 1e-4
/// max_volatility = 4.0
/// method = "brent"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Number of lattice time steps.
    #[serde(default = "default_steps")]
    pub steps: usize,

    /// Day count used to turn days to expiry into years.
    #[serde(default)]
    pub day_count: DayCountConvention,

    /// Implied volatility solver settings.
    #[serde(default)]
    pub solver: SolverSettings,
}

fn default_steps() -> usize {
    1000
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            day_count: DayCountConvention::default(),
            solver: SolverSettings::default(),
        }
    }
}

impl PricingConfig {
    /// Sets the number of lattice steps.
    #[must_use]
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the solver settings.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverSettings) -> Self {
        self.solver = solver;
        self
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    ///
    /// The format follows the extension: `.toml` or `.json`.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let content = std::fs::read_to_string(path)?;

        match extension.as_str() {
            "toml" => Self::from_toml_str(&content),
            "json" => Self::from_json_str(&content),
            _ => Err(ConfigError::UnsupportedFormat { extension }),
        }
    }

    /// Serializes to a TOML document.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serializes to a JSON document.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the lattice engine.
    pub fn engine(&self) -> ConfigResult<BinomialTreeEngine> {
        Ok(BinomialTreeEngine::new(self.steps)?)
    }

    /// Builds the implied volatility solver.
    pub fn solver(&self) -> ConfigResult<ImpliedVolatilitySolver> {
        Ok(ImpliedVolatilitySolver::new(
            self.solver.implied_vol_config(),
        )?)
    }
}

impl Validate for PricingConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.steps == 0 || self.steps > MAX_STEPS {
            errors.push(ValidationError::with_rule(
                "steps",
                format!("Steps must be between 1 and {MAX_STEPS}, got {}", self.steps),
                "valid_steps",
            ));
        }

        errors.extend(self.solver.validate().into_iter().map(|err| ValidationError {
            field: format!("solver.{}", err.field),
            ..err
        }));

        errors
    }
}

// =============================================================================
// SOLVER SETTINGS
// =============================================================================

/// Implied volatility solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Absolute tolerance on the repriced option.
    #[serde(default = "default_price_tolerance")]
    pub price_tolerance: f64,

    /// Tolerance on the volatility bracket half-width.
    #[serde(default = "default_volatility_tolerance")]
    pub volatility_tolerance: f64,

    /// Maximum objective evaluations.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Lower end of the volatility search domain.
    #[serde(default = "default_min_volatility")]
    pub min_volatility: f64,

    /// Upper end of the volatility search domain.
    #[serde(default = "default_max_volatility")]
    pub max_volatility: f64,

    /// Volatility the search starts from.
    #[serde(default = "default_initial_guess")]
    pub initial_guess: f64,

    /// Root-finding method.
    #[serde(default)]
    pub method: RootMethod,
}

fn default_price_tolerance() -> f64 {
    1e-4
}

fn default_volatility_tolerance() -> f64 {
    1e-8
}

fn default_max_iterations() -> u32 {
    1000
}

fn default_min_volatility() -> f64 {
    1e-6
}

fn default_max_volatility() -> f64 {
    4.0
}

fn default_initial_guess() -> f64 {
    0.20
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            price_tolerance: default_price_tolerance(),
            volatility_tolerance: default_volatility_tolerance(),
            max_iterations: default_max_iterations(),
            min_volatility: default_min_volatility(),
            max_volatility: default_max_volatility(),
            initial_guess: default_initial_guess(),
            method: RootMethod::default(),
        }
    }
}

impl SolverSettings {
    /// Sets the root-finding method.
    #[must_use]
    pub fn with_method(mut self, method: RootMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the initial guess.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Solver configuration for the pricing library.
    pub fn implied_vol_config(&self) -> ImpliedVolConfig {
        ImpliedVolConfig::default()
            .with_max_iterations(self.max_iterations)
            .with_price_tolerance(self.price_tolerance)
            .with_volatility_tolerance(self.volatility_tolerance)
            .with_bounds(self.min_volatility, self.max_volatility)
            .with_method(self.method)
    }
}

impl Validate for SolverSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.price_tolerance > 0.0 && self.price_tolerance < 1.0) {
            errors.push(ValidationError::with_rule(
                "price_tolerance",
                "Price tolerance must be between 0 and 1",
                "valid_tolerance",
            ));
        }

        if !(self.volatility_tolerance >= 0.0 && self.volatility_tolerance < 1.0) {
            errors.push(ValidationError::with_rule(
                "volatility_tolerance",
                "Volatility tolerance must be in [0, 1)",
                "valid_tolerance",
            ));
        }

        if self.max_iterations == 0 || self.max_iterations > 100_000 {
            errors.push(ValidationError::with_rule(
                "max_iterations",
                "Max iterations must be between 1 and 100000",
                "valid_iterations",
            ));
        }

        if !(self.min_volatility.is_finite() && self.min_volatility > 0.0) {
            errors.push(ValidationError::new(
                "min_volatility",
                "Minimum volatility must be positive",
            ));
        }

        if !(self.max_volatility.is_finite() && self.max_volatility > self.min_volatility) {
            errors.push(ValidationError::with_rule(
                "max_volatility",
                format!(
                    "Maximum volatility {} must exceed minimum volatility {}",
                    self.max_volatility, self.min_volatility
                ),
                "ordered_bounds",
            ));
        }

        if !(self.initial_guess.is_finite() && self.initial_guess > 0.0) {
            errors.push(ValidationError::new(
                "initial_guess",
                "Initial guess must be positive",
            ));
        }

        errors
    }
}
