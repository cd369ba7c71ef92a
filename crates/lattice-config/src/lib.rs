//! Lattice Configuration Layer
//!
//! This crate loads and validates the settings of the Lattice pricing
//! library: the number of lattice steps, the day count used for expiries,
//! and the implied volatility solver.
//!
//! # Features
//!
//! - **Pricing Configuration**: lattice steps, day count convention
//! - **Solver Settings**: tolerances, iteration budget, volatility bounds, method
//! - **File Loading**: TOML or JSON, chosen by file extension
//! - **Validation**: every invalid field reported at once
//!
//! # Example
//!
//! ```rust
//! use lattice_config::PricingConfig;
//!
//! let config = PricingConfig::from_toml_str(
//!     r#"
//!     steps = 500
//!
//!     [solver]
//!     method = "bisection"
//!     "#,
//! )
//! .unwrap();
//!
//! let engine = config.engine().unwrap();
//! assert_eq!(engine.steps(), 500);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod pricing;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use pricing::{PricingConfig, SolverSettings};
