//! # Lattice Core
//!
//! Core types and error definitions for the Lattice option pricing library.
//!
//! This crate provides the value types that flow through every pricing call:
//!
//! - **Types**: [`OptionSpec`], [`MarketInputs`] and the [`Volatility`] quote
//! - **Day Count Conventions**: year fractions for time to expiry
//! - **Errors**: the [`LatticeError`] taxonomy shared by engines and solvers
//!
//! ## Design Philosophy
//!
//! - **Validated at construction**: invalid inputs never reach an engine
//! - **Immutable values**: no process-wide state, safe to share across threads
//! - **Explicit time**: time to expiry is always a scalar in years
//!
//! ## Example
//!
//! ```rust
//! use lattice_core::prelude::*;
//!
//! let market = MarketInputs::new(188.64, 0.0525, 0.0052).unwrap();
//! let expiry = DayCountConvention::Act360.year_fraction_from_days(148);
//! let spec = OptionSpec::american(OptionType::Call, 190.0, expiry).unwrap();
//!
//! assert_eq!(spec.payoff(market.spot()), 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::DayCountConvention;
    pub use crate::error::{LatticeError, LatticeResult};
    pub use crate::types::{ExerciseStyle, MarketInputs, OptionSpec, OptionType, Volatility};
}

// Re-export commonly used types at crate root
pub use error::{LatticeError, LatticeResult};
pub use types::{ExerciseStyle, MarketInputs, OptionSpec, OptionType, Volatility};
