//! # Lattice Math
//!
//! Numerical utilities for the Lattice option pricing library.
//!
//! This crate provides:
//!
//! - **Solvers**: Bracketing root finders (Brent, Bisection) over fallible
//!   objectives
//! - **Distributions**: Standard normal CDF and PDF
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: Same objective, same iterates
//! - **Fallible objectives**: Errors raised while evaluating the objective
//!   propagate unchanged through the solver

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod distributions;
pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::normal_cdf;
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{bisection, brent, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
