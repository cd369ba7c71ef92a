//! # Lattice Pricing
//!
//! Option pricing engines and the implied volatility solver.
//!
//! This crate provides:
//!
//! - **Binomial lattice**: Cox-Ross-Rubinstein tree with early exercise
//!   ([`BinomialTreeEngine`], [`BinomialTree`])
//! - **Analytic reference**: Black-Scholes-Merton European prices
//!   ([`BlackScholesEngine`])
//! - **Implied volatility**: bracketed Brent/bisection inversion of any
//!   pricing function ([`ImpliedVolatilitySolver`])
//! - **Batches**: independent pricing or solving tasks fanned out on rayon
//!
//! ## Example
//!
//! ```rust
//! use lattice_core::prelude::*;
//! use lattice_pricing::prelude::*;
//!
//! let market = MarketInputs::new(188.64, 0.0525, 0.0052).unwrap();
//! let expiry = DayCountConvention::Act360.year_fraction_from_days(148);
//! let spec = OptionSpec::american(OptionType::Call, 190.0, expiry).unwrap();
//!
//! let engine = BinomialTreeEngine::new(1000).unwrap();
//! let price = engine.price(&spec, &market, 0.20).unwrap();
//! assert!(price > 10.0 && price < 11.05);
//!
//! let solver = ImpliedVolatilitySolver::default();
//! let result = solver.solve_option(&engine, &spec, &market, 11.05, 0.20).unwrap();
//! assert!((result.volatility - 0.20).abs() < 0.02);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod analytic;
pub mod batch;
pub mod binomial;
pub mod implied_vol;
pub mod pricer;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytic::BlackScholesEngine;
    pub use crate::batch::{price_batch, solve_batch, ImpliedVolRequest, PricingRequest};
    pub use crate::binomial::{BinomialTree, BinomialTreeEngine, CrrParameters, TreeNode};
    pub use crate::implied_vol::{
        ImpliedVolConfig, ImpliedVolResult, ImpliedVolatilitySolver, RootMethod,
    };
    pub use crate::pricer::OptionPricer;
}

pub use analytic::BlackScholesEngine;
pub use binomial::{BinomialTree, BinomialTreeEngine};
pub use implied_vol::{ImpliedVolConfig, ImpliedVolResult, ImpliedVolatilitySolver, RootMethod};
pub use pricer::OptionPricer;
