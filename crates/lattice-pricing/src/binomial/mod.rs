//! Cox-Ross-Rubinstein binomial lattice pricing.
//!
//! [`BinomialTreeEngine`] prices vanilla calls and puts with American or
//! European exercise. [`BinomialTree`] materialises every node of the
//! lattice for inspection of node values and exercise boundaries.
//!
//! # Model
//!
//! Over `n` steps of length `dt = T / n` the underlying moves up by
//! `u = exp(vol * sqrt(dt))` or down by `d = 1 / u`, with risk-neutral up
//! probability `p = (exp((r - q) dt) - d) / (u - d)`. Option values are
//! discounted back one step at a time at `exp(-r dt)`.

mod engine;
mod tree;

pub use engine::{BinomialTreeEngine, MAX_STEPS};
pub use tree::{BinomialTree, CrrParameters, TreeNode, MAX_LOG_LEVEL, MAX_TREE_STEPS};
