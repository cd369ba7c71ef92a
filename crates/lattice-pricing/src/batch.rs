//! Parallel batch pricing and implied volatility.
//!
//! Every request is independent: the batch fans out over the rayon thread
//! pool, one task per request, and returns results in input order. A failed
//! request does not affect the others.

use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use lattice_core::{LatticeResult, MarketInputs, OptionSpec};

use crate::implied_vol::{ImpliedVolResult, ImpliedVolatilitySolver};
use crate::pricer::OptionPricer;

/// One option to price at a given volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingRequest {
    /// Contract.
    pub spec: OptionSpec,
    /// Market data.
    pub market: MarketInputs,
    /// Volatility to price at.
    pub volatility: f64,
}

/// One option whose implied volatility is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpliedVolRequest {
    /// Contract.
    pub spec: OptionSpec,
    /// Market data.
    pub market: MarketInputs,
    /// Observed option price.
    pub target_price: f64,
    /// Starting volatility for the search.
    pub initial_guess: f64,
}

/// Prices every request in parallel.
pub fn price_batch<P>(pricer: &P, requests: &[PricingRequest]) -> Vec<LatticeResult<f64>>
where
    P: OptionPricer + ?Sized,
{
    let start = Instant::now();
    let results: Vec<_> = requests
        .par_iter()
        .map(|request| pricer.price(&request.spec, &request.market, request.volatility))
        .collect();

    info!(
        pricer = pricer.name(),
        requests = requests.len(),
        failed = results.iter().filter(|r| r.is_err()).count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "priced batch"
    );
    results
}

/// Solves every request for its implied volatility in parallel.
pub fn solve_batch<P>(
    solver: &ImpliedVolatilitySolver,
    pricer: &P,
    requests: &[ImpliedVolRequest],
) -> Vec<LatticeResult<ImpliedVolResult>>
where
    P: OptionPricer + ?Sized,
{
    let start = Instant::now();
    let results: Vec<_> = requests
        .par_iter()
        .map(|request| {
            solver.solve_option(
                pricer,
                &request.spec,
                &request.market,
                request.target_price,
                request.initial_guess,
            )
        })
        .collect();

    info!(
        pricer = pricer.name(),
        method = %solver.config().method,
        requests = requests.len(),
        failed = results.iter().filter(|r| r.is_err()).count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "solved implied volatility batch"
    );
    results
}
