//! The pricing seam shared by all engines.

use lattice_core::{LatticeResult, MarketInputs, OptionSpec};

/// A model that prices an option for a given volatility.
///
/// Implementations must be pure: the same inputs always produce the same
/// price, with no shared mutable state, so a pricer can be shared across
/// threads and inverted by the implied volatility solver.
pub trait OptionPricer: Send + Sync {
    /// Prices `spec` under `market` at the given annualised volatility.
    fn price(
        &self,
        spec: &OptionSpec,
        market: &MarketInputs,
        volatility: f64,
    ) -> LatticeResult<f64>;

    /// Smallest volatility the model accepts for these inputs.
    ///
    /// The implied volatility solver never searches below this bound.
    fn min_volatility(&self, _spec: &OptionSpec, _market: &MarketInputs) -> f64 {
        0.0
    }

    /// Returns the name of the model.
    fn name(&self) -> &'static str;
}
