//! Domain value types.
//!
//! - [`OptionSpec`]: the contract being priced
//! - [`MarketInputs`]: flat market state for one pricing call
//! - [`Volatility`]: an annualised volatility quote

mod market;
mod option;
mod quote;

pub use market::MarketInputs;
pub use option::{ExerciseStyle, OptionSpec, OptionType};
pub use quote::Volatility;
