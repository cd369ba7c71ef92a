//! Standard normal distribution.

use std::f64::consts::SQRT_2;

use statrs::function::erf::erfc;

/// Standard normal cumulative distribution function.
///
/// Evaluated through the complementary error function so the lower tail
/// keeps full relative precision.
#[inline]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}
