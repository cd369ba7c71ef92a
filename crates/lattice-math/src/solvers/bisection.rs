//! Bisection root-finding algorithm.

use log::debug;

use crate::error::MathError;
use crate::solvers::{same_sign, SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// A simple and reliable bracketing method that works by repeatedly
/// halving the interval and selecting the subinterval containing the root.
///
/// Requires: `f(a)` and `f(b)` of opposite sign (or one of them zero).
///
/// # Arguments
///
/// * `f` - The objective; errors it returns abort the search unchanged
/// * `a` - One end of the bracket
/// * `b` - The other end of the bracket
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use lattice_math::solvers::{bisection, SolverConfig};
/// use lattice_math::MathError;
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| Ok::<_, MathError>(x * x - 2.0);
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F, E>(
    mut f: F,
    a: f64,
    b: f64,
    config: &SolverConfig,
) -> Result<SolverResult, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<MathError>,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = f(lo)?;
    let f_hi = f(hi)?;

    if same_sign(f_lo, f_hi) {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        }
        .into());
    }

    // Handle case where endpoint is the root
    if f_lo == 0.0 || f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi == 0.0 || f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    let mut mid = 0.5 * (lo + hi);
    let mut f_mid = f_lo;

    for iteration in 0..config.max_iterations {
        mid = 0.5 * (lo + hi);
        f_mid = f(mid)?;

        if f_mid == 0.0 || f_mid.abs() < config.tolerance || 0.5 * (hi - lo) < config.x_tolerance
        {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }

        if same_sign(f_lo, f_mid) {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    debug!(
        "bisection exhausted {} iterations at x = {}, residual {:.3e}",
        config.max_iterations, mid, f_mid
    );
    Err(MathError::convergence_failed(config.max_iterations, f_mid.abs()).into())
}
