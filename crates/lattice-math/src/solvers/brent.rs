//! Brent's root-finding algorithm.

use log::debug;

use crate::error::MathError;
use crate::solvers::{same_sign, SolverConfig, SolverResult};

/// Brent's root-finding algorithm.
///
/// Combines the reliability of bisection with the speed of the secant method
/// and inverse quadratic interpolation. Every iterate stays inside the
/// current bracket, so the method converges whenever the root is bracketed
/// and enough iterations are allowed.
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
/// # Convergence
///
/// Stops when `|f(x)| < config.tolerance` or the bracket half-width drops
/// below `config.x_tolerance`.
///
/// # Example
///
/// ```rust
/// use lattice_math::solvers::{brent, SolverConfig};
/// use lattice_math::MathError;
///
/// // Find root of x^3 - x - 2
/// let f = |x: f64| Ok::<_, MathError>(x * x * x - x - 2.0);
///
/// let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!(result.residual.abs() < 1e-10);
/// ```
pub fn brent<F, E>(mut f: F, a: f64, b: f64, config: &SolverConfig) -> Result<SolverResult, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<MathError>,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a)?;
    let mut fb = f(b)?;

    if same_sign(fa, fb) {
        return Err(MathError::InvalidBracket { a, b, fa, fb }.into());
    }

    // c is the counterpoint of b: f(b) and f(c) always straddle the root
    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..config.max_iterations {
        if same_sign(fb, fc) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }

        // Keep b as the best estimate
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.x_tolerance;
        let xm = 0.5 * (c - b);

        if fb == 0.0 || fb.abs() < config.tolerance || xm.abs() <= tol1 {
            return Ok(SolverResult {
                root: b,
                iterations: iteration,
                residual: fb,
            });
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // Secant step
                (2.0 * xm * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * xm * q - (tol1 * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol1 { d } else { tol1.copysign(xm) };
        fb = f(b)?;
    }

    debug!(
        "brent exhausted {} iterations at x = {}, residual {:.3e}",
        config.max_iterations, b, fb
    );
    Err(MathError::convergence_failed(config.max_iterations, fb.abs()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ok(x: f64) -> Result<f64, MathError> {
        Ok(x)
    }

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| ok(x * x - 2.0);

        let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_cubic() {
        // x^3 - x - 2 has a root near 1.52
        let f = |x: f64| ok(x * x * x - x - 2.0);

        let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert!(result.residual.abs() < 1e-10);
        assert_relative_eq!(result.root, 1.521_379_706_804_568, epsilon = 1e-10);
    }

    #[test]
    fn test_sin() {
        // Find root of sin(x) near pi
        let f = |x: f64| ok(x.sin());

        let result = brent(f, 3.0, 4.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::PI, epsilon = 1e-10);
    }

    #[test]
    fn test_reversed_bracket() {
        let f = |x: f64| ok(x * x - 2.0);

        let result = brent(f, 2.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_root_at_endpoint() {
        let f = |x: f64| ok(x - 1.0);

        let result = brent(f, 1.0, 3.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 1.0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| ok(x * x - 2.0);

        let result = brent(f, 2.0, 3.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_iteration_limit() {
        let f = |x: f64| ok(x * x * x - x - 2.0);
        let config = SolverConfig::new(1e-15, 2).with_x_tolerance(0.0);

        let result = brent(f, 1.0, 2.0, &config);

        assert!(matches!(
            result,
            Err(MathError::ConvergenceFailed { iterations: 2, .. })
        ));
    }

    #[test]
    fn test_flat_tail() {
        // Objective that is exactly zero over a whole region, like an option
        // price that vanishes at low volatility
        let f = |x: f64| ok((x - 0.3).max(0.0) - 0.1);

        let result = brent(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.4, epsilon = 1e-10);
    }

    #[test]
    fn test_counts_evaluations() {
        let mut evaluations = 0;
        let f = |x: f64| {
            evaluations += 1;
            ok(x * x - 2.0)
        };

        let result = brent(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        // Two bracket evaluations plus one per iteration
        assert_eq!(evaluations, result.iterations + 2);
        assert!(result.iterations < 20);
    }
}
