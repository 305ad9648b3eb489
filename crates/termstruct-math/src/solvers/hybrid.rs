//! Hybrid root-finding algorithm.
//!
//! Combines Newton-Raphson with Brent's method for robust convergence.

use log::debug;

use crate::error::{MathError, MathResult};
use crate::solvers::{brent, SolverConfig, SolverResult};

/// Newton iterations allowed before falling back to Brent.
const NEWTON_ITERATION_CAP: u32 = 20;

/// Consecutive residual blow-ups tolerated before Newton is abandoned.
const MAX_DIVERGENCE: u32 = 3;

/// Hybrid root-finding algorithm.
///
/// Starts with Newton-Raphson for fast quadratic convergence and falls back
/// to Brent's method when Newton diverges, hits a flat derivative, or runs
/// out of its (short) iteration budget.
///
/// # Strategy
///
/// 1. Run monitored Newton-Raphson from `initial_guess`
/// 2. On failure, use `bounds` as the Brent bracket if given
/// 3. Otherwise expand outward from `initial_guess` until the sign of `f` changes
///
/// # Example
///
/// ```rust
/// use termstruct_math::solvers::{hybrid, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = hybrid(f, df, 1.5, Some((1.0, 2.0)), &SolverConfig::default()).unwrap();
/// assert!((f(result.root)).abs() < 1e-10);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    match newton_with_monitoring(&f, &df, initial_guess, config) {
        Ok(result) => Ok(result),
        Err(newton_error) => {
            debug!("hybrid: Newton failed ({newton_error}), falling back to Brent");
            let (a, b) = match bounds {
                Some(bracket) => bracket,
                None => find_bracket(&f, initial_guess).ok_or_else(|| {
                    MathError::invalid_input(
                        "Newton-Raphson failed and no bracketing interval was found for Brent",
                    )
                })?,
            };
            brent(&f, a, b, config)
        }
    }
}

/// Hybrid solver with a central-difference derivative.
pub fn hybrid_numerical<F>(
    f: F,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let h = 1e-8;
    let df = |x: f64| (f(x + h) - f(x - h)) / (2.0 * h);

    hybrid(&f, df, initial_guess, bounds, config)
}

/// Newton-Raphson that fails fast on divergence.
fn newton_with_monitoring<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    let mut prev_residual = f64::MAX;
    let mut divergence_count = 0;
    let max_iter = config.max_iterations.min(NEWTON_ITERATION_CAP);

    for iteration in 0..max_iter {
        let fx = f(x);
        let residual = fx.abs();

        if residual < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if residual > prev_residual * 2.0 {
            divergence_count += 1;
            if divergence_count >= MAX_DIVERGENCE {
                return Err(MathError::invalid_input("Newton-Raphson diverging"));
            }
        } else {
            divergence_count = 0;
        }
        prev_residual = residual;

        let dfx = df(x);
        if dfx.abs() < 1e-15 || !dfx.is_finite() {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let step = fx / dfx;
        x -= step;

        if !x.is_finite() {
            return Err(MathError::invalid_input("Newton produced non-finite value"));
        }

        if step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
            });
        }
    }

    Err(MathError::convergence_failed(max_iter, f(x).abs()))
}

/// Searches for a sign change around `initial_guess` by geometric expansion.
fn find_bracket<F>(f: &F, initial_guess: f64) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let f_init = f(initial_guess);
    if !f_init.is_finite() {
        return None;
    }

    let mut delta = 0.05;
    while delta <= 1e3 {
        let left = initial_guess - delta;
        let right = initial_guess + delta;

        if f(left) * f_init < 0.0 {
            return Some((left, initial_guess));
        }
        if f(right) * f_init < 0.0 {
            return Some((initial_guess, right));
        }

        delta *= 2.0;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_newton_path() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = hybrid(f, df, 1.5, None, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_falls_back_on_flat_derivative() {
        // Derivative vanishes at the initial guess
        let f = |x: f64| x * x * x - 1.0;
        let df = |x: f64| 3.0 * x * x;

        let result = hybrid(f, df, 0.0, Some((0.0, 2.0)), &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_falls_back_without_bounds() {
        // atan has a single root at 0; Newton overshoots from x0 = 3
        let f = |x: f64| x.atan();
        let df = |x: f64| 1.0 / (1.0 + x * x);

        let result = hybrid(f, df, 3.0, None, &SolverConfig::default()).unwrap();

        assert!(result.root.abs() < 1e-9);
    }

    #[test]
    fn test_numerical_variant() {
        let f = |y: f64| (-3.0 * y).exp() - 0.88;

        let result = hybrid_numerical(f, 0.02, None, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, -(0.88_f64.ln()) / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_no_root_anywhere() {
        let f = |x: f64| x * x + 1.0;
        let df = |x: f64| 2.0 * x;

        assert!(hybrid(f, df, 0.0, None, &SolverConfig::default()).is_err());
    }
}
