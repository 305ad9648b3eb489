//! Root-finding algorithms.
//!
//! Every yield and spot rate in the workspace is the root of a
//! discounted-cashflow equation. This module provides the solvers behind a
//! single [`Solver`] capability so that callers can swap algorithms, or
//! inject a deterministic stand-in under test:
//!
//! - [`newton_raphson`]: Quadratic convergence when a derivative is available
//! - [`brent`]: Bracketing method combining bisection, secant, and inverse quadratic steps
//! - [`hybrid`]: Newton-Raphson with a Brent fallback (the default)
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//! | Hybrid | Fast | Guaranteed* | Initial guess |
//!
//! *When a bracket is supplied or can be found by expanding around the guess.
//!
//! # Example: Continuously-Compounded Yield
//!
//! ```rust
//! use termstruct_math::solvers::{HybridSolver, Solver, SolverConfig};
//!
//! // 2% coupon paid semiannually, cashflows at 0.5, 1.0, 1.5 years, price 99
//! let times = [0.5, 1.0, 1.5];
//! let price_fn = |y: f64| {
//!     let coupons: f64 = times.iter().map(|t| 1.0 * (-y * t).exp()).sum();
//!     coupons + 100.0 * (-y * 1.5_f64).exp() - 99.0
//! };
//! let d_price_fn = |y: f64| {
//!     let coupons: f64 = times.iter().map(|t| -t * (-y * t).exp()).sum();
//!     coupons - 150.0 * (-y * 1.5_f64).exp()
//! };
//!
//! let result = HybridSolver
//!     .solve(price_fn, Some(d_price_fn), 0.02, None, &SolverConfig::default())
//!     .unwrap();
//! assert!(result.root > 0.02);
//! ```

mod brent;
mod hybrid;
mod newton;

pub use brent::brent;
pub use hybrid::{hybrid, hybrid_numerical};
pub use newton::{newton_raphson, newton_raphson_numerical};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

/// Trait for root-finding solvers with optional derivative.
///
/// Yield-to-maturity and the spot bootstrap are written against this trait,
/// so any implementation (including a scripted one in tests) can drive them.
///
/// # Example
///
/// ```rust
/// use termstruct_math::solvers::{Solver, NewtonSolver, SolverConfig};
///
/// let solver = NewtonSolver;
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = solver.solve(f, Some(df), 1.5, None, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub trait Solver: Send + Sync {
    /// Solves for a root of the given function.
    ///
    /// # Arguments
    ///
    /// * `f` - The function for which to find a root
    /// * `derivative` - Optional derivative function (used if available)
    /// * `initial_guess` - Starting point for the search
    /// * `bounds` - Optional bracketing interval (a, b)
    /// * `config` - Solver configuration
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

impl<S: Solver> Solver for &S {
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        (**self).solve(f, derivative, initial_guess, bounds, config)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Newton-Raphson solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonSolver;

impl Solver for NewtonSolver {
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        _bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        match derivative {
            Some(df) => newton_raphson(f, df, initial_guess, config),
            None => newton_raphson_numerical(f, initial_guess, config),
        }
    }

    fn name(&self) -> &'static str {
        "Newton-Raphson"
    }
}

/// Brent's method solver implementation.
///
/// Without explicit bounds the bracket is `initial_guess ± 1.0`, which
/// covers any realistic rate when the guess is a coupon rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrentSolver;

impl Solver for BrentSolver {
    fn solve<F, D>(
        &self,
        f: F,
        _derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let (a, b) = bounds.unwrap_or((initial_guess - 1.0, initial_guess + 1.0));
        brent(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Brent"
    }
}

/// Hybrid solver (Newton + Brent fallback).
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridSolver;

impl Solver for HybridSolver {
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        match derivative {
            Some(df) => hybrid(f, df, initial_guess, bounds, config),
            None => hybrid_numerical(f, initial_guess, bounds, config),
        }
    }

    fn name(&self) -> &'static str {
        "Hybrid (Newton + Brent)"
    }
}

/// Runtime selection of one of the built-in solvers.
///
/// Used where the algorithm comes from configuration rather than from a
/// type parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    /// Newton-Raphson.
    Newton,
    /// Brent's method.
    Brent,
    /// Newton-Raphson with Brent fallback.
    #[default]
    Hybrid,
}

impl SolverKind {
    /// All built-in solvers.
    pub const ALL: [SolverKind; 3] = [SolverKind::Newton, SolverKind::Brent, SolverKind::Hybrid];

    /// Lowercase identifier used in configuration files.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverKind::Newton => "newton",
            SolverKind::Brent => "brent",
            SolverKind::Hybrid => "hybrid",
        }
    }
}

impl Solver for SolverKind {
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        match self {
            SolverKind::Newton => NewtonSolver.solve(f, derivative, initial_guess, bounds, config),
            SolverKind::Brent => BrentSolver.solve(f, derivative, initial_guess, bounds, config),
            SolverKind::Hybrid => HybridSolver.solve(f, derivative, initial_guess, bounds, config),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SolverKind::Newton => NewtonSolver.name(),
            SolverKind::Brent => BrentSolver.name(),
            SolverKind::Hybrid => HybridSolver.name(),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverKind {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newton" | "newton-raphson" => Ok(SolverKind::Newton),
            "brent" => Ok(SolverKind::Brent),
            "hybrid" => Ok(SolverKind::Hybrid),
            other => Err(MathError::invalid_input(format!(
                "unknown solver '{other}' (expected newton, brent or hybrid)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
        assert_eq!(SolverConfig::default().max_iterations, 100);
    }

    #[test]
    fn test_solver_trait_brent() {
        let solver = BrentSolver;
        let f = |x: f64| x * x - 2.0;
        let no_deriv: Option<fn(f64) -> f64> = None;

        let result = solver
            .solve(f, no_deriv, 1.5, Some((1.0, 2.0)), &SolverConfig::default())
            .unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert_eq!(solver.name(), "Brent");
    }

    #[test]
    fn test_solver_kind_dispatch() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        for kind in SolverKind::ALL {
            let result = kind
                .solve(f, Some(df), 1.5, Some((1.0, 2.0)), &SolverConfig::default())
                .unwrap();
            assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-9);
        }
        assert_eq!(SolverKind::default(), SolverKind::Hybrid);
        assert_eq!(SolverKind::Brent.name(), "Brent");
    }

    #[test]
    fn test_solver_kind_parse() {
        assert_eq!("Newton".parse::<SolverKind>().unwrap(), SolverKind::Newton);
        assert_eq!(" brent ".parse::<SolverKind>().unwrap(), SolverKind::Brent);
        assert!("secant".parse::<SolverKind>().is_err());
        assert_eq!(SolverKind::Hybrid.to_string(), "hybrid");
    }

    // ============ Continuous-Compounding Yield Tests ============

    /// Price of a semiannual bond under a continuously-compounded flat yield.
    fn bond_price(y: f64, coupon_rate: f64, times: &[f64]) -> f64 {
        let coupon = coupon_rate / 2.0 * 100.0;
        let last = times[times.len() - 1];
        times.iter().map(|t| coupon * (-y * t).exp()).sum::<f64>() + 100.0 * (-y * last).exp()
    }

    fn bond_price_derivative(y: f64, coupon_rate: f64, times: &[f64]) -> f64 {
        let coupon = coupon_rate / 2.0 * 100.0;
        let last = times[times.len() - 1];
        times.iter().map(|t| -t * coupon * (-y * t).exp()).sum::<f64>()
            - last * 100.0 * (-y * last).exp()
    }

    #[test]
    fn test_discount_and_premium_bonds() {
        let times = [0.25, 0.75, 1.25, 1.75, 2.25];

        let discount = |y: f64| bond_price(y, 0.03, &times) - 97.0;
        let d_discount = |y: f64| bond_price_derivative(y, 0.03, &times);
        let result = HybridSolver
            .solve(discount, Some(d_discount), 0.03, None, &SolverConfig::default())
            .unwrap();
        assert!(result.root > 0.03);
        assert!(discount(result.root).abs() < 1e-9);

        let premium = |y: f64| bond_price(y, 0.03, &times) - 104.0;
        let d_premium = |y: f64| bond_price_derivative(y, 0.03, &times);
        let result = HybridSolver
            .solve(premium, Some(d_premium), 0.03, None, &SolverConfig::default())
            .unwrap();
        assert!(result.root < 0.03);
        assert!(premium(result.root).abs() < 1e-9);
    }

    #[test]
    fn test_all_solvers_agree() {
        let times = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0];
        let f = |y: f64| bond_price(y, 0.025, &times) - 98.5;
        let df = |y: f64| bond_price_derivative(y, 0.025, &times);
        let config = SolverConfig::default();

        let newton_result = newton_raphson(f, df, 0.025, &config).unwrap();
        let brent_result = brent(f, -0.5, 0.5, &config).unwrap();
        let hybrid_result = hybrid(f, df, 0.025, None, &config).unwrap();

        assert_relative_eq!(newton_result.root, brent_result.root, epsilon = 1e-8);
        assert_relative_eq!(newton_result.root, hybrid_result.root, epsilon = 1e-8);
    }

    #[test]
    fn test_negative_yield_root() {
        // Prices far above par imply negative yields
        let times = [0.5, 1.0];
        let f = |y: f64| bond_price(y, 0.0025, &times) - 101.5;
        let df = |y: f64| bond_price_derivative(y, 0.0025, &times);

        let result = HybridSolver
            .solve(f, Some(df), 0.0025, None, &SolverConfig::default())
            .unwrap();
        assert!(result.root < 0.0);
        assert!(f(result.root).abs() < 1e-9);
    }
}
