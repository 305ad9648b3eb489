//! A bond priced on a reference date.

use std::fmt;

use log::debug;
use serde::Serialize;

use termstruct_core::daycounts::year_fraction;
use termstruct_core::Date;
use termstruct_math::solvers::{HybridSolver, Solver, SolverConfig};

use crate::error::{BondError, BondResult};
use crate::identifier::BondIdentifier;
use crate::schedule::{semiannual_schedule, COUPONS_PER_YEAR};

/// Face value that prices and coupons are quoted against.
pub const FACE_VALUE: f64 = 100.0;

/// A government bond observed at a clean price on a reference date.
///
/// The coupon schedule and the ACT/365F tenor of each coupon date are
/// derived once at construction; the observation is immutable afterwards.
/// Cashflows are discounted with continuous compounding:
///
/// ```text
/// P(y) = Σ_i (c/2 × 100) e^{−y τ_i} + 100 e^{−y τ_n}
/// ```
///
/// # Example
///
/// ```
/// use termstruct_bonds::BondObservation;
/// use termstruct_core::Date;
///
/// let reference = Date::from_ymd(2024, 1, 1).unwrap();
/// let bond = BondObservation::from_quote("CAN 2.25 Mar 24", reference, 99.8).unwrap();
///
/// assert_eq!(bond.schedule(), &[Date::from_ymd(2024, 3, 1).unwrap()]);
/// assert!((bond.tenor() - 60.0 / 365.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondObservation {
    identifier: BondIdentifier,
    reference_date: Date,
    price: f64,
    schedule: Vec<Date>,
    #[serde(skip)]
    coupon_tenors: Vec<f64>,
}

impl BondObservation {
    /// Creates an observation from a parsed identifier.
    ///
    /// # Errors
    ///
    /// - [`BondError::InvalidPrice`] if `price` is not positive and finite
    /// - [`BondError::MaturedInstrument`] if the bond matures on or before
    ///   `reference_date`
    pub fn new(identifier: BondIdentifier, reference_date: Date, price: f64) -> BondResult<Self> {
        if !price.is_finite() || price <= 0.0 {
            return Err(BondError::InvalidPrice {
                identifier: identifier.to_string(),
                price,
            });
        }

        let maturity = identifier.maturity();
        if maturity <= reference_date {
            return Err(BondError::MaturedInstrument {
                identifier: identifier.to_string(),
                maturity,
                reference_date,
            });
        }

        let schedule = semiannual_schedule(reference_date, maturity)?;
        let coupon_tenors = schedule
            .iter()
            .map(|&d| year_fraction(reference_date, d))
            .collect();

        Ok(Self {
            identifier,
            reference_date,
            price,
            schedule,
            coupon_tenors,
        })
    }

    /// Parses `identifier` and creates an observation.
    pub fn from_quote(identifier: &str, reference_date: Date, price: f64) -> BondResult<Self> {
        Self::new(BondIdentifier::parse(identifier)?, reference_date, price)
    }

    /// The bond identifier.
    pub fn identifier(&self) -> &BondIdentifier {
        &self.identifier
    }

    /// The date as of which price and schedule are evaluated.
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Clean price per 100 face value.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Annual coupon rate as a fraction of face value.
    pub fn coupon_rate(&self) -> f64 {
        self.identifier.coupon_rate()
    }

    /// Coupon paid on each schedule date per 100 face value.
    pub fn coupon_payment(&self) -> f64 {
        self.coupon_rate() / COUPONS_PER_YEAR * FACE_VALUE
    }

    /// Maturity date.
    pub fn maturity(&self) -> Date {
        self.identifier.maturity()
    }

    /// Future coupon dates, ascending, ending at maturity.
    pub fn schedule(&self) -> &[Date] {
        &self.schedule
    }

    /// Year fraction from the reference date to each coupon date.
    pub fn coupon_tenors(&self) -> &[f64] {
        &self.coupon_tenors
    }

    /// Year fraction from the reference date to maturity.
    pub fn tenor(&self) -> f64 {
        // The schedule is never empty for a constructed observation
        self.coupon_tenors.last().copied().unwrap_or_default()
    }

    /// Price implied by a flat continuously-compounded yield `y`.
    pub fn price_at_yield(&self, y: f64) -> f64 {
        let coupon = self.coupon_payment();
        let coupons: f64 = self.coupon_tenors.iter().map(|t| coupon * (-y * t).exp()).sum();
        coupons + FACE_VALUE * (-y * self.tenor()).exp()
    }

    /// Derivative of [`price_at_yield`](Self::price_at_yield) with respect to `y`.
    pub fn price_derivative(&self, y: f64) -> f64 {
        let coupon = self.coupon_payment();
        let tau_n = self.tenor();
        let coupons: f64 = self
            .coupon_tenors
            .iter()
            .map(|t| -t * coupon * (-y * t).exp())
            .sum();
        coupons - tau_n * FACE_VALUE * (-y * tau_n).exp()
    }

    /// Yield-to-maturity with the default hybrid solver and configuration.
    pub fn yield_to_maturity(&self) -> BondResult<f64> {
        self.yield_to_maturity_with(&HybridSolver, &SolverConfig::default())
    }

    /// Yield-to-maturity with an explicit solver.
    ///
    /// Solves `price_at_yield(y) = price` starting from the coupon rate,
    /// using the analytic derivative.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::NoConvergence`] naming this bond if the solver
    /// fails; no fallback value is substituted.
    pub fn yield_to_maturity_with<S: Solver>(
        &self,
        solver: &S,
        config: &SolverConfig,
    ) -> BondResult<f64> {
        let objective = |y: f64| self.price_at_yield(y) - self.price;
        let derivative = |y: f64| self.price_derivative(y);

        let result = solver
            .solve(objective, Some(derivative), self.coupon_rate(), None, config)
            .map_err(|e| BondError::no_convergence(self.identifier.to_string(), e))?;

        debug!(
            "{}: ytm={:.8} via {} in {} iterations",
            self.identifier,
            result.root,
            solver.name(),
            result.iterations
        );
        Ok(result.root)
    }
}

impl fmt::Display for BondObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {:.4} on {}", self.identifier, self.price, self.reference_date)
    }
}
