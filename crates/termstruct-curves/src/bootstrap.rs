//! Sequential curve bootstrap.
//!
//! Converts a basket of coupon bonds on one reference date into yield, spot
//! and forward rates on the pillar tenors:
//!
//! 1. Validate and order the basket by maturity
//! 2. Solve each bond's yield-to-maturity, or bootstrap its spot rate using
//!    the spot rates already solved for shorter bonds
//! 3. Interpolate the per-instrument rates onto the pillars through log
//!    discount factors
//!
//! Rates on pillars are reported in percent; per-instrument rates are
//! decimals.

use log::debug;

use termstruct_bonds::observation::FACE_VALUE;
use termstruct_bonds::BondObservation;
use termstruct_core::Date;
use termstruct_math::interpolation::interpolate_log_discount;
use termstruct_math::solvers::{Solver, SolverConfig, SolverKind};

use crate::basket::prepare_basket;
use crate::config::{BasketOrdering, BootstrapConfig};
use crate::error::{CurveError, CurveResult};
use crate::pillars::PillarSet;

/// Multiplier from decimal rates to the percent rates reported on pillars.
pub const PERCENT: f64 = 100.0;

/// Sequential bootstrapper for yield, spot and forward curves.
///
/// Generic over the [`Solver`] used for every root-find, so a scripted
/// solver can stand in under test. [`CurveBootstrapper::from_config`] picks
/// one of the built-in solvers at runtime.
///
/// # Example
///
/// ```rust
/// use termstruct_bonds::BondObservation;
/// use termstruct_core::Date;
/// use termstruct_curves::{BootstrapConfig, CurveBootstrapper};
///
/// let date = Date::from_ymd(2024, 1, 2).unwrap();
/// let basket = vec![
///     BondObservation::from_quote("CAN 2.25 Mar 24", date, 100.34).unwrap(),
///     BondObservation::from_quote("CAN 1.5 Sep 24", date, 98.43).unwrap(),
///     BondObservation::from_quote("CAN 1.25 Mar 25", date, 96.80).unwrap(),
/// ];
///
/// let bootstrapper = CurveBootstrapper::from_config(&BootstrapConfig::default());
/// let spot = bootstrapper.build_spot_curve(&basket, date).unwrap();
/// assert_eq!(spot.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct CurveBootstrapper<S = SolverKind> {
    solver: S,
    solver_config: SolverConfig,
    pillars: PillarSet,
    ordering: BasketOrdering,
}

impl CurveBootstrapper<SolverKind> {
    /// Creates a bootstrapper using the configured built-in solver.
    pub fn from_config(config: &BootstrapConfig) -> Self {
        Self::with_solver(config.solver, config)
    }
}

impl<S: Solver> CurveBootstrapper<S> {
    /// Creates a bootstrapper with an explicit solver; the configured
    /// solver kind is ignored.
    pub fn with_solver(solver: S, config: &BootstrapConfig) -> Self {
        Self {
            solver,
            solver_config: config.solver_config,
            pillars: config.pillars.clone(),
            ordering: config.ordering,
        }
    }

    /// The pillar tenors.
    pub fn pillars(&self) -> &PillarSet {
        &self.pillars
    }

    /// The basket ordering policy.
    pub fn ordering(&self) -> BasketOrdering {
        self.ordering
    }

    /// The root-finder.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Yield curve on the pillars, in percent.
    ///
    /// Each bond's yield-to-maturity is placed at its maturity tenor and
    /// interpolated onto the pillars.
    pub fn build_yield_curve(
        &self,
        basket: &[BondObservation],
        reference_date: Date,
    ) -> CurveResult<Vec<f64>> {
        let basket = prepare_basket(basket, reference_date, self.ordering)?;
        let tenors = instrument_tenors(&basket);
        let yields = self.instrument_yields(&basket)?;
        self.to_pillars(&tenors, &yields)
    }

    /// Spot (zero) curve on the pillars, in percent.
    pub fn build_spot_curve(
        &self,
        basket: &[BondObservation],
        reference_date: Date,
    ) -> CurveResult<Vec<f64>> {
        let basket = prepare_basket(basket, reference_date, self.ordering)?;
        let tenors = instrument_tenors(&basket);
        let spots = self.bootstrap_spot_rates(&basket)?;
        self.to_pillars(&tenors, &spots)
    }

    /// Forward rates on `pillars[1..]`, in the units of `spot_curve`.
    pub fn build_forward_curve(&self, spot_curve: &[f64]) -> CurveResult<Vec<f64>> {
        forward_curve(spot_curve, &self.pillars)
    }

    /// Yield-to-maturity of each bond, as decimals, in basket order.
    ///
    /// The basket is assumed to be validated already.
    pub fn instrument_yields(&self, basket: &[BondObservation]) -> CurveResult<Vec<f64>> {
        basket
            .iter()
            .map(|obs| {
                obs.yield_to_maturity_with(&self.solver, &self.solver_config)
                    .map_err(CurveError::from)
            })
            .collect()
    }

    /// Bootstraps one spot rate per bond, as decimals, in basket order.
    ///
    /// For bond `k` with coupon `c` and coupon tenors `τ_0 .. τ_{n-1}`:
    ///
    /// ```text
    /// Σ_{i<n-1} (c/2 × 100) e^{−s_i τ_i} + 100 (1 + c/2) e^{−s_k τ_{n−1}} = price
    /// ```
    ///
    /// where `s_i` is the spot rate already solved for bond `i`, so the
    /// `i`-th coupon is discounted at the `i`-th shortest bond's rate. The
    /// basket is assumed to be validated and in maturity order.
    ///
    /// # Errors
    ///
    /// - [`CurveError::UnalignedSchedule`] if a bond has more intermediate
    ///   coupons than spot rates solved before it
    /// - [`CurveError::NoConvergence`] if the root-find fails
    pub fn bootstrap_spot_rates(&self, basket: &[BondObservation]) -> CurveResult<Vec<f64>> {
        let mut spots: Vec<f64> = Vec::with_capacity(basket.len());

        for obs in basket {
            let tenors = obs.coupon_tenors();
            let (tau_n, intermediate) = match tenors.split_last() {
                Some((last, rest)) => (*last, rest),
                None => (obs.tenor(), &[][..]),
            };

            if intermediate.len() > spots.len() {
                return Err(CurveError::UnalignedSchedule {
                    identifier: obs.identifier().to_string(),
                    coupons: intermediate.len(),
                    solved: spots.len(),
                });
            }

            let coupon = obs.coupon_payment();
            let known: f64 = intermediate
                .iter()
                .zip(&spots)
                .map(|(tau, s)| coupon * (-s * tau).exp())
                .sum();
            let final_cashflow = FACE_VALUE + coupon;
            let price = obs.price();

            let objective = |s: f64| known + final_cashflow * (-s * tau_n).exp() - price;
            let derivative = |s: f64| -tau_n * final_cashflow * (-s * tau_n).exp();

            let result = self
                .solver
                .solve(
                    objective,
                    Some(derivative),
                    obs.coupon_rate(),
                    None,
                    &self.solver_config,
                )
                .map_err(|source| CurveError::NoConvergence {
                    identifier: obs.identifier().to_string(),
                    source,
                })?;

            debug!(
                "{}: spot={:.8} at tau={tau_n:.4} in {} iterations",
                obs.identifier(),
                result.root,
                result.iterations
            );
            spots.push(result.root);
        }

        Ok(spots)
    }

    /// Interpolates decimal per-instrument rates onto the pillars, in percent.
    pub(crate) fn to_pillars(&self, tenors: &[f64], rates: &[f64]) -> CurveResult<Vec<f64>> {
        let pillar_rates = interpolate_log_discount(self.pillars.tenors(), tenors, rates)?;
        Ok(pillar_rates.into_iter().map(|r| r * PERCENT).collect())
    }
}

/// Maturity tenor of each bond in basket order.
pub(crate) fn instrument_tenors(basket: &[BondObservation]) -> Vec<f64> {
    basket.iter().map(BondObservation::tenor).collect()
}

/// Forward rates implied by a spot curve, anchored at the first pillar.
///
/// For every pillar `p_i` after the first:
///
/// ```text
/// f_i = (s_i p_i − s_0 p_0) / (p_i − p_0)
/// ```
///
/// # Errors
///
/// Returns [`CurveError::InvalidPillars`] if `spot_curve` does not have one
/// rate per pillar.
///
/// # Example
///
/// ```
/// use termstruct_curves::{forward_curve, PillarSet};
///
/// let forwards = forward_curve(&[2.0, 2.5, 3.0, 3.0, 3.0], &PillarSet::default()).unwrap();
/// assert_eq!(forwards.len(), 4);
/// assert!((forwards[0] - 3.0).abs() < 1e-12);
/// ```
pub fn forward_curve(spot_curve: &[f64], pillars: &PillarSet) -> CurveResult<Vec<f64>> {
    if spot_curve.len() != pillars.len() {
        return Err(CurveError::invalid_pillars(format!(
            "{} spot rates for {} pillars",
            spot_curve.len(),
            pillars.len()
        )));
    }

    let p0 = pillars.anchor();
    let s0 = spot_curve[0];

    Ok(pillars
        .forward_tenors()
        .iter()
        .zip(&spot_curve[1..])
        .map(|(p, s)| (s * p - s0 * p0) / (p - p0))
        .collect())
}
