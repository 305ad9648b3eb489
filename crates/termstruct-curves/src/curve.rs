//! Term structure for a single reference date.

use serde::Serialize;

use termstruct_bonds::{BondIdentifier, BondObservation};
use termstruct_core::Date;
use termstruct_math::solvers::Solver;

use crate::basket::prepare_basket;
use crate::bootstrap::{instrument_tenors, CurveBootstrapper};
use crate::config::BootstrapConfig;
use crate::error::CurveResult;
use crate::pillars::PillarSet;

/// Yield, spot and forward curves built from one basket.
///
/// All three curves are computed at construction and never change. Pillar
/// curves are in percent; the per-instrument tenors, yields and spot rates
/// kept for inspection are decimals in maturity order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermStructure {
    reference_date: Date,
    pillars: PillarSet,
    instruments: Vec<BondIdentifier>,
    instrument_tenors: Vec<f64>,
    instrument_yields: Vec<f64>,
    instrument_spots: Vec<f64>,
    yield_curve: Vec<f64>,
    spot_curve: Vec<f64>,
    forward_curve: Vec<f64>,
}

impl TermStructure {
    /// Builds all curves with the configured built-in solver.
    ///
    /// # Example
    ///
    /// ```
    /// use termstruct_bonds::BondObservation;
    /// use termstruct_core::Date;
    /// use termstruct_curves::{BootstrapConfig, TermStructure};
    ///
    /// let date = Date::from_ymd(2024, 1, 2).unwrap();
    /// let basket: Vec<_> = [("CAN 2.25 Mar 24", 100.34), ("CAN 1.5 Sep 24", 98.43)]
    ///     .iter()
    ///     .map(|(id, p)| BondObservation::from_quote(id, date, *p).unwrap())
    ///     .collect();
    ///
    /// let curve = TermStructure::build(&basket, date, &BootstrapConfig::default()).unwrap();
    /// assert_eq!(curve.forward_curve().len(), 4);
    /// ```
    pub fn build(
        basket: &[BondObservation],
        reference_date: Date,
        config: &BootstrapConfig,
    ) -> CurveResult<Self> {
        Self::build_with(&CurveBootstrapper::from_config(config), basket, reference_date)
    }

    /// Builds all curves with an explicit bootstrapper.
    pub fn build_with<S: Solver>(
        bootstrapper: &CurveBootstrapper<S>,
        basket: &[BondObservation],
        reference_date: Date,
    ) -> CurveResult<Self> {
        let basket = prepare_basket(basket, reference_date, bootstrapper.ordering())?;

        let tenors = instrument_tenors(&basket);
        let yields = bootstrapper.instrument_yields(&basket)?;
        let spots = bootstrapper.bootstrap_spot_rates(&basket)?;

        let yield_curve = bootstrapper.to_pillars(&tenors, &yields)?;
        let spot_curve = bootstrapper.to_pillars(&tenors, &spots)?;
        let forward_curve = bootstrapper.build_forward_curve(&spot_curve)?;

        Ok(Self {
            reference_date,
            pillars: bootstrapper.pillars().clone(),
            instruments: basket.iter().map(|o| o.identifier().clone()).collect(),
            instrument_tenors: tenors,
            instrument_yields: yields,
            instrument_spots: spots,
            yield_curve,
            spot_curve,
            forward_curve,
        })
    }

    /// The reference date.
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// The pillar tenors.
    pub fn pillars(&self) -> &PillarSet {
        &self.pillars
    }

    /// Basket instruments in maturity order.
    pub fn instruments(&self) -> &[BondIdentifier] {
        &self.instruments
    }

    /// Maturity tenor of each instrument, in years.
    pub fn instrument_tenors(&self) -> &[f64] {
        &self.instrument_tenors
    }

    /// Yield-to-maturity of each instrument, as decimals.
    pub fn instrument_yields(&self) -> &[f64] {
        &self.instrument_yields
    }

    /// Bootstrapped spot rate of each instrument, as decimals.
    pub fn instrument_spots(&self) -> &[f64] {
        &self.instrument_spots
    }

    /// Yield curve on every pillar, in percent.
    pub fn yield_curve(&self) -> &[f64] {
        &self.yield_curve
    }

    /// Spot curve on every pillar, in percent.
    pub fn spot_curve(&self) -> &[f64] {
        &self.spot_curve
    }

    /// Forward rates on every pillar after the first, in percent.
    pub fn forward_curve(&self) -> &[f64] {
        &self.forward_curve
    }
}
