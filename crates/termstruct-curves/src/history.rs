//! Curves across a history of observation dates.

use log::{info, warn};
use nalgebra::DMatrix;
use serde::Serialize;

use termstruct_bonds::{PriceTable, QuoteRow};
use termstruct_core::Date;
use termstruct_math::solvers::Solver;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::bootstrap::CurveBootstrapper;
use crate::config::{BootstrapConfig, DateErrorPolicy};
use crate::curve::TermStructure;
use crate::error::{CurveError, CurveResult};
use crate::pillars::PillarSet;

/// One [`TermStructure`] per observation date, in ascending date order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveHistory {
    pillars: PillarSet,
    curves: Vec<TermStructure>,
}

impl CurveHistory {
    /// Builds a curve for every row of `prices`.
    ///
    /// Dates are independent of each other; with the `parallel` feature they
    /// are built on the rayon pool. Under [`DateErrorPolicy::Fail`] the
    /// error of the earliest failing date is returned; under
    /// [`DateErrorPolicy::Skip`] failing dates are logged and left out.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DateFailed`] naming the date that failed.
    pub fn build(
        prices: &PriceTable,
        config: &BootstrapConfig,
        policy: DateErrorPolicy,
    ) -> CurveResult<Self> {
        let bootstrapper = CurveBootstrapper::from_config(config);

        #[cfg(feature = "parallel")]
        let results: Vec<CurveResult<TermStructure>> = prices
            .rows()
            .par_iter()
            .map(|row| build_row(&bootstrapper, prices, row))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let results: Vec<CurveResult<TermStructure>> = prices
            .rows()
            .iter()
            .map(|row| build_row(&bootstrapper, prices, row))
            .collect();

        let mut curves = Vec::with_capacity(results.len());
        for result in results {
            match (result, policy) {
                (Ok(curve), _) => curves.push(curve),
                (Err(e), DateErrorPolicy::Fail) => return Err(e),
                (Err(e), DateErrorPolicy::Skip) => warn!("skipping date: {e}"),
            }
        }

        info!(
            "built {} curves from {} dates",
            curves.len(),
            prices.len()
        );

        Ok(Self {
            pillars: config.pillars.clone(),
            curves,
        })
    }

    /// Assembles a history from curves that share a pillar set.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidPillars`] if a curve uses other pillars.
    pub fn from_curves(pillars: PillarSet, mut curves: Vec<TermStructure>) -> CurveResult<Self> {
        if let Some(curve) = curves.iter().find(|c| c.pillars() != &pillars) {
            return Err(CurveError::invalid_pillars(format!(
                "curve for {} uses different pillars",
                curve.reference_date()
            )));
        }
        curves.sort_by_key(TermStructure::reference_date);
        Ok(Self { pillars, curves })
    }

    /// The pillar set shared by every curve.
    pub fn pillars(&self) -> &PillarSet {
        &self.pillars
    }

    /// Curves in date order.
    pub fn curves(&self) -> &[TermStructure] {
        &self.curves
    }

    /// Observation dates in ascending order.
    pub fn dates(&self) -> Vec<Date> {
        self.curves.iter().map(TermStructure::reference_date).collect()
    }

    /// The curve for `date`, if built.
    pub fn curve(&self, date: Date) -> Option<&TermStructure> {
        self.curves
            .binary_search_by_key(&date, TermStructure::reference_date)
            .ok()
            .map(|i| &self.curves[i])
    }

    /// Number of dates.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// True if no curve was built.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Yield curves: one row per pillar, one column per date.
    pub fn yield_matrix(&self) -> DMatrix<f64> {
        self.matrix(self.pillars.len(), TermStructure::yield_curve)
    }

    /// Spot curves: one row per pillar, one column per date.
    pub fn spot_matrix(&self) -> DMatrix<f64> {
        self.matrix(self.pillars.len(), TermStructure::spot_curve)
    }

    /// Forward curves: one row per forward pillar, one column per date.
    pub fn forward_matrix(&self) -> DMatrix<f64> {
        self.matrix(self.pillars.forward_tenors().len(), TermStructure::forward_curve)
    }

    fn matrix(&self, rows: usize, series: fn(&TermStructure) -> &[f64]) -> DMatrix<f64> {
        DMatrix::from_fn(rows, self.curves.len(), |r, c| series(&self.curves[c])[r])
    }
}

fn build_row<S: Solver>(
    bootstrapper: &CurveBootstrapper<S>,
    prices: &PriceTable,
    row: &QuoteRow,
) -> CurveResult<TermStructure> {
    prices
        .observations(row)
        .map_err(CurveError::from)
        .and_then(|basket| TermStructure::build_with(bootstrapper, &basket, row.date))
        .map_err(|e| e.at_date(row.date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use termstruct_bonds::{BondError, BondIdentifier};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn table(rows: Vec<QuoteRow>) -> PriceTable {
        let ids: Vec<BondIdentifier> = ["CAN 2.25 Mar 24", "CAN 1.5 Sep 24", "CAN 1.25 Mar 25"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        PriceTable::new(ids, rows).unwrap()
    }

    fn full_rows() -> Vec<QuoteRow> {
        vec![
            QuoteRow::new(d(2024, 1, 2), vec![Some(100.34), Some(98.43), Some(96.80)]),
            QuoteRow::new(d(2024, 1, 3), vec![Some(100.33), Some(98.40), Some(96.71)]),
            QuoteRow::new(d(2024, 1, 4), vec![Some(100.35), Some(98.46), Some(96.85)]),
        ]
    }

    #[test]
    fn test_build_and_matrices() {
        let history =
            CurveHistory::build(&table(full_rows()), &BootstrapConfig::default(), DateErrorPolicy::Fail)
                .unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history.dates(), vec![d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 4)]);

        let yields = history.yield_matrix();
        assert_eq!(yields.shape(), (5, 3));
        assert_eq!(history.spot_matrix().shape(), (5, 3));
        assert_eq!(history.forward_matrix().shape(), (4, 3));

        let second = history.curve(d(2024, 1, 3)).unwrap();
        assert_eq!(yields[(2, 1)], second.yield_curve()[2]);
    }

    #[test]
    fn test_fail_policy_reports_earliest_date() {
        let mut rows = full_rows();
        rows[1].prices[1] = None;
        rows[2].prices[0] = None;

        let err =
            CurveHistory::build(&table(rows), &BootstrapConfig::default(), DateErrorPolicy::Fail)
                .unwrap_err();

        match err {
            CurveError::DateFailed { date, source } => {
                assert_eq!(date, d(2024, 1, 3));
                assert!(matches!(*source, CurveError::Bond(BondError::MissingPrice { .. })));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_skip_policy_omits_dates() {
        let mut rows = full_rows();
        rows[1].prices[1] = None;

        let history =
            CurveHistory::build(&table(rows), &BootstrapConfig::default(), DateErrorPolicy::Skip)
                .unwrap();

        assert_eq!(history.dates(), vec![d(2024, 1, 2), d(2024, 1, 4)]);
        assert!(history.curve(d(2024, 1, 3)).is_none());
    }

    #[test]
    fn test_from_curves_checks_pillars() {
        let history =
            CurveHistory::build(&table(full_rows()), &BootstrapConfig::default(), DateErrorPolicy::Fail)
                .unwrap();
        let curves = history.curves().to_vec();

        let other = PillarSet::new(vec![1.0, 2.0]).unwrap();
        assert!(CurveHistory::from_curves(other, curves.clone()).is_err());

        let mut reversed = curves;
        reversed.reverse();
        let rebuilt = CurveHistory::from_curves(PillarSet::default(), reversed).unwrap();
        assert_eq!(rebuilt, history);
    }
}
