//! Risk report over a curve history.

use nalgebra::DMatrix;
use serde::Serialize;

use termstruct_core::Date;
use termstruct_curves::CurveHistory;

use crate::covariance::CovarianceMatrix;
use crate::error::{RiskError, RiskResult};
use crate::pca::PrincipalComponents;

/// Minimum number of dated curves: two log-returns for a sample covariance.
pub const MIN_CURVES: usize = 3;

/// Covariance and principal components of one curve family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveRisk {
    covariance: CovarianceMatrix,
    components: PrincipalComponents,
}

impl CurveRisk {
    /// Analyses the log-returns of `levels` (rows = pillars, columns = dates).
    pub fn from_levels(labels: Vec<String>, levels: &DMatrix<f64>) -> RiskResult<Self> {
        let covariance = CovarianceMatrix::from_levels(labels, levels)?;
        let components = PrincipalComponents::from_covariance(&covariance)?;
        Ok(Self {
            covariance,
            components,
        })
    }

    /// Covariance of the log-returns.
    pub fn covariance(&self) -> &CovarianceMatrix {
        &self.covariance
    }

    /// Principal components of the covariance.
    pub fn components(&self) -> &PrincipalComponents {
        &self.components
    }
}

/// Yield and forward curve risk over a history of dated curves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    start: Date,
    end: Date,
    curves: usize,
    yields: CurveRisk,
    forwards: CurveRisk,
}

impl RiskReport {
    /// Builds the report from `history`.
    ///
    /// Yields are labelled by pillar tenor, forwards by the pillars after the
    /// anchor.
    ///
    /// # Errors
    ///
    /// - [`RiskError::InsufficientObservations`] with fewer than three curves
    /// - [`RiskError::NonPositiveRate`] if any yield or forward is not
    ///   strictly positive
    pub fn from_history(history: &CurveHistory) -> RiskResult<Self> {
        let curves = history.curves();
        let (Some(first), Some(last)) = (curves.first(), curves.last()) else {
            return Err(RiskError::InsufficientObservations {
                required: MIN_CURVES,
                actual: 0,
            });
        };
        if curves.len() < MIN_CURVES {
            return Err(RiskError::InsufficientObservations {
                required: MIN_CURVES,
                actual: curves.len(),
            });
        }

        let pillars = history.pillars();
        let yields = CurveRisk::from_levels(pillars.labels(), &history.yield_matrix())?;
        let forwards = CurveRisk::from_levels(pillars.forward_labels(), &history.forward_matrix())?;

        log::info!(
            "Risk report over {} curves ({} to {})",
            curves.len(),
            first.reference_date(),
            last.reference_date()
        );

        Ok(Self {
            start: first.reference_date(),
            end: last.reference_date(),
            curves: curves.len(),
            yields,
            forwards,
        })
    }

    /// Reference date of the first curve.
    pub fn start(&self) -> Date {
        self.start
    }

    /// Reference date of the last curve.
    pub fn end(&self) -> Date {
        self.end
    }

    /// Number of curves analysed.
    pub fn curves(&self) -> usize {
        self.curves
    }

    /// Yield curve risk.
    pub fn yields(&self) -> &CurveRisk {
        &self.yields
    }

    /// Forward curve risk.
    pub fn forwards(&self) -> &CurveRisk {
        &self.forwards
    }
}
