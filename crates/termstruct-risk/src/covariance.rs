//! Labelled sample covariance of curve returns.

use nalgebra::DMatrix;
use serde::Serialize;

use termstruct_math::linear_algebra::sample_covariance;

use crate::error::{RiskError, RiskResult};
use crate::returns::log_returns;
use crate::serde_matrix;

/// Sample covariance between the series of a curve history.
///
/// Rows and columns follow `labels` (pillar tenors such as `"1Y"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CovarianceMatrix {
    labels: Vec<String>,
    #[serde(serialize_with = "serde_matrix::rows")]
    matrix: DMatrix<f64>,
    observations: usize,
}

impl CovarianceMatrix {
    /// Covariance of `returns`, rows are series and columns observations.
    ///
    /// # Errors
    ///
    /// - [`RiskError::LabelMismatch`] if `labels` does not name every row
    /// - [`RiskError::InsufficientObservations`] with fewer than two columns
    pub fn from_returns(labels: Vec<String>, returns: &DMatrix<f64>) -> RiskResult<Self> {
        if labels.len() != returns.nrows() {
            return Err(RiskError::LabelMismatch {
                labels: labels.len(),
                series: returns.nrows(),
            });
        }
        let observations = returns.ncols();
        if observations < 2 {
            return Err(RiskError::InsufficientObservations {
                required: 2,
                actual: observations,
            });
        }

        let matrix = sample_covariance(returns)?;
        Ok(Self {
            labels,
            matrix,
            observations,
        })
    }

    /// Covariance of the log-returns of `levels`.
    pub fn from_levels(labels: Vec<String>, levels: &DMatrix<f64>) -> RiskResult<Self> {
        Self::from_returns(labels, &log_returns(levels)?)
    }

    /// Series labels, in row order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The covariance matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Number of return observations used.
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Number of series.
    pub fn dimension(&self) -> usize {
        self.labels.len()
    }

    /// Sum of the variances.
    pub fn total_variance(&self) -> f64 {
        self.matrix.trace()
    }

    /// Standard deviation of each series.
    pub fn volatilities(&self) -> Vec<f64> {
        self.matrix.diagonal().iter().map(|v| v.sqrt()).collect()
    }

    /// Correlation matrix. Series with zero variance get zero correlation
    /// with everything, including themselves.
    pub fn correlation(&self) -> DMatrix<f64> {
        let vols = self.volatilities();
        DMatrix::from_fn(self.dimension(), self.dimension(), |i, j| {
            let denom = vols[i] * vols[j];
            if denom > 0.0 {
                self.matrix[(i, j)] / denom
            } else {
                0.0
            }
        })
    }
}
