//! Principal component analysis of curve covariance.
//!
//! The leading components of a yield-curve covariance typically read as
//! level, slope and curvature moves.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use termstruct_math::linear_algebra::sorted_symmetric_eigen;

use crate::covariance::CovarianceMatrix;
use crate::error::RiskResult;
use crate::serde_matrix;

/// Eigen-decomposition of a [`CovarianceMatrix`].
///
/// Components are ordered by descending eigenvalue. Column `k` of
/// [`eigenvectors`](Self::eigenvectors) is the loading of component `k` on
/// each labelled series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrincipalComponents {
    labels: Vec<String>,
    #[serde(serialize_with = "serde_matrix::vector")]
    eigenvalues: DVector<f64>,
    #[serde(serialize_with = "serde_matrix::rows")]
    eigenvectors: DMatrix<f64>,
    explained_variance: Vec<f64>,
}

impl PrincipalComponents {
    /// Decomposes `covariance`.
    ///
    /// Rounding can leave the smallest eigenvalues of a positive
    /// semi-definite matrix slightly negative; these are reported as zero.
    /// When the total variance is zero every explained-variance ratio is zero.
    pub fn from_covariance(covariance: &CovarianceMatrix) -> RiskResult<Self> {
        let (values, eigenvectors) = sorted_symmetric_eigen(covariance.matrix())?;
        let eigenvalues = values.map(|v| v.max(0.0));

        let total: f64 = eigenvalues.sum();
        let explained_variance = eigenvalues
            .iter()
            .map(|v| if total > 0.0 { v / total } else { 0.0 })
            .collect();

        log::debug!(
            "PCA over {} series: leading eigenvalue {:.3e}",
            covariance.dimension(),
            eigenvalues[0]
        );

        Ok(Self {
            labels: covariance.labels().to_vec(),
            eigenvalues,
            eigenvectors,
            explained_variance,
        })
    }

    /// Series labels, in eigenvector row order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Eigenvalues, descending.
    pub fn eigenvalues(&self) -> &DVector<f64> {
        &self.eigenvalues
    }

    /// Unit eigenvectors as columns.
    pub fn eigenvectors(&self) -> &DMatrix<f64> {
        &self.eigenvectors
    }

    /// Share of total variance carried by each component.
    pub fn explained_variance(&self) -> &[f64] {
        &self.explained_variance
    }

    /// Running sum of [`explained_variance`](Self::explained_variance).
    pub fn cumulative_explained_variance(&self) -> Vec<f64> {
        self.explained_variance
            .iter()
            .scan(0.0, |acc, v| {
                *acc += v;
                Some(*acc)
            })
            .collect()
    }

    /// Loadings of component `k`, or `None` if out of range.
    pub fn component(&self, k: usize) -> Option<Vec<f64>> {
        (k < self.eigenvectors.ncols()).then(|| self.eigenvectors.column(k).iter().copied().collect())
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Returns true if there are no components.
    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }
}

/// Principal components of `covariance`.
pub fn principal_components(covariance: &CovarianceMatrix) -> RiskResult<PrincipalComponents> {
    PrincipalComponents::from_covariance(covariance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn labels(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("{i}Y")).collect()
    }

    // ============ Known Decompositions ============

    #[test]
    fn test_perfectly_correlated_series() {
        // Second series is twice the first: a single non-zero component
        let returns = DMatrix::from_row_slice(2, 4, &[1.0, 2.0, 3.0, 4.0, 2.0, 4.0, 6.0, 8.0]);
        let cov = CovarianceMatrix::from_returns(labels(2), &returns).unwrap();
        let pca = principal_components(&cov).unwrap();

        assert_eq!(pca.len(), 2);
        assert_relative_eq!(pca.eigenvalues()[0], 25.0 / 3.0, epsilon = 1e-10);
        assert_relative_eq!(pca.eigenvalues()[1], 0.0, epsilon = 1e-10);
        assert_relative_eq!(pca.explained_variance()[0], 1.0, epsilon = 1e-10);

        let first = pca.component(0).unwrap();
        let norm = 5.0_f64.sqrt();
        assert_relative_eq!(first[0], 1.0 / norm, epsilon = 1e-10);
        assert_relative_eq!(first[1], 2.0 / norm, epsilon = 1e-10);
        assert!(pca.component(2).is_none());
    }

    #[test]
    fn test_uncorrelated_series_order() {
        let returns = DMatrix::from_row_slice(
            2,
            4,
            &[1.0, -1.0, 1.0, -1.0, 3.0, 3.0, -3.0, -3.0],
        );
        let cov = CovarianceMatrix::from_returns(labels(2), &returns).unwrap();
        let pca = principal_components(&cov).unwrap();

        // Larger variance belongs to the second series
        assert!(pca.eigenvalues()[0] > pca.eigenvalues()[1]);
        let first = pca.component(0).unwrap();
        assert_relative_eq!(first[0], 0.0, epsilon = 1e-10);
        assert_relative_eq!(first[1], 1.0, epsilon = 1e-10);
        assert_relative_eq!(pca.explained_variance()[0], 0.9, epsilon = 1e-10);
        assert_relative_eq!(pca.cumulative_explained_variance()[1], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_variance() {
        let returns = DMatrix::zeros(3, 5);
        let cov = CovarianceMatrix::from_returns(labels(3), &returns).unwrap();
        let pca = principal_components(&cov).unwrap();

        assert!(pca.explained_variance().iter().all(|v| *v == 0.0));
        assert!(pca.eigenvalues().iter().all(|v| *v == 0.0));
    }

    // ============ Properties ============

    proptest! {
        #[test]
        fn prop_eigenvalues_sorted_and_sum_to_trace(
            data in prop::collection::vec(-0.05f64..0.05, 5 * 8)
        ) {
            let returns = DMatrix::from_vec(5, 8, data);
            let cov = CovarianceMatrix::from_returns(labels(5), &returns).unwrap();
            let pca = principal_components(&cov).unwrap();

            let values = pca.eigenvalues();
            prop_assert!(values.iter().all(|v| *v >= 0.0));
            prop_assert!(values.as_slice().windows(2).all(|w| w[0] >= w[1]));

            let trace = cov.total_variance();
            prop_assert!((values.sum() - trace).abs() <= 1e-10 * trace.max(1e-12));

            let explained: f64 = pca.explained_variance().iter().sum();
            if trace > 0.0 {
                prop_assert!((explained - 1.0).abs() < 1e-9);
            }
        }
    }
}
