//! Log-returns of rate histories.

use nalgebra::DMatrix;

use crate::error::{RiskError, RiskResult};

/// Minimum number of levels per series to form one return.
pub const MIN_LEVELS: usize = 2;

/// Computes `ln(x[t+1] / x[t])` along each row.
///
/// Rows are series (pillars), columns are observations in date order. The
/// result has one column fewer than `levels`.
///
/// # Errors
///
/// - [`RiskError::InsufficientObservations`] with fewer than two columns
/// - [`RiskError::NonPositiveRate`] if any level is zero, negative or not
///   finite
pub fn log_returns(levels: &DMatrix<f64>) -> RiskResult<DMatrix<f64>> {
    let (rows, cols) = levels.shape();
    if cols < MIN_LEVELS {
        return Err(RiskError::InsufficientObservations {
            required: MIN_LEVELS,
            actual: cols,
        });
    }

    if let Some((index, &value)) = levels
        .iter()
        .enumerate()
        .find(|(_, v)| !(v.is_finite() && **v > 0.0))
    {
        // Column-major storage
        return Err(RiskError::NonPositiveRate {
            row: index % rows,
            column: index / rows,
            value,
        });
    }

    Ok(DMatrix::from_fn(rows, cols - 1, |r, c| {
        (levels[(r, c + 1)] / levels[(r, c)]).ln()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_log_returns_shape_and_values() {
        let levels = DMatrix::from_row_slice(2, 3, &[4.0, 4.4, 4.4, 3.0, 2.7, 3.0]);
        let r = log_returns(&levels).unwrap();

        assert_eq!(r.shape(), (2, 2));
        assert_relative_eq!(r[(0, 0)], (4.4_f64 / 4.0).ln(), epsilon = 1e-15);
        assert_relative_eq!(r[(0, 1)], 0.0, epsilon = 1e-15);
        assert_relative_eq!(r[(1, 0)], (2.7_f64 / 3.0).ln(), epsilon = 1e-15);
        assert_relative_eq!(r[(1, 1)], (3.0_f64 / 2.7).ln(), epsilon = 1e-15);
    }

    #[test]
    fn test_log_returns_single_observation() {
        let levels = DMatrix::from_row_slice(3, 1, &[1.0, 2.0, 3.0]);
        assert_eq!(
            log_returns(&levels),
            Err(RiskError::InsufficientObservations {
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_log_returns_reports_non_positive_location() {
        let levels = DMatrix::from_row_slice(2, 3, &[1.0, 1.1, 1.2, 0.5, -0.1, 0.4]);
        assert_eq!(
            log_returns(&levels),
            Err(RiskError::NonPositiveRate {
                row: 1,
                column: 1,
                value: -0.1
            })
        );
    }

    #[test]
    fn test_log_returns_rejects_zero() {
        let levels = DMatrix::from_row_slice(1, 2, &[0.0, 1.0]);
        assert!(matches!(
            log_returns(&levels),
            Err(RiskError::NonPositiveRate { row: 0, column: 0, .. })
        ));
    }
}
