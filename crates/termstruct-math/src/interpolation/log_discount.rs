//! Log-discount-factor interpolation of continuously-compounded rates.

use crate::error::{MathError, MathResult};
use crate::interpolation::{Interpolator, LinearInterpolator};

/// Maps rates known at `base_tenors` onto `target_tenors`.
///
/// Each base point is converted to a log discount factor
/// `ln P = -r * t`, which is interpolated linearly at every target tenor and
/// converted back with `r = -ln P / t`. Targets outside the base range take
/// the nearest boundary log discount factor (flat extrapolation of `ln P`,
/// not of the rate), so a short target below the first base tenor gets a
/// proportionally higher rate.
///
/// Evaluating at a base tenor returns that tenor's rate.
///
/// # Errors
///
/// - [`MathError::InsufficientData`] with fewer than 2 base points
/// - [`MathError::InvalidInput`] if lengths differ, base tenors are not
///   strictly increasing, or any input is non-finite
/// - [`MathError::DivisionByZero`] if a target tenor is 0
///
/// # Example
///
/// ```rust
/// use termstruct_math::interpolation::interpolate_log_discount;
///
/// let rates = interpolate_log_discount(&[1.0, 2.0], &[0.5, 1.5, 2.5], &[0.02, 0.025, 0.03])
///     .unwrap();
///
/// // ln P(1) = -(0.02 * 0.5 + 0.025 * 1.5) / 2
/// assert!((rates[0] - 0.02375).abs() < 1e-12);
/// ```
pub fn interpolate_log_discount(
    target_tenors: &[f64],
    base_tenors: &[f64],
    base_rates: &[f64],
) -> MathResult<Vec<f64>> {
    if base_tenors.len() != base_rates.len() {
        return Err(MathError::invalid_input(format!(
            "{} base tenors but {} base rates",
            base_tenors.len(),
            base_rates.len()
        )));
    }

    let log_discount_factors: Vec<f64> = base_tenors
        .iter()
        .zip(base_rates)
        .map(|(t, r)| -r * t)
        .collect();

    let curve = LinearInterpolator::new(base_tenors.to_vec(), log_discount_factors)?
        .with_flat_extrapolation();

    target_tenors
        .iter()
        .map(|&t| {
            if t == 0.0 {
                return Err(MathError::DivisionByZero { value: t });
            }
            if !t.is_finite() {
                return Err(MathError::invalid_input(format!(
                    "target tenor {t} is not finite"
                )));
            }
            Ok(-curve.interpolate(t)? / t)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_round_trip_at_base_tenors() {
        let tenors = [0.17, 0.67, 1.17, 1.67, 2.17, 2.67];
        let rates = [0.049, 0.047, 0.044, 0.041, 0.039, 0.037];

        let result = interpolate_log_discount(&tenors, &tenors, &rates).unwrap();

        for (r, expected) in result.iter().zip(rates.iter()) {
            assert_relative_eq!(*r, *expected, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_flat_log_df_extrapolation() {
        let tenors = [1.0, 2.0];
        let rates = [0.03, 0.04];

        let result = interpolate_log_discount(&[0.5, 4.0], &tenors, &rates).unwrap();

        // ln P held at -0.03 below t=1 and -0.08 above t=2
        assert_relative_eq!(result[0], 0.06, epsilon = 1e-14);
        assert_relative_eq!(result[1], 0.02, epsilon = 1e-14);
    }

    #[test]
    fn test_flat_curve_stays_flat_inside_range() {
        let tenors = [0.5, 1.5, 3.0, 5.5];
        let rates = [0.025; 4];

        let result = interpolate_log_discount(&[1.0, 2.0, 3.0, 4.0, 5.0], &tenors, &rates).unwrap();

        for r in result {
            assert_relative_eq!(r, 0.025, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_precondition_errors() {
        assert!(matches!(
            interpolate_log_discount(&[1.0], &[1.0], &[0.02]),
            Err(MathError::InsufficientData { .. })
        ));
        assert!(matches!(
            interpolate_log_discount(&[1.0], &[1.0, 2.0], &[0.02]),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(matches!(
            interpolate_log_discount(&[1.0], &[2.0, 1.0], &[0.02, 0.03]),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(matches!(
            interpolate_log_discount(&[0.0, 1.0], &[1.0, 2.0], &[0.02, 0.03]),
            Err(MathError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_empty_targets() {
        let result = interpolate_log_discount(&[], &[1.0, 2.0], &[0.02, 0.03]).unwrap();
        assert!(result.is_empty());
    }

    proptest! {
        #[test]
        fn prop_base_points_reproduced(
            first in 0.05f64..1.0,
            gaps in proptest::collection::vec(0.1f64..2.0, 1..8),
            rate_seed in proptest::collection::vec(-0.01f64..0.08, 9),
        ) {
            let mut tenors = vec![first];
            for g in &gaps {
                let next = tenors[tenors.len() - 1] + g;
                tenors.push(next);
            }
            let rates: Vec<f64> = rate_seed.iter().take(tenors.len()).copied().collect();

            let result = interpolate_log_discount(&tenors, &tenors, &rates).unwrap();
            for (r, expected) in result.iter().zip(rates.iter()) {
                prop_assert!((r - expected).abs() < 1e-12);
            }
        }
    }
}
