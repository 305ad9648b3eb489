//! Error types for curve construction.

use thiserror::Error;

use termstruct_bonds::BondError;
use termstruct_core::Date;
use termstruct_math::MathError;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
///
/// Any error aborts the curve for its reference date; there is no partial
/// curve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// An observation in the basket could not be built or priced.
    #[error(transparent)]
    Bond(#[from] BondError),

    /// Spot-rate root-finding failed for an instrument.
    #[error("Spot rate for {identifier} did not converge: {source}")]
    NoConvergence {
        /// Instrument whose spot rate could not be solved.
        identifier: String,
        /// Underlying solver failure.
        #[source]
        source: MathError,
    },

    /// Too few instruments to interpolate a curve.
    #[error("Need at least {required} instruments, got {actual}")]
    InsufficientInstruments {
        /// Minimum required.
        required: usize,
        /// Number supplied.
        actual: usize,
    },

    /// An observation was priced on a different date from the curve.
    #[error("{identifier} is observed on {got}, curve reference date is {expected}")]
    ReferenceDateMismatch {
        /// The observation.
        identifier: String,
        /// The curve's reference date.
        expected: Date,
        /// The observation's reference date.
        got: Date,
    },

    /// Basket maturities are not strictly ascending.
    #[error("Basket is not in ascending maturity order: {identifier} ({maturity}) follows {previous} ({previous_maturity})")]
    NonMonotonicMaturities {
        /// The out-of-order instrument.
        identifier: String,
        /// Its maturity.
        maturity: Date,
        /// The instrument before it.
        previous: String,
        /// Maturity of the instrument before it.
        previous_maturity: Date,
    },

    /// An instrument has more intermediate coupons than spot rates solved so far.
    #[error("{identifier} has {coupons} intermediate coupons but only {solved} spot rates are known")]
    UnalignedSchedule {
        /// The instrument.
        identifier: String,
        /// Coupon dates before maturity.
        coupons: usize,
        /// Spot rates solved from shorter instruments.
        solved: usize,
    },

    /// The pillar set is unusable.
    #[error("Invalid pillars: {reason}")]
    InvalidPillars {
        /// Description of the problem.
        reason: String,
    },

    /// Interpolation onto pillars failed.
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Curve construction failed for one observation date.
    #[error("Curve for {date} failed: {source}")]
    DateFailed {
        /// The observation date.
        date: Date,
        /// What went wrong.
        #[source]
        source: Box<CurveError>,
    },
}

impl CurveError {
    /// Creates an invalid pillars error.
    #[must_use]
    pub fn invalid_pillars(reason: impl Into<String>) -> Self {
        Self::InvalidPillars {
            reason: reason.into(),
        }
    }

    /// Attaches an observation date to an error.
    #[must_use]
    pub fn at_date(self, date: Date) -> Self {
        Self::DateFailed {
            date,
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_date_wraps() {
        let date = Date::from_ymd(2024, 1, 2).unwrap();
        let err = CurveError::InsufficientInstruments {
            required: 2,
            actual: 1,
        }
        .at_date(date);

        assert_eq!(
            err.to_string(),
            "Curve for 2024-01-02 failed: Need at least 2 instruments, got 1"
        );
    }
}
