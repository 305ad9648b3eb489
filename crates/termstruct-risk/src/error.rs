//! Error types for risk calculations.

use thiserror::Error;

use termstruct_curves::CurveError;
use termstruct_math::MathError;

/// A specialized Result type for risk calculations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during risk calculations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RiskError {
    /// A rate level cannot be log-differenced.
    #[error("Rate at row {row}, column {column} is not strictly positive: {value}")]
    NonPositiveRate {
        /// Series (pillar) index.
        row: usize,
        /// Observation (date) index.
        column: usize,
        /// The offending level.
        value: f64,
    },

    /// Too few observations for the statistic.
    #[error("Need at least {required} observations, got {actual}")]
    InsufficientObservations {
        /// Minimum required.
        required: usize,
        /// Number supplied.
        actual: usize,
    },

    /// Labels do not match the number of series.
    #[error("{labels} labels supplied for {series} series")]
    LabelMismatch {
        /// Number of labels.
        labels: usize,
        /// Number of series (matrix rows).
        series: usize,
    },

    /// Numerical failure in the covariance or eigen decomposition.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Curve history could not be built.
    #[error(transparent)]
    Curve(#[from] CurveError),
}
