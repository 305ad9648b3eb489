//! Error types for bond operations.

use thiserror::Error;

use termstruct_core::{CoreError, Date};
use termstruct_math::MathError;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors raised while parsing a bond identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The identifier does not have the `<ISSUER> <COUPON> <MON> <YY>` shape.
    #[error("'{identifier}' has {found} tokens, expected 4 (<ISSUER> <COUPON> <MON> <YY>)")]
    TokenCount {
        /// The identifier as given.
        identifier: String,
        /// Number of whitespace-separated tokens found.
        found: usize,
    },

    /// The coupon token is not a non-negative decimal number.
    #[error("'{identifier}': coupon '{token}' is not a non-negative decimal number")]
    InvalidCoupon {
        /// The identifier as given.
        identifier: String,
        /// The offending token.
        token: String,
    },

    /// The month token is not a 3-letter English abbreviation.
    #[error("'{identifier}': month '{token}' is not a 3-letter English abbreviation")]
    InvalidMonth {
        /// The identifier as given.
        identifier: String,
        /// The offending token.
        token: String,
    },

    /// The year token is not a 2-digit number.
    #[error("'{identifier}': year '{token}' is not a 2-digit number")]
    InvalidYear {
        /// The identifier as given.
        identifier: String,
        /// The offending token.
        token: String,
    },
}

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// The identifier could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Yield-to-maturity root-finding failed.
    #[error("Yield-to-maturity for {identifier} did not converge: {source}")]
    NoConvergence {
        /// Instrument whose yield could not be solved.
        identifier: String,
        /// Underlying solver failure.
        #[source]
        source: MathError,
    },

    /// The instrument matures on or before the reference date.
    #[error("{identifier} matured on {maturity}, not after reference date {reference_date}")]
    MaturedInstrument {
        /// The instrument.
        identifier: String,
        /// Its maturity date.
        maturity: Date,
        /// The reference date of the observation.
        reference_date: Date,
    },

    /// No price was quoted for the instrument on the date.
    #[error("No price for {identifier} on {date}")]
    MissingPrice {
        /// The instrument.
        identifier: String,
        /// The observation date.
        date: Date,
    },

    /// The quoted price is not a positive finite number.
    #[error("Invalid price {price} for {identifier}")]
    InvalidPrice {
        /// The instrument.
        identifier: String,
        /// The offending price.
        price: f64,
    },

    /// The price table is malformed.
    #[error("Invalid price table: {reason}")]
    InvalidQuotes {
        /// Description of the problem.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl BondError {
    /// Creates a no-convergence error for an instrument.
    #[must_use]
    pub fn no_convergence(identifier: impl Into<String>, source: MathError) -> Self {
        Self::NoConvergence {
            identifier: identifier.into(),
            source,
        }
    }

    /// Creates a malformed price table error.
    #[must_use]
    pub fn invalid_quotes(reason: impl Into<String>) -> Self {
        Self::InvalidQuotes {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_no_convergence_keeps_source() {
        let err = BondError::no_convergence("CAN 2.25 Mar 24", MathError::convergence_failed(100, 0.5));

        assert!(err.to_string().contains("CAN 2.25 Mar 24"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let err: BondError = ParseError::TokenCount {
            identifier: "CAN 2.25".to_string(),
            found: 2,
        }
        .into();

        assert!(err.to_string().starts_with("'CAN 2.25' has 2 tokens"));
    }
}
