//! CLI error types.

use thiserror::Error;

use termstruct_core::Date;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid price.
    #[error("Invalid price: {0}. Must be positive.")]
    InvalidPrice(f64),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Requested date is not in the price file.
    #[error("No prices for {0} in the input file")]
    DateNotFound(Date),

    /// Configuration file has validation errors.
    #[error("Configuration is invalid ({0} problem(s))")]
    InvalidConfig(usize),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
