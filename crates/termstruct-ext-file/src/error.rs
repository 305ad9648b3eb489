//! Error types for file input.

use std::path::PathBuf;

use thiserror::Error;

use termstruct_bonds::BondError;

/// A specialized Result type for file input.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading a price file.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be opened.
    #[error("Cannot open {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is not in the header.
    #[error("Column '{column}' not found in header")]
    MissingColumn {
        /// Column name.
        column: String,
    },

    /// A date cell matches none of the accepted formats.
    #[error("Line {line}: cannot parse date '{value}'")]
    InvalidDate {
        /// 1-based line number in the file.
        line: u64,
        /// Cell contents.
        value: String,
    },

    /// A price cell is not a number.
    #[error("Line {line}, column '{column}': cannot parse price '{value}'")]
    InvalidPrice {
        /// 1-based line number in the file.
        line: u64,
        /// Column header.
        column: String,
        /// Cell contents.
        value: String,
    },

    /// A header is not a bond identifier, or the table is inconsistent.
    #[error(transparent)]
    Bond(#[from] BondError),
}
