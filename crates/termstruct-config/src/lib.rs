//! Termstruct Configuration Layer
//!
//! Configuration for term-structure construction and risk analysis: pillar
//! tenors, root-finding settings, basket and date error policies, and the
//! layout of the price file.
//!
//! # Features
//!
//! - **Defaults everywhere**: an empty file, or no file, is a valid configuration
//! - **Validation**: the [`Validate`] trait reports every problem with its field path
//! - **Formats**: TOML or JSON, chosen by file extension
//!
//! # Example
//!
//! ```rust
//! use termstruct_config::{AnalysisConfig, ConfigFormat, Validate};
//!
//! let config = AnalysisConfig::from_str_as(
//!     r#"
//! pillars = [1.0, 2.0, 3.0, 5.0]
//! on_date_error = "skip"
//!
//! [solver]
//! kind = "brent"
//! tolerance = 1e-12
//! "#,
//!     ConfigFormat::Toml,
//! )
//! .unwrap();
//!
//! assert!(config.is_valid());
//! let bootstrap = config.to_bootstrap_config().unwrap();
//! assert_eq!(bootstrap.pillars.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod analysis;
mod error;
mod loader;

pub use analysis::{AnalysisConfig, SolverSettings, MAX_ITERATIONS, MAX_TOLERANCE};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use loader::ConfigFormat;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analysis::{AnalysisConfig, SolverSettings};
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::loader::ConfigFormat;
}
