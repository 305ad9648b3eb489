//! # Termstruct Risk
//!
//! Statistical risk analysis of government bond curve histories.
//!
//! This crate provides:
//!
//! - **Returns**: Log-returns of pillar rates between consecutive dates
//! - **Covariance**: Labelled sample covariance of those returns
//! - **PCA**: Ordered principal components with explained variance
//! - **Report**: Yield and forward risk over a [`CurveHistory`]
//!
//! ## Example
//!
//! ```rust
//! use nalgebra::DMatrix;
//! use termstruct_risk::prelude::*;
//!
//! // Three pillars observed on four dates
//! let levels = DMatrix::from_row_slice(3, 4, &[
//!     4.00, 4.10, 4.05, 4.20,
//!     3.50, 3.60, 3.55, 3.70,
//!     3.00, 3.20, 3.10, 3.30,
//! ]);
//! let labels = vec!["1Y".to_string(), "2Y".to_string(), "3Y".to_string()];
//!
//! let risk = CurveRisk::from_levels(labels, &levels).unwrap();
//! let explained = risk.components().explained_variance();
//! assert!(explained[0] > 0.9);
//! ```
//!
//! [`CurveHistory`]: termstruct_curves::CurveHistory

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]

pub mod covariance;
pub mod error;
pub mod pca;
pub mod report;
pub mod returns;
mod serde_matrix;

pub use covariance::CovarianceMatrix;
pub use error::{RiskError, RiskResult};
pub use pca::{principal_components, PrincipalComponents};
pub use report::{CurveRisk, RiskReport};
pub use returns::log_returns;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::covariance::CovarianceMatrix;
    pub use crate::error::{RiskError, RiskResult};
    pub use crate::pca::{principal_components, PrincipalComponents};
    pub use crate::report::{CurveRisk, RiskReport};
    pub use crate::returns::log_returns;
}
