//! # Termstruct Curves
//!
//! Term-structure construction from government bond baskets.
//!
//! This crate provides:
//!
//! - **Pillars**: The [`PillarSet`] of tenors curves are reported on
//! - **Basket contract**: Reference-date and maturity-order validation
//! - **Bootstrap**: Yield, spot and forward curves via [`CurveBootstrapper`]
//! - **Term structure**: The eager, immutable [`TermStructure`] for one date
//! - **History**: [`CurveHistory`] across every date of a price table
//!
//! ## Quick Start
//!
//! ```rust
//! use termstruct_bonds::BondObservation;
//! use termstruct_core::Date;
//! use termstruct_curves::prelude::*;
//!
//! let date = Date::from_ymd(2024, 1, 2).unwrap();
//! let basket: Vec<_> = [
//!     ("CAN 2.25 Mar 24", 100.34),
//!     ("CAN 1.5 Sep 24", 98.43),
//!     ("CAN 1.25 Mar 25", 96.80),
//! ]
//! .iter()
//! .map(|(id, p)| BondObservation::from_quote(id, date, *p).unwrap())
//! .collect();
//!
//! let curve = TermStructure::build(&basket, date, &BootstrapConfig::default()).unwrap();
//!
//! // Percent, on pillars 1..5 years (forwards on 2..5)
//! assert_eq!(curve.yield_curve().len(), 5);
//! assert_eq!(curve.spot_curve().len(), 5);
//! assert_eq!(curve.forward_curve().len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]

pub mod basket;
pub mod bootstrap;
pub mod config;
pub mod curve;
pub mod error;
pub mod history;
pub mod pillars;

pub use bootstrap::{forward_curve, CurveBootstrapper};
pub use config::{BasketOrdering, BootstrapConfig, DateErrorPolicy};
pub use curve::TermStructure;
pub use error::{CurveError, CurveResult};
pub use history::CurveHistory;
pub use pillars::PillarSet;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::basket::prepare_basket;
    pub use crate::bootstrap::{forward_curve, CurveBootstrapper};
    pub use crate::config::{BasketOrdering, BootstrapConfig, DateErrorPolicy};
    pub use crate::curve::TermStructure;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::history::CurveHistory;
    pub use crate::pillars::PillarSet;
}
