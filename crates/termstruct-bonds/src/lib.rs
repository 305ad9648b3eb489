//! # Termstruct Bonds
//!
//! Government bond observations for term-structure construction.
//!
//! This crate provides:
//!
//! - **Identifiers**: Parsing of quoted bond names such as `"CAN 2.25 Mar 24"`
//! - **Schedules**: Semiannual coupon dates generated backward from maturity
//! - **Observations**: A bond priced on a reference date, with
//!   yield-to-maturity solved through any [`Solver`](termstruct_math::solvers::Solver)
//! - **Quotes**: The date by instrument [`PriceTable`] of clean prices
//!
//! ## Example
//!
//! ```rust
//! use termstruct_bonds::prelude::*;
//! use termstruct_core::Date;
//!
//! let reference = Date::from_ymd(2024, 1, 2).unwrap();
//! let bond = BondObservation::from_quote("CAN 1.25 Mar 25", reference, 97.6).unwrap();
//!
//! assert_eq!(bond.schedule().len(), 3);
//! let ytm = bond.yield_to_maturity().unwrap();
//! assert!(ytm > 0.0125);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]

pub mod error;
pub mod identifier;
pub mod observation;
pub mod quotes;
pub mod schedule;

pub use error::{BondError, BondResult, ParseError};
pub use identifier::BondIdentifier;
pub use observation::BondObservation;
pub use quotes::{PriceTable, QuoteRow};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{BondError, BondResult, ParseError};
    pub use crate::identifier::BondIdentifier;
    pub use crate::observation::BondObservation;
    pub use crate::quotes::{PriceTable, QuoteRow};
    pub use crate::schedule::semiannual_schedule;
}
