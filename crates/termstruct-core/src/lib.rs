//! # Termstruct Core
//!
//! Core types for the Termstruct term-structure analytics workspace.
//!
//! This crate provides the foundational building blocks used by every other
//! crate in the workspace:
//!
//! - **Types**: The [`Date`](types::Date) newtype used for observation,
//!   coupon and maturity dates
//! - **Day Count Conventions**: ACT/365 Fixed year fractions
//!
//! ## Example
//!
//! ```rust
//! use termstruct_core::prelude::*;
//!
//! let reference = Date::from_ymd(2024, 1, 1).unwrap();
//! let maturity = Date::from_ymd(2025, 1, 1).unwrap();
//!
//! let tau = year_fraction(reference, maturity);
//! assert!((tau - 366.0 / 365.0).abs() < 1e-15);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{year_fraction, Act365Fixed, DayCount};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::Date;
}

pub use error::{CoreError, CoreResult};
pub use types::Date;
