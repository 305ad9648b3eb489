//! Day count conventions.
//!
//! Every tenor in the workspace is measured with ACT/365 Fixed: the actual
//! number of calendar days divided by 365, with no business-day adjustment.
//!
//! # Usage
//!
//! ```rust
//! use termstruct_core::daycounts::{Act365Fixed, DayCount};
//! use termstruct_core::types::Date;
//!
//! let dc = Act365Fixed;
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2026, 1, 1).unwrap();
//!
//! assert_eq!(dc.day_count(start, end), 365);
//! assert_eq!(dc.year_fraction(start, end), 1.0);
//! ```

mod act365;

pub use act365::Act365Fixed;

use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`) so that curves for
/// different observation dates can be built concurrently.
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// The result is negative when `end` precedes `start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Counts the days between two dates according to the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// ACT/365 Fixed year fraction between `start` and `end`.
///
/// Shorthand for `Act365Fixed.year_fraction(start, end)`.
#[must_use]
pub fn year_fraction(start: Date, end: Date) -> f64 {
    Act365Fixed.year_fraction(start, end)
}
