//! Domain types shared by every layer of the workspace.
//!
//! - [`Date`]: Calendar date for schedule generation and day counting

mod date;

pub use date::Date;
