//! # Termstruct Ext File
//!
//! File-based price history for term-structure analysis.
//!
//! A price file is a CSV table with one row per date and one column per
//! bond, headed by its identifier:
//!
//! ```text
//! Dates,CAN 2.25 Mar 24,CAN 1.5 Sep 24,CAN 1.25 Mar 25
//! 2024-01-02,100.34,98.43,96.80
//! ```
//!
//! ```rust
//! use termstruct_ext_file::{CsvOptions, CsvPriceSource};
//!
//! let csv = "Dates,CAN 2.25 Mar 24,CAN 1.5 Sep 24\n2024-01-02,100.34,98.43\n";
//! let source = CsvPriceSource::from_reader(csv.as_bytes(), CsvOptions::default()).unwrap();
//! assert_eq!(source.table().identifiers().len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod dates;
mod error;
mod prices;

pub use dates::{parse_date, DATE_FORMATS};
pub use error::{FileError, FileResult};
pub use prices::{read_prices, CsvOptions, CsvPriceSource, DEFAULT_DATE_COLUMN};
