//! CSV price-history source.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use termstruct_bonds::{BondIdentifier, PriceTable, QuoteRow};

use crate::dates::parse_date;
use crate::error::{FileError, FileResult};

// =============================================================================
// OPTIONS
// =============================================================================

/// Default name of the date column.
pub const DEFAULT_DATE_COLUMN: &str = "Dates";

/// How a price file is laid out and which columns to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    date_column: String,
    selection: Vec<BondIdentifier>,
    delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            selection: Vec::new(),
            delimiter: b',',
        }
    }
}

impl CsvOptions {
    /// Creates default options: `Dates` column, every instrument, comma separated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name of the date column.
    #[must_use]
    pub fn with_date_column(mut self, column: impl Into<String>) -> Self {
        self.date_column = column.into();
        self
    }

    /// Keeps only these instruments, in this order.
    #[must_use]
    pub fn with_selection(mut self, selection: Vec<BondIdentifier>) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Name of the date column.
    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    /// Selected instruments; empty keeps every column.
    pub fn selection(&self) -> &[BondIdentifier] {
        &self.selection
    }
}

// =============================================================================
// CSV PRICE SOURCE
// =============================================================================

/// Bond prices keyed by date, read from a CSV file.
///
/// The header names a date column and one column per bond identifier, e.g.
/// `Dates,CAN 2.25 Mar 24,CAN 1.5 Sep 24`. Empty cells are missing prices.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    path: Option<PathBuf>,
    options: CsvOptions,
    table: PriceTable,
}

impl CsvPriceSource {
    /// Reads prices from a file.
    pub fn from_path(path: impl AsRef<Path>, options: CsvOptions) -> FileResult<Self> {
        let path = path.as_ref();
        let table = read_path(path, &options)?;
        log::info!(
            "Loaded {} dates x {} instruments from {}",
            table.len(),
            table.identifiers().len(),
            path.display()
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            options,
            table,
        })
    }

    /// Reads prices from any reader.
    pub fn from_reader<R: Read>(reader: R, options: CsvOptions) -> FileResult<Self> {
        let table = read_prices(reader, &options)?;
        Ok(Self {
            path: None,
            options,
            table,
        })
    }

    /// Re-reads the file. A source built from a reader is left unchanged.
    pub fn reload(&mut self) -> FileResult<()> {
        if let Some(path) = &self.path {
            self.table = read_path(path, &self.options)?;
        }
        Ok(())
    }

    /// Source file, if read from one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The loaded prices.
    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    /// Consumes the source, returning the prices.
    pub fn into_table(self) -> PriceTable {
        self.table
    }
}

fn read_path(path: &Path, options: &CsvOptions) -> FileResult<PriceTable> {
    let file = File::open(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_prices(file, options)
}

/// Parses a price table from CSV.
///
/// The date column is the one named in `options`; failing that, an unnamed
/// first column (as written for a data-frame index) is used.
///
/// # Errors
///
/// - [`FileError::MissingColumn`] if the date column or a selected
///   instrument is absent
/// - [`FileError::InvalidDate`] / [`FileError::InvalidPrice`] for bad cells
/// - [`FileError::Bond`] if a header is not an identifier, or a date repeats
pub fn read_prices<R: Read>(reader: R, options: &CsvOptions) -> FileResult<PriceTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let date_index = headers
        .iter()
        .position(|h| h == options.date_column)
        .or_else(|| headers.get(0).filter(|h| h.is_empty()).map(|_| 0))
        .ok_or_else(|| FileError::MissingColumn {
            column: options.date_column.clone(),
        })?;

    let columns = select_columns(&headers, date_index, &options.selection)?;
    let identifiers: Vec<BondIdentifier> = columns.iter().map(|(_, id)| id.clone()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);

        let raw_date = record.get(date_index).unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| FileError::InvalidDate {
            line,
            value: raw_date.to_string(),
        })?;

        let prices = columns
            .iter()
            .map(|(index, _)| parse_price(record.get(*index).unwrap_or_default()).map_err(|value| {
                FileError::InvalidPrice {
                    line,
                    column: headers.get(*index).unwrap_or_default().to_string(),
                    value,
                }
            }))
            .collect::<FileResult<Vec<_>>>()?;

        rows.push(QuoteRow::new(date, prices));
    }

    Ok(PriceTable::new(identifiers, rows)?)
}

/// Price columns as `(header index, identifier)`, in output order.
fn select_columns(
    headers: &csv::StringRecord,
    date_index: usize,
    selection: &[BondIdentifier],
) -> FileResult<Vec<(usize, BondIdentifier)>> {
    if selection.is_empty() {
        return headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_index)
            .map(|(i, h)| Ok((i, BondIdentifier::parse(h).map_err(termstruct_bonds::BondError::from)?)))
            .collect();
    }

    // Headers that are not identifiers are skipped when selecting
    let available: Vec<(usize, BondIdentifier)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date_index)
        .filter_map(|(i, h)| BondIdentifier::parse(h).ok().map(|id| (i, id)))
        .collect();

    selection
        .iter()
        .map(|wanted| {
            available
                .iter()
                .find(|(_, id)| id == wanted)
                .cloned()
                .ok_or_else(|| FileError::MissingColumn {
                    column: wanted.to_string(),
                })
        })
        .collect()
}

/// Empty and `NaN` cells are missing prices; anything else must be a number.
fn parse_price(value: &str) -> Result<Option<f64>, String> {
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    value.parse::<f64>().map(Some).map_err(|_| value.to_string())
}
