//! The quote panel: clean prices by observation date and instrument.

use std::collections::HashSet;

use serde::Serialize;

use termstruct_core::Date;

use crate::error::{BondError, BondResult};
use crate::identifier::BondIdentifier;
use crate::observation::BondObservation;

/// Prices for every instrument on one observation date.
///
/// `prices[i]` belongs to the table's `identifiers()[i]`; `None` marks an
/// empty cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRow {
    /// Observation date.
    pub date: Date,
    /// One optional clean price per instrument column.
    pub prices: Vec<Option<f64>>,
}

impl QuoteRow {
    /// Creates a row.
    pub fn new(date: Date, prices: Vec<Option<f64>>) -> Self {
        Self { date, prices }
    }
}

/// Date by instrument table of clean prices.
///
/// Rows are kept in ascending date order with no duplicate dates.
///
/// # Example
///
/// ```
/// use termstruct_bonds::{BondIdentifier, PriceTable, QuoteRow};
/// use termstruct_core::Date;
///
/// let ids = vec![
///     "CAN 2.25 Mar 24".parse::<BondIdentifier>().unwrap(),
///     "CAN 1.5 Sep 24".parse().unwrap(),
/// ];
/// let day = Date::from_ymd(2024, 1, 2).unwrap();
/// let table = PriceTable::new(ids, vec![QuoteRow::new(day, vec![Some(99.7), Some(98.4)])]).unwrap();
///
/// let basket = table.observations(&table.rows()[0]).unwrap();
/// assert_eq!(basket.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTable {
    identifiers: Vec<BondIdentifier>,
    rows: Vec<QuoteRow>,
}

impl PriceTable {
    /// Creates a table, sorting rows by date.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::InvalidQuotes`] if an identifier repeats, a row
    /// has the wrong number of cells, or two rows share a date.
    pub fn new(identifiers: Vec<BondIdentifier>, mut rows: Vec<QuoteRow>) -> BondResult<Self> {
        let mut seen = HashSet::new();
        if let Some(dup) = identifiers.iter().find(|id| !seen.insert(*id)) {
            return Err(BondError::invalid_quotes(format!(
                "instrument {dup} appears more than once"
            )));
        }

        if let Some(row) = rows.iter().find(|r| r.prices.len() != identifiers.len()) {
            return Err(BondError::invalid_quotes(format!(
                "row {} has {} prices for {} instruments",
                row.date,
                row.prices.len(),
                identifiers.len()
            )));
        }

        rows.sort_by_key(|r| r.date);
        if let Some(w) = rows.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(BondError::invalid_quotes(format!(
                "date {} appears more than once",
                w[0].date
            )));
        }

        Ok(Self { identifiers, rows })
    }

    /// Instrument columns, in table order.
    pub fn identifiers(&self) -> &[BondIdentifier] {
        &self.identifiers
    }

    /// Rows in ascending date order.
    pub fn rows(&self) -> &[QuoteRow] {
        &self.rows
    }

    /// Observation dates in ascending order.
    pub fn dates(&self) -> Vec<Date> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row for `date`, if quoted.
    pub fn row(&self, date: Date) -> Option<&QuoteRow> {
        self.rows
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Keeps only `selection`, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::InvalidQuotes`] if an instrument is not a column.
    pub fn select(&self, selection: &[BondIdentifier]) -> BondResult<Self> {
        let columns = selection
            .iter()
            .map(|id| {
                self.identifiers
                    .iter()
                    .position(|c| c == id)
                    .ok_or_else(|| BondError::invalid_quotes(format!("no column for {id}")))
            })
            .collect::<BondResult<Vec<_>>>()?;

        let rows = self
            .rows
            .iter()
            .map(|r| QuoteRow::new(r.date, columns.iter().map(|&c| r.prices[c]).collect()))
            .collect();

        Self::new(selection.to_vec(), rows)
    }

    /// Restricts the table to a single date.
    ///
    /// Returns `None` if the date is not quoted.
    pub fn on_date(&self, date: Date) -> Option<Self> {
        self.row(date).map(|row| Self {
            identifiers: self.identifiers.clone(),
            rows: vec![row.clone()],
        })
    }

    /// Builds the basket of observations for one row.
    ///
    /// Observations come back in column order.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::MissingPrice`] for an empty cell, or any error
    /// from [`BondObservation::new`].
    pub fn observations(&self, row: &QuoteRow) -> BondResult<Vec<BondObservation>> {
        self.identifiers
            .iter()
            .zip(&row.prices)
            .map(|(id, price)| {
                let price = price.ok_or_else(|| BondError::MissingPrice {
                    identifier: id.to_string(),
                    date: row.date,
                })?;
                BondObservation::new(id.clone(), row.date, price)
            })
            .collect()
    }
}
