//! CLI command implementations.

pub mod config;
pub mod curves;
pub mod parse;
pub mod risk;

pub use config::ConfigArgs;
pub use curves::CurvesArgs;
pub use parse::ParseArgs;
pub use risk::RiskArgs;

use std::path::Path;

use anyhow::Context;

use termstruct_bonds::PriceTable;
use termstruct_config::AnalysisConfig;
use termstruct_core::Date;
use termstruct_curves::CurveHistory;
use termstruct_ext_file::{CsvOptions, CsvPriceSource};

use crate::error::{CliError, CliResult};

/// Parses a date argument; accepts the same formats as price files.
pub fn parse_date(s: &str) -> CliResult<Date> {
    termstruct_ext_file::parse_date(s).ok_or_else(|| CliError::InvalidDate(s.to_string()))
}

/// Validates a price value.
pub fn validate_price(price: f64) -> CliResult<f64> {
    if !(price.is_finite() && price > 0.0) {
        return Err(CliError::InvalidPrice(price));
    }
    Ok(price)
}

/// Loads the configuration named on the command line, or the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    let config = AnalysisConfig::load_or_default(path)
        .with_context(|| match path {
            Some(p) => format!("loading configuration {}", p.display()),
            None => "loading default configuration".to_string(),
        })?;
    tracing::debug!(?config, "effective configuration");
    Ok(config)
}

/// Reads the price file with the configured date column and instruments.
pub fn load_prices(input: &Path, config: &AnalysisConfig) -> anyhow::Result<PriceTable> {
    let options = CsvOptions::new()
        .with_date_column(config.date_column.clone())
        .with_selection(config.instrument_identifiers()?);
    let source = CsvPriceSource::from_path(input, options)
        .with_context(|| format!("reading prices from {}", input.display()))?;
    Ok(source.into_table())
}

/// Builds curves for every date in `table`, or only for `date`.
pub fn build_history(
    table: &PriceTable,
    config: &AnalysisConfig,
    date: Option<Date>,
) -> anyhow::Result<CurveHistory> {
    let table = match date {
        Some(date) => table.on_date(date).ok_or(CliError::DateNotFound(date))?,
        None => table.clone(),
    };
    let bootstrap = config.to_bootstrap_config()?;
    let history = CurveHistory::build(&table, &bootstrap, config.on_date_error)?;
    tracing::info!(curves = history.len(), "built curve history");
    Ok(history)
}
