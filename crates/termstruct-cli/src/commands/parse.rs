//! Parse command implementation.
//!
//! Decodes a bond identifier, lists its remaining coupon dates and, given a
//! price, solves its yield to maturity.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use termstruct_bonds::schedule::semiannual_schedule;
use termstruct_bonds::{BondIdentifier, BondObservation};
use termstruct_core::Date;
use termstruct_config::AnalysisConfig;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, validate_price};
use crate::error::CliError;
use crate::output::{print_header, print_json, print_output, KeyValue};

/// Arguments for the parse command.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Bond identifier, e.g. "CAN 2.25 Mar 24"
    pub identifier: String,

    /// Reference date for the coupon schedule (YYYY-MM-DD)
    #[arg(short, long)]
    pub reference_date: Option<String>,

    /// Clean price per 100 face; solves the yield to maturity
    #[arg(short, long, requires = "reference_date")]
    pub price: Option<f64>,
}

/// Parse command result.
#[derive(Debug, Serialize)]
pub struct ParseReport {
    identifier: BondIdentifier,
    issuer: String,
    coupon_rate: f64,
    maturity: Date,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<Date>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    yield_to_maturity: Option<f64>,
}

impl ParseReport {
    fn rows(&self) -> Vec<KeyValue> {
        let mut rows = vec![
            KeyValue::new("Identifier", self.identifier.to_string()),
            KeyValue::new("Issuer", &self.issuer),
            KeyValue::from_percent("Coupon", self.coupon_rate * 100.0),
            KeyValue::new("Maturity", self.maturity.to_string()),
        ];
        if let Some(date) = self.reference_date {
            rows.push(KeyValue::new("Reference Date", date.to_string()));
        }
        if let Some(schedule) = &self.schedule {
            rows.push(KeyValue::new("Coupons Remaining", schedule.len().to_string()));
            let dates: Vec<String> = schedule.iter().map(ToString::to_string).collect();
            rows.push(KeyValue::new("Schedule", dates.join(", ")));
        }
        if let Some(price) = self.price {
            rows.push(KeyValue::new("Price", format!("{price:.4}")));
        }
        if let Some(ytm) = self.yield_to_maturity {
            rows.push(KeyValue::from_percent("Yield to Maturity", ytm * 100.0));
        }
        rows
    }
}

/// Execute the parse command.
pub fn execute(args: ParseArgs, format: OutputFormat, config: &AnalysisConfig) -> Result<()> {
    let identifier = BondIdentifier::parse(&args.identifier)?;
    let reference_date = args.reference_date.as_deref().map(parse_date).transpose()?;

    let mut report = ParseReport {
        issuer: identifier.issuer().to_string(),
        coupon_rate: identifier.coupon_rate(),
        maturity: identifier.maturity(),
        identifier: identifier.clone(),
        reference_date,
        schedule: None,
        price: None,
        yield_to_maturity: None,
    };

    if let Some(date) = reference_date {
        report.schedule = Some(semiannual_schedule(date, identifier.maturity())?);
    }

    if let Some(price) = args.price {
        let date = reference_date.ok_or_else(|| CliError::MissingArgument("--reference-date".into()))?;
        let observation = BondObservation::new(identifier, date, validate_price(price)?)?;
        report.price = Some(price);
        report.yield_to_maturity = Some(
            observation.yield_to_maturity_with(&config.solver.kind, &config.solver.solver_config())?,
        );
    }

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table | OutputFormat::Csv => {
            if format == OutputFormat::Table {
                print_header("Bond Identifier");
            }
            print_output(&report.rows(), format)
        }
    }
}
