//! Curves command implementation.
//!
//! Builds yield, spot and forward curves for each date of a price file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use termstruct_config::AnalysisConfig;
use termstruct_core::Date;
use termstruct_curves::{CurveHistory, TermStructure};

use crate::cli::OutputFormat;
use crate::commands::{build_history, load_prices, parse_date};
use crate::output::{grid, print_csv, print_header, print_json};

/// Arguments for the curves command.
#[derive(Args, Debug)]
pub struct CurvesArgs {
    /// Price file (CSV with a date column and one column per bond)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Build only this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,
}

/// One pillar value, the row shape for CSV output.
#[derive(Debug, Serialize)]
pub struct CurvePoint {
    date: Date,
    curve: &'static str,
    tenor: f64,
    rate: f64,
}

fn points(curve: &TermStructure) -> Vec<CurvePoint> {
    let pillars = curve.pillars();
    let series = [
        ("yield", pillars.tenors(), curve.yield_curve()),
        ("spot", pillars.tenors(), curve.spot_curve()),
        ("forward", pillars.forward_tenors(), curve.forward_curve()),
    ];

    series
        .into_iter()
        .flat_map(|(name, tenors, rates)| {
            tenors.iter().zip(rates).map(move |(tenor, rate)| CurvePoint {
                date: curve.reference_date(),
                curve: name,
                tenor: *tenor,
                rate: *rate,
            })
        })
        .collect()
}

fn print_tables(history: &CurveHistory) {
    let labels = history.pillars().labels();
    let fmt = |values: &[f64]| values.iter().map(|v| format!("{v:.4}")).collect::<Vec<_>>();

    for curve in history.curves() {
        print_header(&format!("Curves on {} (percent)", curve.reference_date()));

        // Forwards start at the second pillar
        let forwards = std::iter::once(String::new())
            .chain(fmt(curve.forward_curve()))
            .collect();
        let rows = vec![
            ("Yield".to_string(), fmt(curve.yield_curve())),
            ("Spot".to_string(), fmt(curve.spot_curve())),
            ("Forward".to_string(), forwards),
        ];
        println!("{}", grid("Curve", &labels, rows));
    }
}

/// Execute the curves command.
pub fn execute(args: CurvesArgs, format: OutputFormat, config: &AnalysisConfig) -> Result<()> {
    let date = args.date.as_deref().map(parse_date).transpose()?;
    let table = load_prices(&args.input, config)?;
    let history = build_history(&table, config, date)?;

    match format {
        OutputFormat::Table => {
            print_tables(&history);
            Ok(())
        }
        OutputFormat::Json => print_json(history.curves()),
        OutputFormat::Csv => {
            let rows: Vec<CurvePoint> = history.curves().iter().flat_map(points).collect();
            print_csv(&rows)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termstruct_bonds::BondObservation;
    use termstruct_curves::BootstrapConfig;

    #[test]
    fn test_points_cover_all_curves() {
        let date = Date::from_ymd(2024, 1, 2).unwrap();
        let basket: Vec<_> = [("CAN 2.25 Mar 24", 100.34), ("CAN 1.5 Sep 24", 98.43)]
            .iter()
            .map(|(id, p)| BondObservation::from_quote(id, date, *p).unwrap())
            .collect();
        let curve = TermStructure::build(&basket, date, &BootstrapConfig::default()).unwrap();

        let rows = points(&curve);
        assert_eq!(rows.len(), 5 + 5 + 4);
        assert_eq!(rows[0].curve, "yield");
        assert_eq!(rows[13].curve, "forward");
        assert_eq!(rows[13].tenor, 5.0);
    }
}
