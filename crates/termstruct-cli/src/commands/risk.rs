//! Risk command implementation.
//!
//! Covariance and principal components of yield and forward log-returns.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use termstruct_config::AnalysisConfig;
use termstruct_risk::{CurveRisk, RiskReport};

use crate::cli::OutputFormat;
use crate::commands::{build_history, load_prices};
use crate::output::{grid, matrix_table, print_csv, print_header, print_json};

/// Arguments for the risk command.
#[derive(Args, Debug)]
pub struct RiskArgs {
    /// Price file (CSV with a date column and one column per bond)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of principal components to display
    #[arg(short = 'n', long, default_value = "3")]
    pub components: usize,
}

/// Flattened report entry for CSV output.
#[derive(Debug, Serialize)]
pub struct RiskEntry {
    curve: &'static str,
    statistic: &'static str,
    row: String,
    column: String,
    value: f64,
}

fn entries(curve: &'static str, risk: &CurveRisk) -> Vec<RiskEntry> {
    let labels = risk.covariance().labels();
    let cov = risk.covariance().matrix();
    let pca = risk.components();
    let mut out = Vec::new();

    for (i, row) in labels.iter().enumerate() {
        for (j, column) in labels.iter().enumerate() {
            out.push(RiskEntry {
                curve,
                statistic: "covariance",
                row: row.clone(),
                column: column.clone(),
                value: cov[(i, j)],
            });
        }
    }

    for (k, (value, explained)) in pca
        .eigenvalues()
        .iter()
        .zip(pca.explained_variance())
        .enumerate()
    {
        let component = format!("PC{}", k + 1);
        out.push(RiskEntry {
            curve,
            statistic: "eigenvalue",
            row: component.clone(),
            column: String::new(),
            value: *value,
        });
        out.push(RiskEntry {
            curve,
            statistic: "explained_variance",
            row: component.clone(),
            column: String::new(),
            value: *explained,
        });
        for (label, loading) in labels.iter().zip(pca.eigenvectors().column(k).iter()) {
            out.push(RiskEntry {
                curve,
                statistic: "loading",
                row: component.clone(),
                column: label.clone(),
                value: *loading,
            });
        }
    }

    out
}

fn print_curve_risk(title: &str, risk: &CurveRisk, components: usize) {
    let cov = risk.covariance();
    print_header(&format!(
        "{title} log-return covariance ({} observations)",
        cov.observations()
    ));
    println!("{}", matrix_table(cov.labels(), cov.matrix(), 3));

    let pca = risk.components();
    let shown = components.min(pca.len());
    let columns: Vec<String> = (1..=shown).map(|k| format!("PC{k}")).collect();
    let cumulative = pca.cumulative_explained_variance();

    let mut rows = vec![
        (
            "Eigenvalue".to_string(),
            (0..shown).map(|k| format!("{:.3e}", pca.eigenvalues()[k])).collect(),
        ),
        (
            "Explained".to_string(),
            (0..shown)
                .map(|k| format!("{:.2}%", pca.explained_variance()[k] * 100.0))
                .collect(),
        ),
        (
            "Cumulative".to_string(),
            (0..shown).map(|k| format!("{:.2}%", cumulative[k] * 100.0)).collect(),
        ),
    ];
    for (i, label) in cov.labels().iter().enumerate() {
        rows.push((
            label.clone(),
            (0..shown)
                .map(|k| format!("{:.4}", pca.eigenvectors()[(i, k)]))
                .collect(),
        ));
    }

    print_header(&format!("{title} principal components"));
    println!("{}", grid("", &columns, rows));
}

/// Execute the risk command.
pub fn execute(args: RiskArgs, format: OutputFormat, config: &AnalysisConfig) -> Result<()> {
    let table = load_prices(&args.input, config)?;
    let history = build_history(&table, config, None)?;
    let report = RiskReport::from_history(&history)?;

    match format {
        OutputFormat::Table => {
            println!(
                "{} curves from {} to {}",
                report.curves(),
                report.start(),
                report.end()
            );
            print_curve_risk("Yield", report.yields(), args.components);
            print_curve_risk("Forward", report.forwards(), args.components);
            Ok(())
        }
        OutputFormat::Json => print_json(&report),
        OutputFormat::Csv => {
            let mut rows = entries("yield", report.yields());
            rows.extend(entries("forward", report.forwards()));
            print_csv(&rows)
        }
    }
}
