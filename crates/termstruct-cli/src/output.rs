//! Output formatting utilities.

use colored::Colorize;
use nalgebra::DMatrix;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints rows in the requested format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
    }
}

/// Prints data as a formatted table.
pub fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints rows as CSV with a header line.
pub fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Renders a labelled grid: a header row, then one row per label.
pub fn grid(corner: &str, columns: &[String], rows: Vec<(String, Vec<String>)>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(std::iter::once(corner.to_string()).chain(columns.iter().cloned()));
    for (label, cells) in rows {
        builder.push_record(std::iter::once(label).chain(cells));
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()));
    table
}

/// Renders a square matrix with the same labels on both axes.
pub fn matrix_table(labels: &[String], matrix: &DMatrix<f64>, precision: usize) -> Table {
    let rows = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let cells = (0..matrix.ncols())
                .map(|j| format!("{:.prec$e}", matrix[(i, j)], prec = precision))
                .collect();
            (label.clone(), cells)
        })
        .collect();
    grid("", labels, rows)
}

/// Formats a percent value.
pub fn format_percent(value: f64) -> String {
    format!("{value:.4}%")
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Field")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair formatted as percentage.
    pub fn from_percent(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format_percent(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout() {
        let table = grid(
            "Curve",
            &["1Y".to_string(), "2Y".to_string()],
            vec![("Yield".to_string(), vec!["4.1".to_string(), "3.9".to_string()])],
        )
        .to_string();

        assert!(table.contains("Curve"));
        assert!(table.contains("Yield"));
        assert!(table.contains("3.9"));
    }

    #[test]
    fn test_matrix_table() {
        let labels = vec!["1Y".to_string(), "2Y".to_string()];
        let m = DMatrix::from_row_slice(2, 2, &[1.0e-4, 5.0e-5, 5.0e-5, 2.0e-4]);
        let table = matrix_table(&labels, &m, 3).to_string();
        assert!(table.contains("1.000e-4"));
        assert!(table.contains("2Y"));
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(4.123_456), "4.1235%");
        assert_eq!(KeyValue::from_percent("Yield", 2.0).value, "2.0000%");
    }
}
