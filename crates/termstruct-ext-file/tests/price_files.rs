//! Reading price files from disk.

use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use tempfile::TempDir;

use termstruct_bonds::BondIdentifier;
use termstruct_core::Date;
use termstruct_ext_file::{CsvOptions, CsvPriceSource, FileError};

fn demo_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/bond_prices.csv")
}

#[test]
fn test_demo_price_history() {
    let source = CsvPriceSource::from_path(demo_file(), CsvOptions::default()).unwrap();
    let table = source.table();

    assert_eq!(table.identifiers().len(), 10);
    assert_eq!(table.len(), 30);
    assert_eq!(table.identifiers()[0].to_string(), "CAN 2.25 Mar 24");
    assert_eq!(table.identifiers()[9].to_string(), "CAN 3.25 Sep 28");

    let first = table.row(Date::from_ymd(2024, 1, 2).unwrap()).unwrap();
    assert_relative_eq!(first.prices[0].unwrap(), 100.338);
    assert!(first.prices.iter().all(Option::is_some));

    // Every row yields a complete basket
    for row in table.rows() {
        assert_eq!(table.observations(row).unwrap().len(), 10);
    }
}

#[test]
fn test_demo_selection() {
    let selection: Vec<BondIdentifier> = ["CAN 3.5 Mar 28", "CAN 0.5 Sep 25"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let source =
        CsvPriceSource::from_path(demo_file(), CsvOptions::new().with_selection(selection.clone()))
            .unwrap();

    assert_eq!(source.table().identifiers(), selection.as_slice());
}

#[test]
fn test_reload_picks_up_changes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.csv");
    fs::write(&path, "Dates,CAN 2.25 Mar 24\n2024-01-02,100.34\n").unwrap();

    let mut source = CsvPriceSource::from_path(&path, CsvOptions::default()).unwrap();
    assert_eq!(source.table().len(), 1);

    fs::write(
        &path,
        "Dates,CAN 2.25 Mar 24\n2024-01-02,100.34\n2024-01-03,100.35\n",
    )
    .unwrap();
    source.reload().unwrap();
    assert_eq!(source.table().len(), 2);
    assert_eq!(source.path(), Some(path.as_path()));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = CsvPriceSource::from_path(dir.path().join("absent.csv"), CsvOptions::default())
        .unwrap_err();
    assert!(matches!(err, FileError::Io { .. }));
}
