//! Benchmarks for curve bootstrapping.
//!
//! Run with: cargo bench -p termstruct-curves

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use termstruct_bonds::{BondIdentifier, BondObservation, PriceTable, QuoteRow};
use termstruct_core::Date;
use termstruct_curves::{BootstrapConfig, CurveBootstrapper, CurveHistory, DateErrorPolicy, TermStructure};
use termstruct_math::solvers::SolverKind;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

const BASKET: [(&str, f64); 10] = [
    ("CAN 2.25 Mar 24", 100.34),
    ("CAN 1.5 Sep 24", 98.43),
    ("CAN 1.25 Mar 25", 96.80),
    ("CAN 0.5 Sep 25", 94.15),
    ("CAN 0.25 Mar 26", 92.24),
    ("CAN 1.0 Sep 26", 93.12),
    ("CAN 1.25 Mar 27", 93.24),
    ("CAN 2.75 Sep 27", 98.40),
    ("CAN 3.5 Mar 28", 101.94),
    ("CAN 3.25 Sep 28", 101.71),
];

fn reference_date() -> Date {
    Date::from_ymd(2024, 1, 2).unwrap()
}

fn basket() -> Vec<BondObservation> {
    BASKET
        .iter()
        .map(|(id, p)| BondObservation::from_quote(id, reference_date(), *p).unwrap())
        .collect()
}

/// Longest history that stays inside the Sep 23 - Mar 24 coupon period.
const MAX_HISTORY_DAYS: usize = 175;

fn history_start() -> Date {
    Date::from_ymd(2023, 9, 5).unwrap()
}

/// One row per calendar day from `history_start`.
///
/// Every date falls before the first maturity and after the last September
/// coupon, so each day's basket is outstanding and coupon-aligned.
fn price_table(days: usize) -> PriceTable {
    assert!(days <= MAX_HISTORY_DAYS, "{days} days leaves the coupon period");
    let ids: Vec<BondIdentifier> = BASKET.iter().map(|(id, _)| id.parse().unwrap()).collect();
    let rows = (0..days)
        .map(|i| {
            let bump = (i % 7) as f64 * 0.01;
            QuoteRow::new(
                history_start().add_days(i as i64),
                BASKET.iter().map(|(_, p)| Some(p - bump)).collect(),
            )
        })
        .collect();
    PriceTable::new(ids, rows).unwrap()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_single_date(c: &mut Criterion) {
    let basket = basket();
    let date = reference_date();
    let mut group = c.benchmark_group("single_date");

    for kind in SolverKind::ALL {
        let config = BootstrapConfig::default().with_solver(kind);
        let bootstrapper = CurveBootstrapper::from_config(&config);

        group.bench_with_input(BenchmarkId::new("spot_curve", kind), &basket, |b, basket| {
            b.iter(|| bootstrapper.build_spot_curve(black_box(basket), date).unwrap());
        });
    }

    group.bench_function("term_structure", |b| {
        let config = BootstrapConfig::default();
        b.iter(|| TermStructure::build(black_box(&basket), date, &config).unwrap());
    });

    group.finish();
}

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");
    let config = BootstrapConfig::default();

    for days in [20usize, MAX_HISTORY_DAYS] {
        let table = price_table(days);
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &table, |b, table| {
            b.iter(|| CurveHistory::build(black_box(table), &config, DateErrorPolicy::Fail).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_date, bench_history);
criterion_main!(benches);
