//! Performance benchmarks for the roster engine.
//!
//! Covers the pure allocation/billing functions and one full HTTP
//! reconciliation round trip.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use roster_engine::allocation::plan_reconciliation;
use roster_engine::attendance::{derive_marking_status, ShiftCounts};
use roster_engine::billing::compute_tax;
use roster_engine::models::GstRegime;

/// Benchmark: set-difference planning at realistic roster sizes.
fn bench_plan_reconciliation(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_reconciliation");
    for size in [4usize, 16, 64] {
        let current: Vec<Uuid> = (0..size).map(|_| Uuid::new_v4()).collect();
        // Half kept, half replaced
        let mut target: Vec<Uuid> = current[..size / 2].to_vec();
        target.extend((0..size / 2).map(|_| Uuid::new_v4()));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| plan_reconciliation(black_box(&current), black_box(&target)))
        });
    }
    group.finish();
}

/// Benchmark: marking-status derivation.
fn bench_derive_marking_status(c: &mut Criterion) {
    let assigned = ShiftCounts { day: 4, night: 3 };
    let present = ShiftCounts { day: 4, night: 1 };

    c.bench_function("derive_marking_status", |b| {
        b.iter(|| derive_marking_status(black_box(assigned), black_box(present)))
    });
}

/// Benchmark: tax computation across the regimes.
fn bench_compute_tax(c: &mut Criterion) {
    let subtotal = Decimal::from_str("34400").unwrap();
    let rate = Decimal::from_str("18").unwrap();

    let mut group = c.benchmark_group("compute_tax");
    for (label, regime) in [
        ("gst", GstRegime::Gst),
        ("igst", GstRegime::Igst),
        ("rcm", GstRegime::Rcm),
    ] {
        group.bench_function(label, |b| {
            b.iter(|| compute_tax(black_box(regime), black_box(subtotal), black_box(rate)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_plan_reconciliation,
    bench_derive_marking_status,
    bench_compute_tax
);
criterion_main!(benches);
