//! Rule engine performance benchmarks.
//!
//! Measures the date check and the full rule battery over growing uploads.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gauntlet::{columns, Cell, Dataset, TableValidator};

/// Build a synthetic upload with `rows` distinct challenge rows.
fn synthetic_dataset(rows: usize) -> Dataset {
    let headers = vec![
        "poc_id",
        "banner_name",
        "campaign_id",
        "points",
        "sku",
        "challenge_type",
        "execution_method",
        "start_date",
        "end_date",
        "individual_target",
        "challenge_title",
        "description",
        "quantity",
        "quantity_min",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let data = (0..rows)
        .map(|i| {
            vec![
                Cell::Str(format!("POC{:06}", i)),
                Cell::Str(format!("banner_{}", i % 7)),
                Cell::Str(format!("CAMP{:04}", i % 13)),
                Cell::Int(10 + (i as i64 % 90)),
                Cell::Str(format!(r#"["SKU{}","SKU{}"]"#, i, i + 1)),
                Cell::Str("EXECUTION_PTC".to_string()),
                Cell::Str("PURCHASE_MULTIPLE".to_string()),
                Cell::Str(format!("{:02}-{:02}-2024", 1 + i % 28, 1 + i % 12)),
                Cell::Str(format!("{:02}-{:02}-2025", 1 + i % 28, 1 + i % 12)),
                Cell::Bool(i % 2 == 0),
                Cell::Str(format!("Challenge {}", i)),
                Cell::Str("Buy two get one".to_string()),
                Cell::Int(5),
                Cell::Int(1),
            ]
        })
        .collect();

    Dataset::new(headers, data)
}

/// Benchmark the date-format check alone.
fn bench_date_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("date_check");

    for size in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || synthetic_dataset(size),
                |mut dataset| {
                    let mut validator = TableValidator::new(&mut dataset);
                    black_box(validator.date(columns::START_DATE).unwrap())
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// Benchmark the full rule battery.
fn bench_full_battery(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_battery");

    for size in [100usize, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || synthetic_dataset(size),
                |mut dataset| {
                    let mut validator = TableValidator::new(&mut dataset);
                    black_box(validator.run_all().unwrap())
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_date_check, bench_full_battery);
criterion_main!(benches);
