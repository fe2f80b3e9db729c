//! Benchmarks for the comparison engine.
//!
//! Run with: cargo bench --bench compare_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use std::hint::black_box;
use structdiff::{CompareConfig, CompareEngine};

/// Generate a document with `count` records, changing every `change_every`-th one.
fn generate_document(count: usize, change_every: Option<usize>) -> Value {
    let records: Vec<Value> = (0..count)
        .map(|i| {
            let changed = change_every.is_some_and(|n| i % n == 0);
            json!({
                "id": i,
                "name": format!("record-{i}"),
                "version": if changed { "2.0.0" } else { "1.0.0" },
                "tags": ["alpha", "beta"],
                "owner": {"team": "core", "contact": {"email": "core@example.com"}},
            })
        })
        .collect();
    json!({ "records": records })
}

fn benchmark_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");

    for size in [100, 1_000, 5_000] {
        let old = generate_document(size, None);
        let new = generate_document(size, Some(10));

        group.bench_with_input(BenchmarkId::new("memoized", size), &size, |b, _| {
            b.iter(|| {
                let engine = CompareEngine::new();
                black_box(engine.compare(&old, &new))
            });
        });

        group.bench_with_input(BenchmarkId::new("uncached", size), &size, |b, _| {
            let config = CompareConfig {
                memoize: false,
                ..CompareConfig::default()
            };
            b.iter(|| {
                let engine = CompareEngine::with_config(config);
                black_box(engine.compare(&old, &new))
            });
        });
    }

    group.finish();
}

fn benchmark_repeated(c: &mut Criterion) {
    let old = generate_document(1_000, None);
    let new = generate_document(1_000, Some(10));
    let engine = CompareEngine::new();

    c.bench_function("compare_repeated_warm_cache", |b| {
        b.iter(|| black_box(engine.compare(&old, &new)));
    });
}

criterion_group!(benches, benchmark_compare, benchmark_repeated);
criterion_main!(benches);
