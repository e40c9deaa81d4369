//! Logger performance benchmarks
//!
//! Benchmarks for the hot paths:
//! - Bisection range queries over large in-memory logs
//! - Row encoding and decoding
//! - Memory-backed writes
//!
//! Run with: cargo bench -p rowlog-storage

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tokio::runtime::Runtime;

use rowlog_core::{Row, codec};
use rowlog_storage::Logger;

fn build_log(rt: &Runtime, rows: usize) -> Logger {
    rt.block_on(async {
        let mut log = Logger::in_memory("bench");
        log.set_header(["t", "price", "qty"]).await.unwrap();
        for i in 0..rows {
            // Each timestamp appears four times
            log.write(Row::from(vec![(i / 4) as f64, 100.0 + i as f64 * 0.01, 1.0]))
                .await
                .unwrap();
        }
        log
    })
}

// ============================================================================
// Range Query Benchmarks
// ============================================================================

fn bench_select(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("select");

    for &size in &[1_000usize, 100_000, 1_000_000] {
        let log = build_log(&rt, size);
        let mid = (size / 8) as f64;

        group.bench_with_input(BenchmarkId::new("point", size), &log, |b, log| {
            b.iter(|| log.select_at(black_box("t"), black_box(mid)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("miss", size), &log, |b, log| {
            b.iter(|| log.select_at(black_box("t"), black_box(-1.0)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("range_100", size), &log, |b, log| {
            b.iter(|| {
                log.select_ascending(black_box("t"), black_box(mid), black_box(mid + 25.0))
                    .unwrap()
            })
        });
    }

    group.finish();
}

// ============================================================================
// Codec Benchmarks
// ============================================================================

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let row = Row::from(vec![1234.0, 0.125, -7.5, 42.0, 1e9]);
    let line = codec::stringify(&row);
    let trimmed = line.trim_end_matches('\n');

    group.bench_function("stringify_cells", |b| b.iter(|| codec::stringify(black_box(&row))));

    group.bench_function("parse_cells", |b| {
        b.iter(|| codec::parse_line(black_box(trimmed)).unwrap())
    });

    group.finish();
}

// ============================================================================
// Write Benchmarks
// ============================================================================

fn bench_write(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    c.bench_function("memory_write_10k", |b| {
        b.iter(|| build_log(&rt, black_box(10_000)))
    });
}

criterion_group!(benches, bench_select, bench_codec, bench_write);

criterion_main!(benches);
