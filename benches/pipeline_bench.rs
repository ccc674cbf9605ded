//! Full-pipeline throughput on synthetic deployment exports.

use chrono::{TimeZone, Utc};
use conflictmap::config::ConflictmapConfig;
use conflictmap::pipeline::analyze;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// `rows` records spread over `rows / 4` components, so most components
/// are touched by several stories.
fn synthetic_export(rows: usize) -> String {
    let components = (rows / 4).max(1);
    let mut out = String::from("User Story,Metadata API Name,Metadata Type,Last Modified Date,Developer\n");
    for i in 0..rows {
        out.push_str(&format!(
            "US-{},Component{},ApexClass,2024-01-{:02},Dev{}\n",
            i % (rows / 3).max(1),
            i % components,
            1 + i % 28,
            i % 7
        ));
    }
    out
}

fn synthetic_baseline(components: usize) -> String {
    let mut out = String::from("Component,Last Modified Date\n");
    for i in 0..components {
        out.push_str(&format!("Component{i},2024-01-{:02}\n", 1 + (i * 3) % 28));
    }
    out
}

fn bench_pipeline(c: &mut Criterion) {
    let config = ConflictmapConfig::default();
    let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let mut group = c.benchmark_group("pipeline");

    for rows in [100usize, 1_000, 10_000] {
        let deployment = synthetic_export(rows);
        let baseline = synthetic_baseline(rows / 4);

        group.bench_with_input(BenchmarkId::new("deployment_only", rows), &rows, |b, _| {
            b.iter(|| analyze(black_box(&deployment), None, &config, now))
        });

        group.bench_with_input(BenchmarkId::new("with_baseline", rows), &rows, |b, _| {
            b.iter(|| analyze(black_box(&deployment), Some(&baseline), &config, now))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
