use chrono::{DateTime, TimeZone, Utc};
use criterion::{black_box, BenchmarkId, Criterion};
use criterion::{criterion_group, criterion_main};

use temporal_tree::core::parse_zone;
use temporal_tree::tree::{build_index_tree_all, build_temporal_tree, TreeNode};

// 2024-05-30T00:00Z
const MAY_30: i64 = 1_717_027_200_000;

fn utc(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
}

fn leaf(record: &i64) -> Option<TreeNode> {
    Some(TreeNode::leaf(record.to_string(), record.to_string()))
}

fn bench_temporal(c: &mut Criterion) {
    let mut group = c.benchmark_group("temporal_tree");
    // one record per second, minute and ten minutes over a day
    for &spacing_ms in &[1_000_i64, 60_000, 600_000] {
        let records: Vec<i64> = (0..86_400_000 / spacing_ms)
            .map(|i| MAY_30 + i * spacing_ms)
            .collect();
        for zone in ["Z", "US/Eastern"] {
            let tz = parse_zone(zone).expect("zone");
            let id = format!("{zone}/{}", records.len());
            group.bench_with_input(BenchmarkId::from_parameter(id), &records, |b, records| {
                b.iter(|| {
                    build_temporal_tree(black_box(records), |r| utc(*r), leaf, tz, None)
                        .expect("build")
                });
            });
        }
    }
    group.finish();
}

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_tree");
    for &size in &[1_000_i64, 100_000] {
        let records: Vec<i64> = (0..size).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| build_index_tree_all(black_box(records), leaf));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_temporal, bench_index);
criterion_main!(benches);
