//! End-to-end pipeline benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use scanpack::{POINT_SIZE, PipelineConfig, PointRecord, decode, encode_with};
use std::hint::black_box;

/// One revolution of a 2D scanner: a room outline with a blind sector.
fn revolution(count: usize) -> Vec<PointRecord> {
    (0..count)
        .map(|i| {
            let angle = i as f64 / count as f64 * std::f64::consts::TAU;
            if (2.0..2.4).contains(&angle) {
                return PointRecord::invalid();
            }
            let range = 4000.0 + 1500.0 * (3.0 * angle).sin();
            PointRecord::new(
                (range * angle.cos()) as i32,
                (range * angle.sin()) as i32,
                0,
                1,
                (i / 128) as i16,
                (range / 40.0) as i16,
            )
        })
        .collect()
}

fn configs() -> [(&'static str, PipelineConfig); 4] {
    [
        ("store", PipelineConfig::store()),
        ("fast", PipelineConfig::fast()),
        ("default", PipelineConfig::default()),
        ("adaptive", PipelineConfig::default().with_adaptive(true)),
    ]
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_encode");
    let points = revolution(4096);
    group.throughput(Throughput::Bytes((points.len() * POINT_SIZE) as u64));

    for (name, config) in configs() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &points, |b, points| {
            b.iter(|| black_box(encode_with(black_box(points), &config).unwrap()));
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_decode");
    let points = revolution(4096);
    group.throughput(Throughput::Bytes((points.len() * POINT_SIZE) as u64));

    for (name, config) in configs() {
        let frame = encode_with(&points, &config).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &frame, |b, frame| {
            b.iter(|| black_box(decode(black_box(frame), points.len()).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
