//! Benchmarks for stage-2 byte compression.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use scanpack_bytes::{ByteMethod, LzssParams, compress, decompress, mtf};
use std::hint::black_box;

/// Bytes shaped like a reduced point frame: slowly varying low bytes with
/// frequent repeats.
fn frame_like(size: usize) -> Vec<u8> {
    let mut seed: u64 = 0xFEED_FACE_0000_0001;
    (0..size)
        .map(|i| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            if seed >> 62 == 0 {
                (seed >> 40) as u8
            } else {
                (i / 24) as u8
            }
        })
        .collect()
}

fn bench_mtf(c: &mut Criterion) {
    let mut group = c.benchmark_group("mtf");
    let data = frame_like(64 * 1024);
    let ranks = mtf::transform(&data);
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("transform", |b| {
        b.iter(|| black_box(mtf::transform(black_box(&data))));
    });
    group.bench_function("inverse_transform", |b| {
        b.iter(|| black_box(mtf::inverse_transform(black_box(&ranks))));
    });

    group.finish();
}

fn bench_lzss_windows(c: &mut Criterion) {
    let mut group = c.benchmark_group("lzss_compress");
    let data = frame_like(16 * 1024);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for index_bits in [6u8, 8, 10] {
        let params = LzssParams::new(index_bits, 4);
        group.bench_with_input(BenchmarkId::from_parameter(index_bits), &data, |b, data| {
            b.iter(|| black_box(compress(black_box(data), ByteMethod::Lzss, params).unwrap()));
        });
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("bytes_decompress");
    let data = frame_like(64 * 1024);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for method in ByteMethod::SUPPORTED {
        let frame = compress(&data, method, LzssParams::default()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(method), &frame, |b, frame| {
            b.iter(|| black_box(decompress(black_box(frame)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_mtf, bench_lzss_windows, bench_decompress);
criterion_main!(benches);
