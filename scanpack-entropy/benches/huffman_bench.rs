//! Benchmarks for stage-3 Huffman coding.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use scanpack_entropy::huffman::{self, HuffmanTree};
use scanpack_entropy::{EntropyMethod, compress, decompress};
use std::hint::black_box;

/// MTF-rank-like input: small values dominate.
fn ranks(size: usize) -> Vec<u8> {
    let mut seed: u64 = 0xABCD_EF01_2345_6789;
    (0..size)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((seed >> 40) as u8).leading_zeros() as u8 * 3
        })
        .collect()
}

fn bench_tree_build(c: &mut Criterion) {
    let counts = huffman::scale_counts(&huffman::frequencies(&ranks(64 * 1024)));
    c.bench_function("huffman_tree_build", |b| {
        b.iter(|| black_box(HuffmanTree::from_counts(black_box(&counts))));
    });
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman");

    for size in [4 * 1024usize, 64 * 1024] {
        let data = ranks(size);
        let frame = compress(&data, EntropyMethod::Huffman).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("compress", size), &data, |b, data| {
            b.iter(|| black_box(compress(black_box(data), EntropyMethod::Huffman).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decompress", size), &frame, |b, frame| {
            b.iter(|| black_box(decompress(black_box(frame)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tree_build, bench_roundtrip);
criterion_main!(benches);
