//! Performance benchmarks for oxidat-lzss
//!
//! This benchmark suite evaluates:
//! - Bounded vs unbounded decompression throughput
//! - Decompression speed across data patterns
//! - Compression speed of the brute-force encoder

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxidat_lzss::{DecodeMode, compress, decompress};
use std::hint::black_box;

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Uniform data - all bytes are the same (best compression)
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Random data - no patterns (worst compression)
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Text-like data - realistic scenario
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. \
                     How vexingly quick daft zebras jump! ";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            let chunk_size = remaining.min(text.len());
            data.extend_from_slice(&text[..chunk_size]);
        }
        data
    }

    /// Sprite-like data - rows of palette indices with transparent runs
    pub fn sprite_like(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x0DA7_F11E;
        while data.len() < size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let run = 4 + (seed >> 60) as usize;
            let color = if seed & 1 == 0 { 0 } else { (seed >> 40) as u8 };
            for _ in 0..run.min(size - data.len()) {
                data.push(color);
            }
        }
        data
    }
}

mod data_sizes {
    pub const SMALL: usize = 4 * 1024; // 4 KB
    pub const MEDIUM: usize = 64 * 1024; // 64 KB
}

/// Benchmark decompression for different data types
fn bench_decompression_data_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompression_data_types");

    let patterns: [(&str, PatternGenerator); 4] = [
        ("uniform", test_data::uniform as PatternGenerator),
        ("random", test_data::random as PatternGenerator),
        ("text", test_data::text_like as PatternGenerator),
        ("sprite", test_data::sprite_like as PatternGenerator),
    ];

    let size = data_sizes::MEDIUM;

    for (pattern_name, generator) in patterns {
        let data = generator(size);
        let packed = compress(&data);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(pattern_name),
            &packed,
            |b, packed| {
                b.iter(|| {
                    let out = decompress(black_box(packed), DecodeMode::Bounded(size)).unwrap();
                    black_box(out);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark bounded vs unbounded mode on the same stream
fn bench_decompression_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompression_modes");

    let size = data_sizes::MEDIUM;
    let data = test_data::text_like(size);
    let packed = compress(&data);

    let modes = [
        ("bounded", DecodeMode::Bounded(size)),
        ("unbounded", DecodeMode::Unbounded),
    ];

    for (name, mode) in modes {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &packed, |b, packed| {
            b.iter(|| {
                let out = decompress(black_box(packed), mode).unwrap();
                black_box(out);
            });
        });
    }

    group.finish();
}

/// Benchmark the encoder
fn bench_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression");
    group.sample_size(10);

    let size = data_sizes::SMALL;
    let patterns: [(&str, PatternGenerator); 3] = [
        ("uniform", test_data::uniform as PatternGenerator),
        ("text", test_data::text_like as PatternGenerator),
        ("sprite", test_data::sprite_like as PatternGenerator),
    ];

    for (pattern_name, generator) in patterns {
        let data = generator(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(pattern_name),
            &data,
            |b, data| {
                b.iter(|| {
                    let packed = compress(black_box(data));
                    black_box(packed);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decompression_data_types,
    bench_decompression_modes,
    bench_compression
);
criterion_main!(benches);
