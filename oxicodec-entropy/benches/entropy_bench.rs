//! Throughput benchmarks for the Huffman and arithmetic coders.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxicodec_entropy::{
    FrequencyTable, HuffmanTree, arithmetic_decode, arithmetic_encode, huffman_decode,
    huffman_encode,
};
use std::hint::black_box;

type PatternGenerator = fn(usize) -> Vec<u8>;

mod test_data {
    /// English-like text.
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. ";
        text.iter().copied().cycle().take(size).collect()
    }

    /// Mostly zeros with sparse noise, like a quantized residual.
    pub fn skewed(size: usize) -> Vec<u8> {
        let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
        (0..size)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                if (seed >> 60) == 0 { (seed >> 32) as u8 } else { 0 }
            })
            .collect()
    }

    /// Uniformly random bytes.
    pub fn random(size: usize) -> Vec<u8> {
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        (0..size)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                (seed >> 32) as u8
            })
            .collect()
    }
}

const SIZE: usize = 256 * 1024;

const PATTERNS: [(&str, PatternGenerator); 3] = [
    ("text", test_data::text_like as PatternGenerator),
    ("skewed", test_data::skewed as PatternGenerator),
    ("random", test_data::random as PatternGenerator),
];

fn bench_huffman(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman");
    group.throughput(Throughput::Bytes(SIZE as u64));

    for (name, generator) in PATTERNS {
        let data = generator(SIZE);
        let table = FrequencyTable::from_data(&data);
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        let codes = tree.code_table();
        let encoded = huffman_encode(&data, &codes).unwrap();

        group.bench_with_input(BenchmarkId::new("encode", name), &data, |b, data| {
            b.iter(|| black_box(huffman_encode(black_box(data), &codes).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decode", name), &encoded, |b, encoded| {
            b.iter(|| {
                black_box(huffman_decode(black_box(&encoded.bytes), encoded.bit_len, &tree).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");
    group.throughput(Throughput::Bytes(SIZE as u64));

    for (name, generator) in PATTERNS {
        let data = generator(SIZE);
        let table = FrequencyTable::from_data(&data);
        let encoded = arithmetic_encode(&data, &table).unwrap();

        group.bench_with_input(BenchmarkId::new("encode", name), &data, |b, data| {
            b.iter(|| black_box(arithmetic_encode(black_box(data), &table).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decode", name), &encoded, |b, encoded| {
            b.iter(|| black_box(arithmetic_decode(black_box(encoded), &table, SIZE).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_huffman, bench_arithmetic);
criterion_main!(benches);
