//! LZW integration tests.

use oxicodec_core::CodecError;
use oxicodec_lzw::{LzwConfig, LzwError, compress, compress_with, decompress, decompress_with};

#[test]
fn test_lzw_roundtrip_simple() {
    let original = b"TOBEORNOTTOBEORTOBEORNOT";
    let compressed = compress(original).expect("compression failed");
    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_roundtrip_310_bytes() {
    let original = b"This is a test of compression! ".repeat(10);
    assert_eq!(original.len(), 310);

    let compressed = compress(&original).expect("compression failed");
    let decompressed = decompress(&compressed).expect("decompression failed");

    assert_eq!(decompressed.len(), 310);
    assert_eq!(decompressed, &original[..]);
}

#[test]
fn test_lzw_dictionary_fills_up() {
    // Enough distinct material to exhaust 4096 entries and keep going.
    let mut seed: u32 = 0xC0FF_EE11;
    let original: Vec<u8> = (0..60_000)
        .map(|_| {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            b'a' + ((seed >> 16) % 6) as u8
        })
        .collect();

    let compressed = compress(&original).expect("compression failed");
    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_large_repetitive() {
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
    let compressed = compress(&original).expect("compression failed");
    assert!(compressed.len() < original.len() / 2);
    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_empty_input() {
    let compressed = compress(b"").expect("compression failed");
    assert!(compressed.is_empty());
    let decompressed = decompress(&compressed).expect("decompression failed");
    assert!(decompressed.is_empty());
}

#[test]
fn test_lzw_all_zeros() {
    let original = vec![0u8; 1000];
    let compressed = compress(&original).expect("compression failed");
    assert!(
        compressed.len() < original.len() / 5,
        "All-zeros should compress to less than 20% of original"
    );
    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_binary_data() {
    let original: Vec<u8> = (0..4096u32).map(|i| (i * 7 % 251) as u8).collect();
    let compressed = compress(&original).expect("compression failed");
    let decompressed = decompress(&compressed).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_sixteen_bit_codes() {
    let config = LzwConfig::new(16, 65536).expect("valid config");
    let original = b"abcabcabcabdabdabdabe".repeat(200);
    let compressed = compress_with(&original, config).expect("compression failed");
    let decompressed = decompress_with(&compressed, config).expect("decompression failed");
    assert_eq!(decompressed, original);
}

#[test]
fn test_lzw_corrupt_stream_maps_to_corrupted() {
    let err = decompress(&[0x04, 0x1F, 0xFF]).expect_err("must fail");
    assert!(matches!(err, LzwError::InvalidCode { code: 4095, .. }));
    let err: CodecError = err.into();
    assert!(matches!(err, CodecError::Corrupted { .. }));
}
