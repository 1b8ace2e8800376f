//! Selection layer and container integration tests.

use oxicodec::{
    CodecError, CompressionMode, Decompressed, GrayImage, ImageOptions, compress_bytes,
    compress_image, container, decompress, mse,
};

fn through_container(compressed: &oxicodec::Compressed) -> Decompressed {
    let bytes = container::to_bytes(compressed).expect("serialization failed");
    let parsed = container::from_bytes(&bytes).expect("parse failed");
    assert_eq!(&parsed, compressed);
    decompress(&parsed).expect("decompression failed")
}

#[test]
fn test_reference_strings() {
    let cases: [(CompressionMode, &[u8]); 4] = [
        (CompressionMode::Huffman, b"this is an example for huffman encoding"),
        (CompressionMode::Arithmetic, b"ABAABCAABCACBA"),
        (CompressionMode::Lzw, b"TOBEORNOTTOBEORTOBEORNOT"),
        (CompressionMode::Rle, b"AAAABBBCCDAA"),
    ];
    for (mode, data) in cases {
        let compressed = compress_bytes(mode, data).expect("compression failed");
        assert_eq!(through_container(&compressed).into_bytes(), data, "{mode}");
    }
}

#[test]
fn test_rle_pairs() {
    let compressed = compress_bytes(CompressionMode::Rle, b"AAAABBBCCDAA").expect("compression failed");
    assert_eq!(
        compressed.payload,
        vec![4, b'A', 3, b'B', 2, b'C', 1, b'D', 2, b'A']
    );
}

#[test]
fn test_binary_data_all_lossless_modes() {
    let data: Vec<u8> = (0..5000u32).map(|i| ((i * i) % 251) as u8).collect();
    for mode in CompressionMode::ALL.into_iter().filter(|m| m.is_lossless()) {
        let compressed = compress_bytes(mode, &data).expect("compression failed");
        assert_eq!(through_container(&compressed).into_bytes(), data, "{mode}");
    }
}

#[test]
fn test_image_modes_through_container() {
    let image = GrayImage::from_fn(24, 16, |x, y| (x * 6 + y * 5) as u8).expect("image build failed");
    let options = ImageOptions {
        quality: 90,
        levels: 2,
    };
    for mode in CompressionMode::ALL.into_iter().filter(|m| m.is_image()) {
        let compressed = compress_image(mode, &image, &options).expect("compression failed");
        let Decompressed::Image(decoded) = through_container(&compressed) else {
            panic!("{mode} did not produce an image");
        };
        let error = mse(&image, &decoded).unwrap();
        assert!(error < 6000.0, "{mode}: mse {error}");
    }
}

#[test]
fn test_tampered_dimensions_rejected() {
    let image = GrayImage::filled(8, 8, 40).expect("image build failed");
    let compressed =
        compress_image(CompressionMode::DctBased, &image, &ImageOptions::default()).expect("compression failed");
    let mut bytes = container::to_bytes(&compressed).expect("serialization failed");
    // Container width field.
    bytes[4] = 16;
    let parsed = container::from_bytes(&bytes).expect("parse failed");
    assert!(matches!(
        decompress(&parsed),
        Err(CodecError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_empty_input_policy() {
    // Lossless modes: empty in, empty payload, empty out.
    for mode in CompressionMode::ALL.into_iter().filter(|m| m.is_lossless()) {
        let compressed = compress_bytes(mode, &[]).expect("compression failed");
        assert!(compressed.payload.is_empty(), "{mode}");
        assert!(through_container(&compressed).into_bytes().is_empty(), "{mode}");
    }

    // Image modes: a zero-sized frame, or raw bytes, are rejected.
    let empty = GrayImage::new(0, 0, Vec::new()).expect("frame build failed");
    for mode in CompressionMode::ALL.into_iter().filter(|m| m.is_image()) {
        assert!(
            matches!(
                compress_image(mode, &empty, &ImageOptions::default()),
                Err(CodecError::InvalidArgument { .. })
            ),
            "{mode}"
        );
        assert!(
            matches!(compress_bytes(mode, &[]), Err(CodecError::InvalidArgument { .. })),
            "{mode}"
        );
    }
}
