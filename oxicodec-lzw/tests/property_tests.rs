use oxicodec_lzw::{compress, decompress};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_lzw_roundtrip(input in prop::collection::vec(any::<u8>(), 0..5000)) {
        let compressed = compress(&input).unwrap();
        let decompressed = decompress(&compressed).unwrap();
        prop_assert_eq!(decompressed, input);
    }

    #[test]
    fn test_lzw_roundtrip_small_alphabet(input in prop::collection::vec(0..4u8, 0..20000)) {
        let compressed = compress(&input).unwrap();
        let decompressed = decompress(&compressed).unwrap();
        prop_assert_eq!(decompressed, input);
    }
}
