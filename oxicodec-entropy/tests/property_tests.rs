use oxicodec_entropy::{
    FrequencyTable, HuffmanTree, arithmetic_decode, arithmetic_encode, huffman_decode,
    huffman_encode,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_huffman_roundtrip(input in prop::collection::vec(any::<u8>(), 1..2000)) {
        let table = FrequencyTable::from_data(&input);
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        let encoded = huffman_encode(&input, &tree.code_table()).unwrap();
        prop_assert_eq!(encoded.bytes.len() as u64, encoded.bit_len.div_ceil(8));

        let decoded = huffman_decode(&encoded.bytes, encoded.bit_len, &tree).unwrap();
        prop_assert_eq!(decoded, input);
    }

    #[test]
    fn test_arithmetic_roundtrip(input in prop::collection::vec(0..8u8, 1..2000)) {
        let table = FrequencyTable::from_data(&input);
        let encoded = arithmetic_encode(&input, &table).unwrap();
        let decoded = arithmetic_decode(&encoded, &table, input.len()).unwrap();
        prop_assert_eq!(decoded, input);
    }

    #[test]
    fn test_arithmetic_roundtrip_full_alphabet(input in prop::collection::vec(any::<u8>(), 1..1000)) {
        let table = FrequencyTable::from_data(&input);
        let encoded = arithmetic_encode(&input, &table).unwrap();
        let decoded = arithmetic_decode(&encoded, &table, input.len()).unwrap();
        prop_assert_eq!(decoded, input);
    }
}
