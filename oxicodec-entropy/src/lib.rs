//! # OxiCodec-Entropy: Pure Rust Entropy Coders
//!
//! Two static entropy coders driven by a 256-entry byte [`FrequencyTable`]:
//!
//! - **Huffman**: tree built with a min-heap (ties resolved by insertion
//!   order), codes assigned depth-first (`0` left, `1` right), packed
//!   MSB-first. The decoder needs the tree and the exact bit count.
//! - **Arithmetic**: 32-bit integer range coder with underflow handling
//!   and a two-bit terminal flush. The decoder needs the table and the
//!   symbol count.
//!
//! Neither stream embeds its side information; the `oxicodec` crate stores
//! it in the container header.
//!
//! ## Example
//!
//! ```rust
//! use oxicodec_entropy::{FrequencyTable, HuffmanTree, huffman_decode, huffman_encode};
//!
//! let data = b"this is an example for huffman encoding";
//! let table = FrequencyTable::from_data(data);
//! let tree = HuffmanTree::from_frequencies(&table).unwrap();
//!
//! let encoded = huffman_encode(data, &tree.code_table()).unwrap();
//! let decoded = huffman_decode(&encoded.bytes, encoded.bit_len, &tree).unwrap();
//! assert_eq!(decoded, data);
//! ```
//!
//! ```rust
//! use oxicodec_entropy::{FrequencyTable, arithmetic_decode, arithmetic_encode};
//!
//! let data = b"ABAABCAABCACBA";
//! let table = FrequencyTable::from_data(data);
//! let encoded = arithmetic_encode(data, &table).unwrap();
//! assert_eq!(arithmetic_decode(&encoded, &table, data.len()).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod arithmetic;
pub mod frequency;
pub mod huffman;

pub use arithmetic::{arithmetic_decode, arithmetic_encode};
pub use frequency::FrequencyTable;
pub use huffman::{CodeTable, HuffmanEncoded, HuffmanNode, HuffmanTree, huffman_decode, huffman_encode};
