//! # OxiCodec-LZW: Pure Rust LZW Compression
//!
//! Lempel-Ziv-Welch dictionary coding with fixed-width codes.
//!
//! ## Format
//!
//! - **Fixed 12-bit codes** by default, packed MSB-first
//! - **4096-entry dictionary** seeded with the 256 single bytes; once full
//!   it stops growing and coding continues with the existing entries
//! - **No control codes**: no clear code, no end-of-information code. The
//!   code count is `total_bits / 12`, so padding shorter than one code is
//!   ignored
//! - Empty input encodes to an empty stream and back
//!
//! ## Example
//!
//! ```rust
//! use oxicodec_lzw::{compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//! let compressed = compress(original).unwrap();
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod dictionary;
mod encoder;
mod error;

pub use config::LzwConfig;
pub use decoder::LzwDecoder;
pub use dictionary::LzwDictionary;
pub use encoder::LzwEncoder;
pub use error::{LzwError, Result};

/// Compress data with LZW using the given configuration.
///
/// # Example
///
/// ```rust
/// use oxicodec_lzw::{LzwConfig, compress_with};
///
/// let data = b"TOBEORNOTTOBEORTOBEORNOT";
/// let compressed = compress_with(data, LzwConfig::DEFAULT).unwrap();
/// assert!(compressed.len() < data.len() * 12 / 8);
/// ```
pub fn compress_with(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    let mut encoder = LzwEncoder::new(config)?;
    encoder.encode(data)
}

/// Decompress LZW data with the given configuration.
pub fn decompress_with(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    let mut decoder = LzwDecoder::new(config)?;
    decoder.decode(data)
}

/// Compress with the default 12-bit / 4096-entry configuration.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, LzwConfig::DEFAULT)
}

/// Decompress with the default 12-bit / 4096-entry configuration.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with(data, LzwConfig::DEFAULT)
}
