//! # OxiCodec Core
//!
//! Core components shared by every OxiCodec crate:
//!
//! - [`bitstream`]: MSB-first bit reader/writer used by Huffman, the range
//!   coder and LZW
//! - [`buffer`]: fallible allocation of working buffers
//! - [`bytes`]: bounds-checked little-endian header fields
//! - [`image`]: flattened grayscale frames and MSE/PSNR metrics
//! - [`error`]: the shared error taxonomy
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: Selection layer / CLI                               │
//! │     CompressionMode, .oxc container, oxicodec binary    │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Video                                               │
//! │     PredictiveVideoCoder (I/P frames)                   │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codecs                                              │
//! │     Huffman, Arithmetic, LZW, RLE, DCT, Wavelet, Jpeg,  │
//! │     MotionEngine                                        │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Core (this crate)                                   │
//! │     Bit I/O, buffers, GrayImage, errors                 │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxicodec_core::bitstream::{MsbBitReader, MsbBitWriter};
//!
//! let mut writer = MsbBitWriter::new();
//! writer.write_bits(0xABC, 12).unwrap();
//! let bytes = writer.into_vec();
//!
//! let mut reader = MsbBitReader::new(&bytes);
//! assert_eq!(reader.read_bits(12).unwrap(), 0xABC);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod buffer;
pub mod bytes;
pub mod error;
pub mod image;

// Re-exports for convenience
pub use bitstream::{MsbBitReader, MsbBitWriter};
pub use bytes::ByteCursor;
pub use error::{CodecError, Result};
pub use image::{GrayImage, mse, psnr};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{MsbBitReader, MsbBitWriter};
    pub use crate::bytes::ByteCursor;
    pub use crate::error::{CodecError, Result};
    pub use crate::image::GrayImage;
}
