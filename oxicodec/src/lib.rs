//! # OxiCodec: Pure Rust Codec Toolkit
//!
//! Selection layer over the OxiCodec coders:
//!
//! | Mode | Crate | Kind |
//! |------|-------|------|
//! | `lzw` | `oxicodec-lzw` | lossless, 12-bit codes |
//! | `huffman` | `oxicodec-entropy` | lossless, static |
//! | `arithmetic` | `oxicodec-entropy` | lossless, 32-bit range coder |
//! | `rle` | `oxicodec-rle` | lossless, `(count, byte)` |
//! | `dct_based` | `oxicodec-transform` | lossy image, whole frame |
//! | `wavelet` | `oxicodec-transform` | lossy image, Haar |
//! | `jpeg` | `oxicodec-transform` | lossy image, 8x8 blocks |
//!
//! [`compress_bytes`] / [`compress_image`] return a [`Compressed`] value
//! holding the payload together with its side information; [`container`]
//! stores it as an `.oxc` file.
//!
//! The member crates are re-exported for direct use, along with the motion
//! and video coders.
//!
//! ## Example
//!
//! ```rust
//! use oxicodec::{CompressionMode, compress_bytes, container, decompress};
//!
//! let data = b"TOBEORNOTTOBEORTOBEORNOT";
//! let compressed = compress_bytes(CompressionMode::Huffman, data).unwrap();
//! let file = container::to_bytes(&compressed).unwrap();
//!
//! let restored = decompress(&container::from_bytes(&file).unwrap()).unwrap();
//! assert_eq!(restored.into_bytes(), data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod container;
pub mod mode;

pub use codec::{
    Compressed, Decompressed, ImageOptions, SideInfo, compress_bytes, compress_image, decompress,
};
pub use mode::CompressionMode;

pub use oxicodec_core as core;
pub use oxicodec_core::{CodecError, GrayImage, Result, mse, psnr};
pub use oxicodec_entropy as entropy;
pub use oxicodec_lzw as lzw;
pub use oxicodec_motion as motion;
pub use oxicodec_rle as rle;
pub use oxicodec_transform as transform;
pub use oxicodec_video as video;
