//! # OxiCodec-Transform: Pure Rust Transform Codecs
//!
//! Lossy grayscale image codecs built on in-tree transform primitives:
//!
//! - [`dct`]: DCT-II/DCT-III with unnormalized and orthonormal scaling
//! - [`dft`]: 2-D complex DFT and quadrant shift
//! - [`haar`]: multi-level orthonormal Haar wavelet
//!
//! and the codecs themselves:
//!
//! | Codec | Transform | Coefficients |
//! |-------|-----------|--------------|
//! | [`DctCodec`] | whole-frame DCT | `i8`, uniform step |
//! | [`WaveletCodec`] | Haar, `levels` deep | `i8`, uniform step |
//! | [`JpegCodec`] | 8x8 block DCT | `i16`, luminance table, zigzag |
//!
//! Every image payload starts with the frame dimensions; decoders check
//! them against the caller's expectation and fail with
//! [`CodecError::DimensionMismatch`](oxicodec_core::CodecError::DimensionMismatch)
//! on disagreement.
//!
//! [`spectrum`] renders transform magnitudes as images and applies
//! frequency-domain filters.
//!
//! ## Example
//!
//! ```rust
//! use oxicodec_core::{GrayImage, mse};
//! use oxicodec_transform::DctCodec;
//!
//! let image = GrayImage::from_fn(8, 8, |x, y| (y * 32 + x * 4) as u8).unwrap();
//! let codec = DctCodec::default();
//! let encoded = codec.encode(&image).unwrap();
//! let decoded = codec.decode(&encoded, 8, 8).unwrap();
//! assert!(mse(&image, &decoded).unwrap() < 6000.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod dct;
pub mod dct_codec;
pub mod dft;
pub mod haar;
pub mod header;
pub mod jpeg;
pub mod quantize;
pub mod spectrum;
pub mod wavelet_codec;

pub use buffer::TransformBuffer;
pub use dct::{Dct2d, DctPlan};
pub use dct_codec::DctCodec;
pub use jpeg::JpegCodec;
pub use spectrum::{FilterKind, dct_spectrum, frequency_filter, magnitude_spectrum, wavelet_spectrum};
pub use wavelet_codec::WaveletCodec;
