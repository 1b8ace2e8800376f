//! # OxiCodec-Video: Predictive Video Coding
//!
//! A minimal hybrid video coder:
//!
//! - frame 0 is an **I-frame**, coded with the 8x8 block-DCT codec
//! - every later frame is a **P-frame**: block motion vectors against the
//!   previous reconstruction plus a block-DCT coded residual
//!
//! Decoding is strictly sequential; a P-frame needs the frame before it.
//! Any failure aborts the whole sequence call.
//!
//! ## Example
//!
//! ```rust
//! use oxicodec_core::GrayImage;
//! use oxicodec_video::{VideoConfig, decode_sequence, encode_sequence};
//!
//! let frames: Vec<GrayImage> = (0..3)
//!     .map(|t| GrayImage::from_fn(16, 16, |x, y| ((x + t) * 8 + y * 4) as u8).unwrap())
//!     .collect();
//!
//! let stream = encode_sequence(&frames, &VideoConfig::default()).unwrap();
//! let decoded = decode_sequence(&stream).unwrap();
//! assert_eq!(decoded.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod coder;
mod frame;
mod temporal;

pub use coder::{
    PredictiveDecoder, PredictiveEncoder, VideoConfig, decode_sequence, encode_frames,
    encode_sequence,
};
pub use frame::{CodedFrame, FRAME_HEADER_LEN, FrameType, read_stream, write_stream};
pub use temporal::temporal_average;
