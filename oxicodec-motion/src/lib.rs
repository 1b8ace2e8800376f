//! # OxiCodec-Motion: Block-Matching Motion Estimation
//!
//! Frames are tiled into `block_size x block_size` blocks in raster order.
//! For every tile [`MotionEstimator::estimate`] scans all displacements
//! within `±search_window` (rows outer, columns inner) that keep the
//! reference block inside the frame and keeps the one with the smallest
//! mean absolute difference; the first candidate wins ties. Tile pixels past
//! the frame edge count as 0.
//!
//! [`compensate`] rebuilds a prediction from a reference frame and a
//! [`MotionVectorField`].
//!
//! ## Example
//!
//! ```rust
//! use oxicodec_core::GrayImage;
//! use oxicodec_motion::{MotionEstimator, compensate};
//!
//! let reference = GrayImage::from_fn(32, 32, |x, y| (x * 7 + y * 3) as u8).unwrap();
//! let current = GrayImage::from_fn(32, 32, |x, y| ((x + 1) * 7 + y * 3) as u8).unwrap();
//!
//! let estimator = MotionEstimator::new(8, 4).unwrap();
//! let field = estimator.estimate(&reference, &current).unwrap();
//! let predicted = compensate(&reference, &field, 8).unwrap();
//! assert_eq!(predicted.width(), 32);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod compensate;
mod estimate;
mod vector;

pub use compensate::compensate;
pub use estimate::{MotionEstimator, mean_absolute_difference};
pub use vector::{MotionVector, MotionVectorField, VECTOR_LEN};
