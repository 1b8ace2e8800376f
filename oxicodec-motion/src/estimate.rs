//! Exhaustive block-matching search.

use crate::vector::{MotionVector, MotionVectorField};
use log::{debug, trace, warn};
use oxicodec_core::error::{CodecError, Result};
use oxicodec_core::image::GrayImage;
use std::ops::RangeInclusive;

/// Block-matching parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionEstimator {
    block_size: usize,
    search_window: usize,
}

impl MotionEstimator {
    /// Default tile edge length.
    pub const DEFAULT_BLOCK_SIZE: usize = 8;

    /// Default search radius.
    pub const DEFAULT_SEARCH_WINDOW: usize = 4;

    /// Largest accepted tile edge length.
    pub const MAX_BLOCK_SIZE: usize = 256;

    /// Largest accepted search radius.
    pub const MAX_SEARCH_WINDOW: usize = 1024;

    /// Create an estimator; `block_size` must be nonzero.
    pub fn new(block_size: usize, search_window: usize) -> Result<Self> {
        if block_size == 0 || block_size > Self::MAX_BLOCK_SIZE {
            return Err(CodecError::invalid_argument(format!(
                "block size must be in 1..={}, got {block_size}",
                Self::MAX_BLOCK_SIZE
            )));
        }
        if search_window > Self::MAX_SEARCH_WINDOW {
            return Err(CodecError::invalid_argument(format!(
                "search window must be at most {}, got {search_window}",
                Self::MAX_SEARCH_WINDOW
            )));
        }
        Ok(Self {
            block_size,
            search_window,
        })
    }

    /// Tile edge length.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Search radius in pixels.
    pub fn search_window(&self) -> usize {
        self.search_window
    }

    /// Number of tiles covering a `width x height` frame.
    pub fn block_count(&self, width: usize, height: usize) -> usize {
        width.div_ceil(self.block_size) * height.div_ceil(self.block_size)
    }

    /// Estimate one vector per tile of `current` against `reference`.
    ///
    /// A frame narrower or shorter than the block size is one partial tile
    /// along that axis, matched at offset 0.
    pub fn estimate(&self, reference: &GrayImage, current: &GrayImage) -> Result<MotionVectorField> {
        if let Err(err) = reference.ensure_same_dimensions(current) {
            warn!("motion: reference and current frame sizes differ");
            return Err(err);
        }
        let (width, height) = current.dimensions();
        let bs = self.block_size;

        let mut field = MotionVectorField::with_capacity(self.block_count(width, height))?;
        let mut moving = 0usize;

        for by in (0..height).step_by(bs) {
            for bx in (0..width).step_by(bs) {
                let (vector, sad) = self.search_block(reference, current, bx, by);
                trace!(
                    "motion: block ({bx}, {by}) -> ({}, {}) sad {sad}",
                    vector.dx, vector.dy
                );
                if !vector.is_zero() {
                    moving += 1;
                }
                field.push(vector);
            }
        }

        debug!(
            "motion: {} blocks of {bs}x{bs} over {width}x{height}, {moving} moving",
            field.len()
        );
        Ok(field)
    }

    /// Offsets along one axis that keep a block at `start` inside `extent`,
    /// intersected with the search window. When the window misses the valid
    /// range entirely, it collapses to the nearest valid offset, which lies
    /// outside the window.
    fn candidates(&self, start: usize, extent: usize) -> RangeInclusive<i32> {
        let span = self.block_size.min(extent);
        let valid_lo = -(start as i64);
        let valid_hi = extent as i64 - span as i64 - start as i64;
        let window = self.search_window as i64;
        let lo = (-window).clamp(valid_lo, valid_hi);
        let hi = window.clamp(valid_lo, valid_hi);
        lo as i32..=hi as i32
    }

    fn search_block(
        &self,
        reference: &GrayImage,
        current: &GrayImage,
        bx: usize,
        by: usize,
    ) -> (MotionVector, u64) {
        let xs = self.candidates(bx, reference.width());
        let ys = self.candidates(by, reference.height());
        let (block_w, block_h) = block_extent(self.block_size, reference.width(), reference.height());

        let mut best = MotionVector::new(bx, by, *xs.start(), *ys.start());
        let mut best_sad = u64::MAX;

        for dy in ys {
            for dx in xs.clone() {
                let rx = (bx as i64 + dx as i64) as usize;
                let ry = (by as i64 + dy as i64) as usize;
                let sad = block_sad(current, (bx, by), reference, (rx, ry), (block_w, block_h), best_sad);
                if sad < best_sad {
                    best_sad = sad;
                    best = MotionVector::new(bx, by, dx, dy);
                }
            }
        }

        (best, best_sad)
    }
}

impl Default for MotionEstimator {
    fn default() -> Self {
        Self {
            block_size: Self::DEFAULT_BLOCK_SIZE,
            search_window: Self::DEFAULT_SEARCH_WINDOW,
        }
    }
}

/// Size of the reference block matched for each tile: the block size,
/// clipped to frames smaller than one block.
pub(crate) fn block_extent(block_size: usize, width: usize, height: usize) -> (usize, usize) {
    (block_size.min(width), block_size.min(height))
}

/// Sum of absolute differences between the tile of `current` at `(bx, by)`
/// (zero past the frame edge) and the `block_w x block_h` block of
/// `reference` at `(rx, ry)`, which must lie inside the frame. Stops early
/// once `limit` is reached.
fn block_sad(
    current: &GrayImage,
    (bx, by): (usize, usize),
    reference: &GrayImage,
    (rx, ry): (usize, usize),
    (block_w, block_h): (usize, usize),
    limit: u64,
) -> u64 {
    let mut sad = 0u64;
    for y in 0..block_h {
        for x in 0..block_w {
            let cur = current.pixel_or_zero((bx + x) as isize, (by + y) as isize);
            let refp = reference.pixel(rx + x, ry + y);
            sad += cur.abs_diff(refp) as u64;
        }
        if sad >= limit {
            break;
        }
    }
    sad
}

/// Mean absolute difference between the tile at `(bx, by)` of `current` and
/// the block displaced by `(dx, dy)` in `reference`.
///
/// Returns `None` if the displaced block leaves the reference frame.
pub fn mean_absolute_difference(
    reference: &GrayImage,
    current: &GrayImage,
    vector: &MotionVector,
    block_size: usize,
) -> Option<f64> {
    let (rx, ry) = vector.source()?;
    let (block_w, block_h) = block_extent(block_size, reference.width(), reference.height());
    if block_w == 0 || block_h == 0 || rx + block_w > reference.width() || ry + block_h > reference.height() {
        return None;
    }
    let sad = block_sad(
        current,
        (vector.block_x, vector.block_y),
        reference,
        (rx, ry),
        (block_w, block_h),
        u64::MAX,
    );
    Some(sad as f64 / (block_w * block_h) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(x: usize, y: usize) -> u8 {
        (128.0 + 40.0 * (x as f64 / 8.0).sin() + 40.0 * (y as f64 / 8.0).cos()) as u8
    }

    #[test]
    fn test_identical_frames_zero_motion() {
        let frame = GrayImage::from_fn(16, 16, world).unwrap();
        let field = MotionEstimator::default().estimate(&frame, &frame).unwrap();
        assert_eq!(field.len(), 4);
        assert!(field.iter().all(|v| v.is_zero()));
    }

    #[test]
    fn test_raster_order() {
        let frame = GrayImage::from_fn(24, 16, world).unwrap();
        let field = MotionEstimator::default().estimate(&frame, &frame).unwrap();
        let origins: Vec<_> = field.iter().map(|v| (v.block_x, v.block_y)).collect();
        assert_eq!(origins, vec![(0, 0), (8, 0), (16, 0), (0, 8), (8, 8), (16, 8)]);
    }

    #[test]
    fn test_candidates_clamped() {
        let estimator = MotionEstimator::new(8, 4).unwrap();
        assert_eq!(estimator.candidates(0, 32), 0..=4);
        assert_eq!(estimator.candidates(24, 32), -4..=0);
        assert_eq!(estimator.candidates(8, 32), -4..=4);
        // Partial edge tile: the only valid offsets lie outside the window.
        assert_eq!(estimator.candidates(16, 18), -6..=-6);
    }

    #[test]
    fn test_partial_tiles_stay_inside() {
        let reference = GrayImage::from_fn(18, 13, world).unwrap();
        let current = GrayImage::from_fn(18, 13, |x, y| world(x + 1, y)).unwrap();
        let field = MotionEstimator::new(8, 2).unwrap().estimate(&reference, &current).unwrap();
        assert_eq!(field.len(), 3 * 2);
        for v in &field {
            let (rx, ry) = v.source().unwrap();
            assert!(rx + 8 <= 18 && ry + 8 <= 13, "{v:?}");
        }
        // The right-hand tile can only stay inside by moving past the window.
        let right = field.as_slice()[2];
        assert_eq!((right.block_x, right.dx), (16, -6));
    }

    #[test]
    fn test_frame_smaller_than_block() {
        let reference = GrayImage::from_fn(4, 4, world).unwrap();
        let current = GrayImage::from_fn(4, 4, |x, y| world(x + 1, y)).unwrap();
        let field = MotionEstimator::default().estimate(&reference, &current).unwrap();
        assert_eq!(field.as_slice(), &[MotionVector::new(0, 0, 0, 0)]);

        // Narrow in one axis only: tiles run down the frame, no horizontal motion.
        let tall = GrayImage::from_fn(5, 20, world).unwrap();
        let field = MotionEstimator::new(8, 3).unwrap().estimate(&tall, &tall).unwrap();
        assert_eq!(field.len(), 3);
        assert!(field.iter().all(|v| v.dx == 0));
    }

    #[test]
    fn test_first_candidate_wins_ties() {
        let flat = GrayImage::filled(16, 16, 50).unwrap();
        let field = MotionEstimator::new(8, 2).unwrap().estimate(&flat, &flat).unwrap();
        // Top-left tile: scan starts at dy = 0, dx = 0.
        assert_eq!((field.as_slice()[0].dx, field.as_slice()[0].dy), (0, 0));
        // Bottom-right tile: scan starts at dy = -2, dx = -2.
        assert_eq!((field.as_slice()[3].dx, field.as_slice()[3].dy), (-2, -2));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(MotionEstimator::new(0, 4).is_err());
        let other = GrayImage::filled(16, 8, 0).unwrap();
        let frame = GrayImage::filled(8, 16, 0).unwrap();
        assert!(matches!(
            MotionEstimator::default().estimate(&frame, &other),
            Err(CodecError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_mean_absolute_difference() {
        let reference = GrayImage::filled(8, 8, 10).unwrap();
        let current = GrayImage::filled(8, 8, 14).unwrap();
        let v = MotionVector::new(0, 0, 0, 0);
        assert_eq!(mean_absolute_difference(&reference, &current, &v, 8), Some(4.0));
        let outside = MotionVector::new(0, 0, 1, 0);
        assert_eq!(mean_absolute_difference(&reference, &current, &outside, 8), None);
        // Block clipped to a frame smaller than one block.
        assert_eq!(mean_absolute_difference(&reference, &current, &v, 16), Some(4.0));
    }
}
