//! Motion-compensated prediction.

use crate::estimate::block_extent;
use crate::vector::{MotionVector, MotionVectorField};
use log::{debug, warn};
use oxicodec_core::error::{CodecError, Result};
use oxicodec_core::image::GrayImage;

fn out_of_frame(vector: &MotionVector, block_size: usize, width: usize, height: usize) -> CodecError {
    warn!(
        "motion: vector {:?} points outside the {width}x{height} reference",
        vector
    );
    CodecError::invalid_argument(format!(
        "vector at ({}, {}) with offset ({}, {}) leaves the {width}x{height} reference for block size {block_size}",
        vector.block_x, vector.block_y, vector.dx, vector.dy
    ))
}

/// Build a prediction of the frame described by `field` by copying each
/// displaced reference block to its tile.
///
/// Tiles hanging past the frame edge are clipped, and the reference block
/// is clipped to frames smaller than one block. Pixels no vector covers
/// stay 0.
pub fn compensate(
    reference: &GrayImage,
    field: &MotionVectorField,
    block_size: usize,
) -> Result<GrayImage> {
    if block_size == 0 {
        return Err(CodecError::invalid_argument("block size must be nonzero"));
    }
    let (width, height) = reference.dimensions();
    let (block_w, block_h) = block_extent(block_size, width, height);
    let mut predicted = GrayImage::filled(width, height, 0)?;

    for vector in field {
        let (rx, ry) = vector
            .source()
            .ok_or_else(|| out_of_frame(vector, block_size, width, height))?;
        if rx + block_w > width || ry + block_h > height {
            return Err(out_of_frame(vector, block_size, width, height));
        }

        let rows = block_h.min(height.saturating_sub(vector.block_y));
        let cols = block_w.min(width.saturating_sub(vector.block_x));
        for y in 0..rows {
            for x in 0..cols {
                let value = reference.pixel(rx + x, ry + y);
                predicted.set_pixel(vector.block_x + x, vector.block_y + y, value);
            }
        }
    }

    debug!(
        "motion: compensated {} blocks over {width}x{height}",
        field.len()
    );
    Ok(predicted)
}
