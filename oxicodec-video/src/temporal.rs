//! Temporal smoothing across frames.

use log::{debug, warn};
use oxicodec_core::buffer::try_alloc;
use oxicodec_core::error::{CodecError, Result};
use oxicodec_core::image::GrayImage;

/// Per-pixel mean of equally sized frames, rounded to nearest.
pub fn temporal_average(frames: &[GrayImage]) -> Result<GrayImage> {
    let Some(first) = frames.first() else {
        warn!("video: temporal average of zero frames");
        return Err(CodecError::invalid_argument("no frames to average"));
    };
    let (width, height) = first.dimensions();

    let mut sums = try_alloc(first.as_bytes().len(), 0u64)?;
    for frame in frames {
        first.ensure_same_dimensions(frame)?;
        for (sum, &px) in sums.iter_mut().zip(frame.as_bytes()) {
            *sum += px as u64;
        }
    }

    let n = frames.len() as u64;
    let pixels = sums.iter().map(|&s| ((s + n / 2) / n) as u8).collect();
    debug!("video: averaged {n} frames of {width}x{height}");
    GrayImage::new(width, height, pixels)
}
