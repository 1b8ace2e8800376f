//! Haar wavelet image codec.
//!
//! Layout: `i32 LE width | i32 LE height | i32 LE levels | width*height i8`.
//! The level count in the header is the requested one; both sides derive
//! the applied levels from the dimensions.

use crate::buffer::TransformBuffer;
use crate::haar;
use crate::header::{read_expected_dimensions, validate_image, write_dimensions};
use crate::quantize::{dequantize, quantize_i8, validate_step};
use log::{debug, warn};
use oxicodec_core::buffer::{checked_area, try_with_capacity};
use oxicodec_core::bytes::ByteCursor;
use oxicodec_core::error::{CodecError, Result};
use oxicodec_core::image::GrayImage;

/// Haar wavelet codec configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveletCodec {
    /// Requested decomposition depth.
    pub levels: u32,
    /// Uniform quantization step.
    pub step: f64,
}

impl WaveletCodec {
    /// Default decomposition depth.
    pub const DEFAULT_LEVELS: u32 = 3;

    /// Default quantization step.
    pub const DEFAULT_STEP: f64 = 10.0;

    /// Deepest decomposition accepted in a header.
    pub const MAX_LEVELS: u32 = 32;

    /// Size of the header in bytes.
    pub const HEADER_LEN: usize = 12;

    /// Create a codec with `levels` and the default step.
    pub fn new(levels: u32) -> Result<Self> {
        Self::with_step(levels, Self::DEFAULT_STEP)
    }

    /// Create a codec with explicit `levels` and `step`.
    pub fn with_step(levels: u32, step: f64) -> Result<Self> {
        validate_step(step)?;
        if levels == 0 || levels > Self::MAX_LEVELS {
            return Err(CodecError::invalid_argument(format!(
                "wavelet levels must be in 1..={}, got {levels}",
                Self::MAX_LEVELS
            )));
        }
        Ok(Self { levels, step })
    }

    /// Encode `image`.
    pub fn encode(&self, image: &GrayImage) -> Result<Vec<u8>> {
        validate_step(self.step)?;
        validate_image(image)?;
        let (width, height) = image.dimensions();

        let mut plane = TransformBuffer::from_image(image, -128.0)?;
        let applied = haar::forward_2d(&mut plane, self.levels as usize);

        let mut out = try_with_capacity(Self::HEADER_LEN + width * height)?;
        write_dimensions(&mut out, width, height);
        out.extend_from_slice(&(self.levels as i32).to_le_bytes());
        out.extend(
            plane
                .as_slice()
                .iter()
                .map(|&c| quantize_i8(c, self.step) as u8),
        );

        debug!(
            "wavelet: encoded {width}x{height} with {applied}/{} levels into {} bytes",
            self.levels,
            out.len()
        );
        Ok(out)
    }

    /// Decode a payload that must describe a `width x height` image.
    ///
    /// The decomposition depth comes from the payload header.
    pub fn decode(&self, data: &[u8], width: usize, height: usize) -> Result<GrayImage> {
        validate_step(self.step)?;
        let mut cursor = ByteCursor::new(data);
        read_expected_dimensions(&mut cursor, width, height, "wavelet")?;

        let levels = cursor.read_i32_le()?;
        if levels < 0 || levels as u32 > Self::MAX_LEVELS {
            warn!("wavelet: header level count {levels} out of range");
            return Err(CodecError::corrupted(
                8,
                format!("wavelet level count {levels} out of range"),
            ));
        }

        let coefficients = cursor
            .take(checked_area(width, height)?)?
            .iter()
            .map(|&b| dequantize(b as i8, self.step))
            .collect();
        let mut plane = TransformBuffer::from_vec(width, height, coefficients)?;
        haar::inverse_2d(&mut plane, levels as usize);

        debug!("wavelet: decoded {width}x{height} with {levels} levels");
        plane.to_image(128.0)
    }
}

impl Default for WaveletCodec {
    fn default() -> Self {
        Self {
            levels: Self::DEFAULT_LEVELS,
            step: Self::DEFAULT_STEP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxicodec_core::image::mse;

    fn gradient(width: usize, height: usize) -> GrayImage {
        GrayImage::from_fn(width, height, |j, i| (i * 32 + j * 4).min(255) as u8).unwrap()
    }

    #[test]
    fn test_gradient_roundtrip() {
        for levels in 1..=3 {
            let codec = WaveletCodec::new(levels).unwrap();
            let image = gradient(8, 8);
            let encoded = codec.encode(&image).unwrap();
            assert_eq!(encoded.len(), 12 + 64);
            let decoded = codec.decode(&encoded, 8, 8).unwrap();
            assert!(mse(&image, &decoded).unwrap() < 20.0, "levels {levels}");
        }
    }

    #[test]
    fn test_odd_dimensions() {
        let codec = WaveletCodec::default();
        let image = GrayImage::from_fn(13, 7, |x, y| (100 + x * 3 + y * 5) as u8).unwrap();
        let decoded = codec.decode(&codec.encode(&image).unwrap(), 13, 7).unwrap();
        assert!(mse(&image, &decoded).unwrap() < 20.0);
    }

    #[test]
    fn test_levels_validation() {
        assert!(WaveletCodec::new(0).is_err());
        assert!(WaveletCodec::new(33).is_err());
        assert!(WaveletCodec::with_step(2, -1.0).is_err());
    }

    #[test]
    fn test_dimension_mismatch() {
        let codec = WaveletCodec::default();
        let encoded = codec.encode(&gradient(8, 8)).unwrap();
        assert!(matches!(
            codec.decode(&encoded, 8, 9),
            Err(CodecError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_corrupt_level_count() {
        let codec = WaveletCodec::default();
        let mut encoded = codec.encode(&gradient(8, 8)).unwrap();
        encoded[8..12].copy_from_slice(&(-1i32).to_le_bytes());
        assert!(matches!(
            codec.decode(&encoded, 8, 8),
            Err(CodecError::Corrupted { .. })
        ));
    }
}
