//! Whole-frame DCT image codec.
//!
//! Layout: `i32 LE width | i32 LE height | width*height i8 coefficients`.
//! Pixels are centered by -128, transformed with one unnormalized 2-D
//! DCT-II over the whole frame and quantized with a uniform step.

use crate::buffer::TransformBuffer;
use crate::dct::Dct2d;
use crate::header::{read_dimensions, read_expected_dimensions, validate_image, write_dimensions};
use crate::quantize::{dequantize, quantize_i8, validate_step};
use log::debug;
use oxicodec_core::buffer::{checked_area, try_with_capacity};
use oxicodec_core::bytes::ByteCursor;
use oxicodec_core::error::Result;
use oxicodec_core::image::GrayImage;

/// Whole-frame DCT codec configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DctCodec {
    /// Uniform quantization step.
    pub step: f64,
}

impl DctCodec {
    /// Default quantization step.
    pub const DEFAULT_STEP: f64 = 10.0;

    /// Size of the dimension header in bytes.
    pub const HEADER_LEN: usize = 8;

    /// Create a codec with a custom step.
    pub fn new(step: f64) -> Result<Self> {
        validate_step(step)?;
        Ok(Self { step })
    }

    /// Encode `image`.
    pub fn encode(&self, image: &GrayImage) -> Result<Vec<u8>> {
        validate_step(self.step)?;
        validate_image(image)?;
        let (width, height) = image.dimensions();

        let mut plane = TransformBuffer::from_image(image, -128.0)?;
        Dct2d::new(width, height).forward(&mut plane);

        let mut out = try_with_capacity(Self::HEADER_LEN + width * height)?;
        write_dimensions(&mut out, width, height);
        out.extend(
            plane
                .as_slice()
                .iter()
                .map(|&c| quantize_i8(c, self.step) as u8),
        );

        debug!("dct: encoded {width}x{height} into {} bytes", out.len());
        Ok(out)
    }

    /// Decode a payload that must describe a `width x height` image.
    pub fn decode(&self, data: &[u8], width: usize, height: usize) -> Result<GrayImage> {
        validate_step(self.step)?;
        let mut cursor = ByteCursor::new(data);
        read_expected_dimensions(&mut cursor, width, height, "dct")?;
        let levels = cursor.take(checked_area(width, height)?)?;

        let coefficients = levels
            .iter()
            .map(|&b| dequantize(b as i8, self.step))
            .collect();
        let mut plane = TransformBuffer::from_vec(width, height, coefficients)?;
        Dct2d::new(width, height).inverse(&mut plane);

        let norm = 4.0 * width as f64 * height as f64;
        for v in plane.as_mut_slice() {
            *v /= norm;
        }

        debug!("dct: decoded {width}x{height} from {} bytes", data.len());
        plane.to_image(128.0)
    }

    /// Read the dimensions stored in a payload header.
    pub fn peek_dimensions(data: &[u8]) -> Result<(usize, usize)> {
        read_dimensions(&mut ByteCursor::new(data))
    }
}

impl Default for DctCodec {
    fn default() -> Self {
        Self {
            step: Self::DEFAULT_STEP,
        }
    }
}
