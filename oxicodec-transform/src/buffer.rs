//! Real-valued coefficient planes.

use oxicodec_core::buffer::{checked_area, try_alloc};
use oxicodec_core::error::{CodecError, Result};
use oxicodec_core::image::GrayImage;

/// A `width x height` plane of `f64` samples, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformBuffer {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl TransformBuffer {
    /// Allocate a zeroed plane.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let data = try_alloc(checked_area(width, height)?, 0.0)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap existing samples.
    pub fn from_vec(width: usize, height: usize, data: Vec<f64>) -> Result<Self> {
        let area = checked_area(width, height)?;
        if data.len() != area {
            return Err(CodecError::invalid_argument(format!(
                "{width}x{height} plane needs {area} samples, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Copy an image into a plane, adding `offset` to every pixel.
    pub fn from_image(image: &GrayImage, offset: f64) -> Result<Self> {
        let mut plane = Self::new(image.width(), image.height())?;
        for (dst, &src) in plane.data.iter_mut().zip(image.as_bytes()) {
            *dst = src as f64 + offset;
        }
        Ok(plane)
    }

    /// Convert back to pixels: add `offset`, clamp to 0..=255 and round.
    pub fn to_image(&self, offset: f64) -> Result<GrayImage> {
        let pixels = self
            .data
            .iter()
            .map(|&v| clamp_to_pixel(v + offset))
            .collect();
        GrayImage::new(self.width, self.height, pixels)
    }

    /// Plane width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Samples, row-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable samples, row-major.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Sample at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    /// Overwrite the sample at `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        self.data[y * self.width + x] = value;
    }

    /// Row `y`.
    pub fn row(&self, y: usize) -> &[f64] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Mutable row `y`.
    pub fn row_mut(&mut self, y: usize) -> &mut [f64] {
        &mut self.data[y * self.width..(y + 1) * self.width]
    }
}

/// Clamp to the pixel range and round to the nearest integer.
#[inline]
pub fn clamp_to_pixel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_roundtrip_with_offset() {
        let image = GrayImage::from_fn(5, 3, |x, y| (x * 40 + y) as u8).unwrap();
        let plane = TransformBuffer::from_image(&image, -128.0).unwrap();
        assert_eq!(plane.get(0, 0), -128.0);
        assert_eq!(plane.get(4, 2), 34.0);
        assert_eq!(plane.to_image(128.0).unwrap(), image);
    }

    #[test]
    fn test_clamp_to_pixel() {
        assert_eq!(clamp_to_pixel(-3.0), 0);
        assert_eq!(clamp_to_pixel(300.0), 255);
        assert_eq!(clamp_to_pixel(12.5), 13);
        assert_eq!(clamp_to_pixel(12.49), 12);
    }

    #[test]
    fn test_from_vec_length_check() {
        assert!(TransformBuffer::from_vec(2, 2, vec![0.0; 4]).is_ok());
        assert!(TransformBuffer::from_vec(2, 2, vec![0.0; 3]).is_err());
    }
}
