//! Grayscale frames and distortion metrics.

use crate::buffer::{checked_area, try_alloc};
use crate::error::{CodecError, Result};

/// A flattened 8-bit grayscale image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImage {
    /// Wrap an existing pixel buffer.
    ///
    /// Fails if `data.len() != width * height`.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let area = checked_area(width, height)?;
        if data.len() != area {
            return Err(CodecError::invalid_argument(format!(
                "{width}x{height} image needs {area} pixels, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create an image with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self> {
        let data = try_alloc(checked_area(width, height)?, value)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Result<Self> {
        let mut image = Self::filled(width, height, 0)?;
        for y in 0..height {
            for x in 0..width {
                image.data[y * width + x] = f(x, y);
            }
        }
        Ok(image)
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Whether the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixel buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable pixel buffer.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the image and return its pixel buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`; panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Pixel at signed `(x, y)`, or 0 outside the frame.
    #[inline]
    pub fn pixel_or_zero(&self, x: isize, y: isize) -> u8 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            0
        } else {
            self.data[y as usize * self.width + x as usize]
        }
    }

    /// Set the pixel at `(x, y)`; panics when out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) {
        self.data[y * self.width + x] = value;
    }

    /// Fail with `DimensionMismatch` unless `other` has the same size.
    pub fn ensure_same_dimensions(&self, other: &GrayImage) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(CodecError::dimension_mismatch(
                self.dimensions(),
                other.dimensions(),
            ));
        }
        Ok(())
    }
}

/// Mean squared error between two equally sized images.
pub fn mse(a: &GrayImage, b: &GrayImage) -> Result<f64> {
    a.ensure_same_dimensions(b)?;
    if a.is_empty() {
        return Ok(0.0);
    }
    let sum: f64 = a
        .as_bytes()
        .iter()
        .zip(b.as_bytes())
        .map(|(&p, &q)| {
            let d = p as f64 - q as f64;
            d * d
        })
        .sum();
    Ok(sum / a.as_bytes().len() as f64)
}

/// Peak signal-to-noise ratio in dB (infinite for identical images).
pub fn psnr(a: &GrayImage, b: &GrayImage) -> Result<f64> {
    let err = mse(a, b)?;
    if err == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * (255.0 * 255.0 / err).log10())
}
