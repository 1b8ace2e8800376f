//! Frequency-domain views and filters.
//!
//! The spectrum functions turn transform coefficients into displayable
//! images; [`frequency_filter`] masks the DFT of an image and transforms
//! back.

use crate::buffer::{TransformBuffer, clamp_to_pixel};
use crate::dct::Dct2d;
use crate::dft::{Complex, Direction, dft_2d, fft_shift};
use crate::haar::forward_1d;
use crate::header::validate_image;
use log::{debug, warn};
use oxicodec_core::buffer::try_alloc;
use oxicodec_core::error::{CodecError, Result};
use oxicodec_core::image::GrayImage;
use std::fmt;
use std::str::FromStr;

/// Frequency mask shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Pass frequencies within the cutoff radius.
    IdealLowPass,
    /// Pass frequencies beyond the cutoff radius.
    IdealHighPass,
    /// `exp(-d^2 / 2c^2)`.
    GaussianLowPass,
    /// `1 - exp(-d^2 / 2c^2)`.
    GaussianHighPass,
}

impl FilterKind {
    /// All filter kinds.
    pub const ALL: [FilterKind; 4] = [
        FilterKind::IdealLowPass,
        FilterKind::IdealHighPass,
        FilterKind::GaussianLowPass,
        FilterKind::GaussianHighPass,
    ];

    /// Name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::IdealLowPass => "ideal-lowpass",
            FilterKind::IdealHighPass => "ideal-highpass",
            FilterKind::GaussianLowPass => "gaussian-lowpass",
            FilterKind::GaussianHighPass => "gaussian-highpass",
        }
    }

    fn gain(&self, dist_sq: f64, cutoff: f64) -> f64 {
        let cutoff_sq = cutoff * cutoff;
        match self {
            FilterKind::IdealLowPass => {
                if dist_sq <= cutoff_sq {
                    1.0
                } else {
                    0.0
                }
            }
            FilterKind::IdealHighPass => {
                if dist_sq <= cutoff_sq {
                    0.0
                } else {
                    1.0
                }
            }
            FilterKind::GaussianLowPass => (-dist_sq / (2.0 * cutoff_sq)).exp(),
            FilterKind::GaussianHighPass => 1.0 - (-dist_sq / (2.0 * cutoff_sq)).exp(),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CodecError::invalid_argument(format!("unknown filter '{s}'")))
    }
}

fn to_complex(image: &GrayImage) -> Result<Vec<Complex>> {
    let mut data = try_alloc(image.as_bytes().len(), Complex::default())?;
    for (dst, &px) in data.iter_mut().zip(image.as_bytes()) {
        dst.re = px as f64;
    }
    Ok(data)
}

/// Scale `values` so the largest maps to 255; all zero when the maximum is 0.
fn normalize(width: usize, height: usize, values: &[f64]) -> Result<GrayImage> {
    let max = values.iter().copied().fold(0.0f64, f64::max);
    let pixels = if max > 0.0 {
        values.iter().map(|&v| (v / max * 255.0) as u8).collect()
    } else {
        vec![0; values.len()]
    };
    GrayImage::new(width, height, pixels)
}

/// Log-scaled DFT magnitude with the zero frequency moved to the centre.
pub fn magnitude_spectrum(image: &GrayImage) -> Result<GrayImage> {
    validate_image(image)?;
    let (width, height) = image.dimensions();

    let mut data = to_complex(image)?;
    dft_2d(&mut data, width, height, Direction::Forward);

    let mut magnitude: Vec<f64> = data.iter().map(|c| c.norm().ln_1p()).collect();
    fft_shift(&mut magnitude, width, height);

    debug!("spectrum: dft magnitude of {width}x{height}");
    normalize(width, height, &magnitude)
}

/// Log-scaled magnitude of the orthonormal DCT, DC at the top-left.
pub fn dct_spectrum(image: &GrayImage) -> Result<GrayImage> {
    validate_image(image)?;
    let (width, height) = image.dimensions();

    let mut plane = TransformBuffer::from_image(image, 0.0)?;
    Dct2d::new(width, height).forward_orthonormal(&mut plane);

    let max = plane.as_slice().iter().fold(0.0f64, |m, c| m.max(c.abs()));
    let pixels = if max > 0.0 {
        let denom = max.ln_1p();
        plane
            .as_slice()
            .iter()
            .map(|c| (c.abs().ln_1p() / denom * 255.0) as u8)
            .collect()
    } else {
        vec![0; plane.as_slice().len()]
    };

    debug!("spectrum: dct magnitude of {width}x{height}");
    GrayImage::new(width, height, pixels)
}

/// Full-depth Haar decomposition of a line: repeat on the low half until
/// it is a single sample.
fn haar_full_depth(line: &mut [f64], scratch: &mut [f64]) {
    let mut n = line.len();
    while n >= 2 {
        forward_1d(&mut line[..n], scratch);
        n /= 2;
    }
}

/// Magnitude of the standard (rows then columns, full depth) Haar
/// decomposition, linearly scaled.
pub fn wavelet_spectrum(image: &GrayImage) -> Result<GrayImage> {
    validate_image(image)?;
    let (width, height) = image.dimensions();

    let mut plane = TransformBuffer::from_image(image, 0.0)?;
    let mut scratch = vec![0.0; width.max(height)];
    for y in 0..height {
        haar_full_depth(plane.row_mut(y), &mut scratch);
    }

    let mut column = vec![0.0; height];
    for x in 0..width {
        for (y, c) in column.iter_mut().enumerate() {
            *c = plane.get(x, y);
        }
        haar_full_depth(&mut column, &mut scratch);
        for (y, &v) in column.iter().enumerate() {
            plane.set(x, y, v);
        }
    }

    let magnitude: Vec<f64> = plane.as_slice().iter().map(|c| c.abs()).collect();
    debug!("spectrum: haar magnitude of {width}x{height}");
    normalize(width, height, &magnitude)
}

/// Apply a radial frequency mask of radius `cutoff` (in frequency bins).
pub fn frequency_filter(image: &GrayImage, kind: FilterKind, cutoff: f64) -> Result<GrayImage> {
    validate_image(image)?;
    if !(cutoff.is_finite() && cutoff > 0.0) {
        warn!("filter: cutoff {cutoff} must be positive");
        return Err(CodecError::invalid_argument(format!(
            "cutoff must be a positive number, got {cutoff}"
        )));
    }
    let (width, height) = image.dimensions();

    let mut data = to_complex(image)?;
    dft_2d(&mut data, width, height, Direction::Forward);

    // Distances are measured from the DC bin with negative frequencies
    // folded around the middle.
    let centered = |i: usize, n: usize| ((i + n / 2) % n) as f64 - (n / 2) as f64;
    for y in 0..height {
        let fy = centered(y, height);
        for x in 0..width {
            let fx = centered(x, width);
            let gain = kind.gain(fx * fx + fy * fy, cutoff);
            let bin = &mut data[y * width + x];
            *bin = bin.scale(gain);
        }
    }

    dft_2d(&mut data, width, height, Direction::Backward);
    let norm = (width * height) as f64;
    let pixels = data.iter().map(|c| clamp_to_pixel(c.re / norm)).collect();

    debug!("filter: {kind} cutoff {cutoff} on {width}x{height}");
    GrayImage::new(width, height, pixels)
}
