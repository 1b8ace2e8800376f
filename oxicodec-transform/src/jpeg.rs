//! Block-DCT ("jpeg") codec.
//!
//! Baseline-style intra coding without the entropy stage:
//!
//! - the plane is split into 8x8 blocks in raster order; blocks that run
//!   past the right or bottom edge repeat the last column/row
//! - each block gets an orthonormal 2-D DCT
//! - coefficients are divided by the standard luminance table scaled for
//!   `quality` (IJG convention) and stored as `i16` LE in zigzag order
//!
//! Image layout: `i32 LE width | i32 LE height | u8 quality | blocks`.
//! Planes (used for signed video residuals) carry only the blocks.

use crate::buffer::TransformBuffer;
use crate::dct::Dct2d;
use crate::header::{read_dimensions, read_expected_dimensions, validate_dimensions, validate_image, write_dimensions};
use crate::quantize::{dequantize, quantize_i16};
use log::{debug, warn};
use oxicodec_core::buffer::{checked_area, try_with_capacity};
use oxicodec_core::bytes::ByteCursor;
use oxicodec_core::error::{CodecError, Result};
use oxicodec_core::image::GrayImage;

/// Block edge length.
pub const BLOCK: usize = 8;

const BLOCK_AREA: usize = BLOCK * BLOCK;

/// Standard luminance quantization table, natural order.
const LUMINANCE: [u16; BLOCK_AREA] = [
    16, 11, 10, 16, 24, 40, 51, 61, //
    12, 12, 14, 19, 26, 58, 60, 55, //
    14, 13, 16, 24, 40, 57, 69, 56, //
    14, 17, 22, 29, 51, 87, 80, 62, //
    18, 22, 37, 56, 68, 109, 103, 77, //
    24, 35, 55, 64, 81, 104, 113, 92, //
    49, 64, 78, 87, 103, 121, 120, 101, //
    72, 92, 95, 98, 112, 100, 103, 99,
];

/// `ZIGZAG[i]` is the natural-order index of the i-th zigzag coefficient.
const ZIGZAG: [usize; BLOCK_AREA] = [
    0, 1, 8, 16, 9, 2, 3, 10, 17, 24, 32, 25, 18, 11, 4, 5, //
    12, 19, 26, 33, 40, 48, 41, 34, 27, 20, 13, 6, 7, 14, 21, 28, //
    35, 42, 49, 56, 57, 50, 43, 36, 29, 22, 15, 23, 30, 37, 44, 51, //
    58, 59, 52, 45, 38, 31, 39, 46, 53, 60, 61, 54, 47, 55, 62, 63,
];

/// Block-DCT codec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegCodec {
    quality: u8,
}

impl JpegCodec {
    /// Default quality.
    pub const DEFAULT_QUALITY: u8 = 75;

    /// Size of the image header in bytes.
    pub const HEADER_LEN: usize = 9;

    /// Create a codec; `quality` must be in 1..=100.
    pub fn new(quality: u8) -> Result<Self> {
        if !(1..=100).contains(&quality) {
            return Err(CodecError::invalid_argument(format!(
                "jpeg quality must be in 1..=100, got {quality}"
            )));
        }
        Ok(Self { quality })
    }

    /// Configured quality.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Quantization table for this quality, natural order.
    pub fn quant_table(&self) -> [u16; BLOCK_AREA] {
        let q = self.quality as u32;
        let scale = if q < 50 { 5000 / q } else { 200 - 2 * q };
        let mut table = [0u16; BLOCK_AREA];
        for (dst, &base) in table.iter_mut().zip(&LUMINANCE) {
            *dst = ((base as u32 * scale + 50) / 100).clamp(1, 255) as u16;
        }
        table
    }

    /// Number of payload bytes a `width x height` plane occupies.
    pub fn plane_len(width: usize, height: usize) -> Result<usize> {
        let blocks = checked_area(width.div_ceil(BLOCK), height.div_ceil(BLOCK))?;
        blocks
            .checked_mul(BLOCK_AREA * 2)
            .ok_or_else(|| CodecError::invalid_argument("plane too large"))
    }

    /// Encode a signed plane (no level shift).
    pub fn encode_plane(&self, plane: &TransformBuffer) -> Result<Vec<u8>> {
        let (width, height) = (plane.width(), plane.height());
        validate_dimensions(width, height)?;

        let table = self.quant_table();
        let dct = Dct2d::new(BLOCK, BLOCK);
        let mut block = TransformBuffer::new(BLOCK, BLOCK)?;
        let mut out = try_with_capacity(Self::plane_len(width, height)?)?;

        for by in (0..height).step_by(BLOCK) {
            for bx in (0..width).step_by(BLOCK) {
                for y in 0..BLOCK {
                    let sy = (by + y).min(height - 1);
                    for x in 0..BLOCK {
                        let sx = (bx + x).min(width - 1);
                        block.set(x, y, plane.get(sx, sy));
                    }
                }
                dct.forward_orthonormal(&mut block);

                let coeffs = block.as_slice();
                for &natural in &ZIGZAG {
                    let level = quantize_i16(coeffs[natural], table[natural] as f64);
                    out.extend_from_slice(&level.to_le_bytes());
                }
            }
        }

        Ok(out)
    }

    /// Decode a plane produced by [`encode_plane`](Self::encode_plane) with the
    /// same quality.
    pub fn decode_plane(&self, data: &[u8], width: usize, height: usize) -> Result<TransformBuffer> {
        validate_dimensions(width, height)?;
        let needed = Self::plane_len(width, height)?;
        if data.len() < needed {
            warn!("jpeg: plane needs {needed} bytes, got {}", data.len());
            return Err(CodecError::unexpected_eof(needed - data.len()));
        }

        let table = self.quant_table();
        let dct = Dct2d::new(BLOCK, BLOCK);
        let mut block = TransformBuffer::new(BLOCK, BLOCK)?;
        let mut plane = TransformBuffer::new(width, height)?;
        let mut cursor = ByteCursor::new(data);

        for by in (0..height).step_by(BLOCK) {
            for bx in (0..width).step_by(BLOCK) {
                let coeffs = block.as_mut_slice();
                for &natural in &ZIGZAG {
                    let level = cursor.read_i16_le()?;
                    coeffs[natural] = dequantize(level, table[natural] as f64);
                }
                dct.inverse_orthonormal(&mut block);

                for y in 0..BLOCK.min(height - by) {
                    for x in 0..BLOCK.min(width - bx) {
                        plane.set(bx + x, by + y, block.get(x, y));
                    }
                }
            }
        }

        Ok(plane)
    }

    /// Encode `image` with its header.
    pub fn encode(&self, image: &GrayImage) -> Result<Vec<u8>> {
        validate_image(image)?;
        let (width, height) = image.dimensions();
        let plane = TransformBuffer::from_image(image, -128.0)?;
        let blocks = self.encode_plane(&plane)?;

        let mut out = try_with_capacity(Self::HEADER_LEN + blocks.len())?;
        write_dimensions(&mut out, width, height);
        out.push(self.quality);
        out.extend_from_slice(&blocks);

        debug!(
            "jpeg: encoded {width}x{height} at quality {} into {} bytes",
            self.quality,
            out.len()
        );
        Ok(out)
    }

    /// Decode a payload that must describe a `width x height` image. The
    /// quality comes from the header.
    pub fn decode(data: &[u8], width: usize, height: usize) -> Result<GrayImage> {
        let mut cursor = ByteCursor::new(data);
        read_expected_dimensions(&mut cursor, width, height, "jpeg")?;
        let quality = cursor.read_u8()?;
        let codec = Self::new(quality).map_err(|_| {
            warn!("jpeg: header quality {quality} out of range");
            CodecError::corrupted(8, format!("jpeg quality {quality} out of range"))
        })?;

        let plane = codec.decode_plane(cursor.rest(), width, height)?;
        debug!("jpeg: decoded {width}x{height} at quality {quality}");
        plane.to_image(128.0)
    }

    /// Read the dimensions stored in an image header.
    pub fn peek_dimensions(data: &[u8]) -> Result<(usize, usize)> {
        read_dimensions(&mut ByteCursor::new(data))
    }
}

impl Default for JpegCodec {
    fn default() -> Self {
        Self {
            quality: Self::DEFAULT_QUALITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxicodec_core::image::mse;

    fn gradient() -> GrayImage {
        GrayImage::from_fn(8, 8, |j, i| (i * 32 + j * 4) as u8).unwrap()
    }

    #[test]
    fn test_quant_table_scaling() {
        assert_eq!(JpegCodec::new(50).unwrap().quant_table(), LUMINANCE);
        assert!(JpegCodec::new(100).unwrap().quant_table().iter().all(|&q| q == 1));
        let low = JpegCodec::new(1).unwrap().quant_table();
        assert!(low.iter().all(|&q| q == 255));
        // scale 200 at quality 25
        assert_eq!(JpegCodec::new(25).unwrap().quant_table()[0], 32);
        // scale 50 at quality 75
        assert_eq!(JpegCodec::new(75).unwrap().quant_table()[0], 8);
    }

    #[test]
    fn test_zigzag_is_permutation() {
        let mut seen = [false; BLOCK_AREA];
        for &i in &ZIGZAG {
            assert!(!seen[i]);
            seen[i] = true;
        }
    }

    #[test]
    fn test_quality_validation() {
        assert!(JpegCodec::new(0).is_err());
        assert!(JpegCodec::new(101).is_err());
        assert!(JpegCodec::new(1).is_ok());
    }

    #[test]
    fn test_quality_monotonic() {
        let image = gradient();
        let error_at = |quality| {
            let codec = JpegCodec::new(quality).unwrap();
            let decoded = JpegCodec::decode(&codec.encode(&image).unwrap(), 8, 8).unwrap();
            mse(&image, &decoded).unwrap()
        };
        let low = error_at(10);
        let high = error_at(90);
        assert!(high < low, "q90 {high} vs q10 {low}");
        assert!(high < 5.0);
        assert!(low < 100.0);
    }

    #[test]
    fn test_edge_blocks() {
        let image = GrayImage::from_fn(13, 10, |x, y| (40 + x * 9 + y * 7) as u8).unwrap();
        let codec = JpegCodec::new(90).unwrap();
        let encoded = codec.encode(&image).unwrap();
        assert_eq!(encoded.len(), 9 + 4 * 128);
        let decoded = JpegCodec::decode(&encoded, 13, 10).unwrap();
        assert!(mse(&image, &decoded).unwrap() < 10.0);
    }

    #[test]
    fn test_signed_plane_roundtrip() {
        let data: Vec<f64> = (0..16 * 8).map(|i| ((i % 16) as f64 - 8.0) * 3.0).collect();
        let plane = TransformBuffer::from_vec(16, 8, data.clone()).unwrap();
        let codec = JpegCodec::new(100).unwrap();
        let decoded = codec
            .decode_plane(&codec.encode_plane(&plane).unwrap(), 16, 8)
            .unwrap();
        for (a, b) in decoded.as_slice().iter().zip(&data) {
            assert!((a - b).abs() < 1.5, "{a} vs {b}");
        }
    }

    #[test]
    fn test_corrupt_quality_byte() {
        let mut encoded = JpegCodec::default().encode(&gradient()).unwrap();
        encoded[8] = 0;
        assert!(matches!(
            JpegCodec::decode(&encoded, 8, 8),
            Err(CodecError::Corrupted { .. })
        ));
    }

    #[test]
    fn test_truncated_plane() {
        let encoded = JpegCodec::default().encode(&gradient()).unwrap();
        assert!(matches!(
            JpegCodec::decode(&encoded[..50], 8, 8),
            Err(CodecError::UnexpectedEof { .. })
        ));
    }
}
