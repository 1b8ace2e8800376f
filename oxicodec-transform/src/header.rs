//! Dimension headers shared by the image codecs.

use log::{error, warn};
use oxicodec_core::bytes::ByteCursor;
use oxicodec_core::error::{CodecError, Result};
use oxicodec_core::image::GrayImage;

/// Reject empty images and images whose sides do not fit an `i32` header.
pub fn validate_image(image: &GrayImage) -> Result<()> {
    validate_dimensions(image.width(), image.height())
}

/// Reject zero or oversized dimensions.
pub fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        warn!("refusing zero-sized {width}x{height} image");
        return Err(CodecError::invalid_argument(format!(
            "image must be non-empty, got {width}x{height}"
        )));
    }
    if width > i32::MAX as usize || height > i32::MAX as usize {
        return Err(CodecError::invalid_argument(format!(
            "{width}x{height} does not fit a 32-bit header"
        )));
    }
    Ok(())
}

/// Append the `i32 LE width | i32 LE height` header.
pub fn write_dimensions(out: &mut Vec<u8>, width: usize, height: usize) {
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
}

/// Read the dimension header.
pub fn read_dimensions(cursor: &mut ByteCursor<'_>) -> Result<(usize, usize)> {
    let width = cursor.read_i32_le()?;
    let height = cursor.read_i32_le()?;
    if width < 0 || height < 0 {
        return Err(CodecError::corrupted(
            0,
            format!("negative dimensions {width}x{height} in header"),
        ));
    }
    Ok((width as usize, height as usize))
}

/// Read the dimension header and compare it with what the caller expects.
pub fn read_expected_dimensions(
    cursor: &mut ByteCursor<'_>,
    width: usize,
    height: usize,
    codec: &str,
) -> Result<()> {
    validate_dimensions(width, height)?;
    let found = read_dimensions(cursor)?;
    if found != (width, height) {
        error!(
            "{codec}: header says {}x{}, caller expects {width}x{height}",
            found.0,
            found.1
        );
        return Err(CodecError::dimension_mismatch((width, height), found));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_header() {
        let mut out = Vec::new();
        write_dimensions(&mut out, 640, 480);
        let mut cursor = ByteCursor::new(&out);
        assert!(read_expected_dimensions(&mut cursor, 640, 480, "test").is_ok());

        let mut cursor = ByteCursor::new(&out);
        assert!(matches!(
            read_expected_dimensions(&mut cursor, 480, 640, "test"),
            Err(CodecError::DimensionMismatch { .. })
        ));
    }
}
