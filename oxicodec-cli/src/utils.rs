//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use oxicodec::GrayImage;
use std::error::Error;
use std::path::Path;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style.progress_chars("█▓▒░ "));
    pb
}

/// Load any supported image file as 8-bit grayscale.
pub fn load_gray(path: &Path) -> Result<GrayImage, Box<dyn Error>> {
    let luma = image::open(path)?.to_luma8();
    let (width, height) = luma.dimensions();
    Ok(GrayImage::new(width as usize, height as usize, luma.into_raw())?)
}

/// Save a grayscale frame; the format follows the file extension.
pub fn save_gray(path: &Path, frame: &GrayImage) -> Result<(), Box<dyn Error>> {
    let width = u32::try_from(frame.width())?;
    let height = u32::try_from(frame.height())?;
    let luma = image::GrayImage::from_raw(width, height, frame.as_bytes().to_vec())
        .ok_or("pixel buffer does not match image dimensions")?;
    luma.save(path)?;
    Ok(())
}

/// Space savings in percent, `None` for empty input.
pub fn savings(original: usize, compressed: usize) -> Option<f64> {
    (original > 0).then(|| (1.0 - compressed as f64 / original as f64) * 100.0)
}

/// Format a savings percentage for tables.
pub fn format_savings(original: usize, compressed: usize) -> String {
    savings(original, compressed)
        .map(|s| format!("{s:.1}%"))
        .unwrap_or_else(|| "-".to_string())
}

/// Format a PSNR value; identical images print as `inf`.
pub fn format_psnr(psnr: f64) -> String {
    if psnr.is_finite() {
        format!("{psnr:.2} dB")
    } else {
        "inf".to_string()
    }
}
