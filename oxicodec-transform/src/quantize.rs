//! Scalar quantization of transform coefficients.

use oxicodec_core::error::{CodecError, Result};

/// Quantize to a signed byte: `round(value / step)`, saturated.
#[inline]
pub fn quantize_i8(value: f64, step: f64) -> i8 {
    (value / step).round().clamp(i8::MIN as f64, i8::MAX as f64) as i8
}

/// Quantize to a signed 16-bit value: `round(value / step)`, saturated.
#[inline]
pub fn quantize_i16(value: f64, step: f64) -> i16 {
    (value / step).round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Reconstruct a coefficient from its quantized level.
#[inline]
pub fn dequantize(level: impl Into<f64>, step: f64) -> f64 {
    level.into() * step
}

/// Reject non-positive or non-finite quantization steps.
pub fn validate_step(step: f64) -> Result<()> {
    if !step.is_finite() || step <= 0.0 {
        return Err(CodecError::invalid_argument(format!(
            "quantization step must be positive, got {step}"
        )));
    }
    Ok(())
}
