//! Fallible buffer allocation.
//!
//! Working buffers whose size is derived from untrusted headers (image
//! dimensions, symbol counts) are reserved with `try_reserve_exact` so that
//! an absurd size surfaces as [`CodecError::AllocationFailure`] instead of
//! aborting the process.

use crate::error::{CodecError, Result};
use log::warn;

/// Allocate an empty vector able to hold `capacity` elements.
pub fn try_with_capacity<T>(capacity: usize) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(capacity).map_err(|_| {
        let requested = capacity.saturating_mul(std::mem::size_of::<T>());
        warn!("failed to reserve {requested} bytes");
        CodecError::allocation(requested)
    })?;
    Ok(buf)
}

/// Allocate a vector of `len` copies of `value`.
pub fn try_alloc<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut buf = try_with_capacity(len)?;
    buf.resize(len, value);
    Ok(buf)
}

/// Multiply two dimensions, rejecting overflow.
pub fn checked_area(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .ok_or_else(|| CodecError::invalid_argument(format!("{width}x{height} overflows")))
}
