//! # OxiCodec-RLE: Run-Length Encoding
//!
//! Every run of identical bytes becomes a `(count, byte)` pair, with runs
//! longer than 255 split into several pairs. Data without repetition
//! doubles in size; long runs shrink up to 127x.
//!
//! ```rust
//! use oxicodec_rle::{decode, encode};
//!
//! let encoded = encode(b"AAAABBBCCDAA");
//! assert_eq!(encoded, vec![4, b'A', 3, b'B', 2, b'C', 1, b'D', 2, b'A']);
//! assert_eq!(decode(&encoded).unwrap(), b"AAAABBBCCDAA");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

use log::{debug, warn};
use oxicodec_core::error::{CodecError, Result};

/// Longest run a single pair can describe.
pub const MAX_RUN: usize = 255;

/// Encode `data` as `(count, byte)` pairs.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len().min(1 << 16));
    let mut i = 0;

    while i < data.len() {
        let byte = data[i];
        let mut run_len = 1;
        while i + run_len < data.len() && data[i + run_len] == byte && run_len < MAX_RUN {
            run_len += 1;
        }
        result.push(run_len as u8);
        result.push(byte);
        i += run_len;
    }

    result.shrink_to_fit();
    debug!("rle: {} bytes -> {} pairs", data.len(), result.len() / 2);
    result
}

/// Expand `(count, byte)` pairs.
///
/// Fails with `Corrupted` when the input has an odd length.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() % 2 == 1 {
        warn!("rle: odd encoded length {}", data.len());
        return Err(CodecError::corrupted(
            data.len() as u64 - 1,
            "run-length stream has a dangling count byte",
        ));
    }

    let total: usize = data.chunks_exact(2).map(|pair| pair[0] as usize).sum();
    let mut result = oxicodec_core::buffer::try_with_capacity(total)?;
    for pair in data.chunks_exact(2) {
        result.resize(result.len() + pair[0] as usize, pair[1]);
    }

    debug!("rle: {} pairs -> {} bytes", data.len() / 2, result.len());
    Ok(result)
}
