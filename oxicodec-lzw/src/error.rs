//! LZW-specific error types.

use oxicodec_core::CodecError;
use thiserror::Error;

/// LZW compression/decompression errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// A code refers to a dictionary entry that does not exist yet.
    #[error("Invalid LZW code {code} at bit position {position}")]
    InvalidCode {
        /// The offending code.
        code: u32,
        /// Bit position just after the code.
        position: u64,
    },

    /// Configuration rejected by [`LzwConfig::validate`](crate::LzwConfig::validate).
    #[error("Invalid LZW configuration: {code_bits}-bit codes with {max_entries} entries")]
    InvalidConfig {
        /// Requested code width.
        code_bits: u8,
        /// Requested dictionary capacity.
        max_entries: u32,
    },

    /// Error from the shared bit stream layer.
    #[error(transparent)]
    Stream(#[from] CodecError),
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;

impl From<LzwError> for CodecError {
    fn from(err: LzwError) -> Self {
        match err {
            LzwError::InvalidCode { code, position } => CodecError::corrupted(
                position,
                format!("LZW code {code} is not in the dictionary"),
            ),
            LzwError::InvalidConfig { .. } => CodecError::invalid_argument(err.to_string()),
            LzwError::Stream(inner) => inner,
        }
    }
}
