//! Error types for OxiCodec operations.
//!
//! Every codec in the workspace reports failures through [`CodecError`].
//! A failed call never returns partial output: callers receive an `Err`
//! and must treat the operation as aborted.

use std::io;
use thiserror::Error;

/// The main error type for OxiCodec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A working buffer could not be allocated.
    #[error("Allocation failure: could not reserve {requested} bytes")]
    AllocationFailure {
        /// Number of bytes that were requested.
        requested: usize,
    },

    /// An argument was rejected before any work was done.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    /// Decode-time dimensions disagree with the dimensions stored in the header.
    #[error(
        "Dimension mismatch: expected {expected_width}x{expected_height}, found {found_width}x{found_height}"
    )]
    DimensionMismatch {
        /// Width requested by the caller.
        expected_width: usize,
        /// Height requested by the caller.
        expected_height: usize,
        /// Width found in the payload (or second operand).
        found_width: usize,
        /// Height found in the payload (or second operand).
        found_height: usize,
    },

    /// Huffman encode met a byte that has no entry in the code table.
    #[error("No code for symbol {symbol:#04x} at input position {position}")]
    MissingCode {
        /// The symbol without a code.
        symbol: u8,
        /// Byte offset of the symbol in the input.
        position: usize,
    },

    /// Corrupted data in a code stream or payload.
    #[error("Corrupted data at offset {offset}: {message}")]
    Corrupted {
        /// Byte (or bit, for bit streams) offset where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of data: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },
}

/// Result type alias for OxiCodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Create an allocation failure error.
    pub fn allocation(requested: usize) -> Self {
        Self::AllocationFailure { requested }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(expected: (usize, usize), found: (usize, usize)) -> Self {
        Self::DimensionMismatch {
            expected_width: expected.0,
            expected_height: expected.1,
            found_width: found.0,
            found_height: found.1,
        }
    }

    /// Create a missing code error.
    pub fn missing_code(symbol: u8, position: usize) -> Self {
        Self::MissingCode { symbol, position }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::Corrupted {
            offset,
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::dimension_mismatch((8, 8), (16, 4));
        assert!(err.to_string().contains("expected 8x8, found 16x4"));

        let err = CodecError::missing_code(b'z', 3);
        assert!(err.to_string().contains("0x7a"));

        let err = CodecError::invalid_argument("zero total frequency");
        assert!(err.to_string().contains("zero total frequency"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: CodecError = io_err.into();
        assert!(matches!(err, CodecError::Io(_)));
    }
}
