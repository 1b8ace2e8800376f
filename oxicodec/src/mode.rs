//! Compression mode selection.

use oxicodec_core::error::{CodecError, Result};
use std::fmt;
use std::str::FromStr;

/// Algorithm used for a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionMode {
    /// LZW, 12-bit codes.
    Lzw,
    /// Static Huffman.
    Huffman,
    /// 32-bit range coder.
    Arithmetic,
    /// `(count, byte)` run-length.
    Rle,
    /// Whole-frame DCT (lossy, images only).
    DctBased,
    /// Haar wavelet (lossy, images only).
    Wavelet,
    /// 8x8 block DCT with quality scaling (lossy, images only).
    Jpeg,
}

impl CompressionMode {
    /// All modes in id order.
    pub const ALL: [CompressionMode; 7] = [
        CompressionMode::Lzw,
        CompressionMode::Huffman,
        CompressionMode::Arithmetic,
        CompressionMode::Rle,
        CompressionMode::DctBased,
        CompressionMode::Wavelet,
        CompressionMode::Jpeg,
    ];

    /// Stable numeric id stored in containers.
    pub fn id(self) -> u8 {
        match self {
            CompressionMode::Lzw => 0,
            CompressionMode::Huffman => 1,
            CompressionMode::Arithmetic => 2,
            CompressionMode::Rle => 3,
            CompressionMode::DctBased => 4,
            CompressionMode::Wavelet => 5,
            CompressionMode::Jpeg => 6,
        }
    }

    /// Mode for a container id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Command-line name.
    pub fn name(self) -> &'static str {
        match self {
            CompressionMode::Lzw => "lzw",
            CompressionMode::Huffman => "huffman",
            CompressionMode::Arithmetic => "arithmetic",
            CompressionMode::Rle => "rle",
            CompressionMode::DctBased => "dct_based",
            CompressionMode::Wavelet => "wavelet",
            CompressionMode::Jpeg => "jpeg",
        }
    }

    /// Whether the mode operates on images.
    pub fn is_image(self) -> bool {
        matches!(
            self,
            CompressionMode::DctBased | CompressionMode::Wavelet | CompressionMode::Jpeg
        )
    }

    /// Whether decoding reproduces the input exactly.
    pub fn is_lossless(self) -> bool {
        !self.is_image()
    }
}

impl fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompressionMode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        let found = match lower.as_str() {
            "dct" => Some(CompressionMode::DctBased),
            "arith" => Some(CompressionMode::Arithmetic),
            other => Self::ALL.into_iter().find(|m| m.name() == other),
        };
        found.ok_or_else(|| {
            CodecError::invalid_argument(format!(
                "unknown compression mode '{s}' (expected one of: lzw, huffman, arithmetic, rle, dct_based, wavelet, jpeg)"
            ))
        })
    }
}
