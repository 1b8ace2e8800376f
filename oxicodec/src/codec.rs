//! Mode dispatch over the individual coders.
//!
//! The raw Huffman and arithmetic streams need side information to decode
//! (the frequency table plus a bit or symbol count), and the image codecs
//! need the frame size. [`Compressed`] keeps that next to the payload so a
//! result can be decoded without anything else.

use crate::mode::CompressionMode;
use log::{debug, warn};
use oxicodec_core::error::{CodecError, Result};
use oxicodec_core::image::GrayImage;
use oxicodec_entropy::arithmetic::MAX_TOTAL;
use oxicodec_entropy::{
    FrequencyTable, HuffmanTree, arithmetic_decode, arithmetic_encode, huffman_decode,
    huffman_encode,
};
use oxicodec_transform::{DctCodec, JpegCodec, WaveletCodec};

/// What a payload needs besides its bytes to be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideInfo {
    /// LZW and RLE streams are self-delimiting.
    None,
    /// Huffman tree source and exact bit count.
    Huffman {
        /// Symbol counts the tree is built from.
        frequencies: FrequencyTable,
        /// Number of meaningful bits in the payload.
        bit_len: u64,
    },
    /// Range coder model and symbol count.
    Arithmetic {
        /// Model counts.
        frequencies: FrequencyTable,
        /// Number of symbols to decode.
        symbol_count: u64,
    },
    /// Frame dimensions for the image codecs.
    Image {
        /// Width in pixels.
        width: usize,
        /// Height in pixels.
        height: usize,
    },
}

/// A payload with the mode and side information needed to decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    /// Algorithm.
    pub mode: CompressionMode,
    /// Decoding parameters not carried by the payload.
    pub side_info: SideInfo,
    /// Coded bytes.
    pub payload: Vec<u8>,
}

/// Result of [`decompress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decompressed {
    /// Output of a lossless byte mode.
    Bytes(Vec<u8>),
    /// Output of an image mode.
    Image(GrayImage),
}

impl Decompressed {
    /// Flatten to bytes; images yield their row-major pixels.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Decompressed::Bytes(bytes) => bytes,
            Decompressed::Image(image) => image.into_bytes(),
        }
    }
}

/// Tuning for the lossy image modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageOptions {
    /// Block-DCT quality, 1..=100.
    pub quality: u8,
    /// Wavelet decomposition depth.
    pub levels: u32,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            quality: JpegCodec::DEFAULT_QUALITY,
            levels: WaveletCodec::DEFAULT_LEVELS,
        }
    }
}

/// Compress `data` with a lossless byte mode.
pub fn compress_bytes(mode: CompressionMode, data: &[u8]) -> Result<Compressed> {
    let (side_info, payload) = match mode {
        CompressionMode::Lzw => (SideInfo::None, oxicodec_lzw::compress(data)?),
        CompressionMode::Rle => (SideInfo::None, oxicodec_rle::encode(data)),
        CompressionMode::Huffman => {
            let frequencies = FrequencyTable::from_data(data);
            if data.is_empty() {
                (
                    SideInfo::Huffman {
                        frequencies,
                        bit_len: 0,
                    },
                    Vec::new(),
                )
            } else {
                let tree = HuffmanTree::from_frequencies(&frequencies)?;
                let encoded = huffman_encode(data, &tree.code_table())?;
                (
                    SideInfo::Huffman {
                        frequencies,
                        bit_len: encoded.bit_len,
                    },
                    encoded.bytes,
                )
            }
        }
        CompressionMode::Arithmetic => {
            let frequencies = FrequencyTable::from_data(data).scaled_to(MAX_TOTAL);
            let payload = if data.is_empty() {
                Vec::new()
            } else {
                arithmetic_encode(data, &frequencies)?
            };
            (
                SideInfo::Arithmetic {
                    frequencies,
                    symbol_count: data.len() as u64,
                },
                payload,
            )
        }
        image_mode => {
            warn!("{image_mode} needs an image, not a byte stream");
            return Err(CodecError::invalid_argument(format!(
                "mode {image_mode} only compresses images"
            )));
        }
    };

    debug!("{mode}: {} -> {} bytes", data.len(), payload.len());
    Ok(Compressed {
        mode,
        side_info,
        payload,
    })
}

/// Compress `image` with a lossy image mode.
pub fn compress_image(
    mode: CompressionMode,
    image: &GrayImage,
    options: &ImageOptions,
) -> Result<Compressed> {
    let payload = match mode {
        CompressionMode::DctBased => DctCodec::default().encode(image)?,
        CompressionMode::Wavelet => WaveletCodec::new(options.levels)?.encode(image)?,
        CompressionMode::Jpeg => JpegCodec::new(options.quality)?.encode(image)?,
        byte_mode => {
            warn!("{byte_mode} is not an image mode");
            return Err(CodecError::invalid_argument(format!(
                "mode {byte_mode} does not compress images"
            )));
        }
    };

    let (width, height) = image.dimensions();
    debug!("{mode}: {width}x{height} -> {} bytes", payload.len());
    Ok(Compressed {
        mode,
        side_info: SideInfo::Image { width, height },
        payload,
    })
}

fn side_info_mismatch(mode: CompressionMode) -> CodecError {
    warn!("{mode}: side information does not match the mode");
    CodecError::invalid_argument(format!("side information does not match mode {mode}"))
}

/// Decode a [`Compressed`] value.
pub fn decompress(compressed: &Compressed) -> Result<Decompressed> {
    let mode = compressed.mode;
    let payload = &compressed.payload;

    let output = match (mode, &compressed.side_info) {
        (CompressionMode::Lzw, SideInfo::None) => {
            Decompressed::Bytes(oxicodec_lzw::decompress(payload)?)
        }
        (CompressionMode::Rle, SideInfo::None) => {
            Decompressed::Bytes(oxicodec_rle::decode(payload)?)
        }
        (
            CompressionMode::Huffman,
            SideInfo::Huffman {
                frequencies,
                bit_len,
            },
        ) => {
            if *bit_len == 0 {
                Decompressed::Bytes(Vec::new())
            } else {
                let tree = HuffmanTree::from_frequencies(frequencies)?;
                Decompressed::Bytes(huffman_decode(payload, *bit_len, &tree)?)
            }
        }
        (
            CompressionMode::Arithmetic,
            SideInfo::Arithmetic {
                frequencies,
                symbol_count,
            },
        ) => {
            let count = usize::try_from(*symbol_count).map_err(|_| {
                CodecError::invalid_argument(format!("symbol count {symbol_count} too large"))
            })?;
            Decompressed::Bytes(arithmetic_decode(payload, frequencies, count)?)
        }
        (CompressionMode::DctBased, SideInfo::Image { width, height }) => {
            Decompressed::Image(DctCodec::default().decode(payload, *width, *height)?)
        }
        (CompressionMode::Wavelet, SideInfo::Image { width, height }) => {
            Decompressed::Image(WaveletCodec::default().decode(payload, *width, *height)?)
        }
        (CompressionMode::Jpeg, SideInfo::Image { width, height }) => {
            Decompressed::Image(JpegCodec::decode(payload, *width, *height)?)
        }
        _ => return Err(side_info_mismatch(mode)),
    };

    debug!("{mode}: decoded {} payload bytes", payload.len());
    Ok(output)
}
