//! The `.oxc` file container.
//!
//! ```text
//! b"OXC" | u8 mode | side info | u64 payload_len | payload
//! ```
//!
//! Side info by mode (little-endian):
//!
//! | Mode | Side info |
//! |------|-----------|
//! | huffman | 256 x u32 frequencies, u64 bit_len |
//! | arithmetic | 256 x u32 frequencies, u64 symbol_count |
//! | dct_based, wavelet, jpeg | u32 width, u32 height |
//! | lzw, rle | nothing |

use crate::codec::{Compressed, SideInfo};
use crate::mode::CompressionMode;
use log::{debug, warn};
use oxicodec_core::buffer::try_with_capacity;
use oxicodec_core::bytes::ByteCursor;
use oxicodec_core::error::{CodecError, Result};
use oxicodec_entropy::FrequencyTable;
use oxicodec_entropy::frequency::SYMBOLS;
use std::io::{Read, Write};

/// File signature.
pub const MAGIC: &[u8; 3] = b"OXC";

/// Conventional file extension.
pub const EXTENSION: &str = "oxc";

fn write_table(out: &mut Vec<u8>, table: &FrequencyTable) {
    for &count in table.counts() {
        out.extend_from_slice(&count.to_le_bytes());
    }
}

fn read_table(cursor: &mut ByteCursor<'_>) -> Result<FrequencyTable> {
    let mut counts = [0u32; SYMBOLS];
    for count in counts.iter_mut() {
        *count = cursor.read_u32_le()?;
    }
    Ok(FrequencyTable::from_counts(counts))
}

fn side_info_len(side_info: &SideInfo) -> usize {
    match side_info {
        SideInfo::None => 0,
        SideInfo::Huffman { .. } | SideInfo::Arithmetic { .. } => SYMBOLS * 4 + 8,
        SideInfo::Image { .. } => 8,
    }
}

/// Serialize into container bytes.
pub fn to_bytes(compressed: &Compressed) -> Result<Vec<u8>> {
    let total = MAGIC.len() + 1 + side_info_len(&compressed.side_info) + 8 + compressed.payload.len();
    let mut out = try_with_capacity(total)?;
    out.extend_from_slice(MAGIC);
    out.push(compressed.mode.id());

    match &compressed.side_info {
        SideInfo::None => {}
        SideInfo::Huffman {
            frequencies,
            bit_len,
        } => {
            write_table(&mut out, frequencies);
            out.extend_from_slice(&bit_len.to_le_bytes());
        }
        SideInfo::Arithmetic {
            frequencies,
            symbol_count,
        } => {
            write_table(&mut out, frequencies);
            out.extend_from_slice(&symbol_count.to_le_bytes());
        }
        SideInfo::Image { width, height } => {
            for side in [*width, *height] {
                let side = u32::try_from(side)
                    .map_err(|_| CodecError::invalid_argument(format!("dimension {side} exceeds u32")))?;
                out.extend_from_slice(&side.to_le_bytes());
            }
        }
    }

    out.extend_from_slice(&(compressed.payload.len() as u64).to_le_bytes());
    out.extend_from_slice(&compressed.payload);
    Ok(out)
}

/// Parse container bytes. Trailing data is an error.
pub fn from_bytes(data: &[u8]) -> Result<Compressed> {
    let mut cursor = ByteCursor::new(data);
    if cursor.take(MAGIC.len())? != MAGIC {
        warn!("container: bad magic");
        return Err(CodecError::corrupted(0, "not an OXC container"));
    }

    let id = cursor.read_u8()?;
    let mode = CompressionMode::from_id(id).ok_or_else(|| {
        warn!("container: unknown mode id {id}");
        CodecError::corrupted(3, format!("unknown mode id {id}"))
    })?;

    let side_info = match mode {
        CompressionMode::Lzw | CompressionMode::Rle => SideInfo::None,
        CompressionMode::Huffman => SideInfo::Huffman {
            frequencies: read_table(&mut cursor)?,
            bit_len: cursor.read_u64_le()?,
        },
        CompressionMode::Arithmetic => SideInfo::Arithmetic {
            frequencies: read_table(&mut cursor)?,
            symbol_count: cursor.read_u64_le()?,
        },
        CompressionMode::DctBased | CompressionMode::Wavelet | CompressionMode::Jpeg => {
            SideInfo::Image {
                width: cursor.read_u32_le()? as usize,
                height: cursor.read_u32_le()? as usize,
            }
        }
    };

    let len_offset = cursor.position() as u64;
    let payload_len = cursor.read_u64_le()?;
    let payload_len = usize::try_from(payload_len)
        .map_err(|_| CodecError::corrupted(len_offset, "payload length overflows"))?;
    let payload = cursor.take(payload_len)?.to_vec();

    if cursor.remaining() != 0 {
        warn!("container: {} trailing bytes", cursor.remaining());
        return Err(CodecError::corrupted(
            cursor.position() as u64,
            "trailing bytes after payload",
        ));
    }

    debug!("container: {mode} with {payload_len} payload bytes");
    Ok(Compressed {
        mode,
        side_info,
        payload,
    })
}

/// Write a container to `writer`.
pub fn write<W: Write>(writer: &mut W, compressed: &Compressed) -> Result<()> {
    writer.write_all(&to_bytes(compressed)?)?;
    Ok(())
}

/// Read a whole container from `reader`.
pub fn read<R: Read>(reader: &mut R) -> Result<Compressed> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    from_bytes(&data)
}

/// Whether `data` starts with the container signature.
pub fn is_container(data: &[u8]) -> bool {
    data.starts_with(MAGIC)
}
