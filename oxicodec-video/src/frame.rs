//! Coded frames and the sequence container.
//!
//! Stream layout, little-endian:
//!
//! ```text
//! u32 frame_count
//! frame_count x ( u8 type ('I' | 'P') | u32 width | u32 height | u32 payload_len | payload )
//! ```

use log::{debug, warn};
use oxicodec_core::buffer::try_with_capacity;
use oxicodec_core::bytes::ByteCursor;
use oxicodec_core::error::{CodecError, Result};

/// Bytes in a frame header.
pub const FRAME_HEADER_LEN: usize = 13;

/// How a frame is coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// Self-contained intra frame.
    Intra,
    /// Predicted from the previous decoded frame.
    Predicted,
}

impl FrameType {
    /// Tag byte in the stream.
    pub fn tag(self) -> u8 {
        match self {
            FrameType::Intra => b'I',
            FrameType::Predicted => b'P',
        }
    }

    /// Single-letter name.
    pub fn as_char(self) -> char {
        self.tag() as char
    }
}

impl TryFrom<u8> for FrameType {
    type Error = CodecError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            b'I' => Ok(FrameType::Intra),
            b'P' => Ok(FrameType::Predicted),
            other => Err(CodecError::corrupted(
                0,
                format!("unknown frame type {other:#04x}"),
            )),
        }
    }
}

/// One encoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedFrame {
    /// Intra or predicted.
    pub frame_type: FrameType,
    /// Frame width in pixels.
    pub width: usize,
    /// Frame height in pixels.
    pub height: usize,
    /// Codec payload.
    pub payload: Vec<u8>,
}

impl CodedFrame {
    /// Size of the frame in a stream.
    pub fn encoded_len(&self) -> usize {
        FRAME_HEADER_LEN + self.payload.len()
    }

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let field = |value: usize, what: &str| {
            u32::try_from(value)
                .map_err(|_| CodecError::invalid_argument(format!("frame {what} {value} exceeds u32")))
        };
        out.push(self.frame_type.tag());
        out.extend_from_slice(&field(self.width, "width")?.to_le_bytes());
        out.extend_from_slice(&field(self.height, "height")?.to_le_bytes());
        out.extend_from_slice(&field(self.payload.len(), "payload length")?.to_le_bytes());
        out.extend_from_slice(&self.payload);
        Ok(())
    }

    fn read_from(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let offset = cursor.position() as u64;
        let frame_type = FrameType::try_from(cursor.read_u8()?).map_err(|err| {
            warn!("video: bad frame tag at offset {offset}");
            match err {
                CodecError::Corrupted { message, .. } => CodecError::corrupted(offset, message),
                other => other,
            }
        })?;
        let width = cursor.read_u32_le()? as usize;
        let height = cursor.read_u32_le()? as usize;
        let len = cursor.read_u32_le()? as usize;
        let payload = cursor.take(len)?.to_vec();
        Ok(Self {
            frame_type,
            width,
            height,
            payload,
        })
    }
}

/// Serialize frames into a stream.
pub fn write_stream(frames: &[CodedFrame]) -> Result<Vec<u8>> {
    let count = u32::try_from(frames.len())
        .map_err(|_| CodecError::invalid_argument("too many frames"))?;
    let total = 4 + frames.iter().map(CodedFrame::encoded_len).sum::<usize>();

    let mut out = try_with_capacity(total)?;
    out.extend_from_slice(&count.to_le_bytes());
    for frame in frames {
        frame.write_to(&mut out)?;
    }
    debug!("video: wrote {count} frames in {} bytes", out.len());
    Ok(out)
}

/// Parse a stream into frames. Trailing bytes are an error.
pub fn read_stream(data: &[u8]) -> Result<Vec<CodedFrame>> {
    let mut cursor = ByteCursor::new(data);
    let count = cursor.read_u32_le()? as usize;

    // Every frame needs at least its header.
    if count > cursor.remaining() / FRAME_HEADER_LEN {
        warn!("video: stream claims {count} frames in {} bytes", data.len());
        return Err(CodecError::corrupted(
            0,
            format!("{count} frames cannot fit in {} bytes", data.len()),
        ));
    }

    let mut frames = try_with_capacity(count)?;
    for _ in 0..count {
        frames.push(CodedFrame::read_from(&mut cursor)?);
    }
    if cursor.remaining() != 0 {
        warn!("video: {} trailing bytes after last frame", cursor.remaining());
        return Err(CodecError::corrupted(
            cursor.position() as u64,
            "trailing bytes after last frame",
        ));
    }
    Ok(frames)
}
