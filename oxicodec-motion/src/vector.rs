//! Motion vectors and their wire format.
//!
//! A field serializes as `u32 count | count x (i32 block_x, i32 block_y,
//! i32 dx, i32 dy)`, little-endian.

use log::warn;
use oxicodec_core::buffer::try_with_capacity;
use oxicodec_core::bytes::ByteCursor;
use oxicodec_core::error::{CodecError, Result};

/// Bytes per serialized vector.
pub const VECTOR_LEN: usize = 16;

/// Displacement of one tile's best match in the reference frame.
///
/// The reference block always lies inside the reference frame. Offsets
/// normally stay within the search window, but a partial tile at the right
/// or bottom edge can only keep a full block inside the frame by moving
/// further, so its offset may exceed the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotionVector {
    /// Left edge of the tile, in pixels.
    pub block_x: usize,
    /// Top edge of the tile, in pixels.
    pub block_y: usize,
    /// Horizontal offset to the reference block.
    pub dx: i32,
    /// Vertical offset to the reference block.
    pub dy: i32,
}

impl MotionVector {
    /// Create a vector.
    pub const fn new(block_x: usize, block_y: usize, dx: i32, dy: i32) -> Self {
        Self {
            block_x,
            block_y,
            dx,
            dy,
        }
    }

    /// Top-left corner of the reference block, if it is non-negative.
    pub fn source(&self) -> Option<(usize, usize)> {
        let x = self.block_x.checked_add_signed(self.dx as isize)?;
        let y = self.block_y.checked_add_signed(self.dy as isize)?;
        Some((x, y))
    }

    /// Whether the motion is zero.
    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// One vector per tile, raster order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotionVectorField {
    vectors: Vec<MotionVector>,
}

impl MotionVectorField {
    /// Empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty field with room for `capacity` vectors.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            vectors: try_with_capacity(capacity)?,
        })
    }

    /// Append a vector.
    pub fn push(&mut self, vector: MotionVector) {
        self.vectors.push(vector);
    }

    /// Number of vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the field has no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Iterate in raster order.
    pub fn iter(&self) -> std::slice::Iter<'_, MotionVector> {
        self.vectors.iter()
    }

    /// Vectors as a slice.
    pub fn as_slice(&self) -> &[MotionVector] {
        &self.vectors
    }

    /// Serialized size in bytes.
    pub fn encoded_len(&self) -> usize {
        4 + self.vectors.len() * VECTOR_LEN
    }

    /// Serialize.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let count = u32::try_from(self.vectors.len())
            .map_err(|_| CodecError::invalid_argument("too many motion vectors"))?;
        let mut out = try_with_capacity(self.encoded_len())?;
        out.extend_from_slice(&count.to_le_bytes());
        for v in &self.vectors {
            let coord = |c: usize| {
                i32::try_from(c).map_err(|_| {
                    CodecError::invalid_argument(format!("block coordinate {c} exceeds i32"))
                })
            };
            out.extend_from_slice(&coord(v.block_x)?.to_le_bytes());
            out.extend_from_slice(&coord(v.block_y)?.to_le_bytes());
            out.extend_from_slice(&v.dx.to_le_bytes());
            out.extend_from_slice(&v.dy.to_le_bytes());
        }
        Ok(out)
    }

    /// Parse a field occupying all of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);
        let count = cursor.read_u32_le()? as usize;

        let needed = count.checked_mul(VECTOR_LEN).unwrap_or(usize::MAX);
        if cursor.remaining() != needed {
            warn!(
                "motion: field declares {count} vectors but carries {} bytes",
                cursor.remaining()
            );
            return Err(CodecError::corrupted(
                0,
                format!(
                    "field of {count} vectors needs {needed} bytes, found {}",
                    cursor.remaining()
                ),
            ));
        }

        let mut field = Self::with_capacity(count)?;
        for _ in 0..count {
            let offset = cursor.position() as u64;
            let block_x = cursor.read_i32_le()?;
            let block_y = cursor.read_i32_le()?;
            let dx = cursor.read_i32_le()?;
            let dy = cursor.read_i32_le()?;
            if block_x < 0 || block_y < 0 {
                warn!("motion: negative block position ({block_x}, {block_y})");
                return Err(CodecError::corrupted(offset, "negative block position"));
            }
            field.push(MotionVector::new(block_x as usize, block_y as usize, dx, dy));
        }
        Ok(field)
    }
}

impl FromIterator<MotionVector> for MotionVectorField {
    fn from_iter<I: IntoIterator<Item = MotionVector>>(iter: I) -> Self {
        Self {
            vectors: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MotionVectorField {
    type Item = &'a MotionVector;
    type IntoIter = std::slice::Iter<'a, MotionVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.vectors.iter()
    }
}
