//! Static Huffman coding.
//!
//! The tree is rebuilt from a [`FrequencyTable`] on every call. Codes are
//! assigned depth-first with `0` on left edges and `1` on right edges, then
//! concatenated MSB-first. The raw stream carries no header: the decoder
//! needs the same tree and the exact bit count.

use crate::frequency::{FrequencyTable, SYMBOLS};
use log::{debug, warn};
use oxicodec_core::bitstream::{MsbBitReader, MsbBitWriter};
use oxicodec_core::error::{CodecError, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A coded symbol.
    Leaf {
        /// Byte value.
        symbol: u8,
        /// Occurrence count.
        weight: u64,
    },
    /// Merge of two subtrees.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Subtree reached by a `0` bit.
        left: Box<HuffmanNode>,
        /// Subtree reached by a `1` bit.
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
        }
    }
}

/// Heap entry ordered so that `BinaryHeap` pops the lightest node first and
/// breaks ties by insertion order.
struct QueuedNode {
    order: usize,
    node: HuffmanNode,
}

impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior
        other
            .node
            .weight()
            .cmp(&self.node.weight())
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// A Huffman tree built from a frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree for every symbol with a nonzero count.
    ///
    /// Fails with `InvalidArgument` when the table is all zeros.
    pub fn from_frequencies(table: &FrequencyTable) -> Result<Self> {
        let mut heap = BinaryHeap::with_capacity(SYMBOLS);
        let mut order = 0usize;

        for (symbol, &count) in table.counts().iter().enumerate() {
            if count > 0 {
                heap.push(QueuedNode {
                    order,
                    node: HuffmanNode::Leaf {
                        symbol: symbol as u8,
                        weight: count as u64,
                    },
                });
                order += 1;
            }
        }

        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            let weight = left.node.weight() + right.node.weight();
            heap.push(QueuedNode {
                order,
                node: HuffmanNode::Internal {
                    weight,
                    left: Box::new(left.node),
                    right: Box::new(right.node),
                },
            });
            order += 1;
        }

        match heap.pop() {
            Some(entry) => Ok(Self { root: entry.node }),
            None => {
                warn!("huffman: frequency table has no nonzero entries");
                Err(CodecError::invalid_argument(
                    "frequency table has no nonzero entries",
                ))
            }
        }
    }

    /// Root node.
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Derive the code for every leaf.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::empty();
        match &self.root {
            // A lone symbol still needs one bit per occurrence.
            HuffmanNode::Leaf { symbol, .. } => {
                table.codes[*symbol as usize] = Some(Code { bits: 0, length: 1 });
            }
            internal => assign_codes(internal, 0, 0, &mut table),
        }
        table
    }
}

fn assign_codes(node: &HuffmanNode, bits: u64, length: u8, table: &mut CodeTable) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            table.codes[*symbol as usize] = Some(Code { bits, length });
        }
        HuffmanNode::Internal { left, right, .. } => {
            assign_codes(left, bits << 1, length + 1, table);
            assign_codes(right, (bits << 1) | 1, length + 1, table);
        }
    }
}

/// A single Huffman code: the low `length` bits of `bits`, MSB first.
///
/// Counts are `u32`, so the tree depth stays far below 64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    /// Code bits, right-aligned.
    pub bits: u64,
    /// Number of bits.
    pub length: u8,
}

/// Symbol to code mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; SYMBOLS],
}

impl CodeTable {
    fn empty() -> Self {
        Self {
            codes: [None; SYMBOLS],
        }
    }

    /// Code assigned to `symbol`, if any.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exact number of bits needed to code `table` with these codes.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        self.codes
            .iter()
            .zip(table.counts())
            .filter_map(|(code, &count)| code.map(|c| c.length as u64 * count as u64))
            .sum()
    }
}

/// Output of [`huffman_encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanEncoded {
    /// Packed code stream, zero padded to a whole byte.
    pub bytes: Vec<u8>,
    /// Number of meaningful bits in `bytes`.
    pub bit_len: u64,
}

/// Encode `data` with `codes`.
///
/// Fails with `MissingCode` on the first byte that has no code.
pub fn huffman_encode(data: &[u8], codes: &CodeTable) -> Result<HuffmanEncoded> {
    let mut writer = MsbBitWriter::with_capacity(data.len() / 2);

    for (position, &symbol) in data.iter().enumerate() {
        let code = codes.get(symbol).ok_or_else(|| {
            warn!("huffman: no code for symbol {symbol:#04x} at {position}");
            CodecError::missing_code(symbol, position)
        })?;
        for shift in (0..code.length).rev() {
            writer.write_bit((code.bits >> shift) & 1 == 1);
        }
    }

    let bit_len = writer.bits_written();
    let bytes = writer.into_vec();
    debug!(
        "huffman: encoded {} bytes into {} bits ({} bytes)",
        data.len(),
        bit_len,
        bytes.len()
    );
    Ok(HuffmanEncoded { bytes, bit_len })
}

/// Decode exactly `bit_len` bits of `bytes` with `tree`.
pub fn huffman_decode(bytes: &[u8], bit_len: u64, tree: &HuffmanTree) -> Result<Vec<u8>> {
    let available = bytes.len() as u64 * 8;
    if bit_len > available {
        let missing = bit_len.div_ceil(8) - bytes.len() as u64;
        warn!("huffman: bit length {bit_len} exceeds {available} available bits");
        return Err(CodecError::unexpected_eof(missing as usize));
    }

    let mut reader = MsbBitReader::new(bytes);
    let mut output = Vec::new();

    if let HuffmanNode::Leaf { symbol, .. } = tree.root() {
        for _ in 0..bit_len {
            reader.read_bit()?;
            output.push(*symbol);
        }
        output.shrink_to_fit();
        return Ok(output);
    }

    let root = tree.root();
    let mut node = root;
    for _ in 0..bit_len {
        let bit = reader.read_bit()?;
        if let HuffmanNode::Internal { left, right, .. } = node {
            node = if bit { right } else { left };
        }
        if let HuffmanNode::Leaf { symbol, .. } = node {
            output.push(*symbol);
            node = root;
        }
    }

    if !std::ptr::eq(node, root) {
        warn!("huffman: stream ends inside a code after {bit_len} bits");
        return Err(CodecError::corrupted(
            bit_len,
            "bit stream ends in the middle of a code",
        ));
    }

    output.shrink_to_fit();
    debug!("huffman: decoded {bit_len} bits into {} bytes", output.len());
    Ok(output)
}
