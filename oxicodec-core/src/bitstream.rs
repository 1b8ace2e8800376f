//! MSB-first bit stream operations.
//!
//! Every packed code stream in OxiCodec (Huffman codes, arithmetic coder
//! output, 12-bit LZW codes) is written most significant bit first: bit `i`
//! of the stream lives in byte `i / 8` at position `7 - i % 8`.

use crate::error::{CodecError, Result};

/// MSB-first bit reader over a borrowed byte slice.
#[derive(Debug)]
pub struct MsbBitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Index of the next bit to read.
    bit_pos: u64,
}

impl<'a> MsbBitReader<'a> {
    /// Create a new MSB bit reader.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Total number of bits in the underlying slice.
    pub fn bit_len(&self) -> u64 {
        self.data.len() as u64 * 8
    }

    /// Number of bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.bit_pos
    }

    /// Number of bits left before the end of the slice.
    pub fn remaining(&self) -> u64 {
        self.bit_len().saturating_sub(self.bit_pos)
    }

    #[inline]
    fn bit_at(&self, pos: u64) -> bool {
        let byte = self.data[(pos / 8) as usize];
        (byte >> (7 - (pos % 8))) & 1 == 1
    }

    /// Read one bit, failing at end of input.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bit_pos >= self.bit_len() {
            return Err(CodecError::unexpected_eof(1));
        }
        let bit = self.bit_at(self.bit_pos);
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Read one bit, returning `false` once the input is exhausted.
    ///
    /// Range decoders keep shifting past the end of the stream; the missing
    /// tail is defined to be zeros.
    #[inline]
    pub fn read_bit_or_zero(&mut self) -> bool {
        if self.bit_pos >= self.bit_len() {
            self.bit_pos += 1;
            return false;
        }
        let bit = self.bit_at(self.bit_pos);
        self.bit_pos += 1;
        bit
    }

    /// Read up to 32 bits (MSB-first) as an unsigned value.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        if count == 0 || count > 32 {
            return Err(CodecError::invalid_argument(format!(
                "bit count {count} out of range 1..=32"
            )));
        }
        if self.remaining() < count as u64 {
            return Err(CodecError::unexpected_eof(
                (count as u64 - self.remaining()).div_ceil(8) as usize,
            ));
        }

        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | self.bit_at(self.bit_pos) as u32;
            self.bit_pos += 1;
        }
        Ok(value)
    }
}

/// MSB-first bit writer producing an owned byte vector.
#[derive(Debug, Default)]
pub struct MsbBitWriter {
    /// Completed bytes.
    output: Vec<u8>,
    /// Partially filled byte (bits packed from the MSB side).
    current: u8,
    /// Number of bits held in `current`.
    filled: u8,
    /// Total number of bits written.
    bits_written: u64,
}

impl MsbBitWriter {
    /// Create a new MSB bit writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer whose output buffer can hold `bytes` without growing.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.current |= (bit as u8) << (7 - self.filled);
        self.filled += 1;
        self.bits_written += 1;
        if self.filled == 8 {
            self.output.push(self.current);
            self.current = 0;
            self.filled = 0;
        }
    }

    /// Write the same bit `count` times.
    pub fn write_repeated(&mut self, bit: bool, count: u64) {
        for _ in 0..count {
            self.write_bit(bit);
        }
    }

    /// Write the low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        if count == 0 || count > 32 {
            return Err(CodecError::invalid_argument(format!(
                "bit count {count} out of range 1..=32"
            )));
        }
        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
        Ok(())
    }

    /// Total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Flush the partial byte (zero padded) and return the exact-size output.
    pub fn into_vec(mut self) -> Vec<u8> {
        if self.filled > 0 {
            self.output.push(self.current);
        }
        self.output.shrink_to_fit();
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_roundtrip() {
        let mut writer = MsbBitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b1100, 4).unwrap();
        writer.write_bits(0b1111_1111, 8).unwrap();
        assert_eq!(writer.bits_written(), 15);

        let data = writer.into_vec();
        assert_eq!(data.len(), 2);

        let mut reader = MsbBitReader::new(&data);
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
        assert_eq!(reader.read_bits(8).unwrap(), 0b1111_1111);
        assert_eq!(reader.bits_read(), 15);
    }

    #[test]
    fn test_msb_bit_order() {
        let mut writer = MsbBitWriter::new();
        writer.write_bit(true);
        writer.write_repeated(false, 6);
        writer.write_bit(true);
        assert_eq!(writer.into_vec(), vec![0x81]);
    }

    #[test]
    fn test_twelve_bit_codes() {
        let mut writer = MsbBitWriter::new();
        writer.write_bits(0xABC, 12).unwrap();
        writer.write_bits(0x123, 12).unwrap();
        let data = writer.into_vec();
        assert_eq!(data, vec![0xAB, 0xC1, 0x23]);

        let mut reader = MsbBitReader::new(&data);
        assert_eq!(reader.read_bits(12).unwrap(), 0xABC);
        assert_eq!(reader.read_bits(12).unwrap(), 0x123);
        assert!(reader.read_bits(1).is_err());
    }

    #[test]
    fn test_zero_padding_past_end() {
        let data = [0xFF];
        let mut reader = MsbBitReader::new(&data);
        for _ in 0..8 {
            assert!(reader.read_bit_or_zero());
        }
        assert!(!reader.read_bit_or_zero());
        assert!(!reader.read_bit_or_zero());
        assert!(reader.read_bit().is_err());
    }

    #[test]
    fn test_invalid_bit_count() {
        let mut writer = MsbBitWriter::new();
        assert!(writer.write_bits(0, 0).is_err());
        assert!(writer.write_bits(0, 33).is_err());
    }
}
