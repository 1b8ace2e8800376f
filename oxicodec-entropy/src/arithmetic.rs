//! 32-bit arithmetic (range) coder.
//!
//! Classic integer arithmetic coding over a static frequency table:
//!
//! - The interval `[low, high]` (inclusive) starts as the full 32-bit range
//!   and is narrowed to the symbol's share of the cumulative table.
//! - Renormalization shifts out settled leading bits. When the interval
//!   straddles the midpoint inside the middle half (underflow), the bit is
//!   deferred and `bits_to_follow` counts how many complementary bits to
//!   emit after the next settled bit.
//! - The decoder mirrors the encoder with a 32-bit `code` register that is
//!   zero padded past the end of the stream.
//!
//! The stream has no header; the decoder needs the same table and the
//! number of symbols.

use crate::frequency::{FrequencyTable, SYMBOLS};
use log::{debug, warn};
use oxicodec_core::bitstream::{MsbBitReader, MsbBitWriter};
use oxicodec_core::buffer::try_with_capacity;
use oxicodec_core::error::{CodecError, Result};

const HALF: u32 = 0x8000_0000;
const FIRST_QUARTER: u32 = 0x4000_0000;
const THIRD_QUARTER: u32 = 0xC000_0000;

/// Largest table total the 32-bit coder can represent without collapsing a
/// symbol's sub-interval to zero width.
pub const MAX_TOTAL: u64 = 1 << 30;

/// One renormalization step decided from the current interval.
enum Renorm {
    /// Both ends below the midpoint: emit 0.
    Low,
    /// Both ends at or above the midpoint: emit 1.
    High,
    /// Interval inside the middle half: defer a bit.
    Middle,
    /// Interval is wide enough.
    Done,
}

/// Coder interval shared by the encoder and the decoder.
#[derive(Debug, Clone, Copy)]
struct RangeCoderState {
    low: u32,
    high: u32,
}

impl RangeCoderState {
    fn new() -> Self {
        Self {
            low: 0,
            high: u32::MAX,
        }
    }

    #[inline]
    fn range(&self) -> u64 {
        (self.high - self.low) as u64 + 1
    }

    /// Narrow to the sub-interval `[cum_low, cum_high)` of `total`.
    #[inline]
    fn narrow(&mut self, cum_low: u32, cum_high: u32, total: u64) {
        let range = self.range();
        let low = self.low as u64;
        self.high = (low + range * cum_high as u64 / total - 1) as u32;
        self.low = (low + range * cum_low as u64 / total) as u32;
    }

    /// Classify the interval and apply the matching shift.
    #[inline]
    fn renormalize(&mut self) -> Renorm {
        let step = if self.high < HALF {
            Renorm::Low
        } else if self.low >= HALF {
            self.low -= HALF;
            self.high -= HALF;
            Renorm::High
        } else if self.low >= FIRST_QUARTER && self.high < THIRD_QUARTER {
            self.low -= FIRST_QUARTER;
            self.high -= FIRST_QUARTER;
            Renorm::Middle
        } else {
            return Renorm::Done;
        };
        self.low <<= 1;
        self.high = (self.high << 1) | 1;
        step
    }
}

fn validated_total(table: &FrequencyTable) -> Result<u64> {
    let total = table.total();
    if total == 0 {
        warn!("arithmetic: frequency table total is zero");
        return Err(CodecError::invalid_argument("frequency table total is zero"));
    }
    if total > MAX_TOTAL {
        warn!("arithmetic: frequency table total {total} exceeds {MAX_TOTAL}");
        return Err(CodecError::invalid_argument(format!(
            "frequency table total {total} exceeds {MAX_TOTAL}"
        )));
    }
    Ok(total)
}

/// Bit writer that appends pending underflow bits after each settled bit.
struct FollowWriter {
    writer: MsbBitWriter,
    bits_to_follow: u64,
}

impl FollowWriter {
    fn emit(&mut self, bit: bool) {
        self.writer.write_bit(bit);
        self.writer.write_repeated(!bit, self.bits_to_follow);
        self.bits_to_follow = 0;
    }
}

/// Encode `data` against `table`.
///
/// Every byte of `data` must have a nonzero count in `table`.
pub fn arithmetic_encode(data: &[u8], table: &FrequencyTable) -> Result<Vec<u8>> {
    let total = validated_total(table)?;
    let cumulative = table.cumulative();

    let mut state = RangeCoderState::new();
    let mut out = FollowWriter {
        writer: MsbBitWriter::with_capacity(data.len() / 2 + 4),
        bits_to_follow: 0,
    };

    for (position, &symbol) in data.iter().enumerate() {
        let s = symbol as usize;
        if cumulative[s] == cumulative[s + 1] {
            warn!("arithmetic: symbol {symbol:#04x} at {position} has zero frequency");
            return Err(CodecError::missing_code(symbol, position));
        }
        state.narrow(cumulative[s], cumulative[s + 1], total);

        loop {
            match state.renormalize() {
                Renorm::Low => out.emit(false),
                Renorm::High => out.emit(true),
                Renorm::Middle => out.bits_to_follow += 1,
                Renorm::Done => break,
            }
        }
    }

    // Two more bits pin down a value inside the final interval.
    out.bits_to_follow += 1;
    out.emit(state.low >= FIRST_QUARTER);

    let bits = out.writer.bits_written();
    let bytes = out.writer.into_vec();
    debug!(
        "arithmetic: encoded {} symbols into {} bits ({} bytes)",
        data.len(),
        bits,
        bytes.len()
    );
    Ok(bytes)
}

/// Decode `symbol_count` symbols from `bytes` against `table`.
pub fn arithmetic_decode(
    bytes: &[u8],
    table: &FrequencyTable,
    symbol_count: usize,
) -> Result<Vec<u8>> {
    if symbol_count == 0 {
        return Ok(Vec::new());
    }
    let total = validated_total(table)?;
    let cumulative = table.cumulative();

    let mut reader = MsbBitReader::new(bytes);
    let mut code = 0u32;
    for _ in 0..32 {
        code = (code << 1) | reader.read_bit_or_zero() as u32;
    }

    let mut state = RangeCoderState::new();
    let mut output = try_with_capacity(symbol_count)?;

    for index in 0..symbol_count {
        let offset = code.wrapping_sub(state.low) as u64;
        let scaled = ((offset + 1) * total - 1) / state.range();
        if scaled >= total {
            warn!("arithmetic: decoder left the coding interval at symbol {index}");
            return Err(CodecError::corrupted(
                reader.bits_read(),
                format!("code value outside interval at symbol {index}"),
            ));
        }

        let mut symbol = 0usize;
        while symbol < SYMBOLS - 1 && cumulative[symbol + 1] as u64 <= scaled {
            symbol += 1;
        }
        output.push(symbol as u8);
        state.narrow(cumulative[symbol], cumulative[symbol + 1], total);

        loop {
            let shift = match state.renormalize() {
                Renorm::Low => 0,
                Renorm::High => HALF,
                Renorm::Middle => FIRST_QUARTER,
                Renorm::Done => break,
            };
            code = (code.wrapping_sub(shift) << 1) | reader.read_bit_or_zero() as u32;
        }
    }

    debug!(
        "arithmetic: decoded {symbol_count} symbols from {} bytes",
        bytes.len()
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abaabc_roundtrip() {
        let data = b"ABAABCAABCACBA";
        let table = FrequencyTable::from_data(data);
        let encoded = arithmetic_encode(data, &table).unwrap();
        let decoded = arithmetic_decode(&encoded, &table, 14).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_empty_input_flush() {
        let table = FrequencyTable::from_data(b"A");
        let encoded = arithmetic_encode(b"", &table).unwrap();
        assert_eq!(encoded, vec![0x40]);
        assert!(arithmetic_decode(&encoded, &table, 0).unwrap().is_empty());
    }

    #[test]
    fn test_single_symbol_alphabet() {
        let data = vec![7u8; 500];
        let table = FrequencyTable::from_data(&data);
        let encoded = arithmetic_encode(&data, &table).unwrap();
        assert!(encoded.len() <= 2);
        assert_eq!(arithmetic_decode(&encoded, &table, 500).unwrap(), data);
    }

    #[test]
    fn test_skewed_distribution() {
        let mut data = vec![b'a'; 4000];
        data.extend_from_slice(b"bcdefg");
        data.extend(std::iter::repeat_n(b'z', 300));
        let table = FrequencyTable::from_data(&data);
        let encoded = arithmetic_encode(&data, &table).unwrap();
        assert!(encoded.len() < data.len() / 4);
        assert_eq!(arithmetic_decode(&encoded, &table, data.len()).unwrap(), data);
    }

    #[test]
    fn test_zero_total_rejected() {
        let table = FrequencyTable::new();
        assert!(matches!(
            arithmetic_encode(b"x", &table),
            Err(CodecError::InvalidArgument { .. })
        ));
        assert!(matches!(
            arithmetic_decode(&[0], &table, 1),
            Err(CodecError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_total_too_large() {
        let mut table = FrequencyTable::new();
        table.set(0, 1 << 30);
        table.set(1, 1);
        assert!(matches!(
            arithmetic_encode(&[0], &table),
            Err(CodecError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_zero_frequency_symbol() {
        let table = FrequencyTable::from_data(b"AB");
        assert!(matches!(
            arithmetic_encode(b"ABC", &table),
            Err(CodecError::MissingCode {
                symbol: b'C',
                position: 2
            })
        ));
    }
}
