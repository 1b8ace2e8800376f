//! LZW encoder (compression).

use crate::config::LzwConfig;
use crate::dictionary::LzwDictionary;
use crate::error::Result;
use log::debug;
use oxicodec_core::bitstream::MsbBitWriter;

/// LZW encoder for compression.
#[derive(Debug)]
pub struct LzwEncoder {
    /// Dictionary for string lookup.
    dict: LzwDictionary,
}

impl LzwEncoder {
    /// Create a new LZW encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        let dict = LzwDictionary::new(config)?;
        Ok(Self { dict })
    }

    /// Encode data with LZW compression.
    ///
    /// # Algorithm
    ///
    /// 1. Extend the current match while `match + byte` is in the dictionary
    /// 2. On a miss, emit the code for the match and learn `match + byte`
    ///    (if the dictionary still has room)
    /// 3. Restart the match at the byte
    /// 4. Emit the code for the final match
    ///
    /// Codes are packed MSB-first at the configured fixed width; the last
    /// byte is zero padded. Empty input produces empty output.
    pub fn encode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.dict.reset();
        let bits = self.dict.config().code_bits;
        let mut writer = MsbBitWriter::with_capacity(input.len());

        let Some((&first, rest)) = input.split_first() else {
            return Ok(Vec::new());
        };

        let mut current = vec![first];
        let mut current_code = first as u32;
        let mut codes = 0usize;

        for &byte in rest {
            current.push(byte);
            if let Some(code) = self.dict.find_code(&current) {
                current_code = code;
                continue;
            }

            writer.write_bits(current_code, bits)?;
            codes += 1;
            self.dict.insert(current.clone());

            current.clear();
            current.push(byte);
            current_code = byte as u32;
        }

        writer.write_bits(current_code, bits)?;
        codes += 1;

        let output = writer.into_vec();
        debug!(
            "lzw: {} bytes -> {} codes ({} bytes), dictionary {} entries",
            input.len(),
            codes,
            output.len(),
            self.dict.len()
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::LzwDecoder;

    fn roundtrip(original: &[u8]) -> Vec<u8> {
        let mut encoder = LzwEncoder::new(LzwConfig::DEFAULT).unwrap();
        let compressed = encoder.encode(original).unwrap();
        let mut decoder = LzwDecoder::new(LzwConfig::DEFAULT).unwrap();
        decoder.decode(&compressed).unwrap()
    }

    #[test]
    fn test_encode_simple() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT";
        let mut encoder = LzwEncoder::new(LzwConfig::DEFAULT).unwrap();
        let compressed = encoder.encode(original).unwrap();

        // 16 codes of 12 bits
        assert_eq!(compressed.len(), 24);
        assert_eq!(roundtrip(original), original);
    }

    #[test]
    fn test_encode_code_values() {
        // "ABABABA": A, B, AB(256), ABA(258)
        let mut encoder = LzwEncoder::new(LzwConfig::DEFAULT).unwrap();
        let compressed = encoder.encode(b"ABABABA").unwrap();
        assert_eq!(compressed, vec![0x04, 0x10, 0x42, 0x10, 0x01, 0x02]);
    }

    #[test]
    fn test_encode_empty() {
        let mut encoder = LzwEncoder::new(LzwConfig::DEFAULT).unwrap();
        assert!(encoder.encode(b"").unwrap().is_empty());
    }

    #[test]
    fn test_encode_single_byte() {
        let mut encoder = LzwEncoder::new(LzwConfig::DEFAULT).unwrap();
        let compressed = encoder.encode(b"A").unwrap();
        assert_eq!(compressed, vec![0x04, 0x10]);
        assert_eq!(roundtrip(b"A"), b"A");
    }

    #[test]
    fn test_encode_repeating() {
        let original = vec![b'X'; 500];
        let mut encoder = LzwEncoder::new(LzwConfig::DEFAULT).unwrap();
        let compressed = encoder.encode(&original).unwrap();
        assert!(compressed.len() < original.len() / 2);
        assert_eq!(roundtrip(&original), original);
    }

    #[test]
    fn test_encode_all_bytes() {
        let original: Vec<u8> = (0..=255).collect();
        assert_eq!(roundtrip(&original), original);
    }
}
