//! LZW decoder (decompression).
//!
//! The decoder rebuilds the encoder's dictionary one code behind it. A code
//! equal to the next free index can only be the string the encoder learned
//! while emitting the previous code, which is `prev + prev[0]`.

use crate::config::LzwConfig;
use crate::dictionary::LzwDictionary;
use crate::error::{LzwError, Result};
use log::{debug, warn};
use oxicodec_core::bitstream::MsbBitReader;

/// LZW decoder for decompression.
#[derive(Debug)]
pub struct LzwDecoder {
    /// Dictionary for code lookup.
    dict: LzwDictionary,
}

impl LzwDecoder {
    /// Create a new LZW decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        let dict = LzwDictionary::new(config)?;
        Ok(Self { dict })
    }

    /// Decode LZW-compressed data.
    ///
    /// The number of codes is `bits / code_bits`; trailing padding shorter
    /// than one code is ignored. Fails with [`LzwError::InvalidCode`] on a
    /// code beyond the next free dictionary index.
    pub fn decode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.dict.reset();
        let bits = self.dict.config().code_bits;
        let mut reader = MsbBitReader::new(input);
        let num_codes = reader.bit_len() / bits as u64;
        let mut output = Vec::with_capacity(input.len() * 2);

        let mut prev: Option<Vec<u8>> = None;

        for _ in 0..num_codes {
            let code = reader.read_bits(bits)?;
            let position = reader.bits_read();

            let next = self.dict.next_code();
            let string = match &prev {
                _ if code < next => self.dict.get_string(code, position)?.to_vec(),
                // KwKwK: the code being defined by this very step.
                Some(prev_string) if code == next => {
                    let mut string = prev_string.clone();
                    string.push(prev_string[0]);
                    string
                }
                _ => {
                    warn!("lzw: code {code} at bit {position} beyond next index {next}");
                    return Err(LzwError::InvalidCode { code, position });
                }
            };

            output.extend_from_slice(&string);

            if let Some(mut entry) = prev.take() {
                entry.push(string[0]);
                self.dict.insert_decode(entry);
            }
            prev = Some(string);
        }

        output.shrink_to_fit();
        debug!(
            "lzw: {} codes -> {} bytes, dictionary {} entries",
            num_codes,
            output.len(),
            self.dict.len()
        );
        Ok(output)
    }
}
