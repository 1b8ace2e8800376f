//! LZW dictionary (code table) management.

use crate::config::LzwConfig;
use crate::error::{LzwError, Result};
use std::collections::HashMap;

/// LZW dictionary for encoding and decoding.
///
/// Codes 0-255 are the single bytes; every later code is the next free
/// index. Entries are never removed. The encoder also keeps a reverse
/// mapping (string -> code); the decoder only needs the forward table.
#[derive(Debug)]
pub struct LzwDictionary {
    /// Code table: code -> byte sequence.
    table: Vec<Vec<u8>>,
    /// Reverse lookup: byte sequence -> code (encoder only).
    reverse: HashMap<Vec<u8>, u32>,
    /// Configuration.
    config: LzwConfig,
}

impl LzwDictionary {
    /// Create a dictionary seeded with the 256 single-byte strings.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;

        let mut dict = Self {
            table: Vec::with_capacity(config.max_entries as usize),
            reverse: HashMap::new(),
            config,
        };
        dict.reset();
        Ok(dict)
    }

    /// Drop every learned string.
    pub fn reset(&mut self) {
        self.table.clear();
        self.reverse.clear();
        for byte in 0..=255u8 {
            self.table.push(vec![byte]);
            self.reverse.insert(vec![byte], byte as u32);
        }
    }

    /// Add a string for encoding. Does nothing once the table is full.
    pub fn insert(&mut self, string: Vec<u8>) -> Option<u32> {
        if self.is_full() {
            return None;
        }
        let code = self.next_code();
        self.table.push(string.clone());
        self.reverse.insert(string, code);
        Some(code)
    }

    /// Add a string for decoding (no reverse entry). Does nothing once the
    /// table is full.
    pub fn insert_decode(&mut self, string: Vec<u8>) -> Option<u32> {
        if self.is_full() {
            return None;
        }
        let code = self.next_code();
        self.table.push(string);
        Some(code)
    }

    /// Get the byte sequence for a code.
    pub fn get_string(&self, code: u32, position: u64) -> Result<&[u8]> {
        self.table
            .get(code as usize)
            .map(|v| v.as_slice())
            .ok_or(LzwError::InvalidCode { code, position })
    }

    /// Find the code for a byte sequence (encoder only).
    pub fn find_code(&self, string: &[u8]) -> Option<u32> {
        self.reverse.get(string).copied()
    }

    /// Whether the dictionary reached its capacity.
    pub fn is_full(&self) -> bool {
        self.table.len() as u32 >= self.config.max_entries
    }

    /// Code the next inserted string will receive.
    pub fn next_code(&self) -> u32 {
        self.table.len() as u32
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false: the single bytes are present from the start.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }
}
