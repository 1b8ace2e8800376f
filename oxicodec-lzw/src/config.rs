//! LZW configuration.

use crate::error::{LzwError, Result};

/// LZW configuration parameters.
///
/// Codes are written at a fixed width; the dictionary stops growing once it
/// holds `max_entries` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Width of every emitted code in bits.
    pub code_bits: u8,
    /// Dictionary capacity, including the 256 single-byte entries.
    pub max_entries: u32,
}

impl LzwConfig {
    /// Standard configuration: 12-bit codes, 4096 entries.
    pub const DEFAULT: Self = Self {
        code_bits: 12,
        max_entries: 4096,
    };

    /// Smallest supported code width.
    pub const MIN_CODE_BITS: u8 = 9;

    /// Largest supported code width.
    pub const MAX_CODE_BITS: u8 = 16;

    /// Create and validate a configuration.
    ///
    /// `code_bits` must be in 9..=16 and `max_entries` must leave room for
    /// at least one multi-byte string while still fitting in `code_bits`.
    pub fn new(code_bits: u8, max_entries: u32) -> Result<Self> {
        let config = Self {
            code_bits,
            max_entries,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants described on [`LzwConfig::new`].
    pub fn validate(&self) -> Result<()> {
        let width_ok = (Self::MIN_CODE_BITS..=Self::MAX_CODE_BITS).contains(&self.code_bits);
        if !width_ok || self.max_entries <= 256 || self.max_entries > self.code_space() {
            return Err(LzwError::InvalidConfig {
                code_bits: self.code_bits,
                max_entries: self.max_entries,
            });
        }
        Ok(())
    }

    /// Number of distinct values a code can hold.
    pub fn code_space(&self) -> u32 {
        1u32.checked_shl(self.code_bits as u32).unwrap_or(u32::MAX)
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LzwConfig::DEFAULT;
        assert_eq!(config.code_bits, 12);
        assert_eq!(config.max_entries, 4096);
        assert_eq!(config.code_space(), 4096);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        assert!(LzwConfig::new(9, 512).is_ok());
        assert!(LzwConfig::new(16, 65536).is_ok());
        assert!(LzwConfig::new(12, 1000).is_ok());
    }

    #[test]
    fn test_invalid_config() {
        assert!(LzwConfig::new(8, 256).is_err());
        assert!(LzwConfig::new(17, 4096).is_err());
        assert!(LzwConfig::new(12, 256).is_err());
        assert!(LzwConfig::new(12, 4097).is_err());
    }
}
