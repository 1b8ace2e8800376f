//! Byte frequency tables.

/// Number of distinct byte symbols.
pub const SYMBOLS: usize = 256;

/// Occurrence counts for each of the 256 byte values.
///
/// Symbols with a zero count are excluded from Huffman trees and cannot be
/// coded by the range coder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; SYMBOLS],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; SYMBOLS],
        }
    }
}

impl FrequencyTable {
    /// Create an all-zero table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing count array.
    pub fn from_counts(counts: [u32; SYMBOLS]) -> Self {
        Self { counts }
    }

    /// Count the bytes of `data`.
    ///
    /// Counts saturate at `u32::MAX`.
    pub fn from_data(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.increment(byte);
        }
        table
    }

    /// Add one occurrence of `symbol`.
    #[inline]
    pub fn increment(&mut self, symbol: u8) {
        let slot = &mut self.counts[symbol as usize];
        *slot = slot.saturating_add(1);
    }

    /// Count for `symbol`.
    #[inline]
    pub fn get(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    /// Overwrite the count for `symbol`.
    pub fn set(&mut self, symbol: u8, count: u32) {
        self.counts[symbol as usize] = count;
    }

    /// Raw counts.
    pub fn counts(&self) -> &[u32; SYMBOLS] {
        &self.counts
    }

    /// Sum of all counts, widened to avoid overflow.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Number of symbols with a nonzero count.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Scale counts down so the total is at most `max_total`, keeping every
    /// nonzero count at least 1. Returns a copy when already within bounds.
    ///
    /// `max_total` must be at least the number of distinct symbols.
    pub fn scaled_to(&self, max_total: u64) -> Self {
        let total = self.total();
        if total <= max_total {
            return self.clone();
        }
        // Reserve one unit per symbol for the floor of 1.
        let budget = max_total.saturating_sub(self.distinct_symbols() as u64);
        let mut counts = [0u32; SYMBOLS];
        for (dst, &count) in counts.iter_mut().zip(&self.counts) {
            if count > 0 {
                *dst = (count as u64 * budget / total) as u32 + 1;
            }
        }
        Self { counts }
    }

    /// Prefix sums: `cumulative[s]` is the total count of symbols below `s`,
    /// `cumulative[256]` is the grand total.
    ///
    /// The caller must ensure the total fits in `u32`.
    pub fn cumulative(&self) -> [u32; SYMBOLS + 1] {
        let mut cumulative = [0u32; SYMBOLS + 1];
        let mut running = 0u32;
        for (i, &count) in self.counts.iter().enumerate() {
            cumulative[i] = running;
            running = running.wrapping_add(count);
        }
        cumulative[SYMBOLS] = running;
        cumulative
    }
}
