//! Symbol frequency tables.

use oxipack_core::{OxiPackError, Result};

/// Number of byte symbols.
pub const SYMBOLS: usize = 256;

/// Raw (empirical) byte frequencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    /// Count per byte value; zero means absent.
    counts: [u32; SYMBOLS],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            counts: [0; SYMBOLS],
        }
    }

    /// Count the bytes of `data`.
    ///
    /// Counts saturate at `u32::MAX`; such inputs are far beyond any usable
    /// table size and are rejected by the applicability check.
    pub fn from_data(data: &[u8]) -> Self {
        let mut counts = [0u64; SYMBOLS];
        for &byte in data {
            counts[byte as usize] += 1;
        }

        let mut table = Self::new();
        for (slot, &count) in table.counts.iter_mut().zip(counts.iter()) {
            *slot = u32::try_from(count).unwrap_or(u32::MAX);
        }
        table
    }

    /// Build from `(symbol, count)` records.
    ///
    /// # Errors
    ///
    /// Duplicate symbols and zero counts are rejected.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u32)>,
    {
        let mut table = Self::new();
        for (i, (symbol, count)) in records.into_iter().enumerate() {
            if count == 0 {
                return Err(OxiPackError::corrupted(
                    i as u64,
                    format!("zero frequency for symbol 0x{symbol:02x}"),
                ));
            }
            if table.counts[symbol as usize] != 0 {
                return Err(OxiPackError::corrupted(
                    i as u64,
                    format!("duplicate frequency record for symbol 0x{symbol:02x}"),
                ));
            }
            table.counts[symbol as usize] = count;
        }
        Ok(table)
    }

    /// Set the count of one symbol.
    pub fn set(&mut self, symbol: u8, count: u32) {
        self.counts[symbol as usize] = count;
    }

    /// Count of one symbol.
    #[inline]
    pub fn get(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Present symbols with their counts, in ascending byte order.
    pub fn records(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }

    /// Most frequent symbol (lowest byte value on ties).
    pub fn most_frequent(&self) -> Option<(u8, u32)> {
        self.records()
            .fold(None, |best: Option<(u8, u32)>, (s, c)| match best {
                Some((_, bc)) if bc >= c => best,
                _ => Some((s, c)),
            })
    }

    /// Table size implied by the total: the next power of two ≥ total.
    pub fn implied_table_size(&self) -> u64 {
        self.total().max(1).next_power_of_two()
    }
}
