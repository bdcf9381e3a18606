//! tANS configuration and the applicability check.

use crate::frequency::FrequencyTable;
use oxipack_core::{OxiPackError, Result, Unsuitable};

/// Default cap on the table size (2^20 states).
pub const MAX_TABLE_SIZE: u32 = 1 << 20;

/// Default cap on the share of the most frequent symbol.
pub const MAX_SKEW: f64 = 0.95;

/// tANS configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TansConfig {
    /// Largest table size that will be built.
    pub max_table_size: u32,
    /// Inputs where one symbol's share exceeds this are declined.
    pub max_skew: f64,
}

impl TansConfig {
    /// 2^20 states, 95% skew limit.
    pub const DEFAULT: Self = Self {
        max_table_size: MAX_TABLE_SIZE,
        max_skew: MAX_SKEW,
    };

    /// Create a new tANS configuration.
    pub fn new(max_table_size: u32, max_skew: f64) -> Self {
        Self {
            max_table_size,
            max_skew,
        }
    }

    /// Check that the parameters are usable.
    ///
    /// Both limits may only tighten the format limits ([`MAX_TABLE_SIZE`],
    /// [`MAX_SKEW`]); decoding always checks against those.
    pub fn validate(&self) -> Result<()> {
        if self.max_table_size < 2
            || !self.max_table_size.is_power_of_two()
            || self.max_table_size > MAX_TABLE_SIZE
        {
            return Err(OxiPackError::invalid_config(format!(
                "tANS table size cap {} must be a power of two in 2..={MAX_TABLE_SIZE}",
                self.max_table_size
            )));
        }
        if !(self.max_skew > 0.0 && self.max_skew <= MAX_SKEW) {
            return Err(OxiPackError::invalid_config(format!(
                "tANS skew limit {} must be in (0, {MAX_SKEW}]",
                self.max_skew
            )));
        }
        Ok(())
    }

    /// Decide whether a distribution can be tANS coded.
    ///
    /// Returns the table size to use, or the reason the input is declined.
    /// Checks run in order: table size, distinct symbols, skew.
    pub fn assess(&self, freqs: &FrequencyTable) -> std::result::Result<u32, Unsuitable> {
        let table_size = freqs.implied_table_size();
        if table_size > u64::from(self.max_table_size) {
            return Err(Unsuitable::TableTooLarge {
                table_size,
                max: self.max_table_size,
            });
        }

        let distinct = freqs.distinct();
        if distinct < 2 {
            return Err(Unsuitable::TooFewSymbols { distinct });
        }

        if let Some((symbol, count)) = freqs.most_frequent() {
            let share = f64::from(count) / freqs.total() as f64;
            if share > self.max_skew {
                return Err(Unsuitable::TooSkewed {
                    symbol,
                    share,
                    max_share: self.max_skew,
                });
            }
        }

        // Bounded by max_table_size above.
        Ok(table_size as u32)
    }
}

impl Default for TansConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TansConfig::default();
        assert_eq!(config.max_table_size, 1 << 20);
        assert_eq!(config.max_skew, 0.95);
        config.validate().unwrap();
    }

    #[test]
    fn test_invalid_configs() {
        assert!(TansConfig::new(1000, 0.5).validate().is_err());
        assert!(TansConfig::new(1, 0.5).validate().is_err());
        assert!(TansConfig::new(1024, 0.0).validate().is_err());
        assert!(TansConfig::new(1024, 1.5).validate().is_err());
        assert!(TansConfig::new(1024, 1.0).validate().is_err());
        assert!(TansConfig::new(1 << 22, 0.5).validate().is_err());
        assert!(TansConfig::new(1024, 0.95).validate().is_ok());
        assert!(TansConfig::new(1 << 20, 0.5).validate().is_ok());
    }

    #[test]
    fn test_assess_suitable() {
        let freqs = FrequencyTable::from_data(b"abracadabra");
        assert_eq!(TansConfig::DEFAULT.assess(&freqs), Ok(16));
    }

    #[test]
    fn test_assess_single_symbol() {
        let freqs = FrequencyTable::from_data(b"aaaa");
        assert_eq!(
            TansConfig::DEFAULT.assess(&freqs),
            Err(Unsuitable::TooFewSymbols { distinct: 1 })
        );
        assert_eq!(
            TansConfig::DEFAULT.assess(&FrequencyTable::new()),
            Err(Unsuitable::TooFewSymbols { distinct: 0 })
        );
    }

    #[test]
    fn test_assess_skew() {
        let mut data = vec![b'a'; 96];
        data.extend_from_slice(&[b'b'; 4]);
        let freqs = FrequencyTable::from_data(&data);
        match TansConfig::DEFAULT.assess(&freqs) {
            Err(Unsuitable::TooSkewed { symbol, share, .. }) => {
                assert_eq!(symbol, b'a');
                assert!((share - 0.96).abs() < 1e-9);
            }
            other => panic!("expected TooSkewed, got {other:?}"),
        }

        // Exactly at the limit is still accepted.
        let mut data = vec![b'a'; 95];
        data.extend_from_slice(&[b'b'; 5]);
        assert!(TansConfig::DEFAULT.assess(&FrequencyTable::from_data(&data)).is_ok());
    }

    #[test]
    fn test_assess_table_too_large() {
        let config = TansConfig::new(64, 0.95);
        let freqs = FrequencyTable::from_data(&(0..100u8).collect::<Vec<_>>());
        assert_eq!(
            config.assess(&freqs),
            Err(Unsuitable::TableTooLarge {
                table_size: 128,
                max: 64
            })
        );
    }
}
