//! Pipeline configuration.

use oxipack_core::{DEFAULT_CHUNK_SIZE, OxiPackError, Result};
use oxipack_lzw::{DEFAULT_BLOCK_SIZE, LzwConfig, MAX_DICT_SIZE};
use oxipack_tans::{MAX_SKEW, MAX_TABLE_SIZE, TansConfig};
use serde::{Deserialize, Serialize};

/// Limits and sizes used by every stage of a pipeline.
///
/// Serializable so it can be loaded from a JSON file; missing fields take
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// LZW dictionary cap (257..=65536).
    pub lzw_max_dict_size: u32,
    /// Block size of the chunk-parallel LZW frame.
    pub lzw_block_size: usize,
    /// Largest tANS table size, at most 2^20.
    pub tans_max_table_size: u32,
    /// Largest share of one symbol before tANS is declined, at most 0.95.
    pub tans_max_skew: f64,
    /// Payload size per chunk frame.
    pub chunk_size: usize,
}

impl PipelineConfig {
    /// Defaults of every stage.
    pub const DEFAULT: Self = Self {
        lzw_max_dict_size: MAX_DICT_SIZE,
        lzw_block_size: DEFAULT_BLOCK_SIZE,
        tans_max_table_size: MAX_TABLE_SIZE,
        tans_max_skew: MAX_SKEW,
        chunk_size: DEFAULT_CHUNK_SIZE,
    };

    /// LZW settings.
    pub fn lzw(&self) -> LzwConfig {
        LzwConfig::new(self.lzw_max_dict_size, self.lzw_block_size)
    }

    /// tANS settings.
    pub fn tans(&self) -> TansConfig {
        TansConfig::new(self.tans_max_table_size, self.tans_max_skew)
    }

    /// Check every stage's settings.
    pub fn validate(&self) -> Result<()> {
        self.lzw().validate()?;
        self.tans().validate()?;
        if self.chunk_size == 0 || u32::try_from(self.chunk_size).is_err() {
            return Err(OxiPackError::invalid_config(format!(
                "chunk size {} must be in 1..=4294967295",
                self.chunk_size
            )));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
