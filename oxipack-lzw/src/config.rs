//! LZW configuration.

use oxipack_core::{OxiPackError, Result};

/// Largest dictionary addressable with 16-bit codes.
pub const MAX_DICT_SIZE: u32 = 1 << 16;

/// Default block size of the chunk-parallel variant (64 KiB).
pub const DEFAULT_BLOCK_SIZE: usize = 64 * 1024;

/// Number of pre-seeded single-byte codes.
pub const ROOT_CODES: u32 = 256;

/// LZW configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Dictionary cap. Once reached, no further entries are added.
    pub max_dict_size: u32,
    /// Block size for [`crate::compress_parallel`].
    pub block_size: usize,
}

impl LzwConfig {
    /// 16-bit codes, 64 KiB parallel blocks.
    pub const DEFAULT: Self = Self {
        max_dict_size: MAX_DICT_SIZE,
        block_size: DEFAULT_BLOCK_SIZE,
    };

    /// Create a new LZW configuration.
    pub fn new(max_dict_size: u32, block_size: usize) -> Self {
        Self {
            max_dict_size,
            block_size,
        }
    }

    /// Check that the parameters are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_dict_size <= ROOT_CODES || self.max_dict_size > MAX_DICT_SIZE {
            return Err(OxiPackError::invalid_config(format!(
                "LZW dictionary size {} must be in {}..={}",
                self.max_dict_size,
                ROOT_CODES + 1,
                MAX_DICT_SIZE
            )));
        }
        if self.block_size == 0 {
            return Err(OxiPackError::invalid_config("LZW block size must be non-zero"));
        }
        Ok(())
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
