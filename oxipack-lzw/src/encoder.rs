//! LZW encoder (compression).

use crate::config::LzwConfig;
use crate::dictionary::LzwDictionary;
use oxipack_core::Result;

/// LZW encoder for compression.
#[derive(Debug)]
pub struct LzwEncoder {
    /// Dictionary for string lookup.
    dict: LzwDictionary,
}

impl LzwEncoder {
    /// Create a new LZW encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dict: LzwDictionary::new(config),
        })
    }

    /// Encode data into a sequence of codes.
    ///
    /// # Algorithm
    ///
    /// 1. Start from a fresh dictionary with single-byte codes (0-255)
    /// 2. Extend the current prefix while `prefix + byte` is in the dictionary
    /// 3. Otherwise emit the prefix code, add `prefix + byte` (unless the
    ///    dictionary is full) and restart the prefix at `byte`
    /// 4. Emit the code of the final prefix
    ///
    /// Empty input yields no codes.
    pub fn encode(&mut self, input: &[u8]) -> Vec<u16> {
        self.dict.reset();

        let Some((&first, rest)) = input.split_first() else {
            return Vec::new();
        };

        let mut codes = Vec::with_capacity(input.len() / 2 + 1);
        let mut current = u16::from(first);

        for &byte in rest {
            match self.dict.find(current, byte) {
                Some(code) => current = code,
                None => {
                    codes.push(current);
                    // Once the cap is reached, existing entries are still used.
                    let _ = self.dict.add_encode(current, byte);
                    current = u16::from(byte);
                }
            }
        }

        codes.push(current);
        codes
    }

    /// Number of dictionary entries after the last [`encode`](Self::encode).
    pub fn dictionary_len(&self) -> usize {
        self.dict.len()
    }

    /// Reset the encoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
    }
}
