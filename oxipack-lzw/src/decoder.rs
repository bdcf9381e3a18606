//! LZW decoder (decompression).

use crate::config::LzwConfig;
use crate::dictionary::LzwDictionary;
use oxipack_core::{OxiPackError, Result};

/// LZW decoder for decompression.
#[derive(Debug)]
pub struct LzwDecoder {
    /// Dictionary for code lookup.
    dict: LzwDictionary,
}

impl LzwDecoder {
    /// Create a new LZW decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dict: LzwDictionary::new(config),
        })
    }

    /// Decode a code sequence produced by [`crate::LzwEncoder`].
    ///
    /// The decoder grows its dictionary one step behind the encoder: the
    /// entry for code `n` is only known once code `n + 1` arrives. When the
    /// incoming code is exactly the next unassigned code, the string is the
    /// previous string plus its own first byte.
    ///
    /// # Errors
    ///
    /// [`OxiPackError::InvalidCode`] for a code that is neither assigned nor
    /// the next code to be assigned.
    pub fn decode(&mut self, codes: &[u16]) -> Result<Vec<u8>> {
        self.dict.reset();

        let Some((&first, rest)) = codes.split_first() else {
            return Ok(Vec::new());
        };

        if !self.dict.contains(first) {
            return Err(OxiPackError::invalid_code(0, first, self.dict.next_code()));
        }

        let mut output = Vec::with_capacity(codes.len() * 3);
        self.dict.write_string(first, &mut output);
        let mut prev = first;

        for (i, &code) in rest.iter().enumerate() {
            if self.dict.contains(code) {
                let start = output.len();
                self.dict.write_string(code, &mut output);
                let _ = self.dict.add_decode(prev, output[start]);
            } else if u32::from(code) == self.dict.next_code() && !self.dict.is_full() {
                let first_byte = self.dict.first_byte(prev);
                let _ = self.dict.add_decode(prev, first_byte);
                self.dict.write_string(code, &mut output);
            } else {
                return Err(OxiPackError::invalid_code(
                    i as u64 + 1,
                    code,
                    self.dict.next_code(),
                ));
            }

            prev = code;
        }

        Ok(output)
    }

    /// Reset the decoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::LzwEncoder;

    fn decode(codes: &[u16]) -> Result<Vec<u8>> {
        LzwDecoder::new(LzwConfig::DEFAULT).unwrap().decode(codes)
    }

    #[test]
    fn test_decode_simple() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT";
        let codes = LzwEncoder::new(LzwConfig::DEFAULT)
            .unwrap()
            .encode(original);
        assert_eq!(decode(&codes).unwrap(), original);
    }

    #[test]
    fn test_decode_next_code_case() {
        // "ABABABA": A, B, AB(256), ABA(258) - the last code is not yet
        // assigned when it arrives.
        let codes = [65u16, 66, 256, 258];
        assert_eq!(decode(&codes).unwrap(), b"ABABABA");
    }

    #[test]
    fn test_decode_run_uses_next_code() {
        // "AAA": A, then AA (256) which equals the next code.
        assert_eq!(decode(&[65, 256]).unwrap(), b"AAA");
    }

    #[test]
    fn test_invalid_first_code() {
        let err = decode(&[256]).unwrap_err();
        assert!(matches!(
            err,
            OxiPackError::InvalidCode {
                index: 0,
                code: 256,
                next_code: 256
            }
        ));
    }

    #[test]
    fn test_code_beyond_next() {
        let err = decode(&[65, 66, 300]).unwrap_err();
        assert!(matches!(
            err,
            OxiPackError::InvalidCode {
                index: 2,
                code: 300,
                ..
            }
        ));
    }

    #[test]
    fn test_empty() {
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_next_code_rejected_when_full() {
        let config = LzwConfig::new(257, 1);
        let mut decoder = LzwDecoder::new(config).unwrap();
        // 65, 65 fills the single free slot (256 = "AA"); 257 can never be assigned.
        assert_eq!(decoder.decode(&[65, 65, 256]).unwrap(), b"AAAA");
        assert!(decoder.decode(&[65, 65, 257]).is_err());
    }
}
