//! # OxiPack-tANS: Table-based Asymmetric Numeral Systems
//!
//! Entropy coding of byte streams with a single integer state and a
//! frequency-derived state table.
//!
//! ## Overview
//!
//! 1. Count byte frequencies ([`FrequencyTable`])
//! 2. Decide applicability ([`TansConfig::assess`]): the table size is the
//!    next power of two of the symbol total, capped at 2^20; at least two
//!    distinct symbols are required and no symbol may exceed 95% of the input
//! 3. Normalize the frequencies to sum to the table size ([`normalize`])
//! 4. Encode back to front, emitting one digit per symbol ([`TansTable`])
//!
//! Declined inputs are not errors: [`encode`] returns
//! [`Outcome::Unsuitable`] with the reason.
//!
//! ## Digit Stream
//!
//! Every digit of symbol `s` is written in `nibbles_for((T - 1) / f(s))`
//! nibbles, most significant first, packed two per byte. The decoder
//! derives the same widths from the frequency table, so no widths are
//! stored.
//!
//! ## Example
//!
//! ```rust
//! use oxipack_tans::{decode, encode, TansConfig};
//!
//! let data = b"abracadabra, abracadabra";
//! let stream = encode(data, &TansConfig::DEFAULT).unwrap().complete().unwrap();
//! assert_eq!(stream.table_size, 32);
//!
//! let decoded = decode(&stream).unwrap().complete().unwrap();
//! assert_eq!(decoded, data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod frequency;
mod table;

pub use config::{MAX_SKEW, MAX_TABLE_SIZE, TansConfig};
pub use frequency::{FrequencyTable, SYMBOLS};
pub use oxipack_core::{OxiPackError, Outcome, Result, Unsuitable};
pub use table::{EncodedSymbols, TansTable, normalize};

/// Everything needed to decode a tANS-coded byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TansStream {
    /// Number of states.
    pub table_size: u32,
    /// Raw frequencies of the encoded bytes.
    pub frequencies: FrequencyTable,
    /// State the decoder starts from.
    pub final_state: u32,
    /// Number of encoded bytes.
    pub length: u32,
    /// Packed digits.
    pub digits: Vec<u8>,
}

/// Entropy code `data`, or report why it is unsuitable.
pub fn encode(data: &[u8], config: &TansConfig) -> Result<Outcome<TansStream>> {
    config.validate()?;
    let frequencies = FrequencyTable::from_data(data);
    let table_size = match config.assess(&frequencies) {
        Ok(size) => size,
        Err(reason) => return Ok(Outcome::Unsuitable(reason)),
    };

    let length = u32::try_from(data.len())
        .map_err(|_| OxiPackError::invalid_config("tANS input exceeds 4 GiB"))?;
    let table = TansTable::new(&frequencies, table_size)?;
    let encoded = table.encode(data)?;

    Ok(Outcome::Complete(TansStream {
        table_size,
        frequencies,
        final_state: encoded.final_state,
        length,
        digits: encoded.packed,
    }))
}

/// Decode a stream produced by [`encode`].
///
/// The frequency table is re-checked against the format limits
/// ([`TansConfig::DEFAULT`]), which every valid encoder config lies within,
/// so any stream [`encode`] produced is accepted. A table outside those
/// limits yields [`Outcome::Unsuitable`]. The stored table size must match
/// the size the frequencies imply.
pub fn decode(stream: &TansStream) -> Result<Outcome<Vec<u8>>> {
    let table_size = match TansConfig::DEFAULT.assess(&stream.frequencies) {
        Ok(size) => size,
        Err(reason) => return Ok(Outcome::Unsuitable(reason)),
    };

    if stream.table_size != table_size {
        return Err(OxiPackError::corrupted(
            0,
            format!(
                "table size {} does not match frequency total (expected {table_size})",
                stream.table_size
            ),
        ));
    }
    if u64::from(stream.length) != stream.frequencies.total() {
        return Err(OxiPackError::corrupted(
            0,
            format!(
                "length {} does not match frequency total {}",
                stream.length,
                stream.frequencies.total()
            ),
        ));
    }

    let table = TansTable::new(&stream.frequencies, table_size)?;
    table
        .decode(stream.final_state, &stream.digits, stream.length as usize)
        .map(Outcome::Complete)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let data = b"the rain in spain stays mainly in the plain";
        let stream = encode(data, &TansConfig::DEFAULT).unwrap().complete().unwrap();
        assert_eq!(stream.length as usize, data.len());
        assert_eq!(stream.table_size, 64);
        let decoded = decode(&stream).unwrap();
        assert_eq!(decoded, Outcome::Complete(data.to_vec()));
    }

    #[test]
    fn test_single_symbol_unsuitable() {
        let outcome = encode(b"zzzzzzzz", &TansConfig::DEFAULT).unwrap();
        assert_eq!(outcome, Outcome::Unsuitable(Unsuitable::TooFewSymbols { distinct: 1 }));
    }

    #[test]
    fn test_decode_rejects_wrong_table_size() {
        let data = b"abcabcabd";
        let mut stream = encode(data, &TansConfig::DEFAULT).unwrap().complete().unwrap();
        stream.table_size *= 2;
        assert!(decode(&stream).is_err());
    }

    #[test]
    fn test_decode_rejects_length_mismatch() {
        let data = b"abcabcabd";
        let mut stream = encode(data, &TansConfig::DEFAULT).unwrap().complete().unwrap();
        stream.length += 1;
        assert!(decode(&stream).is_err());
    }

    #[test]
    fn test_decode_skewed_table_is_unsuitable() {
        let data = b"abcabcabd";
        let mut stream = encode(data, &TansConfig::DEFAULT).unwrap().complete().unwrap();
        stream.frequencies = FrequencyTable::from_data(&[1u8; 16]);
        let outcome = decode(&stream).unwrap();
        assert!(outcome.is_unsuitable());
    }

    #[test]
    fn test_tighter_encoder_config_decodes() {
        let data = b"abcabcabcabcabcabcabd";
        let config = TansConfig::new(32, 0.5);
        let stream = encode(data, &config).unwrap().complete().unwrap();
        assert_eq!(stream.table_size, 32);
        assert_eq!(decode(&stream).unwrap(), Outcome::Complete(data.to_vec()));
    }
}
