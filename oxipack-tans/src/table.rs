//! Normalized frequencies and the coding tables derived from them.

use crate::frequency::{FrequencyTable, SYMBOLS};
use oxipack_core::nibble::nibbles_for;
use oxipack_core::{NibbleReader, NibbleWriter, OxiPackError, Result};

/// Scale raw frequencies so they sum to exactly `table_size`.
///
/// Each present symbol first gets `max(1, floor(f * T / total))`. The
/// remaining difference is then spread one unit at a time, cycling over the
/// symbols by descending raw frequency (ascending byte value on ties). A
/// decrement never takes a symbol below 1.
pub fn normalize(freqs: &FrequencyTable, table_size: u32) -> Result<[u32; SYMBOLS]> {
    if !table_size.is_power_of_two() {
        return Err(OxiPackError::invalid_config(format!(
            "table size {table_size} is not a power of two"
        )));
    }
    let distinct = freqs.distinct();
    if distinct == 0 {
        return Err(OxiPackError::invalid_config("empty frequency table"));
    }
    if distinct as u64 > u64::from(table_size) {
        return Err(OxiPackError::invalid_config(format!(
            "{distinct} symbols do not fit in a table of {table_size} states"
        )));
    }

    let total = freqs.total();
    let mut normalized = [0u32; SYMBOLS];
    let mut sum = 0i64;
    for (symbol, count) in freqs.records() {
        let scaled = (u64::from(count) * u64::from(table_size) / total).max(1);
        normalized[symbol as usize] = scaled as u32;
        sum += scaled as i64;
    }

    let mut order: Vec<(u8, u32)> = freqs.records().collect();
    order.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut diff = i64::from(table_size) - sum;
    let mut i = 0;
    while diff != 0 {
        let slot = &mut normalized[order[i % order.len()].0 as usize];
        if diff > 0 {
            *slot += 1;
            diff -= 1;
        } else if *slot > 1 {
            *slot -= 1;
            diff += 1;
        }
        i += 1;
    }

    Ok(normalized)
}

/// Packed digits plus the state needed to start decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSymbols {
    /// State after the last encoding step; decoding starts here.
    pub final_state: u32,
    /// Digits packed as nibbles, each digit at its symbol's fixed width.
    pub packed: Vec<u8>,
}

/// tANS coding tables for one distribution.
///
/// Each symbol `s` owns the state interval `[start(s), start(s) + f(s))`,
/// laid out in ascending byte order over `[0, T)`.
///
/// Encoding consumes the input back to front from state `T - 1`. A step on
/// state `x` with symbol `s` emits the digit `x / f(s)` and moves to
/// `start(s) + x % f(s)`. Decoding reads the symbol owning the current state
/// and restores `f(s) * digit + (state - start(s))`, ending back at `T - 1`.
#[derive(Debug, Clone)]
pub struct TansTable {
    table_size: u32,
    normalized: [u32; SYMBOLS],
    starts: [u32; SYMBOLS],
    /// Nibbles per digit for each symbol.
    digit_nibbles: [u8; SYMBOLS],
    state_to_symbol: Vec<u8>,
}

impl TansTable {
    /// Build the tables for `freqs` at `table_size` states.
    pub fn new(freqs: &FrequencyTable, table_size: u32) -> Result<Self> {
        let normalized = normalize(freqs, table_size)?;

        let mut starts = [0u32; SYMBOLS];
        let mut digit_nibbles = [0u8; SYMBOLS];
        let mut state_to_symbol = vec![0u8; table_size as usize];
        let mut next = 0u32;
        for (symbol, &freq) in normalized.iter().enumerate() {
            starts[symbol] = next;
            if freq == 0 {
                continue;
            }
            digit_nibbles[symbol] = nibbles_for((table_size - 1) / freq);
            state_to_symbol[next as usize..(next + freq) as usize].fill(symbol as u8);
            next += freq;
        }

        Ok(Self {
            table_size,
            normalized,
            starts,
            digit_nibbles,
            state_to_symbol,
        })
    }

    /// Number of states `T`.
    #[inline]
    pub fn table_size(&self) -> u32 {
        self.table_size
    }

    /// Normalized frequency of a symbol (0 when absent).
    #[inline]
    pub fn normalized(&self, symbol: u8) -> u32 {
        self.normalized[symbol as usize]
    }

    /// First state of a symbol's interval.
    #[inline]
    pub fn start(&self, symbol: u8) -> u32 {
        self.starts[symbol as usize]
    }

    /// Symbol owning a state, if the state is in range.
    #[inline]
    pub fn symbol_at(&self, state: u32) -> Option<u8> {
        self.state_to_symbol.get(state as usize).copied()
    }

    /// Nibbles used for each digit emitted for `symbol`.
    #[inline]
    pub fn digit_nibbles(&self, symbol: u8) -> u8 {
        self.digit_nibbles[symbol as usize]
    }

    /// Exclusive upper bound of the digits emitted for `symbol`.
    #[inline]
    fn digit_limit(&self, symbol: u8) -> u32 {
        (self.table_size - 1) / self.normalized[symbol as usize] + 1
    }

    /// Run the encoder, returning the final state and one digit per symbol
    /// in input order.
    pub fn encode_digits(&self, symbols: &[u8]) -> Result<(u32, Vec<u32>)> {
        let mut digits = Vec::with_capacity(symbols.len());
        let mut state = self.table_size - 1;

        for (i, &symbol) in symbols.iter().enumerate().rev() {
            let freq = self.normalized[symbol as usize];
            if freq == 0 {
                return Err(OxiPackError::corrupted(
                    i as u64,
                    format!("symbol 0x{symbol:02x} is not in the alphabet"),
                ));
            }
            digits.push(state / freq);
            state = self.starts[symbol as usize] + state % freq;
        }

        digits.reverse();
        Ok((state, digits))
    }

    /// Encode symbols into a final state and packed digits.
    pub fn encode(&self, symbols: &[u8]) -> Result<EncodedSymbols> {
        let (final_state, digits) = self.encode_digits(symbols)?;

        let nibbles: usize = symbols
            .iter()
            .map(|&s| usize::from(self.digit_nibbles[s as usize]))
            .sum();
        let mut writer = NibbleWriter::with_capacity(nibbles);
        for (&symbol, &digit) in symbols.iter().zip(&digits) {
            writer.write(digit, self.digit_nibbles[symbol as usize]);
        }

        Ok(EncodedSymbols {
            final_state,
            packed: writer.into_vec(),
        })
    }

    /// Decode `length` symbols from digits supplied in input order.
    pub fn decode_digits(&self, final_state: u32, digits: &[u32]) -> Result<Vec<u8>> {
        let mut iter = digits.iter();
        self.decode_with(final_state, digits.len(), |index, _| {
            iter.next()
                .copied()
                .ok_or_else(|| OxiPackError::truncated(index, 1, 0))
        })
    }

    /// Decode `length` symbols from a final state and packed digits.
    pub fn decode(&self, final_state: u32, packed: &[u8], length: usize) -> Result<Vec<u8>> {
        let mut reader = NibbleReader::new(packed);
        let output = self.decode_with(final_state, length, |_, nibbles| reader.read(nibbles))?;

        // An odd nibble count leaves exactly one padding nibble.
        if reader.remaining() > 1 {
            return Err(OxiPackError::corrupted(
                (reader.position() / 2) as u64,
                format!("{} unused nibbles after the last digit", reader.remaining()),
            ));
        }
        Ok(output)
    }

    fn decode_with<F>(&self, final_state: u32, length: usize, mut next_digit: F) -> Result<Vec<u8>>
    where
        F: FnMut(u64, u8) -> Result<u32>,
    {
        let table_size = self.table_size;
        let mut state = final_state;
        if state >= table_size {
            return Err(OxiPackError::invalid_state(0, u64::from(state), table_size));
        }

        let mut output = Vec::with_capacity(length);
        for i in 0..length as u64 {
            let symbol = self.state_to_symbol[state as usize];
            let digit = next_digit(i, self.digit_nibbles[symbol as usize])?;
            let limit = self.digit_limit(symbol);
            if digit >= limit {
                return Err(OxiPackError::invalid_digit(i, digit, limit));
            }

            let previous = u64::from(self.normalized[symbol as usize]) * u64::from(digit)
                + u64::from(state - self.starts[symbol as usize]);
            if previous >= u64::from(table_size) {
                return Err(OxiPackError::invalid_state(i, previous, table_size));
            }

            output.push(symbol);
            state = previous as u32;
        }

        if state != table_size - 1 {
            // Reported at the last symbol, whose digit led to this state.
            return Err(OxiPackError::corrupted(
                (length as u64).saturating_sub(1),
                format!(
                    "decoder ended in state {state}, expected initial state {}",
                    table_size - 1
                ),
            ));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_for(data: &[u8]) -> TansTable {
        let freqs = FrequencyTable::from_data(data);
        TansTable::new(&freqs, freqs.implied_table_size() as u32).unwrap()
    }

    #[test]
    fn test_normalize_sums_to_table_size() {
        let freqs = FrequencyTable::from_data(b"abracadabra");
        let normalized = normalize(&freqs, 16).unwrap();
        assert_eq!(normalized.iter().sum::<u32>(), 16);
        // floor(5*16/11)=7, b,r: floor(2*16/11)=2, c,d: 1 -> 13, +3 to a, b, r.
        assert_eq!(normalized[b'a' as usize], 8);
        assert_eq!(normalized[b'b' as usize], 3);
        assert_eq!(normalized[b'r' as usize], 3);
        assert_eq!(normalized[b'c' as usize], 1);
        assert_eq!(normalized[b'd' as usize], 1);
    }

    #[test]
    fn test_normalize_decrement_keeps_minimum() {
        // Small table forces clamped 1s and a negative difference.
        let mut data = vec![0u8; 1000];
        data.extend(1..=6u8);
        let freqs = FrequencyTable::from_data(&data);
        let normalized = normalize(&freqs, 8).unwrap();
        assert_eq!(normalized.iter().sum::<u32>(), 8);
        assert!((1..=6).all(|s| normalized[s] == 1));
        assert_eq!(normalized[0], 2);
    }

    #[test]
    fn test_normalize_rejects_bad_sizes() {
        let freqs = FrequencyTable::from_data(b"abc");
        assert!(normalize(&freqs, 6).is_err());
        assert!(normalize(&freqs, 2).is_err());
        assert!(normalize(&FrequencyTable::new(), 4).is_err());
    }

    #[test]
    fn test_intervals_partition_states() {
        let table = table_for(b"abracadabra");
        assert_eq!(table.start(b'a'), 0);
        assert_eq!(table.start(b'b'), 8);
        assert_eq!(table.start(b'c'), 11);
        assert_eq!(table.start(b'd'), 12);
        assert_eq!(table.start(b'r'), 13);
        assert_eq!(table.symbol_at(0), Some(b'a'));
        assert_eq!(table.symbol_at(10), Some(b'b'));
        assert_eq!(table.symbol_at(15), Some(b'r'));
        assert_eq!(table.symbol_at(16), None);
    }

    #[test]
    fn test_digit_widths() {
        let table = table_for(b"abracadabra");
        // (16-1)/8 = 1, (16-1)/1 = 15: both fit one nibble.
        assert_eq!(table.digit_nibbles(b'a'), 1);
        assert_eq!(table.digit_nibbles(b'c'), 1);

        let mut data = vec![b'x'; 900];
        data.push(b'y');
        let table = table_for(&data);
        // T = 1024, f(y) = 1: digits up to 1023 need three nibbles.
        assert_eq!(table.digit_nibbles(b'y'), 3);
    }

    #[test]
    fn test_digits_roundtrip() {
        let data = b"abracadabra";
        let table = table_for(data);
        let (state, digits) = table.encode_digits(data).unwrap();
        assert!(state < 16);
        assert_eq!(digits.len(), data.len());
        assert_eq!(table.decode_digits(state, &digits).unwrap(), data);
    }

    #[test]
    fn test_packed_roundtrip() {
        let data = b"mississippi river banks";
        let table = table_for(data);
        let encoded = table.encode(data).unwrap();
        let decoded = table.decode(encoded.final_state, &encoded.packed, data.len()).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let table = table_for(b"abab");
        assert!(table.encode(b"abc").is_err());
    }

    #[test]
    fn test_bad_final_state() {
        let table = table_for(b"abab");
        let err = table.decode(4, &[0x00], 1).unwrap_err();
        assert!(matches!(
            err,
            OxiPackError::InvalidState {
                index: 0,
                state: 4,
                table_size: 4
            }
        ));
    }

    #[test]
    fn test_out_of_range_digit() {
        // T = 4, f(a) = f(b) = 2: digits must be < 2.
        let table = table_for(b"abab");
        let err = table.decode_digits(0, &[3]).unwrap_err();
        assert!(matches!(err, OxiPackError::InvalidDigit { index: 0, digit: 3, limit: 2 }));
    }

    #[test]
    fn test_wrong_end_state_reports_last_symbol() {
        let table = table_for(b"abracadabra");
        // State 0 is 'a'; digit 0 keeps it at 0, never reaching 15.
        let err = table.decode_digits(0, &[0, 0, 0]).unwrap_err();
        assert!(matches!(err, OxiPackError::CorruptedData { .. }));
        assert_eq!(err.offset(), Some(2));
    }

    #[test]
    fn test_trailing_nibbles_rejected() {
        let data = b"abab";
        let table = table_for(data);
        let mut encoded = table.encode(data).unwrap();
        encoded.packed.push(0);
        assert!(table.decode(encoded.final_state, &encoded.packed, data.len()).is_err());
    }

    #[test]
    fn test_truncated_digits_rejected() {
        let data = b"abababababab";
        let table = table_for(data);
        let encoded = table.encode(data).unwrap();
        let short = &encoded.packed[..encoded.packed.len() - 1];
        assert!(table.decode(encoded.final_state, short, data.len()).is_err());
    }
}
