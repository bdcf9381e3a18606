//! tANS payload layout.
//!
//! ```text
//! +------------+-----------+-------------------------+-------------+--------+----------------+
//! | table size | sym count | (symbol, raw freq) * N  | final state | length | chunked digits |
//! |   u32 BE   |  u16 BE   |    u8, u32 BE           |   u32 BE    | u32 BE |                |
//! +------------+-----------+-------------------------+-------------+--------+----------------+
//! ```
//!
//! Records are in ascending symbol order. Digits are nibble-packed.

use oxipack_core::frame::write_chunked;
use oxipack_core::{ByteReader, OxiPackError, Result};
use oxipack_tans::{FrequencyTable, TansStream};

/// Fixed fields of a tANS payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TansHeader {
    /// Number of states.
    pub table_size: u32,
    /// Raw frequencies of the coded bytes.
    pub frequencies: FrequencyTable,
    /// Decoder start state.
    pub final_state: u32,
    /// Number of coded bytes.
    pub length: u32,
}

/// Append a tANS payload.
pub fn write_tans(out: &mut Vec<u8>, stream: &TansStream, chunk_size: usize) -> Result<()> {
    let records: Vec<(u8, u32)> = stream.frequencies.records().collect();

    out.extend_from_slice(&stream.table_size.to_be_bytes());
    out.extend_from_slice(&(records.len() as u16).to_be_bytes());
    for (symbol, count) in records {
        out.push(symbol);
        out.extend_from_slice(&count.to_be_bytes());
    }
    out.extend_from_slice(&stream.final_state.to_be_bytes());
    out.extend_from_slice(&stream.length.to_be_bytes());
    write_chunked(out, &stream.digits, chunk_size)
}

/// Read the fixed fields of a tANS payload.
pub fn read_tans_header(reader: &mut ByteReader<'_>) -> Result<TansHeader> {
    let table_size = reader.read_u32_be()?;
    let count_offset = reader.offset();
    let count = reader.read_u16_be()?;
    if count == 0 || usize::from(count) > oxipack_tans::SYMBOLS {
        return Err(OxiPackError::corrupted(
            count_offset,
            format!("symbol count {count} out of range 1..=256"),
        ));
    }

    let mut records = Vec::with_capacity(usize::from(count));
    let mut previous: Option<u8> = None;
    for _ in 0..count {
        let offset = reader.offset();
        let symbol = reader.read_u8()?;
        let freq = reader.read_u32_be()?;
        if previous.is_some_and(|p| p >= symbol) {
            return Err(OxiPackError::corrupted(
                offset,
                format!("frequency records out of order at symbol 0x{symbol:02x}"),
            ));
        }
        if freq == 0 {
            return Err(OxiPackError::corrupted(
                offset,
                format!("zero frequency for symbol 0x{symbol:02x}"),
            ));
        }
        previous = Some(symbol);
        records.push((symbol, freq));
    }
    let frequencies = FrequencyTable::from_records(records)?;

    let final_state = reader.read_u32_be()?;
    let length = reader.read_u32_be()?;

    Ok(TansHeader {
        table_size,
        frequencies,
        final_state,
        length,
    })
}

/// Parse a complete tANS payload; `base` is its offset in the container.
pub fn read_tans(data: &[u8], base: u64) -> Result<TansStream> {
    let mut reader = ByteReader::with_base(data, base);
    let header = read_tans_header(&mut reader)?;
    let digits = reader.read_chunked()?;

    Ok(TansStream {
        table_size: header.table_size,
        frequencies: header.frequencies,
        final_state: header.final_state,
        length: header.length,
        digits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stream() -> TansStream {
        TansStream {
            table_size: 4,
            frequencies: FrequencyTable::from_data(b"abab"),
            final_state: 1,
            length: 4,
            digits: vec![0x12, 0x34],
        }
    }

    #[test]
    fn test_layout() {
        let mut out = Vec::new();
        write_tans(&mut out, &sample_stream(), 1024).unwrap();
        assert_eq!(
            out,
            vec![
                0, 0, 0, 4, // table size
                0, 2, // symbol count
                b'a', 0, 0, 0, 2, // record
                b'b', 0, 0, 0, 2, // record
                0, 0, 0, 1, // final state
                0, 0, 0, 4, // length
                0, 0, 0, 2, 0x12, 0x34, // one chunk of digits
            ]
        );
        assert_eq!(read_tans(&out, 4).unwrap(), sample_stream());
    }

    #[test]
    fn test_records_out_of_order() {
        let mut out = Vec::new();
        write_tans(&mut out, &sample_stream(), 1024).unwrap();
        out.swap(6, 11);
        let err = read_tans(&out, 4).unwrap_err();
        assert!(matches!(err, OxiPackError::CorruptedData { offset: 15, .. }));
    }

    #[test]
    fn test_truncated_header() {
        let mut out = Vec::new();
        write_tans(&mut out, &sample_stream(), 1024).unwrap();
        let err = read_tans(&out[..10], 4).unwrap_err();
        assert!(matches!(err, OxiPackError::TruncatedFrame { .. }));
    }

    #[test]
    fn test_zero_symbol_count() {
        let err = read_tans(&[0, 0, 0, 4, 0, 0], 0).unwrap_err();
        assert!(matches!(err, OxiPackError::CorruptedData { offset: 4, .. }));
    }
}
