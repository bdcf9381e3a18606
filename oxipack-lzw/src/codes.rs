//! 16-bit big-endian code serialization.

use oxipack_core::{OxiPackError, Result};

/// Bytes per serialized code.
pub const CODE_BYTES: usize = 2;

/// Serialize codes as 2-byte big-endian values.
pub fn codes_to_bytes(codes: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(codes.len() * CODE_BYTES);
    for &code in codes {
        out.extend_from_slice(&code.to_be_bytes());
    }
    out
}

/// Parse 2-byte big-endian codes.
///
/// # Errors
///
/// [`OxiPackError::CorruptedData`] when the byte count is odd.
pub fn codes_from_bytes(data: &[u8]) -> Result<Vec<u16>> {
    if data.len() % CODE_BYTES != 0 {
        return Err(OxiPackError::corrupted(
            (data.len() - 1) as u64,
            format!("expected an even number of code bytes, got {}", data.len()),
        ));
    }
    Ok(data
        .chunks_exact(CODE_BYTES)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_layout() {
        assert_eq!(codes_to_bytes(&[0x0102, 0xFFFE]), vec![0x01, 0x02, 0xFF, 0xFE]);
        assert_eq!(
            codes_from_bytes(&[0x01, 0x02, 0xFF, 0xFE]).unwrap(),
            vec![0x0102, 0xFFFE]
        );
    }

    #[test]
    fn test_odd_length_rejected() {
        let err = codes_from_bytes(&[1, 2, 3]).unwrap_err();
        assert_eq!(err.offset(), Some(2));
    }
}
