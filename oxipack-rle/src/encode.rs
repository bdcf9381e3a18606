//! RLE encoder.

use crate::{ESCAPE, MAX_RUN, MIN_RUN, RUN_MARKER};

/// Encode data with escape-based RLE.
///
/// Total and deterministic: every input is accepted.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len() + data.len() / 8);
    encode_into(data, &mut result);
    result
}

/// Encode data, appending to `out`.
pub fn encode_into(data: &[u8], out: &mut Vec<u8>) {
    let mut i = 0;

    while i < data.len() {
        let byte = data[i];
        let run_len = data[i..].iter().take_while(|&&b| b == byte).count();

        if run_len >= MIN_RUN {
            let mut left = run_len;
            while left > 0 {
                let chunk = left.min(MAX_RUN);
                out.extend_from_slice(&[ESCAPE, RUN_MARKER, byte, chunk as u8]);
                left -= chunk;
            }
        } else {
            for _ in 0..run_len {
                if byte == ESCAPE {
                    out.extend_from_slice(&[ESCAPE, ESCAPE]);
                } else {
                    out.push(byte);
                }
            }
        }

        i += run_len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_of_three_is_literal() {
        assert_eq!(encode(b"AAA"), b"AAA");
    }

    #[test]
    fn test_run_of_four_is_encoded() {
        assert_eq!(encode(b"AAAA"), vec![0x00, 0xFF, b'A', 4]);
    }

    #[test]
    fn test_long_run_is_split() {
        let data = vec![7u8; 260];
        assert_eq!(encode(&data), vec![0x00, 0xFF, 7, 255, 0x00, 0xFF, 7, 5]);
    }

    #[test]
    fn test_exact_max_run() {
        let data = vec![9u8; 255];
        assert_eq!(encode(&data), vec![0x00, 0xFF, 9, 255]);
    }

    #[test]
    fn test_literal_zero_is_escaped() {
        assert_eq!(encode(&[0x00]), vec![0x00, 0x00]);
        assert_eq!(encode(&[1, 0, 0, 2]), vec![1, 0, 0, 0, 0, 2]);
    }

    #[test]
    fn test_zero_run() {
        assert_eq!(encode(&[0u8; 10]), vec![0x00, 0xFF, 0x00, 10]);
    }

    #[test]
    fn test_run_of_ff() {
        // 0xFF literals never collide with the run marker: they are not preceded by ESCAPE.
        assert_eq!(encode(&[0xFF, 0xFF]), vec![0xFF, 0xFF]);
    }
}
