//! RLE decoder and stream validation.

use crate::{ESCAPE, RUN_MARKER};
use oxipack_core::{OxiPackError, Result};

/// One decoded RLE token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// A single literal byte.
    Literal(u8),
    /// `count` copies of `value`.
    Run { value: u8, count: u8 },
}

/// Walk an encoded stream, handing each token to `sink`.
fn walk<F: FnMut(Token)>(data: &[u8], mut sink: F) -> Result<()> {
    let mut i = 0;

    while i < data.len() {
        let byte = data[i];
        if byte != ESCAPE {
            sink(Token::Literal(byte));
            i += 1;
            continue;
        }

        let Some(&marker) = data.get(i + 1) else {
            return Err(OxiPackError::truncated(i as u64, 2, data.len() - i));
        };

        match marker {
            ESCAPE => {
                sink(Token::Literal(0));
                i += 2;
            }
            RUN_MARKER => {
                if data.len() - i < 4 {
                    return Err(OxiPackError::truncated(i as u64, 4, data.len() - i));
                }
                sink(Token::Run {
                    value: data[i + 2],
                    count: data[i + 3],
                });
                i += 4;
            }
            other => return Err(OxiPackError::invalid_escape(i as u64, other)),
        }
    }

    Ok(())
}

/// Decode escape-based RLE data.
///
/// # Errors
///
/// - [`OxiPackError::InvalidEscape`] for an escape followed by a marker other
///   than `0x00` or `0xFF`
/// - [`OxiPackError::TruncatedFrame`] for an escape sequence cut short by the
///   end of input
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut result = Vec::with_capacity(data.len() * 2);
    walk(data, |token| match token {
        Token::Literal(byte) => result.push(byte),
        Token::Run { value, count } => {
            result.resize(result.len() + count as usize, value);
        }
    })?;
    Ok(result)
}

/// Check that `data` is a well-formed RLE stream without expanding it.
pub fn validate(data: &[u8]) -> Result<()> {
    walk(data, |_| {})
}

/// Length of the decoded output, computed without expanding runs.
pub fn decoded_len(data: &[u8]) -> Result<usize> {
    let mut len = 0usize;
    walk(data, |token| match token {
        Token::Literal(_) => len += 1,
        Token::Run { count, .. } => len += count as usize,
    })?;
    Ok(len)
}
