//! Byte-oriented framing helpers.
//!
//! Two payload framings are used by the containers:
//!
//! - **Single block**: a 4-byte big-endian length followed by that many bytes.
//! - **Chunked stream**: repeated `(4-byte big-endian length, bytes)` frames
//!   until the end of input. A reader reconstructs the payload purely by
//!   sequential reads.
//!
//! ```text
//! chunked: [len0][bytes0][len1][bytes1] ... <end of input>
//! single:  [len][bytes]
//! ```
//!
//! [`ByteReader`] is the big-endian cursor used to parse both framings and
//! the fixed header fields of the containers. It tracks the absolute offset
//! so errors can point at the failing byte.

use crate::error::{OxiPackError, Result};

/// Default maximum payload size of a single chunk frame (256 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1 << 18;

/// Size of a frame length prefix.
pub const LENGTH_PREFIX: usize = 4;

/// Big-endian cursor over a byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Current position within `data`.
    pos: usize,
    /// Absolute offset of `data[0]` (for error reporting).
    base: u64,
}

impl<'a> ByteReader<'a> {
    /// Create a reader at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    /// Create a reader whose reported offsets start at `base`.
    pub fn with_base(data: &'a [u8], base: u64) -> Self {
        Self { data, pos: 0, base }
    }

    /// Absolute offset of the next byte.
    pub fn offset(&self) -> u64 {
        self.base + self.pos as u64
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether all bytes have been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read exactly `len` bytes.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(OxiPackError::truncated(
                self.offset(),
                len,
                self.remaining(),
            ));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Read the rest of the input.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let slice = &self.data[self.pos..];
        self.pos = self.data.len();
        slice
    }

    /// Read a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.read_slice(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a big-endian `u16`.
    pub fn read_u16_be(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian `u32`.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Read one single-block frame (length prefix + payload).
    pub fn read_block(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u32_be()? as usize;
        self.read_slice(len)
    }

    /// Read chunk frames until end of input and concatenate their payloads.
    ///
    /// An incomplete length prefix or a short payload is a fatal error.
    pub fn read_chunked(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.remaining());
        while !self.is_empty() {
            out.extend_from_slice(self.read_block()?);
        }
        Ok(out)
    }
}

/// Append a single-block frame.
pub fn write_block(out: &mut Vec<u8>, data: &[u8]) -> Result<()> {
    let len = frame_len(data.len())?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(data);
    Ok(())
}

/// Append `data` as a chunked stream with frames of at most `chunk_size` bytes.
///
/// Empty data produces no frames.
pub fn write_chunked(out: &mut Vec<u8>, data: &[u8], chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(OxiPackError::invalid_config("chunk size must be non-zero"));
    }
    frame_len(chunk_size.min(data.len()))?;

    out.reserve(data.len() + data.len().div_ceil(chunk_size) * LENGTH_PREFIX);
    for chunk in data.chunks(chunk_size) {
        out.extend_from_slice(&(chunk.len() as u32).to_be_bytes());
        out.extend_from_slice(chunk);
    }
    Ok(())
}

/// Parse a complete chunked stream.
pub fn read_chunked(data: &[u8]) -> Result<Vec<u8>> {
    ByteReader::new(data).read_chunked()
}

fn frame_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        OxiPackError::invalid_config(format!("frame of {len} bytes exceeds the 4-byte length field"))
    })
}
