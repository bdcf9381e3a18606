//! 4-bit packing, high nibble first.
//!
//! Two nibbles share a byte: the first in the high half, the second in the
//! low half. An odd count leaves a zero padding nibble in the low half of the
//! last byte, which readers skip.
//!
//! Values wider than one nibble are written most significant nibble first by
//! [`NibbleWriter::write`] and read back with [`NibbleReader::read`].

use crate::error::{OxiPackError, Result};

/// Number of nibbles needed to hold `max_value`.
pub fn nibbles_for(max_value: u32) -> u8 {
    ((32 - max_value.leading_zeros()) as u8).div_ceil(4)
}

/// Nibble writer, high nibble first.
#[derive(Debug, Default)]
pub struct NibbleWriter {
    /// Output buffer.
    output: Vec<u8>,
    /// Whether the last byte still has a free low nibble.
    half: bool,
    /// Total nibbles written.
    count: u64,
}

impl NibbleWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `nibbles` nibbles.
    pub fn with_capacity(nibbles: usize) -> Self {
        Self {
            output: Vec::with_capacity(nibbles.div_ceil(2)),
            ..Self::default()
        }
    }

    /// Write a single nibble.
    #[inline]
    pub fn push(&mut self, nibble: u8) {
        let nibble = nibble & 0x0F;
        if self.half {
            if let Some(last) = self.output.last_mut() {
                *last |= nibble;
            }
        } else {
            self.output.push(nibble << 4);
        }
        self.half = !self.half;
        self.count += 1;
    }

    /// Write the low `nibbles` nibbles of `value`, most significant first.
    pub fn write(&mut self, value: u32, nibbles: u8) {
        for i in (0..nibbles).rev() {
            self.push(((value >> (4 * u32::from(i))) & 0x0F) as u8);
        }
    }

    /// Total nibbles written.
    pub fn nibbles_written(&self) -> u64 {
        self.count
    }

    /// Finish and return the packed bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.output
    }
}

/// Nibble reader, high nibble first.
#[derive(Debug)]
pub struct NibbleReader<'a> {
    /// Packed input.
    data: &'a [u8],
    /// Next nibble index.
    pos: usize,
}

impl<'a> NibbleReader<'a> {
    /// Create a reader over packed nibbles.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Read one nibble.
    #[inline]
    pub fn next_nibble(&mut self) -> Result<u8> {
        let byte = self.data.get(self.pos / 2).copied().ok_or_else(|| {
            OxiPackError::truncated((self.pos / 2) as u64, 1, 0)
        })?;
        let nibble = if self.pos % 2 == 0 { byte >> 4 } else { byte & 0x0F };
        self.pos += 1;
        Ok(nibble)
    }

    /// Read a value of `nibbles` nibbles, most significant first.
    pub fn read(&mut self, nibbles: u8) -> Result<u32> {
        let mut value = 0u32;
        for _ in 0..nibbles {
            value = (value << 4) | u32::from(self.next_nibble()?);
        }
        Ok(value)
    }

    /// Nibbles consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Nibbles left in the input, including any padding.
    pub fn remaining(&self) -> usize {
        self.data.len() * 2 - self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibbles_for() {
        assert_eq!(nibbles_for(0), 0);
        assert_eq!(nibbles_for(1), 1);
        assert_eq!(nibbles_for(15), 1);
        assert_eq!(nibbles_for(16), 2);
        assert_eq!(nibbles_for(255), 2);
        assert_eq!(nibbles_for(256), 3);
        assert_eq!(nibbles_for(u32::MAX), 8);
    }

    #[test]
    fn test_multi_nibble_values() {
        let mut writer = NibbleWriter::new();
        writer.write(0xABC, 3);
        writer.write(0x5, 1);
        writer.write(0x0, 0);
        writer.write(0x1F, 2);
        assert_eq!(writer.nibbles_written(), 6);
        let packed = writer.into_vec();
        assert_eq!(packed, vec![0xAB, 0xC5, 0x1F]);

        let mut reader = NibbleReader::new(&packed);
        assert_eq!(reader.read(3).unwrap(), 0xABC);
        assert_eq!(reader.read(1).unwrap(), 0x5);
        assert_eq!(reader.read(0).unwrap(), 0x0);
        assert_eq!(reader.read(2).unwrap(), 0x1F);
        assert_eq!(reader.remaining(), 0);
        assert!(reader.next_nibble().is_err());
    }

    #[test]
    fn test_odd_count_pads_low_half() {
        let values = [1u8, 2, 3, 4, 5];
        let mut writer = NibbleWriter::with_capacity(values.len());
        for &v in &values {
            writer.push(v);
        }
        let packed = writer.into_vec();
        assert_eq!(packed, vec![0x12, 0x34, 0x50]);

        let mut reader = NibbleReader::new(&packed);
        assert_eq!(reader.read(5).unwrap(), 0x12345);
        assert_eq!(reader.remaining(), 1);
    }
}
