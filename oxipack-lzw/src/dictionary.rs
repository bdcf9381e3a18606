//! LZW dictionary (code table) management.
//!
//! Entries are stored as `(prefix code, last byte)` pairs, so a string of any
//! length costs a constant amount of memory. The encoder additionally keeps a
//! reverse map from `(prefix, byte)` to code.

use crate::config::{LzwConfig, ROOT_CODES};
use std::collections::HashMap;

/// One dictionary entry.
#[derive(Debug, Clone, Copy)]
struct Entry {
    /// Code of the string without its last byte (unused for root codes).
    prefix: u16,
    /// Last byte of the string.
    byte: u8,
    /// First byte of the string.
    first: u8,
    /// String length in bytes.
    len: u32,
}

/// LZW dictionary for encoding and decoding.
#[derive(Debug)]
pub struct LzwDictionary {
    /// Code table: code -> entry.
    table: Vec<Entry>,
    /// Reverse lookup: (prefix << 8 | byte) -> code (encoding only).
    reverse: HashMap<u32, u16>,
    /// Dictionary cap.
    max_size: u32,
}

#[inline]
fn key(prefix: u16, byte: u8) -> u32 {
    (u32::from(prefix) << 8) | u32::from(byte)
}

impl LzwDictionary {
    /// Create a new dictionary seeded with the 256 single-byte codes.
    pub fn new(config: LzwConfig) -> Self {
        let mut dict = Self {
            table: Vec::with_capacity(config.max_dict_size as usize),
            reverse: HashMap::new(),
            max_size: config.max_dict_size,
        };
        dict.reset();
        dict
    }

    /// Reset the dictionary to its initial state.
    pub fn reset(&mut self) {
        self.table.clear();
        self.reverse.clear();

        for i in 0..ROOT_CODES {
            let byte = i as u8;
            self.table.push(Entry {
                prefix: 0,
                byte,
                first: byte,
                len: 1,
            });
        }
    }

    /// Find the code of `prefix` extended by `byte` (for encoding).
    #[inline]
    pub fn find(&self, prefix: u16, byte: u8) -> Option<u16> {
        self.reverse.get(&key(prefix, byte)).copied()
    }

    /// Add `prefix + byte` to the dictionary (for encoding).
    ///
    /// Returns the assigned code, or `None` once the cap is reached.
    pub fn add_encode(&mut self, prefix: u16, byte: u8) -> Option<u16> {
        let code = self.push(prefix, byte)?;
        self.reverse.insert(key(prefix, byte), code);
        Some(code)
    }

    /// Add `prefix + byte` to the dictionary (for decoding).
    ///
    /// Like [`add_encode`](Self::add_encode) but doesn't update the reverse map.
    pub fn add_decode(&mut self, prefix: u16, byte: u8) -> Option<u16> {
        self.push(prefix, byte)
    }

    fn push(&mut self, prefix: u16, byte: u8) -> Option<u16> {
        if self.is_full() {
            return None;
        }
        let parent = self.table[prefix as usize];
        let code = self.table.len() as u16;
        self.table.push(Entry {
            prefix,
            byte,
            first: parent.first,
            len: parent.len + 1,
        });
        Some(code)
    }

    /// Whether `code` is assigned.
    #[inline]
    pub fn contains(&self, code: u16) -> bool {
        (code as usize) < self.table.len()
    }

    /// First byte of the string for `code`. The code must be assigned.
    #[inline]
    pub fn first_byte(&self, code: u16) -> u8 {
        self.table[code as usize].first
    }

    /// Length of the string for `code`. The code must be assigned.
    #[inline]
    pub fn string_len(&self, code: u16) -> usize {
        self.table[code as usize].len as usize
    }

    /// Append the string for `code` to `out`. The code must be assigned.
    pub fn write_string(&self, code: u16, out: &mut Vec<u8>) {
        let len = self.string_len(code);
        let start = out.len();
        out.resize(start + len, 0);

        // Walk the prefix chain backwards, filling from the end.
        let mut pos = start + len;
        let mut current = code;
        loop {
            let entry = self.table[current as usize];
            pos -= 1;
            out[pos] = entry.byte;
            if entry.len == 1 {
                break;
            }
            current = entry.prefix;
        }
    }

    /// Check if the dictionary is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.table.len() as u32 >= self.max_size
    }

    /// Get the next code that will be assigned.
    #[inline]
    pub fn next_code(&self) -> u32 {
        self.table.len() as u32
    }

    /// Number of entries, including the 256 root codes.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table has no entries (never after construction).
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_of(dict: &LzwDictionary, code: u16) -> Vec<u8> {
        let mut out = Vec::new();
        dict.write_string(code, &mut out);
        out
    }

    #[test]
    fn test_dictionary_init() {
        let dict = LzwDictionary::new(LzwConfig::DEFAULT);

        for i in 0..256u16 {
            assert_eq!(string_of(&dict, i), vec![i as u8]);
        }
        assert_eq!(dict.next_code(), 256);
        assert_eq!(dict.len(), 256);
    }

    #[test]
    fn test_add_and_find() {
        let mut dict = LzwDictionary::new(LzwConfig::DEFAULT);

        let ab = dict.add_encode(u16::from(b'A'), b'B').unwrap();
        assert_eq!(ab, 256);
        let abc = dict.add_encode(ab, b'C').unwrap();
        assert_eq!(abc, 257);

        assert_eq!(dict.find(u16::from(b'A'), b'B'), Some(ab));
        assert_eq!(dict.find(ab, b'C'), Some(abc));
        assert_eq!(dict.find(ab, b'D'), None);

        assert_eq!(string_of(&dict, abc), b"ABC");
        assert_eq!(dict.first_byte(abc), b'A');
        assert_eq!(dict.string_len(abc), 3);
    }

    #[test]
    fn test_decode_entries_not_searchable() {
        let mut dict = LzwDictionary::new(LzwConfig::DEFAULT);
        let code = dict.add_decode(u16::from(b'X'), b'Y').unwrap();
        assert_eq!(string_of(&dict, code), b"XY");
        assert_eq!(dict.find(u16::from(b'X'), b'Y'), None);
    }

    #[test]
    fn test_cap_stops_growth() {
        let mut dict = LzwDictionary::new(LzwConfig::new(258, 1));
        assert!(dict.add_encode(1, 2).is_some());
        assert!(dict.add_encode(2, 3).is_some());
        assert!(dict.is_full());
        assert!(dict.add_encode(3, 4).is_none());
        assert_eq!(dict.len(), 258);
    }

    #[test]
    fn test_reset() {
        let mut dict = LzwDictionary::new(LzwConfig::DEFAULT);
        dict.add_encode(1, 2);
        dict.reset();
        assert_eq!(dict.next_code(), 256);
        assert_eq!(dict.find(1, 2), None);
    }
}
