//! # OxiPack-RLE: Escape-Based Run-Length Encoding
//!
//! Byte-oriented RLE where `0x00` is reserved as an escape lead byte.
//!
//! ## Format
//!
//! | Input                        | Encoded                          |
//! |------------------------------|----------------------------------|
//! | run of ≥ 4 copies of `v`     | `0x00 0xFF v n` per ≤ 255 bytes  |
//! | literal non-zero byte `b`    | `b`                              |
//! | literal `0x00`               | `0x00 0x00`                      |
//!
//! Runs shorter than 4 are written literally. A run of 260 becomes two run
//! records (255 + 5).
//!
//! ## Example
//!
//! ```rust
//! use oxipack_rle::{decode, encode};
//!
//! let original = b"AAAAAAAABCD\0";
//! let encoded = encode(original);
//! assert_eq!(&encoded[..4], &[0x00, 0xFF, b'A', 8]);
//! assert_eq!(decode(&encoded).unwrap(), original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod decode;
mod encode;

pub use decode::{decode, decoded_len, validate};
pub use encode::{encode, encode_into};

/// Escape lead byte.
pub const ESCAPE: u8 = 0x00;

/// Marker following [`ESCAPE`] for a run record.
pub const RUN_MARKER: u8 = 0xFF;

/// Minimum run length stored as a run record.
pub const MIN_RUN: usize = 4;

/// Maximum run length of a single run record.
pub const MAX_RUN: usize = 255;
