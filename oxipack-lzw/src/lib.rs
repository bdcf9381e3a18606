//! # OxiPack-LZW: Pure Rust 16-bit LZW
//!
//! This crate provides LZW (Lempel-Ziv-Welch) dictionary coding over byte
//! streams, producing a sequence of 16-bit codes.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **16-bit codes**: Dictionary capped at 65536 entries; once full, no
//!   further entries are added and encoding continues with existing ones
//! - **Chunk-parallel variant**: 64 KiB blocks, each with a fresh dictionary,
//!   encoded and decoded on the rayon pool (`parallel` feature, on by default)
//!
//! ## Code Stream
//!
//! - Codes 0-255 are the single bytes
//! - No clear or end-of-information codes; the stream ends with the input
//! - Codes serialize as 2-byte big-endian values ([`codes_to_bytes`])
//!
//! ## Example
//!
//! ```rust
//! use oxipack_lzw::{compress, decompress, LzwConfig};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//! let codes = compress(original, LzwConfig::DEFAULT).unwrap();
//! assert_eq!(codes.len(), 16);
//!
//! let decompressed = decompress(&codes, LzwConfig::DEFAULT).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Chunk-Parallel Example
//!
//! ```rust
//! use oxipack_lzw::{compress_parallel, decompress_parallel, LzwConfig};
//!
//! let original = b"This is a test of compression! ".repeat(5000);
//! let frame = compress_parallel(&original, LzwConfig::DEFAULT).unwrap();
//! let decompressed = decompress_parallel(&frame, LzwConfig::DEFAULT).unwrap();
//! assert_eq!(decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod codes;
mod config;
mod decoder;
mod dictionary;
mod encoder;
mod parallel;

pub use codes::{CODE_BYTES, codes_from_bytes, codes_to_bytes};
pub use config::{DEFAULT_BLOCK_SIZE, LzwConfig, MAX_DICT_SIZE};
pub use decoder::LzwDecoder;
pub use dictionary::LzwDictionary;
pub use encoder::LzwEncoder;
pub use oxipack_core::{OxiPackError, Result};
pub use parallel::{
    blocks_from_frame, blocks_to_frame, compress_parallel, decode_blocks, decompress_parallel,
    encode_blocks,
};

/// Compress data to LZW codes with the given configuration.
///
/// # Example
///
/// ```rust
/// use oxipack_lzw::{compress, LzwConfig};
///
/// let codes = compress(b"AABB", LzwConfig::DEFAULT).unwrap();
/// assert_eq!(codes, vec![65, 65, 66, 66]);
/// ```
pub fn compress(data: &[u8], config: LzwConfig) -> Result<Vec<u16>> {
    let mut encoder = LzwEncoder::new(config)?;
    Ok(encoder.encode(data))
}

/// Decompress LZW codes with the given configuration.
pub fn decompress(codes: &[u16], config: LzwConfig) -> Result<Vec<u8>> {
    let mut decoder = LzwDecoder::new(config)?;
    decoder.decode(codes)
}

/// Compress to serialized 2-byte codes (convenience function).
pub fn compress_to_bytes(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    Ok(codes_to_bytes(&compress(data, config)?))
}

/// Decompress serialized 2-byte codes (convenience function).
pub fn decompress_from_bytes(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    decompress(&codes_from_bytes(data)?, config)
}
