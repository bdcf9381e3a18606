//! # OxiPack Core
//!
//! Core components shared by the OxiPack codecs and container layer.
//!
//! - [`error`]: Error types
//! - [`outcome`]: [`Outcome`] for operations that may decline an input
//! - [`frame`]: Length-prefixed single-block and chunked-stream framing
//! - [`nibble`]: 4-bit packing used by the tANS digit stream
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Tools                                               │
//! │     oxipack CLI, batch fan-out                          │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Container                                           │
//! │     Method registry, payload layouts, pipelines         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Codec                                               │
//! │     RLE, LZW (serial + chunk-parallel), tANS            │
//! ├─────────────────────────────────────────────────────────┤
//! │ L0: Framing (this crate)                                │
//! │     ByteReader, chunk frames, nibble packing            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxipack_core::frame::{read_chunked, write_chunked};
//!
//! let mut framed = Vec::new();
//! write_chunked(&mut framed, b"Hello, World!", 4).unwrap();
//! assert_eq!(read_chunked(&framed).unwrap(), b"Hello, World!");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod frame;
pub mod nibble;
pub mod outcome;

// Re-exports for convenience
pub use error::{OxiPackError, Result};
pub use frame::{ByteReader, DEFAULT_CHUNK_SIZE};
pub use nibble::{NibbleReader, NibbleWriter};
pub use outcome::{Outcome, Unsuitable};
