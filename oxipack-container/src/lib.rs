//! # OxiPack-Container: Self-Describing Compression Pipelines
//!
//! Composes the RLE, LZW and tANS codecs into seven named pipelines, each
//! with its own 4-byte magic token, so a container can be decoded without
//! any external metadata.
//!
//! ## Methods
//!
//! | Method | Magic | Payload after magic |
//! |--------|-------|---------------------|
//! | `lzw` | `LZ__` | single block of the chunk-parallel LZW frame |
//! | `rle` | `rle_` | chunked RLE bytes |
//! | `rle+lzw` | `MLZW` | chunked LZW code bytes of the RLE output |
//! | `tans` | `TANS` | tANS payload of the raw bytes |
//! | `rle+tans` | `RTNS` | tANS payload of the RLE bytes |
//! | `lzw+tans` | `LTNS` | tANS payload of the LZW code bytes |
//! | `rle+lzw+tans` | `RLTN` | tANS payload of the LZW code bytes of the RLE output |
//!
//! Methods ending in tANS can decline an input (too few symbols, too
//! skewed, table too large). That is reported as [`Outcome::Unsuitable`],
//! never as an error, and no container is produced.
//!
//! ## Example
//!
//! ```rust
//! use oxipack_container::{compress, decompress, Method, Outcome};
//!
//! let input = b"banana bandana cabana ".repeat(50);
//! match compress(&input, Method::RleLzwTans).unwrap() {
//!     Outcome::Complete(container) => {
//!         assert_eq!(&container[..4], b"RLTN");
//!         let restored = decompress(&container).unwrap().complete().unwrap();
//!         assert_eq!(restored, input);
//!     }
//!     Outcome::Unsuitable(reason) => println!("not entropy coded: {reason}"),
//! }
//! ```
//!
//! ## Batches
//!
//! [`batch::compress_batch`] and [`batch::decompress_batch`] fan many
//! inputs out over the rayon pool with per-unit failure isolation and an
//! optional wait bound.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod batch;
mod config;
mod inspect;
mod method;
mod payload;
mod pipeline;

pub use config::PipelineConfig;
pub use inspect::{ContainerInfo, inspect};
pub use method::{Framing, MAGIC_LEN, Method, Stage};
pub use oxipack_core::{OxiPackError, Outcome, Result, Unsuitable};
pub use payload::{TansHeader, read_tans, read_tans_header, write_tans};
pub use pipeline::{CompressionStats, Compressor, Decompressor, compress, decompress};
