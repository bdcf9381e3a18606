//! Pipeline dispatcher.
//!
//! Compression applies a method's stages in order and writes the magic token
//! followed by the framed result. Decompression reads the magic, undoes the
//! framing and applies the inverse stages in reverse order.

use crate::config::PipelineConfig;
use crate::method::{Framing, MAGIC_LEN, Method, Stage};
use crate::payload::{read_tans, write_tans};
use oxipack_core::frame::{write_block, write_chunked};
use oxipack_core::{ByteReader, OxiPackError, Outcome, Result};
use oxipack_lzw::LzwConfig;
use std::borrow::Cow;
use tracing::{debug, warn};

/// Stage name used for framing failures.
const FRAME_STAGE: &str = "frame";

/// Size summary of one compression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionStats {
    /// Method used.
    pub method: Method,
    /// Input size in bytes.
    pub original_size: u64,
    /// Container size in bytes.
    pub compressed_size: u64,
}

impl CompressionStats {
    /// Create a summary.
    pub fn new(method: Method, original_size: u64, compressed_size: u64) -> Self {
        Self {
            method,
            original_size,
            compressed_size,
        }
    }

    /// Compressed size divided by original size.
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            self.compressed_size as f64 / self.original_size as f64
        }
    }

    /// Space saved as a percentage (negative when the output grew).
    pub fn savings_percent(&self) -> f64 {
        (1.0 - self.ratio()) * 100.0
    }
}

/// Compresses byte buffers into containers.
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: PipelineConfig,
}

impl Compressor {
    /// Create a compressor after validating `config`.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Compress `input` with `method`.
    ///
    /// Returns [`Outcome::Unsuitable`] when a tANS stage declines its input;
    /// no partial container is produced in that case.
    pub fn compress(&self, input: &[u8], method: Method) -> Result<Outcome<Vec<u8>>> {
        if input.is_empty() {
            return Err(OxiPackError::EmptyInput);
        }

        let mut data = Cow::Borrowed(input);
        for &stage in method.stages() {
            let outcome = self
                .encode_stage(method, stage, &data)
                .map_err(|e| e.in_stage(method.name(), stage.name()))?;
            let produced = match outcome {
                Outcome::Complete(bytes) => bytes,
                Outcome::Unsuitable(reason) => {
                    warn!(method = method.name(), %reason, "tANS stage declined input");
                    return Ok(Outcome::Unsuitable(reason));
                }
            };
            debug!(
                method = method.name(),
                stage = stage.name(),
                input = data.len(),
                output = produced.len(),
                "encoded stage"
            );
            data = Cow::Owned(produced);
        }

        let mut out = Vec::with_capacity(MAGIC_LEN + data.len() + 4);
        out.extend_from_slice(method.magic());
        match method.framing() {
            Framing::Block => write_block(&mut out, &data),
            Framing::Chunked => write_chunked(&mut out, &data, self.config.chunk_size),
            Framing::Tans => {
                out.extend_from_slice(&data);
                Ok(())
            }
        }
        .map_err(|e| e.in_stage(method.name(), FRAME_STAGE))?;

        debug!(
            method = method.name(),
            original = input.len(),
            compressed = out.len(),
            "compressed"
        );
        Ok(Outcome::Complete(out))
    }

    /// Compress and report sizes alongside the container.
    pub fn compress_with_stats(
        &self,
        input: &[u8],
        method: Method,
    ) -> Result<Outcome<(Vec<u8>, CompressionStats)>> {
        Ok(self.compress(input, method)?.map(|container| {
            let stats = CompressionStats::new(method, input.len() as u64, container.len() as u64);
            (container, stats)
        }))
    }

    fn encode_stage(&self, method: Method, stage: Stage, data: &[u8]) -> Result<Outcome<Vec<u8>>> {
        let bytes = match stage {
            Stage::Rle => oxipack_rle::encode(data),
            Stage::Lzw if method.parallel_lzw() => {
                oxipack_lzw::compress_parallel(data, self.config.lzw())?
            }
            Stage::Lzw => oxipack_lzw::compress_to_bytes(data, self.config.lzw())?,
            Stage::Tans => match oxipack_tans::encode(data, &self.config.tans())? {
                Outcome::Complete(stream) => {
                    let mut out = Vec::with_capacity(stream.digits.len() + 1024);
                    write_tans(&mut out, &stream, self.config.chunk_size)?;
                    out
                }
                Outcome::Unsuitable(reason) => return Ok(Outcome::Unsuitable(reason)),
            },
        };
        Ok(Outcome::Complete(bytes))
    }
}

/// Restores the original bytes from containers.
#[derive(Debug, Clone, Default)]
pub struct Decompressor {
    config: PipelineConfig,
}

impl Decompressor {
    /// Create a decompressor after validating `config`.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Decompress a container produced by [`Compressor::compress`].
    ///
    /// Stages decode against the format limits rather than this
    /// decompressor's config, so a container written under any valid config
    /// decodes. An unknown magic token is an error. A tANS header whose
    /// frequency table lies outside the format limits yields
    /// [`Outcome::Unsuitable`]. Corruption errors carry the method and stage that failed.
    pub fn decompress(&self, container: &[u8]) -> Result<Outcome<Vec<u8>>> {
        let method = Method::from_magic(container).ok_or_else(|| {
            OxiPackError::unknown_magic(&container[..container.len().min(MAGIC_LEN)])
        })?;

        let mut reader = ByteReader::with_base(&container[MAGIC_LEN..], MAGIC_LEN as u64);
        let mut data: Cow<'_, [u8]> = match method.framing() {
            Framing::Block => read_single_block(&mut reader).map(Cow::Borrowed),
            Framing::Chunked => reader.read_chunked().map(Cow::Owned),
            Framing::Tans => Ok(Cow::Borrowed(reader.read_rest())),
        }
        .map_err(|e| e.in_stage(method.name(), FRAME_STAGE))?;

        for &stage in method.stages().iter().rev() {
            let outcome = Self::decode_stage(method, stage, &data)
                .map_err(|e| e.in_stage(method.name(), stage.name()))?;
            let produced = match outcome {
                Outcome::Complete(bytes) => bytes,
                Outcome::Unsuitable(reason) => {
                    warn!(method = method.name(), %reason, "tANS header describes an unsuitable table");
                    return Ok(Outcome::Unsuitable(reason));
                }
            };
            debug!(
                method = method.name(),
                stage = stage.name(),
                input = data.len(),
                output = produced.len(),
                "decoded stage"
            );
            data = Cow::Owned(produced);
        }

        Ok(Outcome::Complete(data.into_owned()))
    }

    fn decode_stage(method: Method, stage: Stage, data: &[u8]) -> Result<Outcome<Vec<u8>>> {
        let bytes = match stage {
            Stage::Rle => oxipack_rle::decode(data)?,
            // A decoder at the largest dictionary accepts codes from any
            // smaller cap.
            Stage::Lzw if method.parallel_lzw() => {
                oxipack_lzw::decompress_parallel(data, LzwConfig::DEFAULT)?
            }
            Stage::Lzw => oxipack_lzw::decompress_from_bytes(data, LzwConfig::DEFAULT)?,
            Stage::Tans => {
                // tANS is always the last stage, so its payload follows the magic.
                let stream = read_tans(data, MAGIC_LEN as u64)?;
                return oxipack_tans::decode(&stream);
            }
        };
        Ok(Outcome::Complete(bytes))
    }
}

/// Read one block and require that nothing follows it.
pub(crate) fn read_single_block<'a>(reader: &mut ByteReader<'a>) -> Result<&'a [u8]> {
    let block = reader.read_block()?;
    if !reader.is_empty() {
        return Err(OxiPackError::corrupted(
            reader.offset(),
            format!("{} trailing bytes after single block", reader.remaining()),
        ));
    }
    Ok(block)
}

/// Compress `input` with `method` using the default configuration.
///
/// # Example
///
/// ```rust
/// use oxipack_container::{compress, decompress, Method};
///
/// let container = compress(&[0u8; 10], Method::Rle).unwrap().complete().unwrap();
/// assert_eq!(container, b"rle_\x00\x00\x00\x04\x00\xff\x00\x0a");
/// assert_eq!(decompress(&container).unwrap().complete().unwrap(), vec![0u8; 10]);
/// ```
pub fn compress(input: &[u8], method: Method) -> Result<Outcome<Vec<u8>>> {
    Compressor::default().compress(input, method)
}

/// Decompress a container using the default configuration.
pub fn decompress(container: &[u8]) -> Result<Outcome<Vec<u8>>> {
    Decompressor::default().decompress(container)
}
