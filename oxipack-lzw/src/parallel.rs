//! Chunk-parallel LZW.
//!
//! The input is split into fixed-size blocks and each block is encoded with
//! its own fresh dictionary. No dictionary state crosses a block boundary,
//! so blocks can be encoded and decoded independently and in any order.
//! Compression ratio is lower than whole-input LZW; that is the price of the
//! independence.
//!
//! ## Frame layout
//!
//! ```text
//! [count0: u32 BE][count0 x code: u16 BE][count1: u32 BE][count1 x code] ...
//! ```
//!
//! Blocks appear in original order. The order is part of the layout, not a
//! consequence of worker scheduling.

use crate::codes::CODE_BYTES;
use crate::config::LzwConfig;
use crate::decoder::LzwDecoder;
use crate::encoder::LzwEncoder;
use oxipack_core::{ByteReader, OxiPackError, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Encode each `config.block_size` block of `input` independently.
///
/// Returns one code vector per block, in block order.
pub fn encode_blocks(input: &[u8], config: LzwConfig) -> Result<Vec<Vec<u16>>> {
    config.validate()?;

    #[cfg(feature = "parallel")]
    let chunks = input.par_chunks(config.block_size);
    #[cfg(not(feature = "parallel"))]
    let chunks = input.chunks(config.block_size);

    chunks
        .map(|block| -> Result<Vec<u16>> { Ok(LzwEncoder::new(config)?.encode(block)) })
        .collect()
}

/// Decode independently encoded blocks and concatenate them in block order.
pub fn decode_blocks(blocks: &[Vec<u16>], config: LzwConfig) -> Result<Vec<u8>> {
    config.validate()?;
    decode_blocks_with(blocks, |codes| LzwDecoder::new(config)?.decode(codes))
}

fn decode_blocks_with<F>(blocks: &[Vec<u16>], decode: F) -> Result<Vec<u8>>
where
    F: Fn(&[u16]) -> Result<Vec<u8>> + Sync + Send,
{
    // Code index of each block's first code, for error reporting.
    let mut starts = Vec::with_capacity(blocks.len());
    let mut total = 0u64;
    for block in blocks {
        starts.push(total);
        total += block.len() as u64;
    }

    #[cfg(feature = "parallel")]
    let iter = blocks.par_iter().zip(starts.par_iter());
    #[cfg(not(feature = "parallel"))]
    let iter = blocks.iter().zip(starts.iter());

    // `collect` keeps block order whatever order the workers finish in.
    let decoded: Vec<Vec<u8>> = iter
        .map(|(codes, &start)| decode(codes).map_err(|err| rebase(err, start)))
        .collect::<Result<_>>()?;

    Ok(decoded.concat())
}

/// Shift a block-local code index to a stream-global one.
fn rebase(err: OxiPackError, start: u64) -> OxiPackError {
    match err {
        OxiPackError::InvalidCode {
            index,
            code,
            next_code,
        } => OxiPackError::invalid_code(start + index, code, next_code),
        other => other,
    }
}

/// Serialize blocks as `(count, codes...)` records.
pub fn blocks_to_frame(blocks: &[Vec<u16>]) -> Result<Vec<u8>> {
    let total: usize = blocks.iter().map(|b| 4 + b.len() * CODE_BYTES).sum();
    let mut out = Vec::with_capacity(total);

    for block in blocks {
        let count = u32::try_from(block.len()).map_err(|_| {
            OxiPackError::invalid_config(format!("block of {} codes is too large", block.len()))
        })?;
        out.extend_from_slice(&count.to_be_bytes());
        for &code in block {
            out.extend_from_slice(&code.to_be_bytes());
        }
    }

    Ok(out)
}

/// Parse a frame written by [`blocks_to_frame`].
pub fn blocks_from_frame(frame: &[u8]) -> Result<Vec<Vec<u16>>> {
    let mut reader = ByteReader::new(frame);
    let mut blocks = Vec::new();

    while !reader.is_empty() {
        let count = reader.read_u32_be()? as usize;
        let offset = reader.offset();
        let Some(len) = count.checked_mul(CODE_BYTES) else {
            return Err(OxiPackError::corrupted(offset, "block code count overflows"));
        };
        let bytes = reader.read_slice(len)?;
        blocks.push(
            bytes
                .chunks_exact(CODE_BYTES)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect(),
        );
    }

    Ok(blocks)
}

/// Chunk-parallel compression straight to frame bytes.
pub fn compress_parallel(input: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    blocks_to_frame(&encode_blocks(input, config)?)
}

/// Decompress frame bytes written by [`compress_parallel`].
pub fn decompress_parallel(frame: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    decode_blocks(&blocks_from_frame(frame)?, config)
}
