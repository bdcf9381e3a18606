//! Header inspection without decoding.

use crate::method::{Framing, MAGIC_LEN, Method};
use crate::payload::{TansHeader, read_tans_header};
use crate::pipeline::read_single_block;
use oxipack_core::{ByteReader, OxiPackError, Result};

/// What a container declares about itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerInfo {
    /// Method identified by the magic token.
    pub method: Method,
    /// Total container size.
    pub container_size: u64,
    /// Number of length-prefixed frames after the magic (tANS digits for
    /// tANS methods).
    pub frames: usize,
    /// Number of LZW blocks, for the chunk-parallel `lzw` method.
    pub lzw_blocks: Option<usize>,
    /// tANS header fields, for tANS methods.
    pub tans: Option<TansHeader>,
}

impl ContainerInfo {
    /// Symbol count of the tANS stage input, when known.
    pub fn tans_symbols(&self) -> Option<u32> {
        self.tans.as_ref().map(|h| h.length)
    }
}

/// Read a container's magic and headers, checking frame boundaries but not
/// decoding any payload.
pub fn inspect(container: &[u8]) -> Result<ContainerInfo> {
    let method = Method::from_magic(container).ok_or_else(|| {
        OxiPackError::unknown_magic(&container[..container.len().min(MAGIC_LEN)])
    })?;
    let mut reader = ByteReader::with_base(&container[MAGIC_LEN..], MAGIC_LEN as u64);

    let mut lzw_blocks = None;
    let mut tans = None;
    let frames = match method.framing() {
        Framing::Block => {
            let block = read_single_block(&mut reader)?;
            lzw_blocks = Some(oxipack_lzw::blocks_from_frame(block)?.len());
            1
        }
        Framing::Chunked => count_frames(&mut reader)?,
        Framing::Tans => {
            tans = Some(read_tans_header(&mut reader)?);
            count_frames(&mut reader)?
        }
    };

    Ok(ContainerInfo {
        method,
        container_size: container.len() as u64,
        frames,
        lzw_blocks,
        tans,
    })
}

fn count_frames(reader: &mut ByteReader<'_>) -> Result<usize> {
    let mut frames = 0;
    while !reader.is_empty() {
        reader.read_block()?;
        frames += 1;
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::compress;

    #[test]
    fn test_inspect_rle() {
        let container = compress(&[7u8; 100], Method::Rle).unwrap().complete().unwrap();
        let info = inspect(&container).unwrap();
        assert_eq!(info.method, Method::Rle);
        assert_eq!(info.frames, 1);
        assert_eq!(info.container_size, container.len() as u64);
        assert!(info.tans.is_none());
        assert!(info.lzw_blocks.is_none());
    }

    #[test]
    fn test_inspect_lzw_blocks() {
        let input: Vec<u8> = (0..150_000u32).map(|i| (i % 251) as u8).collect();
        let container = compress(&input, Method::Lzw).unwrap().complete().unwrap();
        let info = inspect(&container).unwrap();
        assert_eq!(info.lzw_blocks, Some(3));
    }

    #[test]
    fn test_inspect_tans() {
        let input = b"a stitch in time saves nine".repeat(4);
        let container = compress(&input, Method::Tans).unwrap().complete().unwrap();
        let info = inspect(&container).unwrap();
        let header = info.tans.as_ref().unwrap();
        assert_eq!(header.length as usize, input.len());
        assert_eq!(header.table_size, 128);
        assert_eq!(header.frequencies.get(b't'), 3 * 4);
        assert_eq!(info.tans_symbols(), Some(input.len() as u32));
    }

    #[test]
    fn test_inspect_truncated() {
        let container = compress(&[1u8; 100], Method::Rle).unwrap().complete().unwrap();
        assert!(inspect(&container[..container.len() - 1]).is_err());
        assert!(inspect(b"????").is_err());
    }

    #[test]
    fn test_inspect_agrees_with_decompress_on_trailing_bytes() {
        let mut container = compress(b"hello", Method::Lzw).unwrap().complete().unwrap();
        container.push(0);
        let err = inspect(&container).unwrap_err();
        assert_eq!(err.offset(), Some(container.len() as u64 - 1));
        assert!(crate::pipeline::decompress(&container).is_err());
    }
}
