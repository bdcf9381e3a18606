//! Compression methods and their magic tokens.

use oxipack_core::{OxiPackError, Result};
use std::fmt;
use std::str::FromStr;

/// Length of every magic token.
pub const MAGIC_LEN: usize = 4;

/// One codec step of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Run-length encoding.
    Rle,
    /// LZW dictionary coding.
    Lzw,
    /// tANS entropy coding.
    Tans,
}

impl Stage {
    /// Lowercase stage name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rle => "rle",
            Self::Lzw => "lzw",
            Self::Tans => "tans",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the output of the last stage is laid out after the magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// One length-prefixed block.
    Block,
    /// Length-prefixed chunks until end of input.
    Chunked,
    /// tANS header followed by chunked digits.
    Tans,
}

/// The seven supported compression pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Chunk-parallel LZW.
    Lzw,
    /// RLE only.
    Rle,
    /// RLE, then whole-input LZW.
    RleLzw,
    /// tANS only.
    Tans,
    /// RLE, then tANS.
    RleTans,
    /// Whole-input LZW, then tANS.
    LzwTans,
    /// RLE, then whole-input LZW, then tANS.
    RleLzwTans,
}

impl Method {
    /// All methods, in display order.
    pub const ALL: [Method; 7] = [
        Self::Lzw,
        Self::Rle,
        Self::RleLzw,
        Self::Tans,
        Self::RleTans,
        Self::LzwTans,
        Self::RleLzwTans,
    ];

    /// Method name as used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lzw => "lzw",
            Self::Rle => "rle",
            Self::RleLzw => "rle+lzw",
            Self::Tans => "tans",
            Self::RleTans => "rle+tans",
            Self::LzwTans => "lzw+tans",
            Self::RleLzwTans => "rle+lzw+tans",
        }
    }

    /// 4-byte magic token written at the start of the container.
    pub fn magic(&self) -> &'static [u8; MAGIC_LEN] {
        match self {
            Self::Lzw => b"LZ__",
            Self::Rle => b"rle_",
            Self::RleLzw => b"MLZW",
            Self::Tans => b"TANS",
            Self::RleTans => b"RTNS",
            Self::LzwTans => b"LTNS",
            Self::RleLzwTans => b"RLTN",
        }
    }

    /// Stages applied during compression, in order.
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            Self::Lzw => &[Stage::Lzw],
            Self::Rle => &[Stage::Rle],
            Self::RleLzw => &[Stage::Rle, Stage::Lzw],
            Self::Tans => &[Stage::Tans],
            Self::RleTans => &[Stage::Rle, Stage::Tans],
            Self::LzwTans => &[Stage::Lzw, Stage::Tans],
            Self::RleLzwTans => &[Stage::Rle, Stage::Lzw, Stage::Tans],
        }
    }

    /// Payload layout after the magic.
    pub fn framing(&self) -> Framing {
        match self {
            Self::Lzw => Framing::Block,
            Self::Rle | Self::RleLzw => Framing::Chunked,
            Self::Tans | Self::RleTans | Self::LzwTans | Self::RleLzwTans => Framing::Tans,
        }
    }

    /// Whether the LZW stage uses the chunk-parallel frame.
    ///
    /// Only the plain `lzw` method does; combined methods code the whole
    /// input with one dictionary.
    pub fn parallel_lzw(&self) -> bool {
        matches!(self, Self::Lzw)
    }

    /// Whether the pipeline ends in tANS and may be declined.
    pub fn uses_tans(&self) -> bool {
        self.stages().contains(&Stage::Tans)
    }

    /// Look up a method from its magic token.
    pub fn from_magic(magic: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| magic.len() >= MAGIC_LEN && m.magic()[..] == magic[..MAGIC_LEN])
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = OxiPackError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| OxiPackError::unsupported_method(s))
    }
}
