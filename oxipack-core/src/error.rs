//! Error types for OxiPack operations.
//!
//! Every fatal condition of the codecs and the container layer is a variant
//! of [`OxiPackError`]. The non-fatal "cannot entropy-code this input"
//! condition is not an error; see [`crate::outcome`].

use std::io;
use thiserror::Error;

/// The main error type for OxiPack operations.
#[derive(Debug, Error)]
pub enum OxiPackError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unknown compression method name.
    #[error("Unsupported compression method: {method}")]
    UnsupportedMethod {
        /// The method name that was requested.
        method: String,
    },

    /// Magic token does not belong to any known method.
    #[error("Unknown magic header: {found:02x?}")]
    UnknownMagic {
        /// Magic bytes found at the start of the container.
        found: Vec<u8>,
    },

    /// Compression was requested for an empty input.
    #[error("Input is empty and cannot be compressed")]
    EmptyInput,

    /// A length-prefixed frame or fixed field ended early.
    #[error("Truncated data at offset {offset}: need {needed} bytes, have {available}")]
    TruncatedFrame {
        /// Byte offset where the read started.
        offset: u64,
        /// Number of bytes the field requires.
        needed: usize,
        /// Number of bytes actually available.
        available: usize,
    },

    /// RLE escape byte followed by an unknown marker.
    #[error("Invalid escape sequence at offset {offset}: 0x00 0x{marker:02x}")]
    InvalidEscape {
        /// Byte offset of the escape byte.
        offset: u64,
        /// The marker byte that followed it.
        marker: u8,
    },

    /// LZW code that is neither known nor the next code to be assigned.
    #[error("Invalid LZW code {code} at index {index} (next code {next_code})")]
    InvalidCode {
        /// Position of the code in the code stream.
        index: u64,
        /// The offending code.
        code: u16,
        /// The next code the dictionary would have assigned.
        next_code: u32,
    },

    /// tANS state outside `[0, table_size)`.
    #[error("tANS state {state} out of bounds at symbol index {index} (table size {table_size})")]
    InvalidState {
        /// Symbol index at which the state was observed.
        index: u64,
        /// The offending state.
        state: u64,
        /// Table size of the coder.
        table_size: u32,
    },

    /// tANS digit outside the range allowed for the decoded symbol.
    #[error("tANS digit {digit} out of range at symbol index {index} (limit {limit})")]
    InvalidDigit {
        /// Symbol index at which the digit was read.
        index: u64,
        /// The offending digit.
        digit: u32,
        /// Exclusive upper bound for the digit.
        limit: u32,
    },

    /// Corrupted data in a container.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptedData {
        /// Byte offset where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// Invalid configuration parameter.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },

    /// A pipeline stage failed; carries the method and stage for diagnosis.
    #[error("{method}: {stage} stage failed: {source}")]
    Stage {
        /// Method name (e.g. `rle+lzw`).
        method: &'static str,
        /// Stage name (e.g. `lzw`).
        stage: &'static str,
        /// Underlying failure.
        #[source]
        source: Box<OxiPackError>,
    },
}

/// Result type alias for OxiPack operations.
pub type Result<T> = std::result::Result<T, OxiPackError>;

impl OxiPackError {
    /// Create an unsupported method error.
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Create an unknown magic error.
    pub fn unknown_magic(found: impl Into<Vec<u8>>) -> Self {
        Self::UnknownMagic {
            found: found.into(),
        }
    }

    /// Create a truncated frame error.
    pub fn truncated(offset: u64, needed: usize, available: usize) -> Self {
        Self::TruncatedFrame {
            offset,
            needed,
            available,
        }
    }

    /// Create an invalid RLE escape error.
    pub fn invalid_escape(offset: u64, marker: u8) -> Self {
        Self::InvalidEscape { offset, marker }
    }

    /// Create an invalid LZW code error.
    pub fn invalid_code(index: u64, code: u16, next_code: u32) -> Self {
        Self::InvalidCode {
            index,
            code,
            next_code,
        }
    }

    /// Create an invalid tANS state error.
    pub fn invalid_state(index: u64, state: u64, table_size: u32) -> Self {
        Self::InvalidState {
            index,
            state,
            table_size,
        }
    }

    /// Create an invalid tANS digit error.
    pub fn invalid_digit(index: u64, digit: u32, limit: u32) -> Self {
        Self::InvalidDigit {
            index,
            digit,
            limit,
        }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Attach method and stage context to a failure.
    pub fn in_stage(self, method: &'static str, stage: &'static str) -> Self {
        Self::Stage {
            method,
            stage,
            source: Box::new(self),
        }
    }

    /// Byte (or symbol/code) offset of the failure, when one is known.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::TruncatedFrame { offset, .. }
            | Self::InvalidEscape { offset, .. }
            | Self::CorruptedData { offset, .. } => Some(*offset),
            Self::InvalidCode { index, .. }
            | Self::InvalidState { index, .. }
            | Self::InvalidDigit { index, .. } => Some(*index),
            Self::Stage { source, .. } => source.offset(),
            _ => None,
        }
    }

    /// Whether this is a usage error rejected before any work started.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedMethod { .. } | Self::EmptyInput | Self::InvalidConfig { .. }
        )
    }
}
