//! Result type for operations that may legitimately decline to apply.
//!
//! Entropy coding refuses some inputs (too few symbols, too skewed, table
//! too large). That refusal is an expected outcome rather than a failure,
//! so it travels in [`Outcome::Unsuitable`] instead of an error variant and
//! callers have to handle it explicitly.

use std::fmt;

/// Why an input cannot be entropy coded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unsuitable {
    /// The implied table size exceeds the configured maximum.
    TableTooLarge {
        /// Implied table size (next power of two of the symbol total).
        table_size: u64,
        /// Configured maximum.
        max: u32,
    },
    /// Fewer than two distinct symbols are present.
    TooFewSymbols {
        /// Number of distinct symbols found.
        distinct: usize,
    },
    /// One symbol dominates the distribution.
    TooSkewed {
        /// The dominating symbol.
        symbol: u8,
        /// Its share of the total, in `[0, 1]`.
        share: f64,
        /// Configured maximum share.
        max_share: f64,
    },
}

impl fmt::Display for Unsuitable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TableTooLarge { table_size, max } => {
                write!(f, "table size {table_size} exceeds maximum {max}")
            }
            Self::TooFewSymbols { distinct } => {
                write!(f, "only {distinct} distinct symbol(s), need at least 2")
            }
            Self::TooSkewed {
                symbol,
                share,
                max_share,
            } => write!(
                f,
                "symbol 0x{symbol:02x} holds {:.1}% of the input (limit {:.1}%)",
                share * 100.0,
                max_share * 100.0
            ),
        }
    }
}

/// Result of an operation that can be declined without failing.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The operation ran to completion.
    Complete(T),
    /// The input is not suitable for this operation.
    Unsuitable(Unsuitable),
}

impl<T> Outcome<T> {
    /// Whether the operation completed.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Whether the operation was declined.
    pub fn is_unsuitable(&self) -> bool {
        matches!(self, Self::Unsuitable(_))
    }

    /// Convert into an `Option`, discarding the reason for unsuitability.
    pub fn complete(self) -> Option<T> {
        match self {
            Self::Complete(value) => Some(value),
            Self::Unsuitable(_) => None,
        }
    }

    /// Map the completed value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Complete(value) => Outcome::Complete(f(value)),
            Self::Unsuitable(reason) => Outcome::Unsuitable(reason),
        }
    }
}
