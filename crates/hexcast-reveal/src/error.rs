//! Error types for hexcast-reveal.

use thiserror::Error;

/// Result type for reveal parsing.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing a dump.
///
/// Every variant carries the byte offset into the input and the offending
/// text so callers can point at it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("expected {expected} at byte {offset}, found `{fragment}`")]
    Unexpected {
        expected: &'static str,
        offset: usize,
        fragment: String,
    },

    #[error("expected {expected} at end of input")]
    UnexpectedEnd { expected: &'static str, offset: usize },

    /// A string literal with no closing quote.
    #[error("unterminated string at byte {offset}: `{fragment}`")]
    UnterminatedString { offset: usize, fragment: String },

    #[error("invalid pattern at byte {offset}: `{fragment}`: {reason}")]
    InvalidPattern {
        offset: usize,
        fragment: String,
        reason: String,
    },

    #[error("invalid number at byte {offset}: `{fragment}`")]
    InvalidNumber { offset: usize, fragment: String },

    /// Matrix whose entries do not fill its declared shape.
    #[error("matrix at byte {offset} declared {rows}x{cols}: {reason}")]
    MatrixShape {
        offset: usize,
        rows: usize,
        cols: usize,
        reason: String,
    },

    /// Lists nested deeper than the parser accepts.
    #[error("nesting deeper than {limit} at byte {offset}: `{fragment}`")]
    TooDeep {
        offset: usize,
        fragment: String,
        limit: usize,
    },

    /// Input left over after a complete iota.
    #[error("trailing input at byte {offset}: `{fragment}`")]
    Trailing { offset: usize, fragment: String },
}

impl Error {
    /// Byte offset of the problem in the input.
    pub fn offset(&self) -> usize {
        match self {
            Self::Unexpected { offset, .. }
            | Self::UnexpectedEnd { offset, .. }
            | Self::UnterminatedString { offset, .. }
            | Self::InvalidPattern { offset, .. }
            | Self::InvalidNumber { offset, .. }
            | Self::MatrixShape { offset, .. }
            | Self::TooDeep { offset, .. }
            | Self::Trailing { offset, .. } => *offset,
        }
    }

    /// The offending text, if the error points at any.
    pub fn fragment(&self) -> Option<&str> {
        match self {
            Self::Unexpected { fragment, .. }
            | Self::UnterminatedString { fragment, .. }
            | Self::InvalidPattern { fragment, .. }
            | Self::InvalidNumber { fragment, .. }
            | Self::TooDeep { fragment, .. }
            | Self::Trailing { fragment, .. } => Some(fragment),
            Self::UnexpectedEnd { .. } | Self::MatrixShape { .. } => None,
        }
    }
}
