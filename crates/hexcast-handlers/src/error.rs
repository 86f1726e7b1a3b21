//! Error types for hexcast-handlers.

use thiserror::Error;

/// Result type for special handler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned when generating a pattern from a handler argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Mask argument that is empty or contains something other than `-`/`v`.
    #[error("invalid mask {0:?}: expected a non-empty string of '-' and 'v'")]
    InvalidMask(String),

    /// Argument that does not read as a number.
    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    /// The value is well-formed but no single literal pattern encodes it.
    #[error("no literal pattern encodes {0}")]
    NoLiteral(String),
}
