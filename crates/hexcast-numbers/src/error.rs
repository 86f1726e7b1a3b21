//! Error types for hexcast-numbers.

use num_bigint::BigInt;
use thiserror::Error;

/// Result type for decomposition and literal table operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decomposing a number or loading a table.
#[derive(Debug, Error)]
pub enum Error {
    /// Integer too large for the algebraic search.
    #[error("{0} is outside the supported integer range")]
    OutOfRange(BigInt),

    /// The recursion went deeper than the configured limit.
    #[error("decomposition exceeded maximum depth {0}")]
    DepthExceeded(usize),

    /// A literal the decomposition needs is missing from the table.
    #[error("literal table has no entry for {0}")]
    MissingLiteral(BigInt),

    #[error("division by zero")]
    DivisionByZero,

    /// Exponent that is negative, fractional or too large.
    #[error("unsupported exponent {0}")]
    UnsupportedExponent(String),

    /// Literal table entry whose pattern does not decode to its key.
    #[error("invalid literal table entry {key}: {reason}")]
    InvalidEntry { key: String, reason: String },

    #[error("invalid literal table: {0}")]
    Json(#[from] serde_json::Error),
}
