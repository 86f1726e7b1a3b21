//! Error types for hexcast-geometry.

use thiserror::Error;

/// Result type for hexcast-geometry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when reading directions and angle signatures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A signature character outside `w e d s a q`.
    #[error("invalid turn {0:?} in angle signature")]
    InvalidTurn(char),

    /// Text that does not name one of the six compass directions.
    #[error("unknown direction {0:?}")]
    UnknownDirection(String),

    /// Text left over after the direction and signature.
    #[error("unexpected {0:?} after pattern")]
    TrailingInput(String),

    /// Pattern text with nothing to parse.
    #[error("empty pattern text")]
    EmptyPattern,
}
