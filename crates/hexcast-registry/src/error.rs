//! Error types for hexcast-registry.

use std::fmt;

use thiserror::Error;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The attribute two registrations share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Id,
    Name,
    DisplayName,
    /// Same exact signature.
    Pattern,
    /// Same drawn shape in some rotation.
    Shape,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::DisplayName => "display name",
            Self::Pattern => "pattern",
            Self::Shape => "shape",
        })
    }
}

/// One collision: which attribute, and the id of the entry that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub attribute: Attribute,
    pub existing: String,
}

/// A rejected registration with every attribute it collided on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePatternError {
    /// Id of the entry that was rejected.
    pub id: String,
    pub conflicts: Vec<Conflict>,
}

impl DuplicatePatternError {
    /// Whether the registration collided on `attribute`.
    pub fn conflicts_on(&self, attribute: Attribute) -> bool {
        self.conflicts.iter().any(|c| c.attribute == attribute)
    }
}

impl fmt::Display for DuplicatePatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} conflicts with existing entries:", self.id)?;
        for (i, conflict) in self.conflicts.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{} ({})", conflict.attribute, conflict.existing)?;
        }
        Ok(())
    }
}

impl std::error::Error for DuplicatePatternError {}

/// Errors that can occur while building a registry.
#[derive(Debug, Error)]
pub enum Error {
    /// Every registration rejected during the build.
    #[error("{} duplicate registration(s), first: {}", .0.len(), .0.first().map(ToString::to_string).unwrap_or_default())]
    Duplicates(Vec<DuplicatePatternError>),

    /// Pattern metadata that is not valid JSON or has invalid strokes.
    #[error("invalid pattern metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}
