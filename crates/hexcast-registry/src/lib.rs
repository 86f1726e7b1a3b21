//! Hexcast Pattern Registry
//!
//! Multi-key lookup from strokes, shapes, ids, names and shorthand aliases to
//! pattern metadata.
//!
//! # Invariants
//!
//! No two entries share an id, a name, a display name, or (for ordinary
//! patterns) a signature, or (for per-world patterns) any rotation of their
//! canonical shape. A registration that breaks any of these is rejected with
//! a [`DuplicatePatternError`] listing every collision, never merged.
//!
//! # Lifecycle
//!
//! Registrations go through a [`RegistryBuilder`]. Only
//! [`RegistryBuilder::build`] produces a [`PatternRegistry`], and only when
//! nothing was rejected; the published registry is read-only.

mod builder;
mod builtin;
mod error;
mod info;
mod registry;
mod shorthand;

pub use builder::RegistryBuilder;
pub use builtin::builtin_patterns;
pub use error::{Attribute, Conflict, DuplicatePatternError, Error, Result};
pub use info::{Entry, PatternInfo, PatternMatch};
pub use registry::PatternRegistry;
pub use shorthand::{aliases, is_reserved, normalize, Shorthand, ShorthandTarget};

impl PatternRegistry {
    /// The built-in handlers and base-game patterns.
    pub fn builtin() -> Result<Self> {
        RegistryBuilder::with_builtins().build()
    }
}
