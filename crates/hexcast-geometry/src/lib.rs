//! Hexcast Grid Geometry
//!
//! Direction, turn, coordinate and segment algebra for patterns drawn on an
//! axial hexagonal grid.
//!
//! # Stroke Encoding
//!
//! A [`Pattern`] is a start [`Direction`] plus an angle signature: one
//! character per relative turn between consecutive unit strokes.
//!
//! | code | turn      | offset |
//! |------|-----------|--------|
//! | `w`  | Forward   | 0      |
//! | `e`  | Right     | 1      |
//! | `d`  | RightBack | 2      |
//! | `s`  | Back      | 3      |
//! | `a`  | LeftBack  | 4      |
//! | `q`  | Left      | 5      |
//!
//! # Shapes
//!
//! Some patterns are identified by the edges they cover rather than by their
//! stroke order. [`pattern_segments`] walks a pattern into a [`SegmentSet`],
//! [`SegmentSet::canonicalize`] removes translation, and
//! [`rotated_canonical_variants`] enumerates the six rotations so a shape can
//! be recognized however it was oriented.

mod coord;
mod direction;
mod error;
mod pattern;
mod segment;

pub use coord::HexCoord;
pub use direction::{Angle, Direction};
pub use error::{Error, Result};
pub use pattern::Pattern;
pub use segment::{pattern_segments, rotated_canonical_variants, Segment, SegmentSet};

/// Number of compass directions, and of relative turns.
pub const DIRECTION_COUNT: usize = 6;

/// Characters allowed in an angle signature, in turn-offset order.
pub const SIGNATURE_ALPHABET: [char; DIRECTION_COUNT] = ['w', 'e', 'd', 's', 'a', 'q'];
