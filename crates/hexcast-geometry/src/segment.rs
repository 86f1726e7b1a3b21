//! Undirected unit edges and rotation-invariant shapes.
//!
//! A stroke can cover the same physical edge in either direction, so a
//! [`Segment`] always stores the orientation that points north-east, east or
//! south-east. Two patterns that trace the same edges, in any order and from
//! either end, produce equal [`SegmentSet`]s.
//!
//! Shapes are compared up to translation by [`SegmentSet::canonicalize`] and
//! up to rotation by registering every entry of
//! [`rotated_canonical_variants`].

use std::collections::BTreeSet;

use crate::{Angle, Direction, HexCoord, DIRECTION_COUNT};

/// A canonical undirected unit edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    root: HexCoord,
    direction: Direction,
}

impl Segment {
    /// Edge from `root` one step toward `direction`, stored canonically.
    pub fn new(root: HexCoord, direction: Direction) -> Self {
        if direction.index() < DIRECTION_COUNT / 2 {
            Self { root, direction }
        } else {
            Self {
                root: root.step(direction),
                direction: direction.opposite(),
            }
        }
    }

    #[inline]
    pub fn root(&self) -> HexCoord {
        self.root
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The far endpoint of the edge.
    pub fn end(&self) -> HexCoord {
        self.root.step(self.direction)
    }

    pub fn translated(&self, offset: HexCoord) -> Self {
        Self {
            root: self.root + offset,
            direction: self.direction,
        }
    }

    /// Rotate the edge about the origin by `steps` sixths of a turn.
    pub fn rotated(&self, steps: usize) -> Self {
        Self::new(
            self.root.rotated_steps(steps),
            self.direction.rotated_steps(steps),
        )
    }
}

/// An unordered set of edges (the shape of a pattern).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentSet(BTreeSet<Segment>);

impl SegmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge; returns false if it was already present.
    pub fn insert(&mut self, segment: Segment) -> bool {
        self.0.insert(segment)
    }

    pub fn contains(&self, segment: &Segment) -> bool {
        self.0.contains(segment)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.0.iter()
    }

    /// Translate so that the smallest `q` and the smallest `r` over all
    /// segment roots are both zero.
    pub fn canonicalize(&self) -> Self {
        let min_q = self.0.iter().map(|s| s.root.q).min().unwrap_or(0);
        let min_r = self.0.iter().map(|s| s.root.r).min().unwrap_or(0);
        let offset = HexCoord::new(-min_q, -min_r);
        self.0.iter().map(|s| s.translated(offset)).collect()
    }

    /// Rotate every edge about the origin (not canonicalized).
    pub fn rotated(&self, steps: usize) -> Self {
        self.0.iter().map(|s| s.rotated(steps)).collect()
    }
}

impl FromIterator<Segment> for SegmentSet {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SegmentSet {
    type Item = &'a Segment;
    type IntoIter = std::collections::btree_set::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Walk a stroke sequence from the origin and collect the edges it covers.
///
/// The first edge leaves the origin toward `start`; each turn moves the
/// cursor to the end of the current edge before rotating the heading.
pub fn pattern_segments<I>(start: Direction, angles: I) -> SegmentSet
where
    I: IntoIterator<Item = Angle>,
{
    let mut cursor = HexCoord::ORIGIN;
    let mut heading = start;
    let mut segments = SegmentSet::new();
    segments.insert(Segment::new(cursor, heading));

    for angle in angles {
        cursor = cursor.step(heading);
        heading = heading.rotated(angle);
        segments.insert(Segment::new(cursor, heading));
    }
    segments
}

/// The six canonical rotations of a shape.
///
/// Symmetric shapes yield repeated entries.
pub fn rotated_canonical_variants(segments: &SegmentSet) -> [SegmentSet; DIRECTION_COUNT] {
    std::array::from_fn(|steps| segments.rotated(steps).canonicalize())
}
