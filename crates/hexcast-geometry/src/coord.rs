//! Hexagonal coordinate system using axial coordinates.
//!
//! Axial coordinates use two axes (q, r) at 60 degrees, with an implicit
//! third axis s = -q - r. This gives us efficient storage (2 values instead
//! of 3) while maintaining the hexagonal symmetry needed for rotation.

use std::ops::{Add, Neg, Sub};

use crate::{Angle, Direction, DIRECTION_COUNT};

/// A point on the hex grid that patterns are drawn on.
///
/// The implicit third axis is s = -q - r.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoord {
    /// First axial coordinate
    pub q: i64,
    /// Second axial coordinate
    pub r: i64,
}

impl HexCoord {
    /// Origin of the coordinate system.
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    /// Create a new coordinate.
    pub const fn new(q: i64, r: i64) -> Self {
        Self { q, r }
    }

    /// Compute the implicit third axis: s = -q - r.
    pub const fn s(&self) -> i64 {
        -self.q - self.r
    }

    /// Hexagonal distance between two coordinates.
    ///
    /// For hexagonal coordinates, the distance is:
    /// max(|dq|, |dr|, |ds|) where ds = -dq - dr
    pub fn hex_distance(&self, other: &Self) -> u64 {
        let dq = (self.q - other.q).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        let ds = ((self.q - other.q) + (self.r - other.r)).unsigned_abs();
        dq.max(dr).max(ds)
    }

    /// The neighboring coordinate one unit step away in `direction`.
    #[inline]
    pub fn step(&self, direction: Direction) -> Self {
        *self + direction.delta()
    }

    /// Rotate clockwise about the origin by `steps` sixths of a turn.
    ///
    /// A single step maps (q, r) to (-r, -s).
    pub fn rotated_steps(&self, steps: usize) -> Self {
        let mut coord = *self;
        for _ in 0..steps % DIRECTION_COUNT {
            coord = Self::new(-coord.r, -coord.s());
        }
        coord
    }

    /// Rotate about the origin by a relative turn.
    pub fn rotated(&self, angle: Angle) -> Self {
        self.rotated_steps(angle.offset())
    }

    /// Pixel-space center of this coordinate in a pointy-top layout.
    ///
    /// `size` is the distance from a hex center to any of its corners.
    pub fn to_pixel(&self, size: f64) -> (f64, f64) {
        let q = self.q as f64;
        let r = self.r as f64;
        let x = size * 3f64.sqrt() * (q + r / 2.0);
        let y = size * 1.5 * r;
        (x, y)
    }
}

impl Add for HexCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            q: self.q + other.q,
            r: self.r + other.r,
        }
    }
}

impl Sub for HexCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            q: self.q - other.q,
            r: self.r - other.r,
        }
    }
}

impl Neg for HexCoord {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            q: -self.q,
            r: -self.r,
        }
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
