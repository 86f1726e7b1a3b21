//! Compass directions and relative turns.
//!
//! The six directions are ordered clockwise starting from north-east, so a
//! relative turn is just an offset into [`Direction::ALL`]:
//!
//! ```text
//! offset  angle      code
//!   0     Forward     w
//!   1     Right       e
//!   2     RightBack   d
//!   3     Back        s
//!   4     LeftBack    a
//!   5     Left        q
//! ```

use std::fmt;
use std::str::FromStr;

use crate::{Error, HexCoord, DIRECTION_COUNT};

/// One of the six compass directions on the axial grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Direction {
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions in clockwise order.
    pub const ALL: [Self; DIRECTION_COUNT] = [
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Position in the clockwise ordering.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction at `index` in the clockwise ordering (wrapping).
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % DIRECTION_COUNT]
    }

    /// Unit step in axial coordinates.
    pub const fn delta(self) -> HexCoord {
        match self {
            Self::NorthEast => HexCoord::new(1, -1),
            Self::East => HexCoord::new(1, 0),
            Self::SouthEast => HexCoord::new(0, 1),
            Self::SouthWest => HexCoord::new(-1, 1),
            Self::West => HexCoord::new(-1, 0),
            Self::NorthWest => HexCoord::new(0, -1),
        }
    }

    /// Heading after making a relative turn.
    #[inline]
    pub const fn rotated(self, angle: Angle) -> Self {
        Self::from_index(self.index() + angle.offset())
    }

    /// Rotate clockwise by `steps` sixths of a turn.
    #[inline]
    pub const fn rotated_steps(self, steps: usize) -> Self {
        Self::from_index(self.index() + steps % DIRECTION_COUNT)
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        self.rotated(Angle::Back)
    }

    /// The relative turn that takes this heading to `next`.
    pub const fn angle_to(self, next: Self) -> Angle {
        Angle::from_offset(next.index() + DIRECTION_COUNT - self.index())
    }

    /// Canonical upper-case name, e.g. `SOUTH_EAST`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NorthEast => "NORTH_EAST",
            Self::East => "EAST",
            Self::SouthEast => "SOUTH_EAST",
            Self::SouthWest => "SOUTH_WEST",
            Self::West => "WEST",
            Self::NorthWest => "NORTH_WEST",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = Error;

    /// Accepts `SOUTH_EAST`, `south_east`, `SouthEast`, `south-east` and `se`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "northeast" | "ne" => Ok(Self::NorthEast),
            "east" => Ok(Self::East),
            "southeast" | "se" => Ok(Self::SouthEast),
            "southwest" | "sw" => Ok(Self::SouthWest),
            "west" => Ok(Self::West),
            "northwest" | "nw" => Ok(Self::NorthWest),
            _ => Err(Error::UnknownDirection(s.to_string())),
        }
    }
}

/// A relative turn between two consecutive strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Angle {
    Forward,
    Right,
    RightBack,
    Back,
    LeftBack,
    Left,
}

impl Angle {
    /// All turns in clockwise offset order.
    pub const ALL: [Self; DIRECTION_COUNT] = [
        Self::Forward,
        Self::Right,
        Self::RightBack,
        Self::Back,
        Self::LeftBack,
        Self::Left,
    ];

    /// Clockwise offset in sixths of a turn (0..=5).
    #[inline]
    pub const fn offset(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_offset(offset: usize) -> Self {
        Self::ALL[offset % DIRECTION_COUNT]
    }

    pub const fn degrees(self) -> u16 {
        self.offset() as u16 * 60
    }

    /// Signature character for this turn.
    pub const fn code(self) -> char {
        match self {
            Self::Forward => 'w',
            Self::Right => 'e',
            Self::RightBack => 'd',
            Self::Back => 's',
            Self::LeftBack => 'a',
            Self::Left => 'q',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'w' => Some(Self::Forward),
            'e' => Some(Self::Right),
            'd' => Some(Self::RightBack),
            's' => Some(Self::Back),
            'a' => Some(Self::LeftBack),
            'q' => Some(Self::Left),
            _ => None,
        }
    }
}

impl TryFrom<char> for Angle {
    type Error = Error;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(Error::InvalidTurn(code))
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
