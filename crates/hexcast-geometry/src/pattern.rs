//! Stroke encoding of a pattern: start direction plus angle signature.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::{pattern_segments, Angle, Direction, Error, Result, SegmentSet};

/// A pattern drawn on the hex grid.
///
/// Equality is structural: two patterns are equal only when both the start
/// direction and the signature match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PatternRecord", into = "PatternRecord")
)]
pub struct Pattern {
    start: Direction,
    signature: Cow<'static, str>,
}

impl Pattern {
    /// Create a pattern, rejecting any character outside the signature alphabet.
    pub fn new(start: Direction, signature: impl Into<String>) -> Result<Self> {
        let signature = signature.into();
        if let Some(bad) = signature.chars().find(|c| Angle::from_code(*c).is_none()) {
            return Err(Error::InvalidTurn(bad));
        }
        Ok(Self {
            start,
            signature: Cow::Owned(signature),
        })
    }

    /// Pattern over a compile-time signature.
    ///
    /// The signature must only contain `w e d s a q`; every static table in
    /// the workspace is checked by its own tests.
    pub const fn from_static(start: Direction, signature: &'static str) -> Self {
        Self {
            start,
            signature: Cow::Borrowed(signature),
        }
    }

    #[inline]
    pub fn start(&self) -> Direction {
        self.start
    }

    #[inline]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Relative turns in drawing order.
    pub fn angles(&self) -> impl Iterator<Item = Angle> + '_ {
        self.signature.chars().filter_map(Angle::from_code)
    }

    /// Heading of every stroke: the start direction followed by the heading
    /// after each turn.
    pub fn headings(&self) -> Vec<Direction> {
        let mut heading = self.start;
        let mut headings = Vec::with_capacity(self.signature.len() + 1);
        headings.push(heading);
        for angle in self.angles() {
            heading = heading.rotated(angle);
            headings.push(heading);
        }
        headings
    }

    /// Unit edges covered by this pattern, rooted at the origin.
    pub fn segments(&self) -> SegmentSet {
        pattern_segments(self.start, self.angles())
    }

    /// True when no unit edge is drawn twice, which the game requires of
    /// anything cast.
    pub fn is_drawable(&self) -> bool {
        self.segments().len() == self.angles().count() + 1
    }

    /// The same stroke sequence started from a direction `steps` sixths of a
    /// turn further clockwise.
    pub fn rotated(&self, steps: usize) -> Self {
        Self {
            start: self.start.rotated_steps(steps),
            signature: self.signature.clone(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.signature.is_empty() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} {}", self.start, self.signature)
        }
    }
}

impl FromStr for Pattern {
    type Err = Error;

    /// Parses `"<DIR> [<sig>]"`, also accepting a comma between the parts.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty());

        let start: Direction = parts.next().ok_or(Error::EmptyPattern)?.parse()?;
        let signature = parts.next().unwrap_or_default();
        if let Some(extra) = parts.next() {
            return Err(Error::TrailingInput(extra.to_string()));
        }
        Self::new(start, signature.to_ascii_lowercase())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PatternRecord {
    start: Direction,
    #[serde(default)]
    signature: String,
}

#[cfg(feature = "serde")]
impl TryFrom<PatternRecord> for Pattern {
    type Error = Error;

    fn try_from(record: PatternRecord) -> Result<Self> {
        Self::new(record.start, record.signature)
    }
}

#[cfg(feature = "serde")]
impl From<Pattern> for PatternRecord {
    fn from(pattern: Pattern) -> Self {
        Self {
            start: pattern.start,
            signature: pattern.signature.into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_characters_outside_alphabet() {
        assert_eq!(Pattern::new(Direction::East, "qaxq"), Err(Error::InvalidTurn('x')));
        assert!(Pattern::new(Direction::East, "wedsaq").is_ok());
        assert!(Pattern::new(Direction::East, "").is_ok());
    }

    #[test]
    fn static_and_owned_compare_equal() {
        let owned = Pattern::new(Direction::NorthEast, "qaq").unwrap();
        let fixed = Pattern::from_static(Direction::NorthEast, "qaq");
        assert_eq!(owned, fixed);
    }

    #[test]
    fn equality_includes_start_direction() {
        let a = Pattern::new(Direction::East, "qaq").unwrap();
        let b = Pattern::new(Direction::West, "qaq").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn headings_follow_turns() {
        let pattern = Pattern::new(Direction::East, "ea").unwrap();
        assert_eq!(
            pattern.headings(),
            vec![Direction::East, Direction::SouthEast, Direction::NorthEast]
        );
    }

    #[test]
    fn display_and_parse() {
        let pattern = Pattern::new(Direction::SouthWest, "w").unwrap();
        assert_eq!(pattern.to_string(), "SOUTH_WEST w");
        assert_eq!("SOUTH_WEST w".parse::<Pattern>(), Ok(pattern));

        let bare = Pattern::new(Direction::East, "").unwrap();
        assert_eq!(bare.to_string(), "EAST");
        assert_eq!("east".parse::<Pattern>(), Ok(bare.clone()));
        assert_eq!("EAST,".parse::<Pattern>(), Ok(bare));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Pattern>(), Err(Error::EmptyPattern));
        assert!(matches!("up qaq".parse::<Pattern>(), Err(Error::UnknownDirection(_))));
        assert_eq!(
            "east qaq extra".parse::<Pattern>(),
            Err(Error::TrailingInput("extra".into()))
        );
    }

    #[test]
    fn drawable_patterns_never_retrace() {
        assert!(Pattern::from_static(Direction::SouthEast, "aqaa").is_drawable());
        assert!(Pattern::from_static(Direction::East, "").is_drawable());
        // Back always retraces the stroke it came from.
        assert!(!Pattern::from_static(Direction::East, "s").is_drawable());
        // Two left-backs close a triangle; a third redraws its first edge.
        assert!(Pattern::from_static(Direction::East, "aa").is_drawable());
        assert!(!Pattern::from_static(Direction::East, "aaa").is_drawable());
    }

    #[test]
    fn rotation_keeps_signature() {
        let pattern = Pattern::new(Direction::East, "qaq").unwrap();
        let rotated = pattern.rotated(2);
        assert_eq!(rotated.start(), Direction::SouthWest);
        assert_eq!(rotated.signature(), "qaq");
    }
}
