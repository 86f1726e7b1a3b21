//! Arithmetic operator patterns.

use std::fmt;

use hexcast_geometry::{Direction, Pattern};

/// A binary arithmetic operator on the casting stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    pub const ALL: [Self; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Div, Self::Pow];

    /// The pattern that applies this operator to the top two stack values.
    pub const fn pattern(self) -> Pattern {
        match self {
            Self::Add => Pattern::from_static(Direction::NorthEast, "waaw"),
            Self::Sub => Pattern::from_static(Direction::NorthWest, "wddw"),
            Self::Mul => Pattern::from_static(Direction::SouthEast, "waqaw"),
            Self::Div => Pattern::from_static(Direction::NorthEast, "wdedw"),
            Self::Pow => Pattern::from_static(Direction::NorthWest, "wedew"),
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }

    /// Whether `pattern` is one of the operator patterns.
    pub fn is_operator(pattern: &Pattern) -> bool {
        Self::ALL
            .iter()
            .any(|op| op.pattern().signature() == pattern.signature())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexcast_handlers::decode_literal;

    #[test]
    fn operator_patterns_are_distinct_and_valid() {
        for (i, a) in Operator::ALL.iter().enumerate() {
            let pattern = a.pattern();
            assert!(Pattern::new(pattern.start(), pattern.signature()).is_ok());
            assert!(decode_literal(pattern.signature()).is_none());
            for b in &Operator::ALL[i + 1..] {
                assert_ne!(pattern.signature(), b.pattern().signature());
            }
        }
    }

    #[test]
    fn recognizes_operators() {
        assert!(Operator::is_operator(&Operator::Pow.pattern()));
        assert!(!Operator::is_operator(&Pattern::from_static(Direction::East, "qaq")));
    }
}
