//! Numerical Reflection: signed rational literals.
//!
//! The signature is a sign prefix followed by a program for an accumulator
//! that starts at zero:
//!
//! | code | effect |
//! |------|--------|
//! | `w`  | +1     |
//! | `q`  | +5     |
//! | `e`  | +10    |
//! | `a`  | ×2     |
//! | `d`  | ÷2     |
//!
//! Division is exact. Any other character in the body is ignored.

use hexcast_geometry::{Direction, Pattern};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use crate::{format_rational, parse_rational, Error, GenerateContext, Result, SpecialHandler};

/// Prefix of a non-negative literal.
pub const POSITIVE_PREFIX: &str = "aqaa";

/// Prefix of a negative literal.
pub const NEGATIVE_PREFIX: &str = "dedd";

/// Decode a literal signature, or `None` if it has no sign prefix.
pub fn decode_literal(signature: &str) -> Option<BigRational> {
    let (negative, body) = if let Some(body) = signature.strip_prefix(POSITIVE_PREFIX) {
        (false, body)
    } else if let Some(body) = signature.strip_prefix(NEGATIVE_PREFIX) {
        (true, body)
    } else {
        return None;
    };

    let two = BigRational::from_integer(BigInt::from(2));
    let mut acc = BigRational::zero();
    for code in body.chars() {
        match code {
            'w' => acc += BigRational::from_integer(BigInt::from(1)),
            'q' => acc += BigRational::from_integer(BigInt::from(5)),
            'e' => acc += BigRational::from_integer(BigInt::from(10)),
            'a' => acc *= &two,
            'd' => acc /= &two,
            _ => {}
        }
    }
    Some(if negative { -acc } else { acc })
}

/// Build a literal from its sign and accumulator body.
///
/// Positive literals start south-east and negative ones north-east, the
/// orientation in which both prefixes are drawn.
pub fn literal_pattern(negative: bool, body: &str) -> hexcast_geometry::Result<Pattern> {
    if negative {
        Pattern::new(Direction::NorthEast, format!("{NEGATIVE_PREFIX}{body}"))
    } else {
        Pattern::new(Direction::SouthEast, format!("{POSITIVE_PREFIX}{body}"))
    }
}

/// Handler for Numerical Reflection.
///
/// Generation needs a [`LiteralSource`](crate::LiteralSource) in the context;
/// this handler does not search for encodings itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberHandler;

impl SpecialHandler for NumberHandler {
    type Value = BigRational;

    fn try_match(&self, pattern: &Pattern) -> Option<BigRational> {
        decode_literal(pattern.signature())
    }

    fn generate(&self, value: &str, ctx: &GenerateContext<'_>) -> Result<(BigRational, Pattern)> {
        let target = self
            .parse_argument(value)
            .ok_or_else(|| Error::InvalidNumber(value.trim().to_string()))?;
        let pattern = ctx
            .literals
            .and_then(|source| source.literal(&target))
            .ok_or_else(|| Error::NoLiteral(format_rational(&target)))?;
        Ok((target, pattern))
    }

    fn parse_argument(&self, text: &str) -> Option<BigRational> {
        parse_rational(text)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sign_prefix_negates(body in "[wqead]{0,16}") {
            let pos = decode_literal(&format!("{POSITIVE_PREFIX}{body}")).unwrap();
            let neg = decode_literal(&format!("{NEGATIVE_PREFIX}{body}")).unwrap();
            prop_assert_eq!(neg, -pos);
        }

        #[test]
        fn additive_bodies_sum(counts in proptest::collection::vec(0usize..3, 3)) {
            let body: String =
                "w".repeat(counts[0]) + &"q".repeat(counts[1]) + &"e".repeat(counts[2]);
            let expected = counts[0] as i64 + 5 * counts[1] as i64 + 10 * counts[2] as i64;
            prop_assert_eq!(
                decode_literal(&format!("{POSITIVE_PREFIX}{body}")),
                Some(BigRational::from_integer(BigInt::from(expected)))
            );
        }
    }
}
