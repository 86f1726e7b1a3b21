//! Bookkeeper's Gambit: stack masks over `-` (keep) and `v` (drop).
//!
//! The pattern runs along a baseline. A stroke along the baseline is a `-`;
//! a dip below it and back up (right turn then left turn relative to the
//! baseline) is a `v`. When the mask opens with a `v` the drawing starts on
//! the down-stroke, which shows up as a leading `a` in the signature.

use hexcast_geometry::{Angle, Direction, Pattern};

use crate::{Error, GenerateContext, Result, SpecialHandler};

const KEEP: char = '-';
const DROP: char = 'v';

/// Decode a mask drawing, or `None` if the strokes leave the baseline shape.
pub fn decode_mask(pattern: &Pattern) -> Option<String> {
    let flat = if pattern.signature().starts_with('a') {
        pattern.start().rotated(Angle::Left)
    } else {
        pattern.start()
    };
    let down = flat.rotated(Angle::Right);
    let up = flat.rotated(Angle::Left);

    let mut mask = String::new();
    let mut on_baseline = true;
    for heading in pattern.headings() {
        if on_baseline {
            if heading == flat {
                mask.push(KEEP);
            } else if heading == down {
                on_baseline = false;
            } else {
                return None;
            }
        } else if heading == up {
            mask.push(DROP);
            on_baseline = true;
        } else {
            return None;
        }
    }
    on_baseline.then_some(mask)
}

/// Encode a mask as a drawing along an eastward baseline.
pub fn encode_mask(mask: &str) -> Result<Pattern> {
    let invalid = || Error::InvalidMask(mask.to_string());
    if mask.is_empty() || !mask.chars().all(|c| c == KEEP || c == DROP) {
        return Err(invalid());
    }

    let (start, mut signature) = if mask.starts_with(DROP) {
        (Direction::SouthEast, String::from("a"))
    } else {
        (Direction::East, String::new())
    };

    let chars: Vec<char> = mask.chars().collect();
    for pair in chars.windows(2) {
        signature.push_str(match (pair[0], pair[1]) {
            (KEEP, KEEP) => "w",
            (KEEP, _) => "ea",
            (_, KEEP) => "e",
            _ => "da",
        });
    }

    Pattern::new(start, signature).map_err(|_| invalid())
}

/// Handler for Bookkeeper's Gambit.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaskHandler;

impl SpecialHandler for MaskHandler {
    type Value = String;

    fn try_match(&self, pattern: &Pattern) -> Option<String> {
        decode_mask(pattern)
    }

    fn generate(&self, value: &str, _ctx: &GenerateContext<'_>) -> Result<(String, Pattern)> {
        let mask = value.trim();
        let pattern = encode_mask(mask)?;
        Ok((mask.to_string(), pattern))
    }

    fn parse_argument(&self, text: &str) -> Option<String> {
        let mask = text.trim();
        (!mask.is_empty() && mask.chars().all(|c| c == KEEP || c == DROP))
            .then(|| mask.to_string())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mask_round_trip(mask in "[-v]{1,32}") {
            let drawn = encode_mask(&mask).unwrap();
            prop_assert_eq!(decode_mask(&drawn), Some(mask));
        }

        #[test]
        fn round_trip_survives_rotation(mask in "[-v]{1,16}", steps in 0usize..6) {
            let drawn = encode_mask(&mask).unwrap().rotated(steps);
            prop_assert_eq!(decode_mask(&drawn), Some(mask));
        }
    }
}
