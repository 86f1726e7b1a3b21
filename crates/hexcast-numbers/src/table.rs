//! Pre-computed literal patterns for every integer in `[-bound, bound]`.

use std::collections::{HashMap, HashSet, VecDeque};
use std::io::Read;

use hexcast_geometry::{Angle, Direction, HexCoord, Pattern, Segment};
use hexcast_handlers::{decode_literal, literal_pattern, LiteralSource};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};
use tracing::{debug, info, trace, warn};

use crate::error::{Error, Result};
use crate::oracle::trace_strokes;

/// Historical table bound.
pub const DEFAULT_BOUND: i64 = 2000;

/// Largest bound [`LiteralTable::generate`] accepts; larger requests are
/// clamped to it.
pub const MAX_BOUND: i64 = 1 << 16;

/// Accumulator steps in the order they are tried.
const STEPS: [char; 5] = ['w', 'q', 'e', 'a', 'd'];

/// Partial drawings kept per accumulator value.
const STATES_PER_VALUE: u8 = 8;

/// Literal patterns for a contiguous range of integers.
#[derive(Debug, Clone, Default)]
pub struct LiteralTable {
    bound: i64,
    entries: HashMap<i64, Pattern>,
}

impl LiteralTable {
    /// A drawable literal for every `|n| <= bound`, with `bound` clamped to
    /// `0..=MAX_BOUND`.
    ///
    /// Breadth-first over strokes after the sign prefix, never redrawing an
    /// edge, so bodies are short and ties go to the earlier step in
    /// `w q e a d`. At most a few partial drawings are kept per value, which
    /// keeps the search linear in the bound.
    pub fn generate(bound: i64) -> Self {
        let bound = bound.clamp(0, MAX_BOUND);
        let span = bound as usize;

        let mut entries = HashMap::with_capacity(span * 2 + 1);
        for negative in [false, true] {
            for (n, body) in drawable_bodies(negative, span).into_iter().enumerate() {
                let Some(body) = body else {
                    continue;
                };
                if negative && n == 0 {
                    continue;
                }
                if let Ok(pattern) = literal_pattern(negative, &body) {
                    let n = n as i64;
                    entries.insert(if negative { -n } else { n }, pattern);
                }
            }
        }

        let bound = covered_bound(&entries);
        debug!(bound, entries = entries.len(), "generated literal table");
        Self { bound, entries }
    }

    /// Read a table of `{"<n>": ["<DIR>", "<signature>"]}`.
    ///
    /// Every entry must decode to its key. The bound is the largest `k` such
    /// that every integer in `[-k, k]` is present.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: HashMap<String, (String, String)> = serde_json::from_reader(reader)?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (key, (start, signature)) in raw {
            let invalid = |reason: String| Error::InvalidEntry {
                key: key.clone(),
                reason,
            };
            let n: i64 = key.trim().parse().map_err(|_| invalid("key is not an integer".into()))?;
            let start: Direction = start.parse().map_err(|e| invalid(format!("{e}")))?;
            let pattern = Pattern::new(start, signature).map_err(|e| invalid(format!("{e}")))?;
            let decoded = decode_literal(pattern.signature());
            if decoded != Some(BigRational::from_integer(BigInt::from(n))) {
                return Err(invalid(format!("{pattern} does not encode {n}")));
            }
            entries.insert(n, pattern);
        }

        let bound = covered_bound(&entries);
        info!(bound, entries = entries.len(), "loaded literal table");
        Ok(Self { bound, entries })
    }

    /// Largest `N` with every integer in `[-N, N]` available.
    pub fn bound(&self) -> i64 {
        self.bound
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, n: i64) -> Option<&Pattern> {
        self.entries.get(&n)
    }

    /// Literal for an integer inside the bound.
    pub fn integer(&self, n: &BigInt) -> Option<&Pattern> {
        if n.abs() > BigInt::from(self.bound) {
            return None;
        }
        self.entries.get(&n.to_i64()?)
    }

    /// Literal for a value that is an integer inside the bound.
    pub fn rational(&self, value: &BigRational) -> Option<&Pattern> {
        if !value.is_integer() {
            return None;
        }
        self.integer(&value.to_integer())
    }
}

/// Largest `k` with every integer in `[-k, k]` present.
fn covered_bound(entries: &HashMap<i64, Pattern>) -> i64 {
    let mut bound = -1;
    while entries.contains_key(&(bound + 1)) && entries.contains_key(&-(bound + 1)) {
        bound += 1;
    }
    bound.max(0)
}

#[derive(Debug, Clone, Copy)]
struct Stroke {
    parent: Option<usize>,
    code: char,
    /// Root of this stroke.
    cursor: HexCoord,
    heading: Direction,
    value: usize,
}

fn apply(value: usize, code: char) -> Option<usize> {
    match code {
        'w' => Some(value + 1),
        'q' => Some(value + 5),
        'e' => Some(value + 10),
        'a' => Some(value * 2),
        _ => (value % 2 == 0).then_some(value / 2),
    }
}

/// Whether `segment` is already drawn on the path ending at `at`.
fn retraces(strokes: &[Stroke], mut at: usize, segment: &Segment) -> bool {
    while let Some(parent) = strokes[at].parent {
        if Segment::new(strokes[at].cursor, strokes[at].heading) == *segment {
            return true;
        }
        at = parent;
    }
    false
}

fn body(strokes: &[Stroke], mut at: usize) -> String {
    let mut codes = Vec::new();
    while let Some(parent) = strokes[at].parent {
        codes.push(strokes[at].code);
        at = parent;
    }
    codes.iter().rev().collect()
}

/// Shortest drawable body found for each value in `0..=bound`.
fn drawable_bodies(negative: bool, bound: usize) -> Vec<Option<String>> {
    let limit = bound * 2 + 10;
    let mut bodies = vec![None; bound + 1];
    let Ok(prefix) = literal_pattern(negative, "") else {
        return bodies;
    };
    let (drawn, cursor, heading) = trace_strokes(&prefix);

    let mut strokes = vec![Stroke {
        parent: None,
        code: ' ',
        cursor,
        heading,
        value: 0,
    }];
    let mut seen = HashSet::from([(0, cursor, heading)]);
    let mut kept = vec![0u8; limit + 1];
    kept[0] = 1;
    bodies[0] = Some(String::new());
    let mut missing = bound;
    let mut queue = VecDeque::from([0usize]);

    while missing > 0 {
        let Some(at) = queue.pop_front() else {
            break;
        };
        let from = strokes[at];
        for code in STEPS {
            let Some(value) = apply(from.value, code).filter(|v| *v <= limit) else {
                continue;
            };
            if kept[value] >= STATES_PER_VALUE {
                continue;
            }
            let Some(angle) = Angle::from_code(code) else {
                continue;
            };
            let next_cursor = from.cursor.step(from.heading);
            let next_heading = from.heading.rotated(angle);
            let segment = Segment::new(next_cursor, next_heading);
            if drawn.contains(&segment) || retraces(&strokes, at, &segment) {
                continue;
            }
            if !seen.insert((value, next_cursor, next_heading)) {
                continue;
            }
            kept[value] += 1;
            strokes.push(Stroke {
                parent: Some(at),
                code,
                cursor: next_cursor,
                heading: next_heading,
                value,
            });
            let index = strokes.len() - 1;
            if value <= bound && bodies[value].is_none() {
                bodies[value] = Some(body(&strokes, index));
                missing -= 1;
            }
            queue.push_back(index);
        }
    }

    if missing > 0 {
        warn!(negative, bound, missing, "literal search left values uncovered");
    }
    trace!(negative, strokes = strokes.len(), "literal search finished");
    bodies
}

impl LiteralSource for LiteralTable {
    fn literal(&self, value: &BigRational) -> Option<Pattern> {
        self.rational(value).cloned()
    }
}
