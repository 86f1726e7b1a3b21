//! Single-literal search behind a cancellable boundary.
//!
//! A [`LiteralOracle`] tries to find one Numerical Reflection pattern for a
//! value. Searches run on a blocking thread and must poll their
//! [`CancelToken`]; the decomposer cancels them when its timeout fires.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hexcast_geometry::{Angle, Direction, HexCoord, Pattern, Segment};
use hexcast_handlers::literal_pattern;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use tracing::{debug, trace};

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// A bounded search for a single literal pattern.
pub trait LiteralOracle: Send + Sync {
    /// Find a literal for `target`, or give up. Must return promptly once
    /// `cancel` is set.
    fn search(&self, target: &BigRational, cancel: &CancelToken) -> Option<Pattern>;
}

/// Breadth-first search over drawable accumulator bodies.
///
/// Like the literal table, every candidate is a drawing that never reuses a
/// unit edge, starting from where the sign prefix leaves off. This search
/// does not cap partial drawings per value, so it reaches bodies the
/// table's pruned search misses.
#[derive(Debug, Clone, Copy)]
pub struct StrokeSearch {
    /// Longest body tried, in turns.
    pub max_length: usize,
    /// Nodes expanded before giving up.
    pub max_nodes: usize,
}

impl Default for StrokeSearch {
    fn default() -> Self {
        Self {
            max_length: 40,
            max_nodes: 200_000,
        }
    }
}

impl StrokeSearch {
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}

/// Edges of `pattern`, plus the root and heading of its last stroke.
pub(crate) fn trace_strokes(pattern: &Pattern) -> (HashSet<Segment>, HexCoord, Direction) {
    let mut drawn = HashSet::new();
    let mut cursor = HexCoord::ORIGIN;
    let mut heading = pattern.start();
    drawn.insert(Segment::new(cursor, heading));
    for angle in pattern.angles() {
        cursor = cursor.step(heading);
        heading = heading.rotated(angle);
        drawn.insert(Segment::new(cursor, heading));
    }
    (drawn, cursor, heading)
}

struct Node {
    parent: Option<usize>,
    code: char,
    /// Root of the last stroke.
    cursor: HexCoord,
    heading: Direction,
    value: BigRational,
    depth: usize,
}

const STEPS: [char; 5] = ['w', 'q', 'e', 'a', 'd'];

impl StrokeSearch {
    fn apply(value: &BigRational, code: char) -> BigRational {
        let two = BigRational::from_integer(BigInt::from(2));
        match code {
            'w' => value + BigRational::one(),
            'q' => value + BigRational::from_integer(BigInt::from(5)),
            'e' => value + BigRational::from_integer(BigInt::from(10)),
            'a' => value * two,
            _ => value / two,
        }
    }

    fn uses(nodes: &[Node], mut at: usize, prefix: &HashSet<Segment>, segment: &Segment) -> bool {
        if prefix.contains(segment) {
            return true;
        }
        loop {
            let node = &nodes[at];
            let Some(parent) = node.parent else {
                return false;
            };
            if Segment::new(node.cursor, node.heading) == *segment {
                return true;
            }
            at = parent;
        }
    }

    fn body(nodes: &[Node], mut at: usize) -> String {
        let mut codes = Vec::new();
        while let Some(parent) = nodes[at].parent {
            codes.push(nodes[at].code);
            at = parent;
        }
        codes.iter().rev().collect()
    }
}

impl LiteralOracle for StrokeSearch {
    fn search(&self, target: &BigRational, cancel: &CancelToken) -> Option<Pattern> {
        let negative = target.is_negative();
        let goal = target.abs();
        let goal_denom = goal.denom().clone();
        if !(goal_denom.clone() & (goal_denom.clone() - BigInt::one())).is_zero() {
            trace!(%target, "denominator is not a power of two");
            return None;
        }
        let ceiling = &goal * BigRational::from_integer(BigInt::from(2))
            + BigRational::from_integer(BigInt::from(10));

        let prefix_pattern = literal_pattern(negative, "").ok()?;
        let (prefix, cursor, heading) = trace_strokes(&prefix_pattern);

        let mut nodes = vec![Node {
            parent: None,
            code: ' ',
            cursor,
            heading,
            value: BigRational::zero(),
            depth: 0,
        }];
        let mut seen = HashSet::new();
        seen.insert((BigRational::zero(), cursor, heading));
        let mut queue = VecDeque::from([0usize]);

        while let Some(at) = queue.pop_front() {
            if cancel.is_cancelled() {
                debug!(%target, expanded = nodes.len(), "stroke search cancelled");
                return None;
            }
            if nodes[at].value == goal {
                let body = Self::body(&nodes, at);
                return literal_pattern(negative, &body).ok();
            }
            if nodes[at].depth >= self.max_length || nodes.len() >= self.max_nodes {
                continue;
            }

            for code in STEPS {
                let angle = Angle::from_code(code)?;
                let next_cursor = nodes[at].cursor.step(nodes[at].heading);
                let next_heading = nodes[at].heading.rotated(angle);
                let value = Self::apply(&nodes[at].value, code);
                if value > ceiling || value.denom() > &goal_denom {
                    continue;
                }
                let segment = Segment::new(next_cursor, next_heading);
                if Self::uses(&nodes, at, &prefix, &segment) {
                    continue;
                }
                if !seen.insert((value.clone(), next_cursor, next_heading)) {
                    continue;
                }
                nodes.push(Node {
                    parent: Some(at),
                    code,
                    cursor: next_cursor,
                    heading: next_heading,
                    value,
                    depth: nodes[at].depth + 1,
                });
                queue.push_back(nodes.len() - 1);
            }
        }

        debug!(%target, expanded = nodes.len(), "stroke search exhausted");
        None
    }
}
