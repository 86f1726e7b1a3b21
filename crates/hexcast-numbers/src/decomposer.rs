//! Number decomposition: table lookup, oracle, then algebraic search.

use std::sync::Arc;
use std::time::Duration;

use hexcast_handlers::decode_literal;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};
use tracing::{debug, warn};

use crate::decomposed::DecomposedNumber;
use crate::error::{Error, Result};
use crate::oracle::{CancelToken, LiteralOracle};
use crate::table::LiteralTable;

/// Decomposer settings.
#[derive(Debug, Clone)]
pub struct DecomposerConfig {
    /// Wall-clock budget for the oracle.
    pub oracle_timeout: Duration,
    /// Deepest recursion allowed in the algebraic search.
    pub max_depth: usize,
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self {
            oracle_timeout: Duration::from_secs(1),
            max_depth: 64,
        }
    }
}

impl DecomposerConfig {
    #[must_use]
    pub fn with_oracle_timeout(mut self, timeout: Duration) -> Self {
        self.oracle_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Produces pattern programs for arbitrary rationals.
///
/// The literal table and oracle are passed down the recursion explicitly;
/// the decomposer holds no other state and can be shared.
#[derive(Clone)]
pub struct NumberDecomposer {
    table: Arc<LiteralTable>,
    oracle: Option<Arc<dyn LiteralOracle>>,
    config: DecomposerConfig,
}

impl std::fmt::Debug for NumberDecomposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberDecomposer")
            .field("bound", &self.table.bound())
            .field("oracle", &self.oracle.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl NumberDecomposer {
    pub fn new(table: Arc<LiteralTable>) -> Self {
        Self {
            table,
            oracle: None,
            config: DecomposerConfig::default(),
        }
    }

    #[must_use]
    pub fn with_oracle(mut self, oracle: Arc<dyn LiteralOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: DecomposerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn table(&self) -> &LiteralTable {
        &self.table
    }

    pub fn config(&self) -> &DecomposerConfig {
        &self.config
    }

    /// Table literal, then the oracle (within its timeout), then the
    /// algebraic search.
    pub async fn decompose(&self, target: &BigRational) -> Result<DecomposedNumber> {
        if let Some(literal) = self.table_literal(target) {
            return Ok(literal);
        }
        if let Some(pattern) = self.ask_oracle(target).await {
            return Ok(DecomposedNumber::literal(target.clone(), pattern));
        }
        self.decompose_offline(target)
    }

    /// Table literal, then the algebraic search. Never consults the oracle.
    pub fn decompose_offline(&self, target: &BigRational) -> Result<DecomposedNumber> {
        if let Some(literal) = self.table_literal(target) {
            return Ok(literal);
        }
        if target.is_integer() {
            return self.integer(&target.to_integer(), 0);
        }

        let numer = self.integer(target.numer(), 0)?.parenthesized();
        let denom = self.integer(target.denom(), 0)?.parenthesized();
        debug!(%target, "decomposing as a quotient");
        numer.div(denom, &self.table)
    }

    fn table_literal(&self, target: &BigRational) -> Option<DecomposedNumber> {
        let pattern = self.table.rational(target)?.clone();
        Some(DecomposedNumber::literal(target.clone(), pattern))
    }

    async fn ask_oracle(&self, target: &BigRational) -> Option<hexcast_geometry::Pattern> {
        let oracle = self.oracle.clone()?;
        let cancel = CancelToken::new();
        let task = {
            let cancel = cancel.clone();
            let target = target.clone();
            tokio::task::spawn_blocking(move || oracle.search(&target, &cancel))
        };

        match tokio::time::timeout(self.config.oracle_timeout, task).await {
            Ok(Ok(Some(pattern))) => {
                if decode_literal(pattern.signature()).as_ref() == Some(target) {
                    debug!(%target, %pattern, "oracle found literal");
                    Some(pattern)
                } else {
                    warn!(%target, %pattern, "oracle returned a pattern for a different value");
                    None
                }
            }
            Ok(Ok(None)) => {
                debug!(%target, "oracle found nothing");
                None
            }
            Ok(Err(err)) => {
                warn!(%target, %err, "oracle task failed");
                None
            }
            Err(_) => {
                cancel.cancel();
                debug!(
                    %target,
                    timeout_ms = self.config.oracle_timeout.as_millis() as u64,
                    "oracle timed out, falling back to decomposition"
                );
                None
            }
        }
    }

    fn integer(&self, n: &BigInt, depth: usize) -> Result<DecomposedNumber> {
        if let Some(literal) = DecomposedNumber::from_table(&self.table, n) {
            return Ok(literal);
        }
        if depth > self.config.max_depth {
            return Err(Error::DepthExceeded(self.config.max_depth));
        }
        if n.is_negative() {
            return self.integer(&-n, depth + 1)?.neg(&self.table);
        }

        let target = n.to_u128().ok_or_else(|| Error::OutOfRange(n.clone()))?;
        let search = search_powers(target);

        let mut best: Option<DecomposedNumber> = None;
        for (base, exponent) in &search.exact {
            let candidate = self.power(*base, *exponent, depth)?;
            if best
                .as_ref()
                .map_or(true, |b| candidate.patterns().len() < b.patterns().len())
            {
                best = Some(candidate);
            }
        }

        if let Some((base, exponent, remainder)) = search.nearest {
            if remainder > 0 {
                let candidate = self
                    .power(base, exponent, depth)?
                    .add(self.integer(&BigInt::from(remainder), depth + 1)?, &self.table);
                if best
                    .as_ref()
                    .map_or(true, |b| candidate.patterns().len() < b.patterns().len())
                {
                    best = Some(candidate);
                }
            }
        }

        let best = best.ok_or_else(|| Error::MissingLiteral(n.clone()))?;
        debug!(%n, equation = best.equation(), patterns = best.patterns().len(), "decomposed");
        Ok(best)
    }

    fn power(&self, base: u128, exponent: u32, depth: usize) -> Result<DecomposedNumber> {
        let base = self.integer(&BigInt::from(base), depth + 1)?;
        let exponent = self.integer(&BigInt::from(exponent), depth + 1)?;
        base.pow(exponent, &self.table)
    }
}

/// Candidate power forms for an integer.
#[derive(Debug, Default, PartialEq, Eq)]
struct PowerSearch {
    /// `(base, exponent, remainder)` with the smallest remainder, ties to
    /// the smaller base.
    nearest: Option<(u128, u32, u128)>,
    /// Every `(base, exponent)` with `base^exponent == n`, smallest base first.
    exact: Vec<(u128, u32)>,
}

/// For each base in `2..=isqrt(n)` take the largest power not above `n`.
///
/// Only the integer `k`-th roots of `n` can minimize the remainder for a
/// given exponent, so those are the bases tried.
fn search_powers(n: u128) -> PowerSearch {
    let mut search = PowerSearch::default();
    let mut exponent = 2u32;
    while exponent < 128 && (1u128 << exponent) <= n {
        let base = integer_root(n, exponent);
        if base >= 2 {
            let k = floor_log(n, base);
            let power = base.pow(k);
            let remainder = n - power;
            let better = match search.nearest {
                None => true,
                Some((b, _, r)) => remainder < r || (remainder == r && base < b),
            };
            if better {
                search.nearest = Some((base, k, remainder));
            }
            if remainder == 0 && !search.exact.iter().any(|(b, _)| *b == base) {
                search.exact.push((base, k));
            }
        }
        exponent += 1;
    }
    search.exact.sort_unstable();
    search
}

/// Largest `r` with `r^k <= n`.
fn integer_root(n: u128, k: u32) -> u128 {
    let mut root = (n as f64).powf(1.0 / f64::from(k)) as u128;
    while root > 0 && root.checked_pow(k).map_or(true, |p| p > n) {
        root -= 1;
    }
    while (root + 1).checked_pow(k).is_some_and(|p| p <= n) {
        root += 1;
    }
    root
}

/// Largest `k` with `base^k <= n`, for `base >= 2`.
fn floor_log(n: u128, base: u128) -> u32 {
    let mut k = 0;
    let mut power = 1u128;
    while let Some(next) = power.checked_mul(base) {
        if next > n {
            break;
        }
        power = next;
        k += 1;
    }
    k
}
