//! Hexcast Numbers
//!
//! Turns arbitrary rationals into sequences of patterns that leave the value
//! on the casting stack.
//!
//! # Strategy
//!
//! 1. [`LiteralTable`]: a single pre-computed Numerical Reflection for small
//!    integers.
//! 2. [`LiteralOracle`]: an optional, cancellable search for one literal,
//!    bounded by [`DecomposerConfig::oracle_timeout`].
//! 3. Algebraic decomposition into `b^e + r` for integers and `p / q` for
//!    fractions, joined with [`Operator`] patterns.
//!
//! Every [`DecomposedNumber`] carries a human-readable equation alongside its
//! patterns, with one operator symbol per operator pattern.

mod decomposed;
mod decomposer;
mod error;
mod operator;
mod oracle;
mod table;

pub use decomposed::{DecomposedNumber, Form};
pub use decomposer::{DecomposerConfig, NumberDecomposer};
pub use error::{Error, Result};
pub use operator::Operator;
pub use oracle::{CancelToken, LiteralOracle, StrokeSearch};
pub use table::{LiteralTable, DEFAULT_BOUND, MAX_BOUND};

#[cfg(test)]
mod proptests {
    use super::*;
    use num_bigint::BigInt;
    use num_rational::BigRational;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn decomposer() -> NumberDecomposer {
        NumberDecomposer::new(Arc::new(LiteralTable::generate(10)))
    }

    fn symbols(equation: &str) -> usize {
        equation
            .split_whitespace()
            .filter(|token| matches!(*token, "+" | "-" | "*" | "/"))
            .count()
            + equation.matches('^').count()
    }

    proptest! {
        #[test]
        fn integers_decompose_to_themselves(n in -5_000_000i64..5_000_000) {
            let target = BigRational::from_integer(BigInt::from(n));
            let result = decomposer().decompose_offline(&target).unwrap();
            prop_assert_eq!(result.value(), &target);
            prop_assert_eq!(result.operator_count(), symbols(result.equation()));
            prop_assert_eq!(result.operator_count() == 0, result.patterns().len() == 1);
        }

        #[test]
        fn fractions_decompose_to_themselves(p in -10_000i64..10_000, q in 1i64..500) {
            let target = BigRational::new(BigInt::from(p), BigInt::from(q));
            let result = decomposer().decompose_offline(&target).unwrap();
            prop_assert_eq!(result.value(), &target);
            prop_assert_eq!(result.operator_count(), symbols(result.equation()));
        }

        #[test]
        fn table_entries_decode(n in -2000i64..=2000) {
            let table = LiteralTable::generate(DEFAULT_BOUND);
            let pattern = table.get(n).unwrap();
            prop_assert_eq!(
                hexcast_handlers::decode_literal(pattern.signature()),
                Some(BigRational::from_integer(BigInt::from(n)))
            );
        }
    }
}
