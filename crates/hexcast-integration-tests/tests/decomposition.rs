//! Decomposed programs evaluate to their target on a stack machine.

use std::sync::Arc;
use std::time::Duration;

use hexcast_geometry::Pattern;
use hexcast_handlers::decode_literal;
use hexcast_integration_tests::{int, operator_symbols, ratio, registry, small_decomposer, table};
use hexcast_numbers::{
    CancelToken, DecomposerConfig, LiteralOracle, NumberDecomposer, Operator, StrokeSearch,
};
use hexcast_registry::PatternMatch;
use num_bigint::BigInt;
use num_rational::BigRational;
use proptest::prelude::*;

/// Run a program of literals and arithmetic operators.
fn evaluate(patterns: &[Pattern]) -> Option<BigRational> {
    let mut stack: Vec<BigRational> = Vec::new();
    for pattern in patterns {
        if let Some(value) = decode_literal(pattern.signature()) {
            stack.push(value);
            continue;
        }
        let op = Operator::ALL
            .into_iter()
            .find(|op| op.pattern().signature() == pattern.signature())?;
        let rhs = stack.pop()?;
        let lhs = stack.pop()?;
        stack.push(match op {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => lhs / rhs,
            Operator::Pow => {
                let exponent = usize::try_from(rhs.to_integer()).ok()?;
                num_traits::pow(lhs, exponent)
            }
        });
    }
    match stack.as_slice() {
        [value] => Some(value.clone()),
        _ => None,
    }
}

#[test]
fn nineteen_is_a_power_plus_a_remainder() {
    let result = small_decomposer(10).decompose_offline(&int(19)).unwrap();
    assert_eq!(result.equation(), "2^4 + 3");
    assert_eq!(result.operator_count(), operator_symbols(result.equation()));
    assert_eq!(evaluate(result.patterns()), Some(int(19)));

    let labels: Vec<_> = result
        .patterns()
        .iter()
        .map(|p| registry().identify(p).label().unwrap_or_default())
        .collect();
    assert_eq!(
        labels,
        [
            "Numerical Reflection: 2",
            "Numerical Reflection: 4",
            "Power Distillation",
            "Numerical Reflection: 3",
            "Additive Distillation",
        ]
    );
}

#[test]
fn default_table_covers_small_values_directly() {
    let decomposer = NumberDecomposer::new(table());
    for n in [-2000, -1, 0, 1, 1999, 2000] {
        let result = decomposer.decompose_offline(&int(n)).unwrap();
        assert_eq!(result.patterns().len(), 1, "{n}");
    }
    let big = decomposer.decompose_offline(&int(123_456_789)).unwrap();
    assert!(big.patterns().len() > 1);
    assert_eq!(evaluate(big.patterns()), Some(int(123_456_789)));
}

#[test]
fn fractions_and_negatives_evaluate() {
    let decomposer = small_decomposer(10);
    for target in [ratio(1, 3), ratio(-7, 2), ratio(1000, 3), ratio(-19, 7), int(-19), int(-4096)] {
        let result = decomposer.decompose_offline(&target).unwrap();
        assert_eq!(evaluate(result.patterns()), Some(target.clone()), "{}", result.equation());
        assert_eq!(result.operator_count(), operator_symbols(result.equation()));
    }
}

struct Stuck;

impl LiteralOracle for Stuck {
    fn search(&self, _target: &BigRational, cancel: &CancelToken) -> Option<Pattern> {
        while !cancel.is_cancelled() {
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }
}

#[tokio::test]
async fn oracle_timeout_is_a_fallback_not_an_error() {
    let decomposer = small_decomposer(10)
        .with_oracle(Arc::new(Stuck))
        .with_config(DecomposerConfig::default().with_oracle_timeout(Duration::from_millis(30)));
    let result = decomposer.decompose(&int(19)).await.unwrap();
    assert_eq!(result.equation(), "2^4 + 3");
}

#[tokio::test]
async fn oracle_literal_beats_decomposition() {
    let decomposer = small_decomposer(10)
        .with_oracle(Arc::new(StrokeSearch::default()))
        .with_config(DecomposerConfig::default().with_oracle_timeout(Duration::from_secs(5)));
    let result = decomposer.decompose(&int(50)).await.unwrap();
    assert_eq!(result.patterns().len(), 1);
    assert!(matches!(
        registry().identify(&result.patterns()[0]),
        PatternMatch::Special { .. }
    ));
    assert_eq!(evaluate(result.patterns()), Some(int(50)));
}

#[test]
fn out_of_range_is_an_error() {
    let huge = BigRational::from_integer(BigInt::from(1u8) << 200);
    assert!(small_decomposer(10).decompose_offline(&huge).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn programs_compute_their_value(n in -1_000_000_000i64..1_000_000_000) {
        let result = small_decomposer(10).decompose_offline(&int(n)).unwrap();
        prop_assert_eq!(evaluate(result.patterns()), Some(int(n)));
    }
}
