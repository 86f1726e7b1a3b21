//! Shared fixtures for the cross-crate tests in `tests/`.

use std::sync::{Arc, OnceLock};

use hexcast_numbers::{LiteralTable, NumberDecomposer, DEFAULT_BOUND};
use hexcast_registry::{PatternRegistry, RegistryBuilder};
use num_bigint::BigInt;
use num_rational::BigRational;

/// The built-in registry, built once per test binary.
pub fn registry() -> &'static PatternRegistry {
    static REGISTRY: OnceLock<PatternRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        RegistryBuilder::with_builtins()
            .build()
            .unwrap_or_else(|err| panic!("built-in registry must build: {err}"))
    })
}

/// The default-bound literal table, generated once per test binary.
pub fn table() -> Arc<LiteralTable> {
    static TABLE: OnceLock<Arc<LiteralTable>> = OnceLock::new();
    TABLE
        .get_or_init(|| Arc::new(LiteralTable::generate(DEFAULT_BOUND)))
        .clone()
}

/// A decomposer over a small table so decomposition paths are exercised.
pub fn small_decomposer(bound: i64) -> NumberDecomposer {
    NumberDecomposer::new(Arc::new(LiteralTable::generate(bound)))
}

pub fn int(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

pub fn ratio(numer: i64, denom: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Count of `+ - * /` tokens and `^` characters in an equation.
pub fn operator_symbols(equation: &str) -> usize {
    equation
        .split_whitespace()
        .filter(|token| matches!(*token, "+" | "-" | "*" | "/"))
        .count()
        + equation.matches('^').count()
}
