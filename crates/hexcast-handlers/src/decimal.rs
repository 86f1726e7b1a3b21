//! Reading and writing numbers as text.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

/// Largest decimal exponent accepted by [`parse_rational`].
const MAX_EXPONENT: u32 = 1000;

/// Parse `-12`, `3.25`, `1e3`, `.5` or `3/4` into an exact rational.
pub fn parse_rational(text: &str) -> Option<BigRational> {
    let text = text.trim();

    if let Some((numer, denom)) = text.split_once('/') {
        let numer: BigInt = numer.trim().parse().ok()?;
        let denom: BigInt = denom.trim().parse().ok()?;
        if denom.is_zero() {
            return None;
        }
        return Some(BigRational::new(numer, denom));
    }

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (mantissa, exponent) = match unsigned.split_once(|c: char| c == 'e' || c == 'E') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().ok()?),
        None => (unsigned, 0),
    };
    if exponent.unsigned_abs() > MAX_EXPONENT {
        return None;
    }

    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let digits: BigInt = format!("{whole}{frac}").parse().ok()?;
    let scale = i64::from(exponent) - frac.len() as i64;
    let ten = BigInt::from(10u32);
    let factor = BigRational::from_integer(num_traits::pow(ten, scale.unsigned_abs() as usize));

    let magnitude = if scale >= 0 {
        BigRational::from_integer(digits) * factor
    } else {
        BigRational::from_integer(digits) / factor
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Format to four decimal places, dropping trailing zeros and a trailing
/// decimal point. Negative zero prints as `0`.
pub fn format_decimal(value: f64) -> String {
    let text = format!("{value:.4}");
    let trimmed = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Integers print exactly; anything else goes through [`format_decimal`].
pub fn format_rational(value: &BigRational) -> String {
    if value.is_integer() {
        value.to_integer().to_string()
    } else {
        format_decimal(value.to_f64().unwrap_or(f64::NAN))
    }
}
