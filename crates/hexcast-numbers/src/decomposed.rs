//! Pattern programs that build a number on the stack.

use std::fmt;

use hexcast_geometry::Pattern;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{Error, Result};
use crate::operator::Operator;
use crate::table::LiteralTable;

/// Outermost operation of an expression, for parenthesization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Literal,
    Sum,
    Product,
    Power,
    /// Already parenthesized.
    Group,
}

/// A value together with the patterns that compute it.
///
/// Combinators take the literal table so that any integral intermediate
/// inside the table collapses back to a single literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposedNumber {
    value: BigRational,
    equation: String,
    patterns: Vec<Pattern>,
    form: Form,
    /// Value of the leading literal when negating it negates the whole.
    lead: Option<BigRational>,
}

impl DecomposedNumber {
    /// A single literal pattern.
    pub fn literal(value: BigRational, pattern: Pattern) -> Self {
        Self {
            equation: value.to_string(),
            patterns: vec![pattern],
            form: Form::Literal,
            lead: Some(value.clone()),
            value,
        }
    }

    /// Table literal for an integer, if the table has one.
    pub fn from_table(table: &LiteralTable, n: &BigInt) -> Option<Self> {
        let pattern = table.integer(n)?.clone();
        Some(Self::literal(BigRational::from_integer(n.clone()), pattern))
    }

    fn require(table: &LiteralTable, n: i64) -> Result<Self> {
        let n = BigInt::from(n);
        Self::from_table(table, &n).ok_or(Error::MissingLiteral(n))
    }

    pub fn value(&self) -> &BigRational {
        &self.value
    }

    pub fn equation(&self) -> &str {
        &self.equation
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn into_patterns(self) -> Vec<Pattern> {
        self.patterns
    }

    pub fn form(&self) -> Form {
        self.form
    }

    /// Number of arithmetic operator patterns in the program.
    pub fn operator_count(&self) -> usize {
        self.patterns
            .iter()
            .filter(|p| Operator::is_operator(p))
            .count()
    }

    /// Parenthesize even a bare literal, as a quotient's operands are.
    #[must_use]
    pub fn parenthesized(self) -> Self {
        match self.form {
            Form::Group => self,
            _ => Self {
                equation: format!("({})", self.equation),
                form: Form::Group,
                ..self
            },
        }
    }

    fn wrapped_if(self, wrap: bool) -> String {
        if wrap {
            format!("({})", self.equation)
        } else {
            self.equation
        }
    }

    fn snap(value: &BigRational, table: &LiteralTable) -> Option<Self> {
        let pattern = table.rational(value)?.clone();
        Some(Self::literal(value.clone(), pattern))
    }

    fn combine(
        lhs: Self,
        rhs: Self,
        op: Operator,
        value: BigRational,
        form: Form,
        table: &LiteralTable,
    ) -> Self {
        if let Some(literal) = Self::snap(&value, table) {
            return literal;
        }

        let lead = match op {
            Operator::Mul | Operator::Div => lhs.lead.clone(),
            _ => None,
        };
        let (wrap_lhs, wrap_rhs) = match op {
            Operator::Add => (false, false),
            Operator::Sub => (false, rhs.form == Form::Sum),
            Operator::Mul => (lhs.form == Form::Sum, rhs.form == Form::Sum),
            Operator::Div => (
                lhs.form == Form::Sum,
                matches!(rhs.form, Form::Sum | Form::Product),
            ),
            Operator::Pow => (
                lhs.form != Form::Literal || lhs.value.is_negative(),
                rhs.form != Form::Literal,
            ),
        };

        let mut patterns = lhs.patterns.clone();
        patterns.extend(rhs.patterns.iter().cloned());
        patterns.push(op.pattern());

        let equation = if op == Operator::Pow {
            format!("{}^{}", lhs.wrapped_if(wrap_lhs), rhs.wrapped_if(wrap_rhs))
        } else {
            format!(
                "{} {} {}",
                lhs.wrapped_if(wrap_lhs),
                op.symbol(),
                rhs.wrapped_if(wrap_rhs)
            )
        };

        Self {
            value,
            equation,
            patterns,
            form,
            lead,
        }
    }

    #[must_use]
    pub fn add(self, rhs: Self, table: &LiteralTable) -> Self {
        if rhs.value.is_zero() {
            return self;
        }
        if self.value.is_zero() {
            return rhs;
        }
        let value = &self.value + &rhs.value;
        Self::combine(self, rhs, Operator::Add, value, Form::Sum, table)
    }

    #[must_use]
    pub fn sub(self, rhs: Self, table: &LiteralTable) -> Self {
        if rhs.value.is_zero() {
            return self;
        }
        let value = &self.value - &rhs.value;
        Self::combine(self, rhs, Operator::Sub, value, Form::Sum, table)
    }

    pub fn mul(self, rhs: Self, table: &LiteralTable) -> Result<Self> {
        if self.value.is_zero() || rhs.value.is_zero() {
            return Self::require(table, 0);
        }
        if rhs.value.is_one() {
            return Ok(self);
        }
        if self.value.is_one() {
            return Ok(rhs);
        }
        let value = &self.value * &rhs.value;
        Ok(Self::combine(self, rhs, Operator::Mul, value, Form::Product, table))
    }

    pub fn div(self, rhs: Self, table: &LiteralTable) -> Result<Self> {
        if rhs.value.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if rhs.value.is_one() {
            return Ok(self);
        }
        let value = &self.value / &rhs.value;
        Ok(Self::combine(self, rhs, Operator::Div, value, Form::Product, table))
    }

    /// Raise to a non-negative integer power.
    pub fn pow(self, exponent: Self, table: &LiteralTable) -> Result<Self> {
        let e = exponent
            .value
            .is_integer()
            .then(|| exponent.value.to_integer().to_u32())
            .flatten()
            .ok_or_else(|| Error::UnsupportedExponent(exponent.value.to_string()))?;
        match e {
            0 => Self::require(table, 1),
            1 => Ok(self),
            _ => {
                let value = num_traits::pow(self.value.clone(), e as usize);
                Ok(Self::combine(self, exponent, Operator::Pow, value, Form::Power, table))
            }
        }
    }

    /// Negate, folding the sign into the leading literal when possible and
    /// multiplying by `-1` otherwise.
    pub fn neg(self, table: &LiteralTable) -> Result<Self> {
        let negated = -&self.value;
        if let Some(literal) = Self::snap(&negated, table) {
            return Ok(literal);
        }

        if let Some(lead) = &self.lead {
            let flipped = -lead;
            if let Some(pattern) = table.rational(&flipped).cloned() {
                let old = lead.to_string();
                let opening = self.equation.len() - self.equation.trim_start_matches('(').len();
                let rest = &self.equation[opening..];
                if let Some(tail) = rest.strip_prefix(&old) {
                    let equation = format!("{}{}{}", &self.equation[..opening], flipped, tail);
                    let mut patterns = self.patterns;
                    patterns[0] = pattern;
                    return Ok(Self {
                        value: negated,
                        equation,
                        patterns,
                        form: self.form,
                        lead: Some(flipped),
                    });
                }
            }
        }

        let minus_one = Self::require(table, -1)?;
        self.mul(minus_one, table)
    }
}

impl fmt::Display for DecomposedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.value, self.equation)
    }
}
