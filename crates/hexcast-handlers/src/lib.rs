//! Hexcast Special Handlers
//!
//! Bidirectional codecs for pattern families whose meaning is a value rather
//! than a fixed operation.
//!
//! # Families
//!
//! - [`NumberHandler`] (Numerical Reflection): a sign prefix followed by an
//!   accumulator program over `w q e a d`.
//! - [`MaskHandler`] (Bookkeeper's Gambit): a zig-zag along a baseline where
//!   each flat stroke keeps a stack slot and each dip drops one.
//!
//! Each family implements [`SpecialHandler`] with its own value type. The
//! registry stores handlers type-erased behind [`DynSpecialHandler`], which
//! reports values as the closed [`SpecialValue`] enum. A new family is a new
//! `SpecialHandler` impl.

mod decimal;
mod error;
mod mask;
mod number;

use std::fmt;
use std::sync::Arc;

use hexcast_geometry::Pattern;
use num_rational::BigRational;

pub use decimal::{format_decimal, format_rational, parse_rational};
pub use error::{Error, Result};
pub use mask::{decode_mask, encode_mask, MaskHandler};
pub use number::{
    decode_literal, literal_pattern, NumberHandler, NEGATIVE_PREFIX, POSITIVE_PREFIX,
};

/// Something that can hand out a single literal pattern for a number.
pub trait LiteralSource: Send + Sync {
    fn literal(&self, value: &BigRational) -> Option<Pattern>;
}

/// Collaborators available while generating a pattern.
#[derive(Clone, Copy, Default)]
pub struct GenerateContext<'a> {
    pub literals: Option<&'a dyn LiteralSource>,
}

impl<'a> GenerateContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_literals(mut self, literals: &'a dyn LiteralSource) -> Self {
        self.literals = Some(literals);
        self
    }
}

impl fmt::Debug for GenerateContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateContext")
            .field("literals", &self.literals.is_some())
            .finish()
    }
}

/// Value decoded from, or encoded into, a special pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpecialValue {
    Number(BigRational),
    Mask(String),
}

impl From<BigRational> for SpecialValue {
    fn from(value: BigRational) -> Self {
        Self::Number(value)
    }
}

impl From<String> for SpecialValue {
    fn from(mask: String) -> Self {
        Self::Mask(mask)
    }
}

impl fmt::Display for SpecialValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => f.write_str(&format_rational(value)),
            Self::Mask(mask) => f.write_str(mask),
        }
    }
}

/// Codec for one parameterized pattern family.
pub trait SpecialHandler: Send + Sync {
    type Value: Into<SpecialValue>;

    /// Decode a pattern of this family, or `None` if it is not one.
    fn try_match(&self, pattern: &Pattern) -> Option<Self::Value>;

    /// Encode a textual argument into a pattern of this family.
    fn generate(&self, value: &str, ctx: &GenerateContext<'_>) -> Result<(Self::Value, Pattern)>;

    /// Check that `text` is an argument this family accepts, without encoding it.
    fn parse_argument(&self, text: &str) -> Option<Self::Value>;
}

/// Object-safe view of a [`SpecialHandler`].
pub trait DynSpecialHandler: Send + Sync {
    fn match_value(&self, pattern: &Pattern) -> Option<SpecialValue>;

    fn generate_value(
        &self,
        value: &str,
        ctx: &GenerateContext<'_>,
    ) -> Result<(SpecialValue, Pattern)>;

    fn parse_value(&self, text: &str) -> Option<SpecialValue>;
}

impl<H: SpecialHandler> DynSpecialHandler for H {
    fn match_value(&self, pattern: &Pattern) -> Option<SpecialValue> {
        self.try_match(pattern).map(Into::into)
    }

    fn generate_value(
        &self,
        value: &str,
        ctx: &GenerateContext<'_>,
    ) -> Result<(SpecialValue, Pattern)> {
        let (value, pattern) = self.generate(value, ctx)?;
        Ok((value.into(), pattern))
    }

    fn parse_value(&self, text: &str) -> Option<SpecialValue> {
        self.parse_argument(text).map(Into::into)
    }
}

/// Registry entry for a special handler.
#[derive(Clone)]
pub struct SpecialHandlerInfo {
    pub id: String,
    pub name: String,
    pub display_name: String,
    handler: Arc<dyn DynSpecialHandler>,
}

impl SpecialHandlerInfo {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        display_name: impl Into<String>,
        handler: impl DynSpecialHandler + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_name: display_name.into(),
            handler: Arc::new(handler),
        }
    }

    pub fn try_match(&self, pattern: &Pattern) -> Option<SpecialValue> {
        self.handler.match_value(pattern)
    }

    pub fn generate(
        &self,
        value: &str,
        ctx: &GenerateContext<'_>,
    ) -> Result<(SpecialValue, Pattern)> {
        self.handler.generate_value(value, ctx)
    }

    pub fn parse_argument(&self, text: &str) -> Option<SpecialValue> {
        self.handler.parse_value(text)
    }

    /// `"Numerical Reflection: 5"`.
    pub fn label(&self, value: &SpecialValue) -> String {
        format!("{}: {}", self.display_name, value)
    }
}

impl fmt::Debug for SpecialHandlerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecialHandlerInfo")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

/// Numerical Reflection and Bookkeeper's Gambit, in lookup priority order.
pub fn builtin_handlers() -> Vec<SpecialHandlerInfo> {
    vec![
        SpecialHandlerInfo::new(
            "hexcasting:number",
            "number",
            "Numerical Reflection",
            NumberHandler,
        ),
        SpecialHandlerInfo::new("hexcasting:mask", "mask", "Bookkeeper's Gambit", MaskHandler),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexcast_geometry::Direction;
    use num_bigint::BigInt;

    struct Fixed;

    impl LiteralSource for Fixed {
        fn literal(&self, value: &BigRational) -> Option<Pattern> {
            (*value == BigRational::from_integer(BigInt::from(7)))
                .then(|| literal_pattern(false, "wq").ok())
                .flatten()
        }
    }

    #[test]
    fn builtins_decode_through_erased_interface() {
        let handlers = builtin_handlers();
        let number = &handlers[0];
        let mask = &handlers[1];

        let five = Pattern::new(Direction::SouthEast, "aqaaq").unwrap();
        assert_eq!(number.try_match(&five).unwrap().to_string(), "5");
        assert_eq!(number.label(&number.try_match(&five).unwrap()), "Numerical Reflection: 5");
        assert_eq!(mask.try_match(&five), None);

        let keep = Pattern::new(Direction::East, "w").unwrap();
        assert_eq!(mask.try_match(&keep), Some(SpecialValue::Mask("--".into())));
    }

    #[test]
    fn number_generation_uses_literal_source() {
        let handlers = builtin_handlers();
        let number = &handlers[0];

        let ctx = GenerateContext::new().with_literals(&Fixed);
        let (value, pattern) = number.generate("7", &ctx).unwrap();
        assert_eq!(value.to_string(), "7");
        assert_eq!(pattern.signature(), "aqaawq");

        assert_eq!(
            number.generate("8", &ctx),
            Err(Error::NoLiteral("8".into()))
        );
        assert_eq!(
            number.generate("7", &GenerateContext::new()),
            Err(Error::NoLiteral("7".into()))
        );
        assert_eq!(
            number.generate("seven", &ctx),
            Err(Error::InvalidNumber("seven".into()))
        );
    }

    #[test]
    fn parse_argument_per_family() {
        let handlers = builtin_handlers();
        assert!(handlers[0].parse_argument("-2.5").is_some());
        assert!(handlers[0].parse_argument("v-").is_none());
        assert_eq!(handlers[1].parse_argument("v-"), Some(SpecialValue::Mask("v-".into())));
        assert!(handlers[1].parse_argument("12").is_none());
    }
}
