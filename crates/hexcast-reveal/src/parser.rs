//! Recursive-descent parser over [`tokenize`]d input.
//!
//! ```text
//! iota    := list | jump | matrix | vector | pattern | STRING | word
//! list    := '[' (iota (','? iota)* ','?)? ']'
//! jump    := '[' ('Jump' | 'Call') ('->' '(' WORD (',' WORD)* ')')? ']'
//! matrix  := '[' '(' ROWS ',' COLS ')' '|' (NUMBER ((',' | ';') NUMBER)*)? ']'
//! vector  := '(' NUMBER ',' NUMBER ',' NUMBER ')'
//! pattern := 'HexPattern' '(' WORD (',' WORD?)? ')'
//!          | 'HexPattern' '[' WORD (',' WORD?)? ']'
//!          | '<' WORD (',' WORD?)? '>'
//! ```
//!
//! Words are numbers, booleans, `NULL`, or anything the registry's shorthand
//! lookup understands; the rest become [`Iota::Unknown`].

use hexcast_geometry::Pattern;
use hexcast_handlers::{GenerateContext, LiteralSource};
use hexcast_registry::{PatternRegistry, ShorthandTarget};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::iota::{ContinuationKind, Iota, Matrix, PatternIota};
use crate::lexer::{tokenize, Span, Token, TokenKind};

const PATTERN_KEYWORD: &str = "HexPattern";

/// Deepest bracket nesting accepted.
pub const MAX_DEPTH: usize = 256;

/// Parses dumps against a registry.
#[derive(Clone, Copy)]
pub struct RevealParser<'a> {
    registry: &'a PatternRegistry,
    literals: Option<&'a dyn LiteralSource>,
}

impl std::fmt::Debug for RevealParser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealParser")
            .field("patterns", &self.registry.len())
            .field("literals", &self.literals.is_some())
            .finish()
    }
}

impl<'a> RevealParser<'a> {
    pub fn new(registry: &'a PatternRegistry) -> Self {
        Self {
            registry,
            literals: None,
        }
    }

    /// Literal source for generating numbers named in bare words, such as
    /// `Numerical Reflection: 19`.
    #[must_use]
    pub fn with_literals(mut self, literals: &'a dyn LiteralSource) -> Self {
        self.literals = Some(literals);
        self
    }

    /// Parse exactly one iota, usually a list.
    pub fn parse(&self, source: &str) -> Result<Iota> {
        let tokens = tokenize(source)?;
        let mut cursor = Cursor {
            source,
            tokens: &tokens,
            pos: 0,
            depth: 0,
            parser: self,
        };
        let iota = cursor.iota()?;
        if let Some(extra) = cursor.peek() {
            return Err(Error::Trailing {
                offset: extra.span.start,
                fragment: cursor.fragment_from(extra.span),
            });
        }
        Ok(iota)
    }

    fn context(&self) -> GenerateContext<'a> {
        match self.literals {
            Some(literals) => GenerateContext::new().with_literals(literals),
            None => GenerateContext::new(),
        }
    }

    fn resolved(&self, pattern: Pattern) -> PatternIota {
        let label = self.registry.identify(&pattern).label();
        trace!(%pattern, ?label, "resolved pattern");
        PatternIota { pattern, label }
    }

    /// A bare word that is not a number, boolean or null.
    fn word(&self, text: &str) -> Iota {
        let Some(shorthand) = self.registry.lookup_by_shorthand(text) else {
            debug!(text, "unrecognized word");
            return Iota::Unknown(text.to_string());
        };

        match shorthand.target {
            ShorthandTarget::Pattern(info) => Iota::Pattern(
                PatternIota::new(info.pattern.clone()).with_label(info.display_name()),
            ),
            ShorthandTarget::Raw(pattern) => Iota::Pattern(self.resolved(pattern)),
            ShorthandTarget::Special(info) => {
                let argument = shorthand.argument.unwrap_or_default();
                match info.generate(&argument, &self.context()) {
                    Ok((value, pattern)) => {
                        Iota::Pattern(PatternIota::new(pattern).with_label(info.label(&value)))
                    }
                    Err(err) => {
                        debug!(text, %err, "could not generate special pattern");
                        Iota::Unknown(text.to_string())
                    }
                }
            }
        }
    }
}

/// Number words: must start like a number so `inf` or `nan` stay words.
fn number(text: &str) -> Option<f64> {
    let first = text.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '-' | '+' | '.')) {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

struct Cursor<'p, 'a> {
    source: &'p str,
    tokens: &'p [Token],
    pos: usize,
    /// Open brackets around the current position.
    depth: usize,
    parser: &'p RevealParser<'a>,
}

impl Cursor<'_, '_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn next(&mut self, expected: &'static str) -> Result<&Token> {
        let token = self.tokens.get(self.pos).ok_or(Error::UnexpectedEnd {
            expected,
            offset: self.source.len(),
        })?;
        self.pos += 1;
        Ok(token)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> Result<Span> {
        let token = self.next(expected)?.clone();
        if token.kind == *kind {
            Ok(token.span)
        } else {
            Err(self.unexpected(expected, token.span))
        }
    }

    fn fragment_from(&self, span: Span) -> String {
        let end = self.source[span.start..]
            .char_indices()
            .nth(24)
            .map_or(self.source.len(), |(i, _)| span.start + i)
            .max(span.end.min(self.source.len()));
        self.source[span.start..end].to_string()
    }

    fn unexpected(&self, expected: &'static str, span: Span) -> Error {
        Error::Unexpected {
            expected,
            offset: span.start,
            fragment: self.source[span.start..span.end].to_string(),
        }
    }

    fn iota(&mut self) -> Result<Iota> {
        let token = self.next("an iota")?.clone();
        match token.kind {
            TokenKind::LBracket => {
                if self.depth >= MAX_DEPTH {
                    return Err(Error::TooDeep {
                        offset: token.span.start,
                        fragment: self.fragment_from(token.span),
                        limit: MAX_DEPTH,
                    });
                }
                self.depth += 1;
                let iota = self.bracketed(token.span);
                self.depth -= 1;
                iota
            }
            TokenKind::LParen => {
                let values = self.numbers_group(token.span)?;
                self.vector(values, token.span)
            }
            TokenKind::LAngle => self.pattern_body(&TokenKind::RAngle, token.span),
            TokenKind::Str(text) => Ok(Iota::String(text)),
            TokenKind::Word(word) => self.word(&word, token.span),
            _ => Err(self.unexpected("an iota", token.span)),
        }
    }

    fn word(&mut self, word: &str, span: Span) -> Result<Iota> {
        if word == PATTERN_KEYWORD {
            if self.eat(&TokenKind::LParen) {
                return self.pattern_body(&TokenKind::RParen, span);
            }
            if self.eat(&TokenKind::LBracket) {
                return self.pattern_body(&TokenKind::RBracket, span);
            }
        }
        if let Some(n) = number(word) {
            return Ok(Iota::Number(n));
        }
        Ok(match word {
            "true" | "True" | "TRUE" => Iota::Boolean(true),
            "false" | "False" | "FALSE" => Iota::Boolean(false),
            "null" | "Null" | "NULL" => Iota::Null,
            _ => self.parser.word(word),
        })
    }

    /// The part of a pattern after its opening delimiter.
    fn pattern_body(&mut self, close: &TokenKind, open: Span) -> Result<Iota> {
        let start = self.next("a direction")?.clone();
        let TokenKind::Word(head) = &start.kind else {
            return Err(self.unexpected("a direction", start.span));
        };
        let mut text = head.clone();

        if self.eat(&TokenKind::Comma) {
            if let Some(TokenKind::Word(signature)) = self.peek_kind() {
                text.push(' ');
                text.push_str(signature);
                self.pos += 1;
            }
        }
        let end = self.expect(close, "the end of the pattern")?;

        let pattern: Pattern = text.parse().map_err(|err| Error::InvalidPattern {
            offset: open.start,
            fragment: self.source[open.start..end.end].to_string(),
            reason: format!("{err}"),
        })?;
        Ok(Iota::Pattern(self.parser.resolved(pattern)))
    }

    /// `( NUMBER (, NUMBER)* )` after its opening paren.
    fn numbers_group(&mut self, open: Span) -> Result<Vec<f64>> {
        let mut values = Vec::new();
        loop {
            let token = self.next("a number")?.clone();
            match &token.kind {
                TokenKind::Word(word) => values.push(number(word).ok_or_else(|| {
                    Error::InvalidNumber {
                        offset: token.span.start,
                        fragment: word.clone(),
                    }
                })?),
                _ => return Err(self.unexpected("a number", token.span)),
            }
            if self.eat(&TokenKind::RParen) {
                return Ok(values);
            }
            self.expect(&TokenKind::Comma, "`,` or `)`").map_err(|err| {
                if matches!(err, Error::UnexpectedEnd { .. }) {
                    Error::Unexpected {
                        expected: "`)`",
                        offset: open.start,
                        fragment: self.fragment_from(open),
                    }
                } else {
                    err
                }
            })?;
        }
    }

    fn vector(&self, values: Vec<f64>, open: Span) -> Result<Iota> {
        match values[..] {
            [x, y, z] => Ok(Iota::Vector([x, y, z])),
            _ => Err(Error::Unexpected {
                expected: "a vector of three numbers",
                offset: open.start,
                fragment: self.fragment_from(open),
            }),
        }
    }

    /// Everything after a `[`: a list, a continuation marker, or a matrix.
    fn bracketed(&mut self, open: Span) -> Result<Iota> {
        let mut items = Vec::new();

        match self.peek().cloned() {
            Some(Token {
                kind: TokenKind::Word(word),
                span,
            }) => {
                if let Some(kind) = ContinuationKind::from_keyword(&word) {
                    self.pos += 1;
                    match self.peek_kind() {
                        Some(TokenKind::Arrow) | Some(TokenKind::RBracket) => {
                            return self.continuation(kind);
                        }
                        _ => {
                            let first = self.word(&word, span)?;
                            items.push(first);
                        }
                    }
                }
            }
            Some(Token {
                kind: TokenKind::LParen,
                span,
            }) => {
                self.pos += 1;
                let values = self.numbers_group(span)?;
                if self.eat(&TokenKind::Pipe) {
                    return self.matrix(&values, open);
                }
                items.push(self.vector(values, span)?);
            }
            _ => {}
        }

        self.list(items)
    }

    fn list(&mut self, mut items: Vec<Iota>) -> Result<Iota> {
        if !items.is_empty() {
            self.eat(&TokenKind::Comma);
        }
        loop {
            if self.eat(&TokenKind::RBracket) {
                return Ok(Iota::List(items));
            }
            items.push(self.iota()?);
            self.eat(&TokenKind::Comma);
        }
    }

    fn continuation(&mut self, kind: ContinuationKind) -> Result<Iota> {
        let mut labels = Vec::new();
        if self.eat(&TokenKind::Arrow) {
            self.expect(&TokenKind::LParen, "`(`")?;
            loop {
                let token = self.next("a frame label")?.clone();
                match token.kind {
                    TokenKind::Word(label) => labels.push(label),
                    _ => return Err(self.unexpected("a frame label", token.span)),
                }
                if self.eat(&TokenKind::RParen) {
                    break;
                }
                self.expect(&TokenKind::Comma, "`,` or `)`")?;
            }
        }
        self.expect(&TokenKind::RBracket, "`]`")?;
        Ok(Iota::Continuation { kind, labels })
    }

    /// Matrix entries after `[(R, C) |`.
    fn matrix(&mut self, shape: &[f64], open: Span) -> Result<Iota> {
        let dimension = |n: f64| (n >= 0.0 && n.fract() == 0.0 && n <= 1e6).then_some(n as usize);
        let (rows, cols) = match shape {
            [r, c] => match (dimension(*r), dimension(*c)) {
                (Some(rows), Some(cols)) => (rows, cols),
                _ => {
                    return Err(Error::MatrixShape {
                        offset: open.start,
                        rows: 0,
                        cols: 0,
                        reason: format!("dimensions {r} and {c} are not counts"),
                    })
                }
            },
            _ => {
                return Err(Error::MatrixShape {
                    offset: open.start,
                    rows: 0,
                    cols: 0,
                    reason: format!("shape needs two dimensions, found {}", shape.len()),
                })
            }
        };
        let shape_error = |reason: String| Error::MatrixShape {
            offset: open.start,
            rows,
            cols,
            reason,
        };

        let mut data = Vec::new();
        let mut row_start = 0;
        loop {
            let token = self.next("`]`")?.clone();
            match &token.kind {
                TokenKind::RBracket => break,
                TokenKind::Comma => {}
                TokenKind::Semicolon => {
                    if data.len() - row_start != cols {
                        return Err(shape_error(format!(
                            "row {} has {} entries",
                            row_start / cols.max(1),
                            data.len() - row_start
                        )));
                    }
                    row_start = data.len();
                }
                TokenKind::Word(word) => data.push(number(word).ok_or_else(|| {
                    Error::InvalidNumber {
                        offset: token.span.start,
                        fragment: word.clone(),
                    }
                })?),
                _ => return Err(self.unexpected("a matrix entry", token.span)),
            }
        }

        let found = data.len();
        Matrix::new(rows, cols, data)
            .map(Iota::Matrix)
            .ok_or_else(|| shape_error(format!("found {found} entries")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexcast_geometry::Direction;
    use hexcast_registry::RegistryBuilder;

    fn parse_empty(source: &str) -> Result<Iota> {
        let registry = PatternRegistry::empty();
        RevealParser::new(&registry).parse(source)
    }

    fn builtin() -> PatternRegistry {
        RegistryBuilder::with_builtins().build().unwrap()
    }

    fn pattern(start: Direction, signature: &str) -> Iota {
        Iota::pattern(Pattern::new(start, signature).unwrap())
    }

    #[test]
    fn parses_the_basic_dump() {
        let iota = parse_empty("[HexPattern(EAST), HexPattern(SOUTH_WEST w), 0.00]").unwrap();
        assert_eq!(
            iota,
            Iota::List(vec![
                pattern(Direction::East, ""),
                pattern(Direction::SouthWest, "w"),
                Iota::Number(0.0),
            ])
        );
    }

    #[test]
    fn dialects_agree() {
        let registry = builtin();
        let parser = RevealParser::new(&registry);
        let forms = [
            "HexPattern(NORTH_EAST qaq)",
            "HexPattern[NORTH_EAST, qaq]",
            "<north_east,qaq>",
            "<northeast qaq>",
            "HexPattern(NORTH_EAST, qaq)",
        ];
        let parsed: Vec<_> = forms.iter().map(|f| parser.parse(f).unwrap()).collect();
        for iota in &parsed[1..] {
            assert_eq!(iota, &parsed[0]);
        }
        let Iota::Pattern(p) = &parsed[0] else {
            panic!("not a pattern: {:?}", parsed[0]);
        };
        assert_eq!(p.label.as_deref(), Some("Mind's Reflection"));

        let empty = ["HexPattern(EAST)", "HexPattern[EAST, ]", "<east,>", "<EAST>"];
        for form in empty {
            assert_eq!(parse_empty(form).unwrap(), pattern(Direction::East, ""), "{form}");
        }
    }

    #[test]
    fn scalars_and_containers() {
        let text = r#"[(1, -2.5, 3), True, NULL, "hi", [], [Jump], [Call -> (a, b c)]]"#;
        let iota = parse_empty(text).unwrap();
        assert_eq!(
            iota,
            Iota::List(vec![
                Iota::Vector([1.0, -2.5, 3.0]),
                Iota::Boolean(true),
                Iota::Null,
                Iota::String("hi".into()),
                Iota::List(Vec::new()),
                Iota::Continuation {
                    kind: ContinuationKind::Jump,
                    labels: Vec::new(),
                },
                Iota::Continuation {
                    kind: ContinuationKind::Call,
                    labels: vec!["a".into(), "b c".into()],
                },
            ])
        );
    }

    #[test]
    fn matrices() {
        let iota = parse_empty("[(2, 3) | 1, 2, 3; 4, 5, 6]").unwrap();
        let Iota::Matrix(m) = iota else {
            panic!("not a matrix");
        };
        assert_eq!((m.rows(), m.cols()), (2, 3));
        assert_eq!(m.get(1, 2), Some(6.0));

        let pretty = parse_empty("[(2, 2) |\n    1, 20\n    3,  4\n]").unwrap();
        assert_eq!(pretty, Iota::Matrix(Matrix::new(2, 2, vec![1.0, 20.0, 3.0, 4.0]).unwrap()));

        assert!(matches!(
            parse_empty("[(2, 2) | 1, 2, 3]"),
            Err(Error::MatrixShape { rows: 2, cols: 2, .. })
        ));
        assert!(matches!(
            parse_empty("[(2, 2) | 1; 2, 3, 4]"),
            Err(Error::MatrixShape { .. })
        ));
        assert!(matches!(
            parse_empty("[(1.5, 2) | ]"),
            Err(Error::MatrixShape { .. })
        ));
    }

    #[test]
    fn list_starting_with_vector() {
        let iota = parse_empty("[(1, 2, 3), 4]").unwrap();
        assert_eq!(
            iota,
            Iota::List(vec![Iota::Vector([1.0, 2.0, 3.0]), Iota::Number(4.0)])
        );
    }

    #[test]
    fn newlines_separate_items() {
        let iota = parse_empty("[\n    HexPattern(EAST)\n    0\n]").unwrap();
        assert_eq!(iota.as_list().map(<[Iota]>::len), Some(2));
    }

    #[test]
    fn bare_words_use_shorthand() {
        let registry = builtin();
        let parser = RevealParser::new(&registry);
        let iota = parser
            .parse("[Additive Distillation, gemini decomp, Bookkeeper's Gambit: v-, Steve]")
            .unwrap();
        let items = iota.as_list().unwrap();

        let Iota::Pattern(add) = &items[0] else {
            panic!("{:?}", items[0]);
        };
        assert_eq!(add.pattern, Pattern::from_static(Direction::NorthEast, "waaw"));
        assert_eq!(add.label.as_deref(), Some("Additive Distillation"));

        let Iota::Pattern(gemini) = &items[1] else {
            panic!("{:?}", items[1]);
        };
        assert_eq!(gemini.label.as_deref(), Some("Gemini Decomposition"));

        let Iota::Pattern(mask) = &items[2] else {
            panic!("{:?}", items[2]);
        };
        assert_eq!(mask.label.as_deref(), Some("Bookkeeper's Gambit: v-"));
        assert_eq!(hexcast_handlers::decode_mask(&mask.pattern).as_deref(), Some("v-"));

        assert_eq!(items[3], Iota::Unknown("Steve".into()));
    }

    #[test]
    fn numbers_need_a_literal_source() {
        struct Fixed;
        impl LiteralSource for Fixed {
            fn literal(&self, _value: &num_rational::BigRational) -> Option<Pattern> {
                hexcast_handlers::literal_pattern(false, "qa").ok()
            }
        }

        let registry = builtin();
        let without = RevealParser::new(&registry)
            .parse("Numerical Reflection: 10")
            .unwrap();
        assert_eq!(without, Iota::Unknown("Numerical Reflection: 10".into()));

        let with = RevealParser::new(&registry)
            .with_literals(&Fixed)
            .parse("Numerical Reflection: 10")
            .unwrap();
        let Iota::Pattern(p) = with else {
            panic!("not a pattern");
        };
        assert_eq!(p.label.as_deref(), Some("Numerical Reflection: 10"));
    }

    #[test]
    fn unknown_patterns_are_not_errors() {
        let registry = builtin();
        let iota = RevealParser::new(&registry)
            .parse("HexPattern(EAST qqqqqqqqqq)")
            .unwrap();
        let Iota::Pattern(p) = iota else {
            panic!("not a pattern");
        };
        assert_eq!(p.label, None);
    }

    #[test]
    fn errors_point_at_the_input() {
        let err = parse_empty("[HexPattern(EAST xyz)]").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { offset: 1, .. }));
        assert_eq!(err.fragment(), Some("HexPattern(EAST xyz)"));

        let err = parse_empty("[1, 2").unwrap_err();
        assert!(matches!(err, Error::UnexpectedEnd { .. }));

        let err = parse_empty("[1], 2").unwrap_err();
        assert_eq!(err.offset(), 3);
        assert!(matches!(err, Error::Trailing { .. }));

        let err = parse_empty("[,]").unwrap_err();
        assert_eq!(err.fragment(), Some(","));

        let err = parse_empty("(1, 2)").unwrap_err();
        assert_eq!(err.fragment(), Some("(1, 2)"));
    }

    #[test]
    fn nesting_is_bounded() {
        let deep = format!("{}{}", "[".repeat(50_000), "]".repeat(50_000));
        let err = parse_empty(&deep).unwrap_err();
        assert_eq!(err.offset(), MAX_DEPTH);
        assert_eq!(
            err,
            Error::TooDeep {
                offset: MAX_DEPTH,
                fragment: "[".repeat(24),
                limit: MAX_DEPTH,
            }
        );

        let deepest = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        let mut iota = parse_empty(&deepest).unwrap();
        for _ in 1..MAX_DEPTH {
            let Iota::List(mut items) = iota else {
                panic!("not a list");
            };
            iota = items.pop().unwrap();
        }
        assert_eq!(iota, Iota::List(Vec::new()));
    }
}
