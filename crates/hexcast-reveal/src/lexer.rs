//! Tokenizer for dumped iota text.
//!
//! Punctuation is tokenized on its own. Everything else between punctuation
//! is a word, trimmed, so `Additive Distillation` and `SOUTH_WEST w` arrive
//! as single words. Words never span a line break, which lets line-separated
//! lists parse without commas.

use crate::error::{Error, Result};

/// Byte range of a token in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    LBracket,
    RBracket,
    LParen,
    RParen,
    LAngle,
    RAngle,
    Comma,
    Semicolon,
    Pipe,
    Arrow,
    /// Quoted string, unescaped.
    Str(String),
    Word(String),
}

impl TokenKind {
    fn punct(c: char) -> Option<Self> {
        Some(match c {
            '[' => Self::LBracket,
            ']' => Self::RBracket,
            '(' => Self::LParen,
            ')' => Self::RParen,
            '<' => Self::LAngle,
            '>' => Self::RAngle,
            ',' => Self::Comma,
            ';' => Self::Semicolon,
            '|' => Self::Pipe,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

fn ends_word(rest: &str) -> bool {
    rest.starts_with("->")
        || rest.starts_with('"')
        || rest.starts_with('\n')
        || rest.starts_with('\r')
        || rest.chars().next().and_then(TokenKind::punct).is_some()
}

pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < source.len() {
        let rest = &source[pos..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        if c.is_whitespace() {
            pos += c.len_utf8();
            continue;
        }

        if rest.starts_with("->") {
            tokens.push(Token {
                kind: TokenKind::Arrow,
                span: Span::new(pos, pos + 2),
            });
            pos += 2;
            continue;
        }

        if let Some(kind) = TokenKind::punct(c) {
            tokens.push(Token {
                kind,
                span: Span::new(pos, pos + 1),
            });
            pos += 1;
            continue;
        }

        if c == '"' {
            let (text, len) = string_literal(rest).ok_or_else(|| Error::UnterminatedString {
                offset: pos,
                fragment: rest.chars().take(24).collect(),
            })?;
            tokens.push(Token {
                kind: TokenKind::Str(text),
                span: Span::new(pos, pos + len),
            });
            pos += len;
            continue;
        }

        let mut end = pos;
        while end < source.len() && !ends_word(&source[end..]) {
            end += source[end..].chars().next().map_or(1, char::len_utf8);
        }
        let word = source[pos..end].trim_end();
        tokens.push(Token {
            kind: TokenKind::Word(word.to_string()),
            span: Span::new(pos, pos + word.len()),
        });
        pos = end;
    }

    Ok(tokens)
}

/// Unescape a string starting at its opening quote; returns the contents and
/// the byte length including both quotes.
fn string_literal(rest: &str) -> Option<(String, usize)> {
    let mut text = String::new();
    let mut chars = rest.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((text, i + 1)),
            '\\' => {
                let (_, escaped) = chars.next()?;
                text.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
            }
            other => text.push(other),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn word(text: &str) -> TokenKind {
        TokenKind::Word(text.to_string())
    }

    #[test]
    fn words_keep_inner_spaces() {
        assert_eq!(
            kinds("[HexPattern(SOUTH_WEST w), Mind's  Reflection]"),
            vec![
                TokenKind::LBracket,
                word("HexPattern"),
                TokenKind::LParen,
                word("SOUTH_WEST w"),
                TokenKind::RParen,
                TokenKind::Comma,
                word("Mind's  Reflection"),
                TokenKind::RBracket,
            ]
        );
    }

    #[test]
    fn arrow_and_masks() {
        assert_eq!(
            kinds("[Jump -> (a)] Bookkeeper's Gambit: v-"),
            vec![
                TokenKind::LBracket,
                word("Jump"),
                TokenKind::Arrow,
                TokenKind::LParen,
                word("a"),
                TokenKind::RParen,
                TokenKind::RBracket,
                word("Bookkeeper's Gambit: v-"),
            ]
        );
    }

    #[test]
    fn line_breaks_split_words() {
        assert_eq!(kinds("[\n    1\n    2\n]")[1..3], [word("1"), word("2")]);
    }

    #[test]
    fn strings_unescape() {
        assert_eq!(
            kinds(r#""say \"hi\", [ok]""#),
            vec![TokenKind::Str("say \"hi\", [ok]".to_string())]
        );
        let err = tokenize("[\"open").unwrap_err();
        assert_eq!(err.offset(), 1);
        assert_eq!(err.fragment(), Some("\"open"));
    }

    #[test]
    fn spans_point_into_source() {
        let source = "  <east, qaq>";
        let tokens = tokenize(source).unwrap();
        let word = &tokens[1];
        assert_eq!(&source[word.span.start..word.span.end], "east");
        assert_eq!(tokens[0].span, Span::new(2, 3));
    }
}
