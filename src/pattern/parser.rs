//! Template parser.
//!
//! Turns the lexer's token stream into an ordered list of [`Segment`]s. Literal
//! runs are merged; a single `Char` directly before a parameter becomes that
//! parameter's prefix when it is one of the configured prefix characters.

use serde::Serialize;
use std::fmt;

use super::error::PatternError;
use super::lexer::{lex, Token, TokenKind};
use super::options::PatternOptions;

/// Name of a parameter: written in the template, or assigned by position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum KeyName {
    /// `:name`
    Named(String),
    /// Anonymous `(pattern)`, numbered from zero in order of appearance
    Index(usize),
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyName::Named(name) => f.write_str(name),
            KeyName::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for KeyName {
    fn from(name: &str) -> Self {
        KeyName::Named(name.to_string())
    }
}

impl From<usize> for KeyName {
    fn from(index: usize) -> Self {
        KeyName::Index(index)
    }
}

/// Quantifier following a parameter or group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Modifier {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "?")]
    Optional,
    #[serde(rename = "*")]
    ZeroOrMore,
    #[serde(rename = "+")]
    OneOrMore,
}

impl Modifier {
    fn from_token(value: &str) -> Self {
        match value {
            "?" => Modifier::Optional,
            "*" => Modifier::ZeroOrMore,
            "+" => Modifier::OneOrMore,
            _ => Modifier::None,
        }
    }

    /// Regex quantifier text (empty for [`Modifier::None`])
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::None => "",
            Modifier::Optional => "?",
            Modifier::ZeroOrMore => "*",
            Modifier::OneOrMore => "+",
        }
    }

    /// Whether the modifier repeats its operand
    #[must_use]
    pub fn is_repeat(self) -> bool {
        matches!(self, Modifier::ZeroOrMore | Modifier::OneOrMore)
    }
}

/// A capturing parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: KeyName,
    pub prefix: String,
    pub suffix: String,
    /// Regex fragment matched by the parameter body
    pub pattern: String,
    pub modifier: Modifier,
}

/// One unit of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, matched verbatim
    Literal(String),
    /// Capturing parameter
    Param(Param),
    /// `{...}` group with neither name nor pattern
    Group {
        prefix: String,
        suffix: String,
        modifier: Modifier,
    },
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn try_consume(&mut self, kind: TokenKind) -> Option<&'a str> {
        let token = self.tokens.get(self.pos)?;
        if token.kind != kind {
            return None;
        }
        self.pos += 1;
        Some(token.value.as_str())
    }

    fn must_consume(&mut self, kind: TokenKind) -> Result<&'a str, PatternError> {
        if let Some(value) = self.try_consume(kind) {
            return Ok(value);
        }
        let (found, index) = self
            .tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or((TokenKind::End, 0), |t| (t.kind, t.index));
        Err(PatternError::UnexpectedToken {
            found,
            index,
            expected: kind,
        })
    }

    fn consume_text(&mut self) -> String {
        let mut text = String::new();
        while let Some(value) = self
            .try_consume(TokenKind::Char)
            .or_else(|| self.try_consume(TokenKind::EscapedChar))
        {
            text.push_str(value);
        }
        text
    }

    fn consume_modifier(&mut self) -> Modifier {
        self.try_consume(TokenKind::Modifier)
            .map(Modifier::from_token)
            .unwrap_or_default()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

fn flush(path: &mut String, segments: &mut Vec<Segment>) {
    if !path.is_empty() {
        segments.push(Segment::Literal(std::mem::take(path)));
    }
}

/// Parse a template into segments
///
/// # Errors
///
/// Propagates lexer errors and fails with [`PatternError::UnexpectedToken`]
/// when a `{` group is not closed or a stray modifier/`}` appears.
pub fn parse(template: &str, options: &PatternOptions) -> Result<Vec<Segment>, PatternError> {
    let tokens = lex(template)?;
    let default_pattern = options.default_pattern();
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
    };
    let mut segments = Vec::new();
    let mut next_key = 0usize;
    let mut path = String::new();

    while !parser.at_end() {
        let ch = parser.try_consume(TokenKind::Char);
        let name = parser.try_consume(TokenKind::Name);
        let pattern = parser.try_consume(TokenKind::Pattern);

        if name.is_some() || pattern.is_some() {
            let mut prefix = ch.unwrap_or_default();
            if !prefix.is_empty() && !options.prefixes.contains(prefix) {
                path.push_str(prefix);
                prefix = "";
            }
            flush(&mut path, &mut segments);

            let name = match name {
                Some(name) => KeyName::Named(name.to_string()),
                None => {
                    next_key += 1;
                    KeyName::Index(next_key - 1)
                }
            };
            segments.push(Segment::Param(Param {
                name,
                prefix: prefix.to_string(),
                suffix: String::new(),
                pattern: pattern.map_or_else(|| default_pattern.clone(), str::to_string),
                modifier: parser.consume_modifier(),
            }));
            continue;
        }

        if let Some(value) = ch.or_else(|| parser.try_consume(TokenKind::EscapedChar)) {
            path.push_str(value);
            continue;
        }

        flush(&mut path, &mut segments);

        if parser.try_consume(TokenKind::Open).is_some() {
            let prefix = parser.consume_text();
            let name = parser.try_consume(TokenKind::Name);
            let pattern = parser.try_consume(TokenKind::Pattern);
            let suffix = parser.consume_text();
            parser.must_consume(TokenKind::Close)?;
            let modifier = parser.consume_modifier();

            let segment = match (name, pattern) {
                (None, None) => Segment::Group {
                    prefix,
                    suffix,
                    modifier,
                },
                (name, pattern) => {
                    let name = match name {
                        Some(name) => KeyName::Named(name.to_string()),
                        None => {
                            next_key += 1;
                            KeyName::Index(next_key - 1)
                        }
                    };
                    Segment::Param(Param {
                        name,
                        prefix,
                        suffix,
                        pattern: pattern.map_or_else(|| default_pattern.clone(), str::to_string),
                        modifier,
                    })
                }
            };
            segments.push(segment);
            continue;
        }

        parser.must_consume(TokenKind::End)?;
    }

    Ok(segments)
}
