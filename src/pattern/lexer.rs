//! Template lexer.
//!
//! Splits a path template into a flat token stream in a single left-to-right
//! scan. Custom `(pattern)` groups are captured whole, so the parser never has
//! to look inside a regex fragment.

use std::fmt;

use super::error::PatternError;

/// Kind of a lexed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `*`, `+` or `?`
    Modifier,
    /// Character following a `\`
    EscapedChar,
    /// `{`
    Open,
    /// `}`
    Close,
    /// Identifier following a `:`
    Name,
    /// Body of a `(...)` group
    Pattern,
    /// Any other literal character
    Char,
    /// End-of-input sentinel
    End,
}

impl TokenKind {
    /// Upper-case name used in diagnostics
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Modifier => "MODIFIER",
            TokenKind::EscapedChar => "ESCAPED_CHAR",
            TokenKind::Open => "OPEN",
            TokenKind::Close => "CLOSE",
            TokenKind::Name => "NAME",
            TokenKind::Pattern => "PATTERN",
            TokenKind::Char => "CHAR",
            TokenKind::End => "END",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lexed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,
    /// Character index where the token starts
    pub index: usize,
    /// Token text (the name for `Name`, the fragment for `Pattern`, empty for `End`)
    pub value: String,
}

impl Token {
    fn new(kind: TokenKind, index: usize, value: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            value: value.into(),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenize a path template
///
/// # Errors
///
/// Returns a [`PatternError`] when a `:` has no name, a `(` group is empty,
/// unbalanced, starts with `?` or contains a capturing sub-group, or when the
/// template ends with a bare `\`.
pub fn lex(template: &str) -> Result<Vec<Token>, PatternError> {
    let chars: Vec<char> = template.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len() + 1);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '*' | '+' | '?' => {
                tokens.push(Token::new(TokenKind::Modifier, i, c));
                i += 1;
            }
            '\\' => {
                let escaped = chars
                    .get(i + 1)
                    .ok_or(PatternError::TrailingEscape { index: i })?;
                tokens.push(Token::new(TokenKind::EscapedChar, i, *escaped));
                i += 2;
            }
            '{' => {
                tokens.push(Token::new(TokenKind::Open, i, c));
                i += 1;
            }
            '}' => {
                tokens.push(Token::new(TokenKind::Close, i, c));
                i += 1;
            }
            ':' => {
                let name: String = chars[i + 1..]
                    .iter()
                    .take_while(|c| is_name_char(**c))
                    .collect();
                if name.is_empty() {
                    return Err(PatternError::MissingParameterName { index: i });
                }
                let len = name.chars().count();
                tokens.push(Token::new(TokenKind::Name, i, name));
                i += 1 + len;
            }
            '(' => {
                let (pattern, next) = lex_pattern(&chars, i)?;
                tokens.push(Token::new(TokenKind::Pattern, i, pattern));
                i = next;
            }
            _ => {
                tokens.push(Token::new(TokenKind::Char, i, c));
                i += 1;
            }
        }
    }

    tokens.push(Token::new(TokenKind::End, i, ""));
    Ok(tokens)
}

/// Read a `(...)` group starting at `open`, returning its body and the index after `)`
fn lex_pattern(chars: &[char], open: usize) -> Result<(String, usize), PatternError> {
    let mut depth = 1usize;
    let mut pattern = String::new();
    let mut j = open + 1;

    if chars.get(j) == Some(&'?') {
        return Err(PatternError::PatternStartsWithQuestion { index: j });
    }

    while j < chars.len() {
        match chars[j] {
            '\\' => {
                let Some(next) = chars.get(j + 1) else {
                    return Err(PatternError::UnbalancedPattern { index: open });
                };
                pattern.push('\\');
                pattern.push(*next);
                j += 2;
                continue;
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    j += 1;
                    break;
                }
            }
            '(' => {
                depth += 1;
                if chars.get(j + 1) != Some(&'?') {
                    return Err(PatternError::CapturingGroup { index: j });
                }
            }
            _ => {}
        }
        pattern.push(chars[j]);
        j += 1;
    }

    if depth > 0 {
        return Err(PatternError::UnbalancedPattern { index: open });
    }
    if pattern.is_empty() {
        return Err(PatternError::MissingPattern { index: open });
    }
    Ok((pattern, j))
}
