use std::fmt;

use super::lexer::TokenKind;

/// Path template syntax error
///
/// Raised while lexing, parsing or compiling a template. Every variant carries
/// the character index of the offending input so callers can point at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A `:` was not followed by at least one `[A-Za-z0-9_]` character
    MissingParameterName {
        /// Index of the `:`
        index: usize,
    },
    /// A custom `(pattern)` group started with `?`
    ///
    /// Non-capturing and lookaround forms are reserved at the top level of a group.
    PatternStartsWithQuestion {
        /// Index of the `?`
        index: usize,
    },
    /// A nested group inside a custom pattern was capturing
    CapturingGroup {
        /// Index of the nested `(`
        index: usize,
    },
    /// A custom pattern group was never closed
    UnbalancedPattern {
        /// Index of the opening `(`
        index: usize,
    },
    /// A custom pattern group was empty, e.g. `()`
    MissingPattern {
        /// Index of the opening `(`
        index: usize,
    },
    /// A `\` was the last character of the template
    TrailingEscape {
        /// Index of the `\`
        index: usize,
    },
    /// The parser expected one token kind and found another
    UnexpectedToken {
        /// Kind that was found
        found: TokenKind,
        /// Index of the token that was found
        index: usize,
        /// Kind the parser required
        expected: TokenKind,
    },
    /// The assembled expression was rejected by the regex engine
    Regex {
        /// Expression source handed to the engine
        source: String,
        /// Engine error message
        message: String,
    },
}

impl PatternError {
    /// Character index of the offending input, if the error is positional
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            PatternError::MissingParameterName { index }
            | PatternError::PatternStartsWithQuestion { index }
            | PatternError::CapturingGroup { index }
            | PatternError::UnbalancedPattern { index }
            | PatternError::MissingPattern { index }
            | PatternError::TrailingEscape { index }
            | PatternError::UnexpectedToken { index, .. } => Some(*index),
            PatternError::Regex { .. } => None,
        }
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::MissingParameterName { index } => {
                write!(f, "Missing parameter name at {index}")
            }
            PatternError::PatternStartsWithQuestion { index } => {
                write!(f, "Pattern cannot start with \"?\" at {index}")
            }
            PatternError::CapturingGroup { index } => {
                write!(f, "Capturing groups are not allowed at {index}")
            }
            PatternError::UnbalancedPattern { index } => {
                write!(f, "Unbalanced pattern at {index}")
            }
            PatternError::MissingPattern { index } => write!(f, "Missing pattern at {index}"),
            PatternError::TrailingEscape { index } => {
                write!(f, "Escape character without a following character at {index}")
            }
            PatternError::UnexpectedToken {
                found,
                index,
                expected,
            } => write!(f, "Unexpected {found} at {index}, expected {expected}"),
            PatternError::Regex { source, message } => {
                write!(f, "Invalid expression '{source}': {message}")
            }
        }
    }
}

impl std::error::Error for PatternError {}
