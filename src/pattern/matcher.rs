//! Executable matcher over two regex backends.
//!
//! Most compiled templates are plain anchored expressions and run on the
//! `regex` crate. Expressions that need lookahead (unanchored ends, custom
//! `ends_with` sets, or user-supplied fragments using lookaround) fall back to
//! `fancy-regex`.
//!
//! Both backends are Unicode-aware: `\d`, `\w` and case-insensitive folding
//! cover non-ASCII characters, so `/user/:id(\d+)` also accepts `/user/٤٢`.
//! Write explicit ASCII classes such as `[0-9]+` for ASCII-only parameters.

use smallvec::SmallVec;
use std::fmt;
use tracing::warn;

use super::error::PatternError;

/// Maximum number of capture groups kept inline before spilling to the heap
pub const MAX_INLINE_CAPTURES: usize = 8;

/// Positional capture values; `None` for groups that did not participate
pub type CaptureVec = SmallVec<[Option<String>; MAX_INLINE_CAPTURES]>;

#[derive(Clone)]
enum Engine {
    Standard(regex::Regex),
    Backtracking(fancy_regex::Regex),
}

/// Result of running a matcher against an input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exec {
    /// Text matched by the whole expression
    pub matched: String,
    /// Byte offset of the match in the input
    pub index: usize,
    /// Values of capture groups 1..n in order
    pub groups: CaptureVec,
}

/// Compiled, executable acceptor for concrete paths
#[derive(Clone)]
pub struct Matcher {
    source: String,
    sensitive: bool,
    engine: Engine,
}

impl Matcher {
    /// Compile `source`, case-insensitively unless `sensitive`
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Regex`] when neither backend accepts the expression.
    pub fn new(source: impl Into<String>, sensitive: bool) -> Result<Self, PatternError> {
        let source = source.into();
        let full = if sensitive {
            source.clone()
        } else {
            format!("(?i){source}")
        };

        let engine = match regex::Regex::new(&full) {
            Ok(re) => Engine::Standard(re),
            Err(standard_err) => match fancy_regex::Regex::new(&full) {
                Ok(re) => Engine::Backtracking(re),
                Err(fancy_err) => {
                    return Err(PatternError::Regex {
                        source,
                        message: format!("{standard_err}; {fancy_err}"),
                    })
                }
            },
        };

        Ok(Self {
            source,
            sensitive,
            engine,
        })
    }

    /// Expression source without the case flag
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the matcher is case-sensitive
    #[must_use]
    pub fn is_sensitive(&self) -> bool {
        self.sensitive
    }

    /// Whether the matcher needed the backtracking backend
    #[must_use]
    pub fn is_backtracking(&self) -> bool {
        matches!(self.engine, Engine::Backtracking(_))
    }

    /// Test `text` against the matcher
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        match &self.engine {
            Engine::Standard(re) => re.is_match(text),
            Engine::Backtracking(re) => re.is_match(text).unwrap_or_else(|err| {
                warn!(source = %self.source, error = %err, "Matcher aborted, treating as no match");
                false
            }),
        }
    }

    /// Run the matcher and collect the whole match plus every capture group
    #[must_use]
    pub fn exec(&self, text: &str) -> Option<Exec> {
        match &self.engine {
            Engine::Standard(re) => {
                let caps = re.captures(text)?;
                let whole = caps.get(0)?;
                Some(Exec {
                    matched: whole.as_str().to_string(),
                    index: whole.start(),
                    groups: caps
                        .iter()
                        .skip(1)
                        .map(|m| m.map(|m| m.as_str().to_string()))
                        .collect(),
                })
            }
            Engine::Backtracking(re) => {
                let caps = match re.captures(text) {
                    Ok(caps) => caps?,
                    Err(err) => {
                        warn!(source = %self.source, error = %err, "Matcher aborted, treating as no match");
                        return None;
                    }
                };
                let whole = caps.get(0)?;
                Some(Exec {
                    matched: whole.as_str().to_string(),
                    index: whole.start(),
                    groups: caps
                        .iter()
                        .skip(1)
                        .map(|m| m.map(|m| m.as_str().to_string()))
                        .collect(),
                })
            }
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("source", &self.source)
            .field("sensitive", &self.sensitive)
            .field("backtracking", &self.is_backtracking())
            .finish()
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<regex::Regex> for Matcher {
    fn from(re: regex::Regex) -> Self {
        Self {
            source: re.as_str().to_string(),
            sensitive: true,
            engine: Engine::Standard(re),
        }
    }
}

impl From<fancy_regex::Regex> for Matcher {
    fn from(re: fancy_regex::Regex) -> Self {
        Self {
            source: re.as_str().to_string(),
            sensitive: true,
            engine: Engine::Backtracking(re),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_backend_for_plain_expressions() {
        let m = Matcher::new(r"^/a/([^/]+?)$", false).unwrap();
        assert!(!m.is_backtracking());
        assert!(m.is_match("/A/x"));
        let exec = m.exec("/a/xyz").unwrap();
        assert_eq!(exec.matched, "/a/xyz");
        assert_eq!(exec.groups.as_slice(), &[Some("xyz".to_string())]);
    }

    #[test]
    fn test_digit_class_is_unicode_aware() {
        let unicode = Matcher::new(r"^/user/(\d+)$", false).unwrap();
        assert!(unicode.is_match("/user/42"));
        assert!(unicode.is_match("/user/\u{664}\u{662}"));

        let ascii = Matcher::new(r"^/user/([0-9]+)$", false).unwrap();
        assert!(!ascii.is_match("/user/\u{664}\u{662}"));
    }

    #[test]
    fn test_lookahead_uses_backtracking_backend() {
        let m = Matcher::new(r"^/a(?=/|$)", true).unwrap();
        assert!(m.is_backtracking());
        assert!(m.is_match("/a/b"));
        assert!(!m.is_match("/ab"));
        assert!(!m.is_match("/A"));
    }

    #[test]
    fn test_unmatched_optional_group_is_none() {
        let m = Matcher::new(r"^/a(?:/(\d+))?$", true).unwrap();
        let exec = m.exec("/a").unwrap();
        assert_eq!(exec.groups.as_slice(), &[None]);
    }

    #[test]
    fn test_invalid_expression() {
        let err = Matcher::new("([", true).unwrap_err();
        assert!(matches!(err, PatternError::Regex { .. }));
    }
}
