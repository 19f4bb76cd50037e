use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default delimiter set: path separator, fragment and query markers
pub const DEFAULT_DELIMITER: &str = "/#?";

/// Default characters that may act as the prefix of a bare `:name`
pub const DEFAULT_PREFIXES: &str = "./";

/// Encoder applied to literal template text before it is escaped
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// Text is used as written
    #[default]
    Identity,
    /// Percent-encode like `encodeURIComponent`
    Component,
    /// Caller-provided encoder
    #[serde(skip)]
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl Encoding {
    /// Wrap an encoder function
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Encoding::Custom(Arc::new(f))
    }

    /// Apply the encoder to `text`
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        match self {
            Encoding::Identity => text.to_string(),
            Encoding::Component => urlencoding::encode(text).into_owned(),
            Encoding::Custom(f) => f(text),
        }
    }
}

impl fmt::Debug for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Identity => f.write_str("Identity"),
            Encoding::Component => f.write_str("Component"),
            Encoding::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Options controlling how a template is parsed and compiled
///
/// Defaults: case-insensitive, non-strict, anchored at both ends, delimiters
/// `/#?`, no `ends_with` set, identity encoding and prefixes `./`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternOptions {
    /// Match case-sensitively
    pub sensitive: bool,
    /// Disallow an optional trailing delimiter
    pub strict: bool,
    /// Anchor at the start of the input
    pub start: bool,
    /// Anchor at the end of the input
    pub end: bool,
    /// Characters treated as segment boundaries
    pub delimiter: String,
    /// Extra characters that may terminate a match instead of end-of-input
    pub ends_with: String,
    /// Encoder for literal text
    pub encode: Encoding,
    /// Characters that may precede a bare `:name` as its prefix
    pub prefixes: String,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            sensitive: false,
            strict: false,
            start: true,
            end: true,
            delimiter: DEFAULT_DELIMITER.to_string(),
            ends_with: String::new(),
            encode: Encoding::Identity,
            prefixes: DEFAULT_PREFIXES.to_string(),
        }
    }
}

impl PatternOptions {
    /// Delimiter set, falling back to the default when empty
    #[must_use]
    pub fn delimiter(&self) -> &str {
        if self.delimiter.is_empty() {
            DEFAULT_DELIMITER
        } else {
            &self.delimiter
        }
    }

    /// Pattern used for parameters without a custom `(pattern)`
    #[must_use]
    pub fn default_pattern(&self) -> String {
        format!("[^{}]+?", regex::escape(self.delimiter()))
    }

    /// Return a copy with `overrides` applied on top
    #[must_use]
    pub fn merge(&self, overrides: &PatternOverrides) -> PatternOptions {
        PatternOptions {
            sensitive: overrides.sensitive.unwrap_or(self.sensitive),
            strict: overrides.strict.unwrap_or(self.strict),
            start: overrides.start.unwrap_or(self.start),
            end: overrides.end.unwrap_or(self.end),
            delimiter: overrides
                .delimiter
                .clone()
                .unwrap_or_else(|| self.delimiter.clone()),
            ends_with: overrides
                .ends_with
                .clone()
                .unwrap_or_else(|| self.ends_with.clone()),
            encode: overrides
                .encode
                .clone()
                .unwrap_or_else(|| self.encode.clone()),
            prefixes: overrides
                .prefixes
                .clone()
                .unwrap_or_else(|| self.prefixes.clone()),
        }
    }
}

/// Per-route options; unset fields inherit from the router defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternOverrides {
    pub sensitive: Option<bool>,
    pub strict: Option<bool>,
    pub start: Option<bool>,
    pub end: Option<bool>,
    pub delimiter: Option<String>,
    pub ends_with: Option<String>,
    pub encode: Option<Encoding>,
    pub prefixes: Option<String>,
}
