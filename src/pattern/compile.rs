//! Segment-to-matcher assembly.
//!
//! Produces expressions with the same shape as the path-to-regexp family:
//! parameters become capture groups wrapped by their escaped prefix/suffix,
//! repeated parameters with a prefix or suffix capture the whole run as one
//! group, and the tail is anchored according to `end`/`strict`/`ends_with`.

#![deny(clippy::format_push_string)]

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::error::PatternError;
use super::matcher::{CaptureVec, Matcher};
use super::options::PatternOptions;
use super::parser::{parse, KeyName, Modifier, Segment};

/// Descriptor of one capturing parameter, in left-to-right order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Key {
    pub name: KeyName,
    pub prefix: String,
    pub suffix: String,
    pub modifier: Modifier,
    pub pattern: String,
}

impl Key {
    fn anonymous(name: KeyName) -> Self {
        Self {
            name,
            prefix: String::new(),
            suffix: String::new(),
            modifier: Modifier::None,
            pattern: String::new(),
        }
    }
}

/// Input accepted by the compiler
#[derive(Debug, Clone)]
pub enum PatternSource {
    /// A single path template
    Template(String),
    /// Several templates matched as alternatives
    Templates(Vec<String>),
    /// An expression compiled elsewhere
    Precompiled(Matcher),
}

impl PatternSource {
    /// Identifier used when listing registered routes
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            PatternSource::Template(template) => template.clone(),
            PatternSource::Templates(templates) => format!("[{}]", templates.join(", ")),
            PatternSource::Precompiled(matcher) => matcher.as_str().to_string(),
        }
    }
}

impl From<&str> for PatternSource {
    fn from(template: &str) -> Self {
        PatternSource::Template(template.to_string())
    }
}

impl From<String> for PatternSource {
    fn from(template: String) -> Self {
        PatternSource::Template(template)
    }
}

impl From<Vec<String>> for PatternSource {
    fn from(templates: Vec<String>) -> Self {
        PatternSource::Templates(templates)
    }
}

impl From<Vec<&str>> for PatternSource {
    fn from(templates: Vec<&str>) -> Self {
        PatternSource::Templates(templates.into_iter().map(str::to_string).collect())
    }
}

impl From<Matcher> for PatternSource {
    fn from(matcher: Matcher) -> Self {
        PatternSource::Precompiled(matcher)
    }
}

/// Successful match with parameters resolved by key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Matched portion of the input
    pub path: String,
    /// Byte offset of the match
    pub index: usize,
    /// Decoded parameter values; groups that did not participate are absent
    pub params: HashMap<KeyName, String>,
}

/// Matcher plus the ordered key descriptors of its capture groups
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub matcher: Matcher,
    pub keys: Vec<Key>,
}

impl CompiledPattern {
    /// Compile any [`PatternSource`]
    ///
    /// # Errors
    ///
    /// Propagates template syntax errors and regex build failures.
    pub fn compile(source: &PatternSource, options: &PatternOptions) -> Result<Self, PatternError> {
        match source {
            PatternSource::Template(template) => compile_template(template, options),
            PatternSource::Templates(templates) => compile_templates(templates, options),
            PatternSource::Precompiled(matcher) => Ok(Self {
                keys: keys_from_source(matcher.as_str()),
                matcher: matcher.clone(),
            }),
        }
    }

    /// Whether `path` is accepted
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    /// Positional capture values, or `None` if `path` does not match
    #[must_use]
    pub fn exec(&self, path: &str) -> Option<CaptureVec> {
        self.matcher.exec(path).map(|exec| exec.groups)
    }

    /// Match `path` and resolve capture groups to their key names
    ///
    /// Values are percent-decoded; a value that is not valid UTF-8 after
    /// decoding is kept as written.
    #[must_use]
    pub fn match_params(&self, path: &str) -> Option<MatchResult> {
        let exec = self.matcher.exec(path)?;
        let params = self
            .keys
            .iter()
            .zip(exec.groups.iter())
            .filter_map(|(key, value)| {
                let value = value.as_deref()?;
                let decoded = urlencoding::decode(value)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| value.to_string());
                Some((key.name.clone(), decoded))
            })
            .collect();
        Some(MatchResult {
            path: exec.matched,
            index: exec.index,
            params,
        })
    }
}

/// Compile a single template
///
/// # Errors
///
/// Propagates template syntax errors and regex build failures.
pub fn compile_template(template: &str, options: &PatternOptions) -> Result<CompiledPattern, PatternError> {
    let segments = parse(template, options)?;
    let compiled = tokens_to_matcher(&segments, options)?;
    debug!(
        template = %template,
        source = %compiled.matcher.as_str(),
        keys = compiled.keys.len(),
        "Compiled path template"
    );
    Ok(compiled)
}

/// Compile templates into one alternation; keys from every template append in order
///
/// # Errors
///
/// Fails on the first template that does not compile.
pub fn compile_templates(templates: &[String], options: &PatternOptions) -> Result<CompiledPattern, PatternError> {
    let mut keys = Vec::new();
    let mut parts = Vec::with_capacity(templates.len());
    for template in templates {
        let compiled = compile_template(template, options)?;
        parts.push(compiled.matcher.as_str().to_string());
        keys.extend(compiled.keys);
    }
    let source = format!("(?:{})", parts.join("|"));
    Ok(CompiledPattern {
        matcher: Matcher::new(source, options.sensitive)?,
        keys,
    })
}

/// Assemble parsed segments into a matcher
///
/// # Errors
///
/// Returns [`PatternError::Regex`] when a custom fragment makes the expression invalid.
pub fn tokens_to_matcher(segments: &[Segment], options: &PatternOptions) -> Result<CompiledPattern, PatternError> {
    let encode = |text: &str| regex::escape(&options.encode.apply(text));
    let delimiter = format!("[{}]", regex::escape(options.delimiter()));
    let ends_with = if options.ends_with.is_empty() {
        "$".to_string()
    } else {
        format!("[{}]|$", regex::escape(&options.ends_with))
    };

    let mut route = String::new();
    let mut keys = Vec::new();
    if options.start {
        route.push('^');
    }

    for segment in segments {
        match segment {
            Segment::Literal(text) => route.push_str(&encode(text)),
            Segment::Group {
                prefix,
                suffix,
                modifier,
            } => {
                route.push_str("(?:");
                route.push_str(&encode(prefix));
                route.push_str(&encode(suffix));
                route.push(')');
                route.push_str(modifier.as_str());
            }
            Segment::Param(param) => {
                let prefix = encode(&param.prefix);
                let suffix = encode(&param.suffix);
                let pattern = &param.pattern;
                keys.push(Key {
                    name: param.name.clone(),
                    prefix: param.prefix.clone(),
                    suffix: param.suffix.clone(),
                    modifier: param.modifier,
                    pattern: pattern.clone(),
                });

                if prefix.is_empty() && suffix.is_empty() {
                    route.push('(');
                    route.push_str(pattern);
                    route.push(')');
                    route.push_str(param.modifier.as_str());
                } else if param.modifier.is_repeat() {
                    // (?:P((?:R)(?:SP(?:R))*)S) with a trailing ? for `*`
                    for part in [
                        "(?:",
                        prefix.as_str(),
                        "((?:",
                        pattern.as_str(),
                        ")(?:",
                        suffix.as_str(),
                        prefix.as_str(),
                        "(?:",
                        pattern.as_str(),
                        "))*)",
                        suffix.as_str(),
                        ")",
                    ] {
                        route.push_str(part);
                    }
                    if param.modifier == Modifier::ZeroOrMore {
                        route.push('?');
                    }
                } else {
                    for part in ["(?:", prefix.as_str(), "(", pattern.as_str(), ")", suffix.as_str(), ")"] {
                        route.push_str(part);
                    }
                    route.push_str(param.modifier.as_str());
                }
            }
        }
    }

    if options.end {
        if !options.strict {
            route.push_str(&delimiter);
            route.push('?');
        }
        if options.ends_with.is_empty() {
            route.push('$');
        } else {
            route.push_str("(?=");
            route.push_str(&ends_with);
            route.push(')');
        }
    } else {
        let end_delimited = match segments.last() {
            None => true,
            Some(Segment::Literal(text)) => text
                .chars()
                .last()
                .is_some_and(|c| options.delimiter().contains(c)),
            Some(_) => false,
        };
        if !options.strict {
            for part in ["(?:", delimiter.as_str(), "(?=", ends_with.as_str(), "))?"] {
                route.push_str(part);
            }
        }
        if !end_delimited {
            for part in ["(?=", delimiter.as_str(), "|", ends_with.as_str(), ")"] {
                route.push_str(part);
            }
        }
    }

    Ok(CompiledPattern {
        matcher: Matcher::new(route, options.sensitive)?,
        keys,
    })
}

/// Derive keys from an expression's capture groups
///
/// Unnamed groups are numbered from zero; `(?<name>...)` and `(?P<name>...)`
/// keep their names. Escaped parentheses and those inside character classes
/// are ignored.
#[must_use]
pub fn keys_from_source(source: &str) -> Vec<Key> {
    let chars: Vec<char> = source.chars().collect();
    let mut keys = Vec::new();
    let mut index = 0usize;
    let mut in_class = false;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                i += 2;
                continue;
            }
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '(' if !in_class => {
                if chars.get(i + 1) != Some(&'?') {
                    keys.push(Key::anonymous(KeyName::Index(index)));
                    index += 1;
                } else if let Some(name) = group_name(&chars[i + 2..]) {
                    keys.push(Key::anonymous(KeyName::Named(name)));
                }
            }
            _ => {}
        }
        i += 1;
    }
    keys
}

/// Name of a `<name>` or `P<name>` group header, if `rest` starts with one
fn group_name(rest: &[char]) -> Option<String> {
    let rest = match rest {
        ['P', '<', tail @ ..] | ['<', tail @ ..] => tail,
        _ => return None,
    };
    if matches!(rest.first(), Some('=' | '!')) {
        return None;
    }
    let end = rest.iter().position(|c| *c == '>')?;
    Some(rest[..end].iter().collect())
}
