//! # Pattern Module
//!
//! Compiles path templates such as `/user/:id`, `/files/:path+` or
//! `/item{/:slug}?` into executable matchers with an ordered list of
//! parameter descriptors.
//!
//! ## Pipeline
//!
//! 1. [`lex`] splits the template into tokens (`:name`, `(pattern)`, `{`, `}`,
//!    modifiers, escapes, literal characters).
//! 2. [`parse`] folds tokens into [`Segment`]s: literal runs, parameters with
//!    prefix/suffix/modifier, and literal-only groups.
//! 3. [`tokens_to_matcher`] assembles the segments into a regular expression
//!    and compiles it into a [`Matcher`].
//!
//! [`CompiledPattern::compile`] accepts any [`PatternSource`]: a single
//! template, a list of templates matched as alternatives, or an expression
//! compiled elsewhere.
//!
//! ## Template Syntax
//!
//! | Syntax          | Meaning                                              |
//! |-----------------|------------------------------------------------------|
//! | `:name`         | Named parameter, matches a run of non-delimiters     |
//! | `:name(\d+)`    | Named parameter with a custom fragment               |
//! | `(\d+)`         | Anonymous parameter, keyed by position               |
//! | `{...}`         | Group with its own prefix/suffix                     |
//! | `?` `*` `+`     | Optional, zero-or-more, one-or-more                  |
//! | `\x`            | Literal `x`                                          |
//!
//! ## Example
//!
//! ```rust
//! use riouter::pattern::{compile_template, PatternOptions};
//!
//! let compiled = compile_template("/user/:id(\\d+)", &PatternOptions::default()).unwrap();
//! assert!(compiled.is_match("/user/42"));
//! assert!(!compiled.is_match("/user/abc"));
//! assert_eq!(compiled.exec("/user/42").unwrap()[0].as_deref(), Some("42"));
//! ```

mod compile;
mod error;
mod lexer;
mod matcher;
mod options;
mod parser;

pub use compile::{
    compile_template, compile_templates, keys_from_source, tokens_to_matcher, CompiledPattern, Key,
    MatchResult, PatternSource,
};
pub use error::PatternError;
pub use lexer::{lex, Token, TokenKind};
pub use matcher::{CaptureVec, Exec, Matcher, MAX_INLINE_CAPTURES};
pub use options::{Encoding, PatternOptions, PatternOverrides, DEFAULT_DELIMITER, DEFAULT_PREFIXES};
pub use parser::{parse, KeyName, Modifier, Param, Segment};
