//! # CLI Module
//!
//! Command-line front end for the pattern compiler and the router.
//!
//! ## Commands
//!
//! ### `compile`
//!
//! Print the regular expression and key descriptors of a template:
//!
//! ```bash
//! riouter compile '/user/:id(\d+)'
//! riouter compile '/files/:path*' --strict --json
//! ```
//!
//! ### `match`
//!
//! Match a concrete path and print its decoded parameters:
//!
//! ```bash
//! riouter match '/user/:id' /user/42
//! ```
//!
//! ### `route`
//!
//! Build a router from a config file and push each path in turn, printing the
//! route that became active:
//!
//! ```bash
//! riouter route --config routes.yaml /item/42 /item/special
//! ```
//!
//! Shared flags `--sensitive`, `--strict`, `--no-start`, `--no-end`,
//! `--delimiter`, `--ends-with`, `--prefixes` and `--encode` map onto
//! [`PatternOptions`](crate::pattern::PatternOptions).
//!
//! ## Logging
//!
//! Logs go to stderr through `tracing-subscriber`; set `RUST_LOG=debug` to see
//! compilation and navigation events, and `--log-format json` for structured
//! output.
//!
//! ## Usage from Code
//!
//! ```rust
//! use clap::Parser;
//! use riouter::cli::{execute, Cli};
//!
//! let cli = Cli::try_parse_from(["riouter", "compile", "/user/:id"]).unwrap();
//! let mut out = Vec::new();
//! execute(&cli, &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("regex: ^/user"));
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{
    execute, init_logging, run_cli, Cli, Commands, EncodeArg, LogFormat, PatternArgs,
};
