use crate::config::RouterConfig;
use crate::pattern::{CompiledPattern, Encoding, PatternOptions, PatternSource};
use crate::router::Router;
use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line interface for riouter
///
/// Compiles path templates, matches paths against them and resolves paths
/// through a configured router.
#[derive(Parser)]
#[command(name = "riouter")]
#[command(about = "Path template compiler and router", long_about = None)]
pub struct Cli {
    /// Log output format (logs go to stderr; filter with RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compile a template and print its regular expression and keys
    Compile {
        /// Path template, e.g. `/user/:id`
        template: String,

        #[command(flatten)]
        pattern: PatternArgs,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Match a path against a template and print its parameters
    Match {
        /// Path template, e.g. `/user/:id`
        template: String,

        /// Concrete path, e.g. `/user/42`
        path: String,

        #[command(flatten)]
        pattern: PatternArgs,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Push paths through a router built from a config file
    ///
    /// Routes are registered in file order; the last matching route wins.
    /// `RIOUTER_BASE_PATH` and `RIOUTER_UPDATE_HISTORY` override the file.
    Route {
        /// Router configuration (YAML, or JSON with a `.json` extension)
        #[arg(short, long)]
        config: PathBuf,

        /// Override the configured base path
        #[arg(long)]
        base_path: Option<String>,

        /// Paths to push, in order
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Template compilation flags shared by `compile` and `match`
#[derive(Args, Debug, Clone, Default)]
pub struct PatternArgs {
    /// Match case-sensitively
    #[arg(long, default_value_t = false)]
    pub sensitive: bool,

    /// Do not accept an optional trailing delimiter
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Do not anchor at the start of the input
    #[arg(long, default_value_t = false)]
    pub no_start: bool,

    /// Do not anchor at the end of the input
    #[arg(long, default_value_t = false)]
    pub no_end: bool,

    /// Segment delimiter characters
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Characters that may end a match instead of end-of-input
    #[arg(long)]
    pub ends_with: Option<String>,

    /// Characters accepted as a parameter prefix
    #[arg(long)]
    pub prefixes: Option<String>,

    /// Encoding applied to literal text
    #[arg(long, value_enum, default_value_t = EncodeArg::Identity)]
    pub encode: EncodeArg,
}

/// Literal text encodings selectable from the command line
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EncodeArg {
    /// Use literal text as written
    #[default]
    Identity,
    /// Percent-encode literal text
    Component,
}

/// Log output formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per event
    Json,
}

impl PatternArgs {
    /// Options equivalent to these flags
    #[must_use]
    pub fn to_options(&self) -> PatternOptions {
        let defaults = PatternOptions::default();
        PatternOptions {
            sensitive: self.sensitive,
            strict: self.strict,
            start: !self.no_start,
            end: !self.no_end,
            delimiter: self.delimiter.clone().unwrap_or(defaults.delimiter),
            ends_with: self.ends_with.clone().unwrap_or(defaults.ends_with),
            encode: match self.encode {
                EncodeArg::Identity => Encoding::Identity,
                EncodeArg::Component => Encoding::Component,
            },
            prefixes: self.prefixes.clone().unwrap_or(defaults.prefixes),
        }
    }
}

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` controls filtering (default `warn`). Logs are written to stderr
/// so command output on stdout stays machine-readable.
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true);
    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    if let Err(err) = result {
        eprintln!("Warning: logging already initialized: {err}");
    }
}

/// Parse the process arguments, install logging and run the command
///
/// # Errors
///
/// Returns an error if the template does not compile, the config file cannot
/// be loaded, or writing to stdout fails.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out)
}

/// Run `cli` writing command output to `out`
///
/// # Errors
///
/// Same as [`run_cli`].
pub fn execute(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Compile {
            template,
            pattern,
            json,
        } => compile(template, pattern, *json, out),
        Commands::Match {
            template,
            path,
            pattern,
            json,
        } => match_path(template, path, pattern, *json, out),
        Commands::Route {
            config,
            base_path,
            paths,
            json,
        } => {
            let mut router_config = RouterConfig::load(config)
                .with_context(|| format!("Failed to load router config {}", config.display()))?;
            router_config.apply_env();
            if let Some(base_path) = base_path {
                router_config.base_path.clone_from(base_path);
            }
            route(router_config, paths, *json, out)
        }
    }
}

fn compile_one(template: &str, pattern: &PatternArgs) -> anyhow::Result<CompiledPattern> {
    let source = PatternSource::from(template);
    CompiledPattern::compile(&source, &pattern.to_options())
        .with_context(|| format!("Failed to compile template '{template}'"))
}

fn compile(
    template: &str,
    pattern: &PatternArgs,
    json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let compiled = compile_one(template, pattern)?;
    if json {
        let value = json!({
            "template": template,
            "regex": compiled.matcher.as_str(),
            "backtracking": compiled.matcher.is_backtracking(),
            "keys": compiled.keys,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        writeln!(out, "regex: {}", compiled.matcher.as_str())?;
        for key in &compiled.keys {
            writeln!(
                out,
                "key: {} prefix={:?} suffix={:?} modifier={:?} pattern={}",
                key.name,
                key.prefix,
                key.suffix,
                key.modifier.as_str(),
                key.pattern
            )?;
        }
    }
    Ok(())
}

fn match_path(
    template: &str,
    path: &str,
    pattern: &PatternArgs,
    json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let compiled = compile_one(template, pattern)?;
    let result = compiled.match_params(path);
    info!(template = %template, path = %path, matched = result.is_some(), "Match command");

    if json {
        let value = match &result {
            Some(m) => json!({
                "matched": true,
                "path": m.path,
                "index": m.index,
                "params": m.params,
            }),
            None => json!({ "matched": false }),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    match result {
        Some(m) => {
            writeln!(out, "match: {}", m.path)?;
            // Keys in template order, not map order
            for key in &compiled.keys {
                if let Some(value) = m.params.get(&key.name) {
                    writeln!(out, "  {} = {value}", key.name)?;
                }
            }
        }
        None => writeln!(out, "no match")?,
    }
    Ok(())
}

fn route(
    config: RouterConfig,
    paths: &[String],
    json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let router = Router::from_config(config).context("Failed to build router")?;
    let mut results = Vec::with_capacity(paths.len());

    for path in paths {
        let accepted = router.push(path)?;
        let route = router.current_route();
        let normalized = router.path();
        let params = route
            .as_ref()
            .zip(normalized.as_deref())
            .and_then(|(r, p)| r.params(p))
            .map(|m| m.params)
            .unwrap_or_default();

        if json {
            results.push(json!({
                "path": path,
                "accepted": accepted,
                "normalized": normalized,
                "route": route.as_ref().map(|r| r.template()),
                "params": params,
            }));
        } else {
            let target = route.as_ref().map_or("<none>", |r| r.template());
            writeln!(out, "{path} -> {target}")?;
            if let Some(route) = &route {
                for key in route.keys() {
                    if let Some(value) = params.get(&key.name) {
                        writeln!(out, "  {} = {value}", key.name)?;
                    }
                }
            }
        }
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?;
    }
    Ok(())
}
