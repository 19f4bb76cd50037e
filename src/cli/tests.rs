//! Unit tests for CLI commands

use crate::cli::{execute, Cli, Commands, EncodeArg, LogFormat};
use clap::Parser;
use std::io::Write;

fn run(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    execute(&cli, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_compile_command_parses_flags() {
    let cli = Cli::try_parse_from([
        "riouter",
        "compile",
        "/user/:id",
        "--strict",
        "--no-end",
        "--delimiter",
        "/.",
        "--encode",
        "component",
    ])
    .unwrap();

    assert_eq!(cli.log_format, LogFormat::Pretty);
    match cli.command {
        Commands::Compile {
            template,
            pattern,
            json,
        } => {
            assert_eq!(template, "/user/:id");
            assert!(!json);
            assert_eq!(pattern.encode, EncodeArg::Component);
            let options = pattern.to_options();
            assert!(options.strict);
            assert!(!options.end);
            assert!(options.start);
            assert_eq!(options.delimiter(), "/.");
        }
        _ => panic!("Expected Compile command"),
    }
}

#[test]
fn test_route_requires_paths() {
    assert!(Cli::try_parse_from(["riouter", "route", "--config", "r.yaml"]).is_err());
}

#[test]
fn test_global_log_format() {
    let cli = Cli::try_parse_from(["riouter", "match", "/a", "/a", "--log-format", "json"]).unwrap();
    assert_eq!(cli.log_format, LogFormat::Json);
}

#[test]
fn test_compile_output() {
    let out = run(&["riouter", "compile", "/user/:id"]);
    assert!(out.starts_with("regex: ^/user(?:/([^/\\#\\?]+?))[/\\#\\?]?$\n"));
    assert!(out.contains("key: id prefix=\"/\""));
}

#[test]
fn test_compile_json_output() {
    let out = run(&["riouter", "compile", "/files/:path*", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["template"], "/files/:path*");
    assert_eq!(value["keys"][0]["name"], "path");
    assert_eq!(value["keys"][0]["modifier"], "*");
    assert_eq!(value["backtracking"], false);
}

#[test]
fn test_match_output() {
    let out = run(&["riouter", "match", "/user/:id/:tab?", "/user/42/posts"]);
    assert_eq!(out, "match: /user/42/posts\n  id = 42\n  tab = posts\n");

    let out = run(&["riouter", "match", "/user/:id(\\d+)", "/user/abc"]);
    assert_eq!(out, "no match\n");
}

#[test]
fn test_match_json_output() {
    let out = run(&["riouter", "match", "/user/:id", "/user/caf%C3%A9", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["matched"], true);
    assert_eq!(value["params"]["id"], "caf\u{e9}");
}

#[test]
fn test_compile_error_is_reported() {
    let cli = Cli::try_parse_from(["riouter", "compile", "/user/:"]).unwrap();
    let mut out = Vec::new();
    let err = execute(&cli, &mut out).unwrap_err();
    assert!(err.to_string().contains("/user/:"));
    assert!(format!("{err:#}").contains("Missing parameter name"));
}

#[test]
fn test_route_command() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "routes:\n  - path: /item/:id\n  - path: /item/special\n"
    )
    .unwrap();
    let config = file.path().to_str().unwrap().to_string();

    let out = run(&[
        "riouter",
        "route",
        "--config",
        &config,
        "--base-path",
        "/app",
        "/app/item/42",
        "/app/item/special",
        "/nowhere",
    ]);
    assert_eq!(
        out,
        "/app/item/42 -> /item/:id\n  id = 42\n/app/item/special -> /item/special\n/nowhere -> <none>\n"
    );
}

#[test]
fn test_route_command_missing_config() {
    let cli = Cli::try_parse_from([
        "riouter",
        "route",
        "--config",
        "/definitely/not/here.yaml",
        "/a",
    ])
    .unwrap();
    let err = execute(&cli, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("Failed to load router config"));
}
