//! jsoninja CLI
//!
//! Usage:
//!   jsoninja [OPTIONS] [TEMPLATE]
//!
//! Options:
//!   -r, --replacements <FILE>  JSON object with replacement values
//!   -s, --set <NAME=VALUE>     Single replacement (VALUE parsed as JSON, else a string)
//!   -c, --config <FILE>        Pattern and policy configuration (TOML format)
//!   -p, --pattern <REGEX>      Custom placeholder regex with one capture group
//!       --skip-missing         Leave placeholders without a replacement untouched
//!   -l, --list                 List the placeholders used by the template
//!       --compact              Print compact JSON
//!   -v, --verbose              Debug logging
//!   -h, --help                 Print help

use std::fmt::Display;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser};
use serde_json::Value;

use jsoninja::{Config, Engine, OnMissing, Replacements, VariablePattern};

#[derive(Parser, Debug)]
#[command(name = "jsoninja")]
#[command(about = "Fill placeholders in JSON templates")]
struct Cli {
    /// Template file (reads from stdin if not provided)
    template: Option<PathBuf>,

    /// JSON file containing an object of replacement values
    #[arg(short, long)]
    replacements: Option<PathBuf>,

    /// Replacement as NAME=VALUE; VALUE is parsed as JSON, falling back to a string
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, Value)>,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Custom placeholder regex with exactly one capture group
    #[arg(short, long)]
    pattern: Option<String>,

    /// Leave placeholders without a replacement untouched
    #[arg(long)]
    skip_missing: bool,

    /// List the placeholder names referenced by the template and exit
    #[arg(short, long)]
    list: bool,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    log::debug!("CLI args parsed: {:?}", cli);

    // No template file and nothing piped in: show help
    if cli.template.is_none() && io::stdin().is_terminal() {
        let _ = Cli::command().print_help();
        return;
    }

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .unwrap_or_else(|e| fail(format!("loading config '{}'", path.display()), e)),
        None => Config::default(),
    };
    if let Some(regex) = &cli.pattern {
        config.pattern = VariablePattern::regex(regex.clone());
    }
    if cli.skip_missing {
        config.on_missing = OnMissing::Skip;
    }

    let engine: Engine = config
        .engine()
        .unwrap_or_else(|e| fail("building pattern", e));

    let template = read_template(cli.template.as_deref());

    if cli.list {
        for name in engine.placeholders(&template) {
            println!("{}", name);
        }
        return;
    }

    let replacements = load_replacements(&cli);
    log::debug!("{} replacement(s) loaded", replacements.len());

    let output = engine
        .replace(&template, &replacements, &config.options())
        .unwrap_or_else(|e| fail("replacing", e));

    let rendered = if cli.compact {
        serde_json::to_string(&output)
    } else {
        serde_json::to_string_pretty(&output)
    };
    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => fail("writing output", e),
    }
}

/// Print an error and exit
fn fail(context: impl Display, err: impl Display) -> ! {
    eprintln!("Error {}: {}", context, err);
    process::exit(1);
}

fn read_template(path: Option<&Path>) -> Value {
    let source = match path {
        Some(path) => fs::read_to_string(path)
            .unwrap_or_else(|e| fail(format!("reading file '{}'", path.display()), e)),
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                fail("reading from stdin", e);
            }
            buffer
        }
    };

    serde_json::from_str(&source).unwrap_or_else(|e| fail("parsing template", e))
}

fn load_replacements(cli: &Cli) -> Replacements {
    let mut replacements = match &cli.replacements {
        Some(path) => {
            let content = fs::read_to_string(path)
                .unwrap_or_else(|e| fail(format!("reading file '{}'", path.display()), e));
            let value: Value = serde_json::from_str(&content)
                .unwrap_or_else(|e| fail(format!("parsing '{}'", path.display()), e));
            Replacements::from_json(value)
                .unwrap_or_else(|e| fail(format!("loading '{}'", path.display()), e))
        }
        None => Replacements::new(),
    };

    // --set entries override the file
    replacements.extend(cli.set.iter().cloned().collect());
    replacements
}

/// Parse `NAME=VALUE`, reading VALUE as JSON when possible
fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    if name.is_empty() {
        return Err(format!("missing name in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}
