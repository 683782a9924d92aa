use std::io::Read;
use std::process;

use clap::Parser;
use json_path_extract::{extract, first, or_default, tokenize, unique};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Simple runner: pass JSON and a JSONPath-like expression via CLI.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON document text, `@file` to read a file, or `-` for stdin
    json: String,
    /// JSONPath-like expression
    path: String,
    /// Print the token stream of `path` and exit
    #[arg(long)]
    tokens: bool,
    /// Fallback default JSON when nothing matches
    #[arg(long)]
    default: Option<String>,
    /// Show only the first match
    #[arg(long)]
    first: bool,
    /// Deduplicate results
    #[arg(long)]
    unique: bool,
    /// Print on a single line
    #[arg(long)]
    compact: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.tokens {
        match tokenize(&args.path) {
            Ok(tokens) => print_json(&serde_json::to_value(tokens).unwrap_or_default(), args.compact),
            Err(e) => {
                eprintln!("Invalid path: {e}");
                process::exit(2);
            }
        }
        return;
    }

    let raw = match read_document(&args.json) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Cannot read document: {e}");
            process::exit(1);
        }
    };
    let data: Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid JSON: {e}");
            process::exit(1);
        }
    };

    let matches = match extract(&data, &args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Invalid path: {e}");
            process::exit(2);
        }
    };
    tracing::debug!(count = matches.len(), "matched");

    // Post-process results as requested.
    let mut out = Value::Array(matches.into_iter().cloned().collect());
    if args.unique {
        out = unique(&out);
    }
    if args.first {
        out = first(&out);
    }
    if let Some(def) = args.default.as_deref() {
        out = or_default(&out, def);
    }

    print_json(&out, args.compact);
}

fn read_document(arg: &str) -> std::io::Result<String> {
    if arg == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else if let Some(file) = arg.strip_prefix('@') {
        std::fs::read_to_string(file)
    } else {
        Ok(arg.to_string())
    }
}

fn print_json(v: &Value, compact: bool) {
    let text = if compact {
        serde_json::to_string(v)
    } else {
        serde_json::to_string_pretty(v)
    };
    match text {
        Ok(t) => println!("{t}"),
        Err(e) => {
            eprintln!("Cannot render output: {e}");
            process::exit(1);
        }
    }
}
