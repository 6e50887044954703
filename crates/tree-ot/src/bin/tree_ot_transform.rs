//! `tree-ot-transform` — transform two concurrent tree operations.
//!
//! Usage:
//!   tree-ot-transform [--strict] [--pretty] < pair.json
//!
//! Reads a JSON array `[a, b]` from stdin and prints `[a', b']`. Set
//! `RUST_LOG=tree_ot=trace` to see how the pair was classified.

use std::io::{self, Read, Write};

use tracing_subscriber::EnvFilter;
use tree_ot::cli::{transform_pair_json, Options};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let options = match Options::from_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(arg) => {
            eprintln!("Unknown argument: {arg}");
            eprintln!("Usage: tree-ot-transform [--strict] [--pretty] < pair.json");
            std::process::exit(2);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match transform_pair_json(buf.trim(), options) {
        Ok(result) => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{result}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "transform failed");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
