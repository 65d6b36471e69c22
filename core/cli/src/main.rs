#![warn(clippy::pedantic)]

//! # cybind driver
//!
//! Command line driver for the cybind binding generator.
//!
//! 1. Compile the filter patterns and read the allow-list, if given.
//! 2. Load the AST document into the store.
//! 3. Classify, select, resolve and emit in one pass.
//! 4. Print the declaration block, or write it to `-o <file>`.
//!
//! ## Exit codes
//! * 0 – success (also `--help` and `--version`).
//! * 1 – configuration, IO, load, or resolution failure.
//! * 2 – usage error (bad or missing arguments, reported by clap).
//!
//! ## Example
//! ```bash
//! cybind -f 'foo_' -l 'foo' foo.h foo.json
//! ```

mod parser;

use std::{fs, process};

use clap::Parser;
use parser::Cli;
use regex::Regex;
use rustc_hash::FxHashSet;

/// Entry point for the CLI executable.
///
/// Filter patterns are compiled and the allow-list is read before the
/// AST is loaded, so configuration mistakes are reported immediately and
/// never surface as mid-resolution faults. On any failure a diagnostic
/// is printed to stderr and the process exits with code `1`.
fn main() {
    let args = Cli::parse();

    let lfilter = match compile_filter(args.location_filter.as_deref(), "location filter") {
        Ok(re) => re,
        Err(message) => {
            eprintln!("Error: {message}");
            process::exit(1);
        }
    };
    let ffilter = match compile_filter(args.function_name_filter.as_deref(), "function name filter")
    {
        Ok(re) => re,
        Err(message) => {
            eprintln!("Error: {message}");
            process::exit(1);
        }
    };

    let allow_list = match args.input_file_filter.as_deref() {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => Some(
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_owned)
                    .collect::<FxHashSet<String>>(),
            ),
            Err(e) => {
                eprintln!("Error: cannot read allow-list {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => None,
    };

    let store = match cybind::load(&args.ast_file) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let text = match cybind::generate(
        &store,
        &args.header,
        lfilter.map(|re| move |location: &str| re.is_match(location)),
        ffilter.map(|re| move |name: &str| re.is_match(name)),
        allow_list.as_ref(),
        args.emit_functions,
    ) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &text) {
                eprintln!("Error: cannot write {}: {e}", path.display());
                process::exit(1);
            }
            println!("Declarations written to: {}", path.display());
        }
        None => print!("{text}"),
    }
    process::exit(0);
}

/// Compiles an optional filter pattern, reporting which flag failed.
fn compile_filter(pattern: Option<&str>, what: &str) -> Result<Option<Regex>, String> {
    match pattern {
        None => Ok(None),
        Some(pattern) => Regex::new(pattern)
            .map(Some)
            .map_err(|e| format!("invalid {what} pattern: {e}")),
    }
}
