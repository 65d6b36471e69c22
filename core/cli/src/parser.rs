//! Command line argument parsing for the cybind driver.
//!
//! This module defines the CLI interface using `clap`. The `Cli` struct
//! captures all flags and arguments passed to the `cybind` binary.

use clap::Parser;

/// Command line interface definition for the cybind driver.
///
/// By default every function found in the AST document is pulled out.
/// Two filters narrow the working set:
///
/// - `-f/--function-name-filter`: keep only functions whose name
///   matches the pattern.
/// - `-l/--location-filter`: keep only declarations recorded in a
///   source file whose name matches the pattern.
///
/// ## Example
///
/// ```bash
/// cybind -f 'foo_' -l 'foo' foo.h foo.json
/// ```
///
/// Pulls out functions whose name matches `foo_` and which are declared
/// in a file whose name matches `foo`. The patterns are regular
/// expressions, matched anywhere in the string.
#[derive(Parser)]
#[command(
    name = "cybind",
    author,
    version = cybind::VERSION,
    about = "Generate Cython declarations from a C-API AST document",
    long_about = "The 'cybind' command reads an AST document describing a C API, selects a \
subset of its functions, resolves the transitive closure of type definitions those functions \
need, and prints a Cython 'cdef extern' declaration block for them."
)]
pub(crate) struct Cli {
    /// Name of the C header the declarations are scoped to, reproduced
    /// verbatim in the `cdef extern from '...'` clause.
    pub(crate) header: String,

    /// Path to the AST source document (a JSON array of declaration
    /// records produced by a C-parsing front end).
    pub(crate) ast_file: std::path::PathBuf,

    /// Write the generated declarations here instead of standard output.
    #[clap(short = 'o', long = "output")]
    pub(crate) output: Option<std::path::PathBuf>,

    /// Keep only declarations whose source location matches this
    /// regular expression. Dependencies of the selected functions are
    /// always resolved, wherever they are declared.
    #[clap(short = 'l', long = "location-filter")]
    pub(crate) location_filter: Option<String>,

    /// Keep only functions whose name matches this regular expression.
    #[clap(short = 'f', long = "function-name-filter")]
    pub(crate) function_name_filter: Option<String>,

    /// Path to a newline-delimited file of literal function names. When
    /// given, a function must match the name filter AND be listed here
    /// to be selected.
    #[clap(short = 'i', long = "input-file-filter")]
    pub(crate) input_file_filter: Option<std::path::PathBuf>,

    /// Also emit a declaration line for each selected function. By
    /// default only the type definitions are emitted and the function
    /// declarations are expected to come from the header itself.
    #[clap(long = "emit-functions", action = clap::ArgAction::SetTrue)]
    pub(crate) emit_functions: bool,
}
