#![warn(clippy::pedantic)]
//! Core orchestration crate for the cybind pipeline.
//!
//! cybind turns a flat AST description of a C API into a minimal block
//! of Cython `cdef extern` declarations for a chosen subset of that
//! API's functions. The pipeline runs as one synchronous forward pass:
//!
//! ```text
//! AST document → load → classify → select → resolve → emit
//! ```
//!
//! Each phase is exposed as a standalone function so callers can run the
//! stages individually; [`generate`] runs everything after the load in
//! one call.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! fn bindings() -> anyhow::Result<String> {
//!     let store = cybind::load(Path::new("foo.json"))?;
//!     cybind::generate(
//!         &store,
//!         "foo.h",
//!         Some(|location: &str| location.contains("foo")),
//!         Some(|name: &str| name.starts_with("foo_")),
//!         None,
//!         false,
//!     )
//! }
//! ```
//!
//! ## Phases
//!
//! - **Load** ([`load`], [`load_str`]): deserialize the record sequence
//!   into an immutable, id-indexed [`AstStore`]. Duplicate conflicting
//!   ids and malformed records fail here; dangling references do not.
//! - **Classify** ([`classify`]): partition nodes into disjoint category
//!   views, applying the location filter to top-level declarations.
//! - **Select** ([`select_functions`]): narrow the functions by a name
//!   filter AND an optional allow-list, sorted by name.
//! - **Resolve** ([`resolve`] / [`TypePuller`]): walk the selected
//!   signatures transitively and collect the exact, insertion-ordered
//!   closure of typedefs, structs, unions and enumerations they need,
//!   terminating safely on cyclic type graphs. A dangling reference is
//!   fatal here: partial closures are never emitted.
//! - **Emit** ([`emit`]): render the closure plus the free-standing
//!   enumerator constants (sorted by name) into one declaration block
//!   scoped to the header name; function declarations are appended only
//!   when explicitly requested.
//!
//! All boundary functions return [`anyhow::Result`]; the per-crate error
//! types ([`AstError`], [`ResolveError`], `EmitError`) stay available
//! for callers that match on failure modes.

use std::path::Path;
use std::rc::Rc;

use rustc_hash::FxHashSet;

use cybind_ast::arena::AstStore;
use cybind_ast::nodes::{AstNode, EnumValueDecl, FunctionDecl};

pub use cybind_ast::errors::AstError;
pub use cybind_ast::nodes;
pub use cybind_codegen::emit::emit;
pub use cybind_resolve::classify::{Classification, classify};
pub use cybind_resolve::errors::ResolveError;
pub use cybind_resolve::puller::TypePuller;
pub use cybind_resolve::select::select_functions;

/// Version of the cybind classification library, surfaced by the CLI's
/// `-V` flag.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reads and indexes an AST document from disk.
///
/// # Errors
///
/// Propagates [`AstError`] on IO failure, malformed records, or
/// conflicting duplicate ids.
pub fn load(path: &Path) -> anyhow::Result<AstStore> {
    Ok(cybind_ast::loader::load_path(path)?)
}

/// Indexes an AST document already held in memory.
///
/// # Errors
///
/// Propagates [`AstError`] as [`load`] does.
pub fn load_str(input: &str) -> anyhow::Result<AstStore> {
    Ok(cybind_ast::loader::load_str(input)?)
}

/// Computes the closure of type definitions the given functions need,
/// in first-discovery order.
///
/// # Errors
///
/// [`ResolveError::UnresolvedType`] on a dangling type reference.
pub fn resolve(
    store: &AstStore,
    functions: &[Rc<FunctionDecl>],
) -> Result<Vec<AstNode>, ResolveError> {
    let mut puller = TypePuller::new(store);
    for function in functions {
        puller.pull(function)?;
    }
    Ok(puller.into_items())
}

/// Runs classify → select → resolve → emit over an already-loaded store
/// and returns the declaration text.
///
/// `lfilter` and `ffilter` are location and function-name predicates
/// (`None` accepts everything). When `allow_list` is present a function
/// must pass `ffilter` **and** be listed to be selected. With
/// `emit_functions` the selected signatures are appended after the type
/// declarations; by default they are left to the header include.
///
/// # Errors
///
/// Propagates resolution and emission failures; no partial output is
/// returned.
pub fn generate<L, F>(
    store: &AstStore,
    header: &str,
    lfilter: Option<L>,
    ffilter: Option<F>,
    allow_list: Option<&FxHashSet<String>>,
    emit_functions: bool,
) -> anyhow::Result<String>
where
    L: Fn(&str) -> bool,
    F: Fn(&str) -> bool,
{
    let classification = classify(store, lfilter);
    let kept = select_functions(&classification, ffilter, allow_list);
    let needed = resolve(store, &kept)?;
    let anon_values: Vec<Rc<EnumValueDecl>> =
        classification.enum_values.values().cloned().collect();
    let text = emit(
        store,
        header,
        &needed,
        &anon_values,
        if emit_functions { &kept } else { &[] },
    )?;
    Ok(text)
}
