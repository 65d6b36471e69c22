#![warn(clippy::pedantic)]
//! Classification and type-dependency resolution over an [`AstStore`].
//!
//! Three stages, each a pure function of the store:
//!
//! 1. [`classify::classify`] partitions nodes into disjoint category
//!    views (functions, typedefs, enum values, enums, structs, unions,
//!    variables), applying an optional location filter to top-level
//!    declarations.
//! 2. [`select::select_functions`] narrows the function category by a
//!    name filter and/or an explicit allow-list.
//! 3. [`puller::TypePuller`] walks the selected functions' signatures and
//!    accumulates the exact, insertion-ordered closure of type
//!    definitions needed to declare them, terminating safely on cyclic
//!    and self-referential type graphs.
//!
//! [`AstStore`]: cybind_ast::arena::AstStore

pub mod classify;
pub mod errors;
pub mod puller;
pub mod select;

pub use classify::{Classification, classify};
pub use errors::ResolveError;
pub use puller::TypePuller;
pub use select::select_functions;
