#![warn(clippy::pedantic)]
//! Node model and AST store for the cybind binding generator.
//!
//! A C-parsing front end hands us a flat document of declaration records:
//! functions, typedefs, enumerations and their values, structs, unions,
//! variables, and the wrapper types (pointer, array, cv-qualified) that
//! connect them. This crate turns that document into a typed, id-indexed
//! [`arena::AstStore`] which the rest of the pipeline queries but never
//! mutates.
//!
//! Dangling references are legal at this stage; they only become errors
//! when the dependency resolver actually follows them.

pub mod arena;
pub mod errors;
pub mod loader;
pub mod nodes;
