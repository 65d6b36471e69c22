#![warn(clippy::pedantic)]
//! Cython declaration emission for the cybind binding generator.
//!
//! Takes the resolver's closure of type definitions plus the selected
//! functions and renders one `cdef extern from '<header>':` block:
//! free-standing enumerator constants first (sorted by name), then each
//! closure entry in discovery order, then — only when explicitly
//! requested — the function declarations themselves.
//!
//! The emitter is pure text production; writing the result anywhere is
//! the caller's concern.

pub mod emit;
pub mod errors;

pub use emit::emit;
pub use errors::EmitError;
