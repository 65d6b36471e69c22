//! Error types for declaration emission.

use cybind_ast::nodes::NodeId;
use thiserror::Error;

/// Errors raised while rendering declarations.
///
/// After a successful resolve every referenced id exists in the store,
/// so these are unreachable in the normal pipeline; they exist so that
/// direct library callers handing the emitter an inconsistent closure
/// get an error instead of a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum EmitError {
    /// A rendered declaration references an id absent from the store.
    #[error("unknown type reference `{id}` during emission")]
    UnknownType { id: NodeId },

    /// A wrapper chain (pointer/array/qualifier) loops back on itself.
    #[error("cyclic wrapper type chain at `{id}`")]
    CyclicReference { id: NodeId },
}
