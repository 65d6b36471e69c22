//! Error types for dependency resolution.

use cybind_ast::nodes::NodeId;
use thiserror::Error;

/// Errors raised while resolving a function's type dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum ResolveError {
    /// A node references an id with no corresponding record in the
    /// store. The input AST promised a closed universe; a partial
    /// closure is not a meaningful output, so this aborts resolution.
    #[error("unresolved type reference `{id}`: no node with this id exists in the AST")]
    UnresolvedType { id: NodeId },
}
