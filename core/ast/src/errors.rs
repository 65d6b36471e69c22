//! Error types for AST loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::nodes::NodeId;

/// Errors that can occur while reading and indexing the AST document.
#[derive(Debug, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum AstError {
    /// Failed to read the AST source file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid AST record sequence: a record is
    /// missing its `kind` or `id`, a field has the wrong shape, or the
    /// document is not well-formed JSON at all.
    #[error("malformed AST input: {reason}")]
    MalformedInput { reason: String },

    /// Two distinct records claim the same id. An identical duplicate
    /// record is tolerated; a conflicting one is unrecoverable.
    #[error("duplicate id `{id}` with conflicting records")]
    DuplicateId { id: NodeId },
}
