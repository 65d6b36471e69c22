//! Deserializes the AST source document into an [`AstStore`].
//!
//! The document is a JSON array of records, each tagged by `kind`. The
//! rest of the pipeline depends only on the typed node model, so a front
//! end targeting a different serialization only needs to produce
//! [`AstNode`] values and call [`AstStore::build`] directly.

use std::fs;
use std::path::Path;

use crate::arena::AstStore;
use crate::errors::AstError;
use crate::nodes::AstNode;

/// Parses and indexes an AST document.
///
/// # Errors
///
/// [`AstError::MalformedInput`] when the document is not a valid record
/// sequence; [`AstError::DuplicateId`] on conflicting ids.
pub fn load_str(input: &str) -> Result<AstStore, AstError> {
    let records: Vec<AstNode> =
        serde_json::from_str(input).map_err(|e| AstError::MalformedInput {
            reason: e.to_string(),
        })?;
    AstStore::build(records)
}

/// Reads an AST document from disk and indexes it.
///
/// # Errors
///
/// [`AstError::FileRead`] on IO failure, otherwise as [`load_str`].
pub fn load_path(path: &Path) -> Result<AstStore, AstError> {
    let input = fs::read_to_string(path).map_err(|source| AstError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&input)
}
