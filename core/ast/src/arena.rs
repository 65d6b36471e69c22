//! Id-addressed store over the flat AST record sequence.

use rustc_hash::FxHashMap;

use crate::errors::AstError;
use crate::nodes::{AstNode, NodeId};

/// Immutable arena of AST nodes, built once per run.
///
/// Three indexes are populated in one pass over the input records:
/// `id -> node`, `name -> id`, and `location -> ids declared there`.
/// Nothing is validated beyond id consistency; references between nodes
/// may dangle until the dependency resolver follows them.
#[derive(Default, Clone, Debug)]
pub struct AstStore {
    nodes: FxHashMap<NodeId, AstNode>,
    by_name: FxHashMap<String, NodeId>,
    by_location: FxHashMap<String, Vec<NodeId>>,
}

impl AstStore {
    /// Indexes a record sequence.
    ///
    /// # Errors
    ///
    /// [`AstError::DuplicateId`] when two distinct records share an id.
    /// A record that restates an earlier one verbatim is skipped.
    pub fn build(records: Vec<AstNode>) -> Result<Self, AstError> {
        let mut store = Self::default();
        for record in records {
            let id = record.id().clone();
            if let Some(existing) = store.nodes.get(&id) {
                if *existing == record {
                    continue;
                }
                return Err(AstError::DuplicateId { id });
            }
            if let Some(name) = record.name() {
                store.by_name.entry(name.to_owned()).or_insert_with(|| id.clone());
            }
            let location = record.location();
            if !location.is_empty() {
                store
                    .by_location
                    .entry(location.to_owned())
                    .or_default()
                    .push(id.clone());
            }
            store.nodes.insert(id, record);
        }
        Ok(store)
    }

    #[must_use]
    pub fn find_node(&self, id: &NodeId) -> Option<&AstNode> {
        self.nodes.get(id)
    }

    /// First node registered under `name`. C allows a struct tag and a
    /// typedef to share a name, so this index is advisory only.
    #[must_use]
    pub fn find_named(&self, name: &str) -> Option<&AstNode> {
        self.by_name.get(name).and_then(|id| self.nodes.get(id))
    }

    /// Ids of every node whose location string satisfies `matcher`.
    pub fn ids_at<F>(&self, matcher: F) -> Vec<NodeId>
    where
        F: Fn(&str) -> bool,
    {
        let mut ids: Vec<NodeId> = self
            .by_location
            .iter()
            .filter(|(location, _)| matcher(location))
            .flat_map(|(_, ids)| ids.iter().cloned())
            .collect();
        ids.sort();
        ids
    }

    pub fn nodes(&self) -> impl Iterator<Item = &AstNode> {
        self.nodes.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
