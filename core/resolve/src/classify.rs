//! Partitions store nodes into per-kind category views.

use std::rc::Rc;

use cybind_ast::arena::AstStore;
use cybind_ast::nodes::{
    AstNode, EnumDecl, EnumValueDecl, FunctionDecl, NodeId, RecordDecl, TypedefDecl, VariableDecl,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Disjoint, id-keyed views over the top-level declarations of a store.
///
/// Wrapper types (pointer, array, cv-qualified) and fundamental types
/// never classify; they stay reachable through the store for the
/// resolver. A node excluded here by the location filter is likewise
/// still discoverable as a dependency.
#[derive(Default)]
pub struct Classification {
    pub functions: FxHashMap<NodeId, Rc<FunctionDecl>>,
    pub typedefs: FxHashMap<NodeId, Rc<TypedefDecl>>,
    /// Free-standing enumerator constants only: values owned by a named
    /// enumeration are emitted with their owner, not classified here.
    pub enum_values: FxHashMap<NodeId, Rc<EnumValueDecl>>,
    pub enums: FxHashMap<NodeId, Rc<EnumDecl>>,
    pub structs: FxHashMap<NodeId, Rc<RecordDecl>>,
    pub unions: FxHashMap<NodeId, Rc<RecordDecl>>,
    pub variables: FxHashMap<NodeId, Rc<VariableDecl>>,
}

/// Walks every node once and buckets the top-level declaration kinds,
/// keeping only those whose `location` passes `lfilter` (default:
/// accept all). Pure function of the store and the predicate.
pub fn classify<F>(store: &AstStore, lfilter: Option<F>) -> Classification
where
    F: Fn(&str) -> bool,
{
    let accept = |location: &str| lfilter.as_ref().is_none_or(|f| f(location));

    // Enumerators reached through a named enumeration are that
    // enumeration's members, not free-standing constants.
    let owned: FxHashSet<&NodeId> = store
        .nodes()
        .filter_map(|node| match node {
            AstNode::Enumeration(e) if e.name.is_some() => Some(e.values.iter()),
            _ => None,
        })
        .flatten()
        .collect();

    let mut out = Classification::default();
    for node in store.nodes() {
        match node {
            AstNode::Function(f) if accept(&f.location) => {
                out.functions.insert(f.id.clone(), Rc::clone(f));
            }
            AstNode::Typedef(t) if accept(&t.location) => {
                out.typedefs.insert(t.id.clone(), Rc::clone(t));
            }
            AstNode::EnumValue(v) if accept(&v.location) && !owned.contains(&v.id) => {
                out.enum_values.insert(v.id.clone(), Rc::clone(v));
            }
            AstNode::Enumeration(e) if accept(&e.location) => {
                out.enums.insert(e.id.clone(), Rc::clone(e));
            }
            AstNode::Struct(r) if accept(&r.location) => {
                out.structs.insert(r.id.clone(), Rc::clone(r));
            }
            AstNode::Union(r) if accept(&r.location) => {
                out.unions.insert(r.id.clone(), Rc::clone(r));
            }
            AstNode::Variable(v) if accept(&v.location) => {
                out.variables.insert(v.id.clone(), Rc::clone(v));
            }
            _ => {}
        }
    }
    out
}
