//! Transitive type-dependency closure over function signatures.

use cybind_ast::arena::AstStore;
use cybind_ast::nodes::{AstNode, FunctionDecl, NodeId};
use rustc_hash::FxHashSet;

use crate::errors::ResolveError;

/// Accumulates the set of type-definition nodes a group of functions
/// needs in order to be declarable.
///
/// Traversal is an explicit work-stack walk with a visited-id set, so
/// depth never tracks the type graph's nesting and a second visit to any
/// id is a no-op. That no-op is the entire cycle story: a struct holding
/// a pointer to itself, or two structs pointing at each other, terminate
/// because their ids are already marked when the cycle closes.
///
/// The visited set and the closure outlive individual [`pull`] calls, so
/// a struct shared by several functions enters the closure once, at the
/// position of its first discovery. Insertion order is never reordered;
/// it is what makes the final output diff-stable across runs.
///
/// [`pull`]: TypePuller::pull
pub struct TypePuller<'a> {
    store: &'a AstStore,
    visited: FxHashSet<NodeId>,
    pulled: Vec<AstNode>,
}

impl<'a> TypePuller<'a> {
    #[must_use]
    pub fn new(store: &'a AstStore) -> Self {
        Self {
            store,
            visited: FxHashSet::default(),
            pulled: Vec::new(),
        }
    }

    /// Walks `function`'s return and parameter types transitively,
    /// adding every typedef, struct, union and enumeration encountered
    /// to the closure. Wrappers (pointer, array, cv-qualifier) are
    /// unwrapped without entering it; fundamental types terminate.
    ///
    /// # Errors
    ///
    /// [`ResolveError::UnresolvedType`] when a reference leads to an id
    /// absent from the store. Resolution is aborted; a partial closure
    /// must not be emitted.
    pub fn pull(&mut self, function: &FunctionDecl) -> Result<(), ResolveError> {
        // Stack discipline: push seeds in reverse so the return type is
        // expanded first, then parameters in declaration order.
        let mut work: Vec<NodeId> = Vec::new();
        for argument in function.arguments.iter().rev() {
            work.push(argument.ty.clone());
        }
        work.push(function.returns.clone());

        while let Some(id) = work.pop() {
            if !self.visited.insert(id.clone()) {
                continue;
            }
            let Some(node) = self.store.find_node(&id) else {
                return Err(ResolveError::UnresolvedType { id });
            };
            match node {
                AstNode::PointerType(w) => work.push(w.ty.clone()),
                AstNode::ArrayType(a) => work.push(a.ty.clone()),
                AstNode::CvQualifiedType(q) => work.push(q.ty.clone()),
                AstNode::FundamentalType(_) => {}
                AstNode::Typedef(t) => {
                    self.pulled.push(node.clone());
                    work.push(t.ty.clone());
                }
                AstNode::Struct(r) | AstNode::Union(r) => {
                    self.pulled.push(node.clone());
                    for field in r.fields.iter().rev() {
                        work.push(field.ty.clone());
                    }
                }
                // An enumeration's values are enumerators, not type
                // references; the emitter renders them with their owner.
                AstNode::Enumeration(_) => self.pulled.push(node.clone()),
                // Not type definitions; nothing to declare.
                AstNode::EnumValue(_) | AstNode::Variable(_) | AstNode::Function(_) => {}
            }
        }
        Ok(())
    }

    /// The closure so far, in first-discovery order.
    #[must_use]
    pub fn items(&self) -> &[AstNode] {
        &self.pulled
    }

    /// Consumes the puller, yielding the insertion-ordered closure.
    #[must_use]
    pub fn into_items(self) -> Vec<AstNode> {
        self.pulled
    }
}
