//! Attribute resolution: effective values through the inheritance graph.
//!
//! The effective value of an attribute is found by checking direct attributes
//! first, then walking the is-a graph breadth-first. BFS guarantees that under
//! diamond inheritance the value of the *nearest* ancestor wins, without
//! needing an explicit linearization order; ties among equally-near ancestors
//! break by parent declaration order.
//!
//! Resolution never errors. A missing value is `None`, including for entities
//! the network has never heard of.

use std::collections::{HashSet, VecDeque};

use crate::symbol::SymbolId;

use super::SemanticNet;

/// Compute the effective value of `attr` for `entity`.
///
/// - A known instance checks its own direct attributes first (instance facts
///   always shadow the class chain), then walks its class's ancestor chain.
///   The instance's own attributes are never searched further.
/// - A known class (or an entity that is class-like merely by carrying
///   direct attributes) checks itself, then its ancestors.
/// - Anything else resolves to `None` without traversal.
pub fn effective_attr(net: &SemanticNet, entity: SymbolId, attr: SymbolId) -> Option<String> {
    if net.is_instance(entity) {
        if let Some(value) = net.direct_attr(entity, attr) {
            return Some(value);
        }
        return class_chain_attr(net, net.class_of(entity)?, attr);
    }

    if net.is_class(entity) || net.has_direct_attrs(entity) {
        if let Some(value) = net.direct_attr(entity, attr) {
            return Some(value);
        }
        return class_chain_attr(net, entity, attr);
    }

    None
}

/// BFS the ancestor chain starting at `class`, nearest ancestor first.
///
/// The visited set guarantees termination on cyclic is-a graphs: a node is
/// never enqueued twice, so the walk is bounded by the entity count.
fn class_chain_attr(net: &SemanticNet, class: SymbolId, attr: SymbolId) -> Option<String> {
    let mut visited: HashSet<SymbolId> = HashSet::new();
    let mut queue: VecDeque<SymbolId> = VecDeque::new();

    visited.insert(class);
    queue.push_back(class);

    while let Some(node) = queue.pop_front() {
        if let Some(value) = net.direct_attr(node, attr) {
            return Some(value);
        }
        for parent in net.parents_of(node) {
            if visited.insert(parent) {
                queue.push_back(parent);
            }
        }
    }
    None
}
