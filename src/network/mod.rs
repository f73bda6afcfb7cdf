//! Semantic network: the in-memory model of the loaded taxonomy.
//!
//! The network stores three kinds of state:
//!
//! - **is-a edges** in a petgraph `DiGraph` (child → parent), with a
//!   `DashMap` node index for O(1) lookups by [`SymbolId`]
//! - **instance-of bindings**: each instance maps to exactly one class,
//!   last write wins
//! - **direct attributes**: per-entity attribute → value maps
//!
//! plus the class/instance catalogs. The network is built once from a fact
//! stream and is read-only afterwards; concurrent readers are safe as long
//! as no writer runs alongside them.
//!
//! Cycles and self-loops in the is-a graph are tolerated, not rejected;
//! the resolver's visited set bounds every traversal.

pub mod resolve;

use std::collections::HashMap;
use std::sync::RwLock;

use dashmap::{DashMap, DashSet};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::symbol::SymbolId;

/// The semantic network built from a fact stream.
pub struct SemanticNet {
    /// The is-a graph: nodes are SymbolIds, edges run child → parent.
    graph: RwLock<DiGraph<SymbolId, ()>>,
    /// SymbolId → NodeIndex mapping for O(1) node lookups.
    node_index: DashMap<SymbolId, NodeIndex>,
    /// Instance → its one class. Re-declaring overwrites.
    class_of: DashMap<SymbolId, SymbolId>,
    /// Direct (non-inherited) attributes per entity.
    attrs: DashMap<SymbolId, HashMap<SymbolId, String>>,
    /// Every entity mentioned on either side of an is-a edge.
    classes: DashSet<SymbolId>,
    /// Every entity declared as the subject of an instance-of.
    instances: DashSet<SymbolId>,
}

impl SemanticNet {
    /// Create a new empty network.
    pub fn new() -> Self {
        Self {
            graph: RwLock::new(DiGraph::new()),
            node_index: DashMap::new(),
            class_of: DashMap::new(),
            attrs: DashMap::new(),
            classes: DashSet::new(),
            instances: DashSet::new(),
        }
    }

    /// Ensure a node exists for the given symbol, returning its NodeIndex.
    fn ensure_node(&self, symbol: SymbolId) -> NodeIndex {
        if let Some(idx) = self.node_index.get(&symbol) {
            return *idx.value();
        }
        let mut graph = self.graph.write().expect("graph lock poisoned");
        // Double-check after acquiring write lock
        if let Some(idx) = self.node_index.get(&symbol) {
            return *idx.value();
        }
        let idx = graph.add_node(symbol);
        self.node_index.insert(symbol, idx);
        idx
    }

    // -----------------------------------------------------------------------
    // Builder mutators: never fail, last write wins
    // -----------------------------------------------------------------------

    /// Declare `child` is-a `parent`. Registers both as classes.
    ///
    /// Re-declaring an existing edge is a no-op; self-loops are accepted.
    pub fn declare_is_a(&self, child: SymbolId, parent: SymbolId) {
        let child_idx = self.ensure_node(child);
        let parent_idx = self.ensure_node(parent);
        {
            let mut graph = self.graph.write().expect("graph lock poisoned");
            if graph.find_edge(child_idx, parent_idx).is_none() {
                graph.add_edge(child_idx, parent_idx, ());
            }
        }
        self.classes.insert(child);
        self.classes.insert(parent);
    }

    /// Declare `instance` an instance of `class`, overwriting any prior class.
    pub fn declare_instance(&self, instance: SymbolId, class: SymbolId) {
        self.class_of.insert(instance, class);
        self.instances.insert(instance);
        self.classes.insert(class);
    }

    /// Assert a direct attribute value for an entity, overwriting any prior
    /// value for the same (entity, attribute) pair.
    pub fn declare_attribute(&self, entity: SymbolId, name: SymbolId, value: impl Into<String>) {
        self.attrs.entry(entity).or_default().insert(name, value.into());
    }

    // -----------------------------------------------------------------------
    // Read API
    // -----------------------------------------------------------------------

    /// Parents of an entity, in declaration order.
    ///
    /// petgraph enumerates adjacency newest-first, so the collected list is
    /// reversed to recover insertion order. This is what makes diamond
    /// tie-breaking deterministic for a fixed input file.
    pub fn parents_of(&self, entity: SymbolId) -> Vec<SymbolId> {
        let graph = self.graph.read().expect("graph lock poisoned");
        let idx = match self.node_index.get(&entity) {
            Some(idx) => *idx.value(),
            None => return vec![],
        };
        let mut parents: Vec<SymbolId> = graph
            .neighbors_directed(idx, Direction::Outgoing)
            .filter_map(|n| graph.node_weight(n).copied())
            .collect();
        parents.reverse();
        parents
    }

    /// The declared class of an instance, if any.
    pub fn class_of(&self, instance: SymbolId) -> Option<SymbolId> {
        self.class_of.get(&instance).map(|r| *r.value())
    }

    /// A direct (non-inherited) attribute value.
    pub fn direct_attr(&self, entity: SymbolId, name: SymbolId) -> Option<String> {
        self.attrs
            .get(&entity)
            .and_then(|map| map.value().get(&name).cloned())
    }

    /// The attribute names directly asserted on an entity. Unordered.
    pub fn attr_names(&self, entity: SymbolId) -> Vec<SymbolId> {
        self.attrs
            .get(&entity)
            .map(|map| map.value().keys().copied().collect())
            .unwrap_or_default()
    }

    /// Whether the entity carries any direct attributes.
    ///
    /// An entity that was never declared via is-a but has attributes is
    /// treated as class-like by the resolver; this is the capability check
    /// backing that rule.
    pub fn has_direct_attrs(&self, entity: SymbolId) -> bool {
        self.attrs
            .get(&entity)
            .is_some_and(|map| !map.value().is_empty())
    }

    /// Whether the entity was mentioned on either side of an is-a edge.
    pub fn is_class(&self, entity: SymbolId) -> bool {
        self.classes.contains(&entity)
    }

    /// Whether the entity was declared as an instance.
    pub fn is_instance(&self, entity: SymbolId) -> bool {
        self.instances.contains(&entity)
    }

    /// The full addressable entity universe: classes ∪ instances ∪ attribute
    /// subjects. Unordered; callers needing determinism sort by label.
    pub fn entities(&self) -> Vec<SymbolId> {
        let mut seen = std::collections::HashSet::new();
        seen.extend(self.classes.iter().map(|e| *e.key()));
        seen.extend(self.instances.iter().map(|e| *e.key()));
        seen.extend(self.attrs.iter().map(|e| *e.key()));
        seen.into_iter().collect()
    }

    /// Number of declared classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of declared instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Number of is-a edges.
    pub fn is_a_count(&self) -> usize {
        self.graph.read().expect("graph lock poisoned").edge_count()
    }

    /// Number of direct attribute assertions.
    pub fn attribute_count(&self) -> usize {
        self.attrs.iter().map(|e| e.value().len()).sum()
    }
}

impl Default for SemanticNet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SemanticNet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticNet")
            .field("classes", &self.class_count())
            .field("instances", &self.instance_count())
            .field("is_a_edges", &self.is_a_count())
            .field("attributes", &self.attribute_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(id: u64) -> SymbolId {
        SymbolId::new(id).unwrap()
    }

    #[test]
    fn is_a_registers_both_sides_as_classes() {
        let net = SemanticNet::new();
        net.declare_is_a(sym(1), sym(2));

        assert!(net.is_class(sym(1)));
        assert!(net.is_class(sym(2)));
        assert_eq!(net.parents_of(sym(1)), vec![sym(2)]);
        assert!(net.parents_of(sym(2)).is_empty());
        assert_eq!(net.is_a_count(), 1);
    }

    #[test]
    fn duplicate_is_a_is_idempotent() {
        let net = SemanticNet::new();
        net.declare_is_a(sym(1), sym(2));
        net.declare_is_a(sym(1), sym(2));

        assert_eq!(net.is_a_count(), 1);
        assert_eq!(net.parents_of(sym(1)), vec![sym(2)]);
    }

    #[test]
    fn parents_keep_declaration_order() {
        let net = SemanticNet::new();
        net.declare_is_a(sym(1), sym(2));
        net.declare_is_a(sym(1), sym(3));
        net.declare_is_a(sym(1), sym(4));

        assert_eq!(net.parents_of(sym(1)), vec![sym(2), sym(3), sym(4)]);
    }

    #[test]
    fn self_loop_is_accepted() {
        let net = SemanticNet::new();
        net.declare_is_a(sym(1), sym(1));
        assert_eq!(net.parents_of(sym(1)), vec![sym(1)]);
    }

    #[test]
    fn instance_of_last_write_wins() {
        let net = SemanticNet::new();
        net.declare_instance(sym(1), sym(2));
        net.declare_instance(sym(1), sym(3));

        assert_eq!(net.class_of(sym(1)), Some(sym(3)));
        assert!(net.is_instance(sym(1)));
        assert!(net.is_class(sym(2)));
        assert!(net.is_class(sym(3)));
        assert_eq!(net.instance_count(), 1);
    }

    #[test]
    fn attribute_last_write_wins() {
        let net = SemanticNet::new();
        net.declare_attribute(sym(1), sym(10), "red");
        net.declare_attribute(sym(1), sym(10), "blue");

        assert_eq!(net.direct_attr(sym(1), sym(10)).as_deref(), Some("blue"));
        assert_eq!(net.attribute_count(), 1);
    }

    #[test]
    fn attribute_only_entity_is_in_the_universe() {
        let net = SemanticNet::new();
        net.declare_attribute(sym(7), sym(10), "v");

        assert!(!net.is_class(sym(7)));
        assert!(!net.is_instance(sym(7)));
        assert!(net.has_direct_attrs(sym(7)));
        assert_eq!(net.entities(), vec![sym(7)]);
    }

    #[test]
    fn entities_union_deduplicates() {
        let net = SemanticNet::new();
        net.declare_is_a(sym(1), sym(2));
        net.declare_instance(sym(3), sym(1));
        net.declare_attribute(sym(1), sym(10), "v");

        let mut all = net.entities();
        all.sort();
        assert_eq!(all, vec![sym(1), sym(2), sym(3)]);
    }
}
