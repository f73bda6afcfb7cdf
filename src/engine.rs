//! Engine facade: top-level API for the taxonet system.
//!
//! The `Engine` owns the symbol table and the semantic network and provides
//! the public interface for loading facts and resolving attributes. The
//! network is built once by applying every fact from the input, then treated
//! as immutable for the rest of the session.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, TaxoResult};
use crate::fact::{Fact, parse_facts};
use crate::network::SemanticNet;
use crate::network::resolve::effective_attr;
use crate::symbol::SymbolTable;

/// The taxonet semantic network engine.
///
/// Owns the token interner and the network. All query-path methods take
/// labels, translate them through the interner without allocating, and
/// answer from the network.
pub struct Engine {
    symbols: Arc<SymbolTable>,
    net: Arc<SemanticNet>,
}

impl Engine {
    /// Create a new empty engine.
    pub fn new() -> Self {
        Self {
            symbols: Arc::new(SymbolTable::new()),
            net: Arc::new(SemanticNet::new()),
        }
    }

    /// Apply one fact record to the network.
    pub fn apply(&self, fact: &Fact) -> TaxoResult<()> {
        match fact {
            Fact::IsA { child, parent } => {
                let child = self.symbols.intern(child)?;
                let parent = self.symbols.intern(parent)?;
                self.net.declare_is_a(child, parent);
            }
            Fact::InstanceOf { instance, class } => {
                let instance = self.symbols.intern(instance)?;
                let class = self.symbols.intern(class)?;
                self.net.declare_instance(instance, class);
            }
            Fact::Attribute { entity, name, value } => {
                let entity = self.symbols.intern(entity)?;
                let name = self.symbols.intern(name)?;
                self.net.declare_attribute(entity, name, value.clone());
            }
        }
        tracing::debug!(?fact, "applied fact");
        Ok(())
    }

    /// Load facts from a string, aborting on the first malformed line.
    ///
    /// The whole text is parsed before any fact is applied, so a malformed
    /// line cannot leave a partial network behind.
    pub fn load_str(&self, text: &str) -> TaxoResult<usize> {
        let facts = parse_facts(text)?;
        for fact in &facts {
            self.apply(fact)?;
        }
        tracing::info!(
            facts = facts.len(),
            classes = self.net.class_count(),
            instances = self.net.instance_count(),
            "semantic network built"
        );
        Ok(facts.len())
    }

    /// Load facts from a file. The whole load fails on I/O or parse
    /// errors; no partial network is ever observable.
    pub fn load_path(&self, path: impl AsRef<Path>) -> TaxoResult<usize> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.load_str(&text)
    }

    /// Resolve the effective value of `attr` for `entity`, honoring instance
    /// shadowing and BFS inheritance.
    ///
    /// Labels that were never declared resolve to `None` without being
    /// interned, so querying cannot grow the symbol universe.
    pub fn resolve(&self, entity: &str, attr: &str) -> Option<String> {
        let entity = self.symbols.lookup(entity)?;
        let attr = self.symbols.lookup(attr)?;
        effective_attr(&self.net, entity, attr)
    }

    /// Every addressable entity, sorted lexicographically by identifier.
    pub fn all_entities(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .net
            .entities()
            .into_iter()
            .map(|id| self.symbols.resolve_label(id))
            .collect();
        labels.sort();
        labels
    }

    /// Direct access to the network (resolver-level callers and tests).
    pub fn network(&self) -> &SemanticNet {
        &self.net
    }

    /// Direct access to the symbol table.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Summary statistics for the loaded network.
    pub fn info(&self) -> EngineInfo {
        EngineInfo {
            entities: self.net.entities().len(),
            classes: self.net.class_count(),
            instances: self.net.instance_count(),
            is_a_edges: self.net.is_a_count(),
            attributes: self.net.attribute_count(),
        }
    }

    /// Label-resolved dump of every entity, sorted by identifier. Suitable
    /// for JSON export.
    pub fn export_entities(&self) -> Vec<EntityExport> {
        let mut entries: Vec<EntityExport> = self
            .net
            .entities()
            .into_iter()
            .map(|id| {
                let mut attributes: Vec<(String, String)> = self
                    .net
                    .attr_names(id)
                    .into_iter()
                    .filter_map(|name| {
                        let value = self.net.direct_attr(id, name)?;
                        Some((self.symbols.resolve_label(name), value))
                    })
                    .collect();
                attributes.sort();
                EntityExport {
                    name: self.symbols.resolve_label(id),
                    is_class: self.net.is_class(id),
                    is_instance: self.net.is_instance(id),
                    class: self.net.class_of(id).map(|c| self.symbols.resolve_label(c)),
                    parents: self
                        .net
                        .parents_of(id)
                        .into_iter()
                        .map(|p| self.symbols.resolve_label(p))
                        .collect(),
                    attributes,
                }
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("symbols", &self.symbols)
            .field("net", &self.net)
            .finish()
    }
}

/// Summary information about the loaded network.
#[derive(Debug, Clone)]
pub struct EngineInfo {
    pub entities: usize,
    pub classes: usize,
    pub instances: usize,
    pub is_a_edges: usize,
    pub attributes: usize,
}

impl std::fmt::Display for EngineInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "taxonet network info")?;
        writeln!(f, "  entities:    {}", self.entities)?;
        writeln!(f, "  classes:     {}", self.classes)?;
        writeln!(f, "  instances:   {}", self.instances)?;
        writeln!(f, "  is-a edges:  {}", self.is_a_edges)?;
        writeln!(f, "  attributes:  {}", self.attributes)?;
        Ok(())
    }
}

/// Exported entity with resolved labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityExport {
    /// Entity identifier.
    pub name: String,
    /// Whether the entity appears on either side of an is-a edge.
    pub is_class: bool,
    /// Whether the entity was declared as an instance.
    pub is_instance: bool,
    /// The instance's class, if declared.
    pub class: Option<String>,
    /// Parent classes in declaration order.
    pub parents: Vec<String>,
    /// Direct attribute assertions, sorted by name.
    pub attributes: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACTS: &str = "\
es_un(Dog, Animal)
atributo(Animal, sound, generic)
instancia(Rex, Dog)
atributo(Rex, sound, woof)
";

    fn loaded_engine() -> Engine {
        let engine = Engine::new();
        engine.load_str(FACTS).unwrap();
        engine
    }

    #[test]
    fn load_counts_applied_facts() {
        let engine = Engine::new();
        assert_eq!(engine.load_str(FACTS).unwrap(), 4);
    }

    #[test]
    fn resolve_by_label() {
        let engine = loaded_engine();
        assert_eq!(engine.resolve("Rex", "sound").as_deref(), Some("woof"));
        assert_eq!(engine.resolve("Dog", "sound").as_deref(), Some("generic"));
        assert_eq!(engine.resolve("Animal", "sound").as_deref(), Some("generic"));
    }

    #[test]
    fn resolve_unknown_labels_without_interning() {
        let engine = loaded_engine();
        let before = engine.symbols().len();
        assert_eq!(engine.resolve("Ghost", "color"), None);
        assert_eq!(engine.symbols().len(), before);
    }

    #[test]
    fn all_entities_sorted() {
        let engine = loaded_engine();
        assert_eq!(engine.all_entities(), vec!["Animal", "Dog", "Rex"]);
    }

    #[test]
    fn info_counts() {
        let engine = loaded_engine();
        let info = engine.info();
        assert_eq!(info.entities, 3);
        assert_eq!(info.classes, 2);
        assert_eq!(info.instances, 1);
        assert_eq!(info.is_a_edges, 1);
        assert_eq!(info.attributes, 2);
    }

    #[test]
    fn reloading_same_facts_is_idempotent() {
        let engine = loaded_engine();
        engine.load_str(FACTS).unwrap();

        let info = engine.info();
        assert_eq!(info.is_a_edges, 1);
        assert_eq!(info.attributes, 2);
        assert_eq!(engine.resolve("Rex", "sound").as_deref(), Some("woof"));
    }

    #[test]
    fn export_is_label_resolved_and_sorted() {
        let engine = loaded_engine();
        let entries = engine.export_entities();

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Animal", "Dog", "Rex"]);

        let rex = &entries[2];
        assert!(rex.is_instance);
        assert_eq!(rex.class.as_deref(), Some("Dog"));
        assert_eq!(rex.attributes, vec![("sound".to_string(), "woof".to_string())]);

        let dog = &entries[1];
        assert!(dog.is_class);
        assert_eq!(dog.parents, vec!["Animal"]);
    }

    #[test]
    fn malformed_line_aborts_load_without_applying_anything() {
        let engine = Engine::new();
        let err = engine.load_str("es_un(Dog, Animal)\nbogus line\n");
        assert!(err.is_err());

        // Lines before the malformed one must not have been applied.
        assert_eq!(engine.info().entities, 0);
        assert_eq!(engine.resolve("Dog", "sound"), None);
    }

    #[test]
    fn json_round_trip_of_export() {
        let engine = loaded_engine();
        let entries = engine.export_entities();
        let json = serde_json::to_string(&entries).unwrap();
        let back: Vec<EntityExport> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), entries.len());
        assert_eq!(back[0].name, "Animal");
    }
}
