//! # taxonet
//!
//! A small knowledge-representation engine: it loads a flat text file of
//! declarative facts describing a taxonomy (is-a edges, instance-of edges,
//! attribute assertions) into an in-memory semantic network, and answers
//! queries by resolving attribute values through single- or
//! multiple-inheritance chains.
//!
//! ## Architecture
//!
//! - **Symbols** (`symbol`): entity identifiers interned to `NonZeroU64` handles
//! - **Facts** (`fact`): the `keyword(arg, ...)` line grammar and fact records
//! - **Network** (`network`): petgraph-backed is-a graph, instance bindings,
//!   direct attribute store; `network::resolve` is the BFS inheritance search
//! - **Engine** (`engine`): facade owning the interner and the network
//! - **Queries** (`query`): the two supported query shapes and their answers
//!
//! ## Library usage
//!
//! ```
//! use taxonet::engine::Engine;
//! use taxonet::query;
//!
//! let engine = Engine::new();
//! engine
//!     .load_str("es_un(Dog, Animal)\natributo(Animal, sound, generic)\n")
//!     .unwrap();
//! assert_eq!(engine.resolve("Dog", "sound").as_deref(), Some("generic"));
//! assert_eq!(
//!     query::answer(&engine, "atributo sound de Dog?"),
//!     "sound of Dog = generic"
//! );
//! ```

pub mod engine;
pub mod error;
pub mod fact;
pub mod network;
pub mod query;
pub mod symbol;
