//! Query evaluation: the two supported query shapes.
//!
//! - **Shape A**: `atributo X de Y?` / `attribute X of Y?`: effective value
//!   of one attribute for one entity.
//! - **Shape B**: `clases o instancias con atributo X y valor Z?` /
//!   `classes or instances with attribute X and value Z?`: every entity whose
//!   effective value of X equals Z exactly, scanned in lexicographic order.
//!
//! Keywords are case-insensitive; both the original Spanish forms and the
//! English spellings are accepted. Anything else gets the help message;
//! an unrecognized query is a normal outcome, not an error, and queries
//! never mutate the network.

use std::sync::LazyLock;

use regex::Regex;

use crate::engine::Engine;

static EFFECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:atributo|attribute)\s+(\S+)\s+(?:de|of)\s+(\S+)\?\s*$").unwrap()
});

static WITH_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:clases\s+o\s+instancias|classes\s+or\s+instances)\s+(?:con\s+atributo|with\s+attribute)\s+(\S+)\s+(?:y\s+valor|and\s+value)\s+(\S+)\?\s*$",
    )
    .unwrap()
});

/// Help message returned for anything that matches neither shape.
pub const HELP: &str = "Unrecognized query. Supported shapes:\n\
    - atributo X de Y?  (attribute X of Y?)\n\
    - clases o instancias con atributo X y valor Z?  (classes or instances with attribute X and value Z?)";

/// A recognized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Shape A: effective value of `attr` for `entity`.
    Effective { attr: String, entity: String },
    /// Shape B: all entities whose effective `attr` equals `value`.
    WithValue { attr: String, value: String },
}

impl Query {
    /// Recognize one of the two query shapes. Entity, attribute, and value
    /// tokens are taken verbatim (case-sensitive); only the surrounding
    /// keywords are case-insensitive.
    pub fn parse(input: &str) -> Option<Self> {
        if let Some(caps) = EFFECTIVE_RE.captures(input) {
            return Some(Query::Effective {
                attr: caps[1].to_string(),
                entity: caps[2].to_string(),
            });
        }
        if let Some(caps) = WITH_VALUE_RE.captures(input) {
            return Some(Query::WithValue {
                attr: caps[1].to_string(),
                value: caps[2].to_string(),
            });
        }
        None
    }
}

/// Evaluate a raw query line against the engine, returning the user-facing
/// answer string.
pub fn answer(engine: &Engine, input: &str) -> String {
    match Query::parse(input) {
        Some(Query::Effective { attr, entity }) => match engine.resolve(&entity, &attr) {
            Some(value) => format!("{attr} of {entity} = {value}"),
            None => format!("{entity} has no attribute {attr} (not even inherited)."),
        },
        Some(Query::WithValue { attr, value }) => {
            let matches: Vec<String> = engine
                .all_entities()
                .into_iter()
                .filter(|entity| engine.resolve(entity, &attr).as_deref() == Some(value.as_str()))
                .collect();
            if matches.is_empty() {
                format!("No classes or instances with attribute {attr} and value {value}.")
            } else {
                format!("Matches: {}", matches.join(", "))
            }
        }
        None => HELP.to_string(),
    }
}
