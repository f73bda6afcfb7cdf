//! Interned symbols: the atomic tokens of the semantic network.
//!
//! Every entity identifier and attribute name is interned into a [`SymbolId`]
//! on first sight, so the BFS over the inheritance graph compares small
//! integers instead of hashing strings. The [`SymbolTable`] keeps the
//! bidirectional token ↔ id mapping.

use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::{SymbolError, TaxoResult};

/// Unique, niche-optimized identifier for an interned token.
///
/// Uses `NonZeroU64` so that `Option<SymbolId>` is the same size as `SymbolId`
/// (the niche optimization lets the compiler use 0 as the `None` discriminant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SymbolId(NonZeroU64);

impl SymbolId {
    /// Create a `SymbolId` from a raw `u64`.
    ///
    /// Returns `None` if `raw` is zero.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(SymbolId)
    }

    /// Get the underlying `u64` value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sym:{}", self.0)
    }
}

/// Bidirectional token interner.
///
/// Tokens are case-sensitive and interned verbatim: `Dog` and `dog` are two
/// different symbols. `intern` is get-or-create; `lookup` never allocates,
/// which is what keeps the query path free of side effects.
pub struct SymbolTable {
    /// Forward map: token → SymbolId (source of truth for interning).
    token_to_id: DashMap<String, SymbolId>,
    /// Reverse map: SymbolId → token.
    id_to_token: DashMap<SymbolId, String>,
    /// Monotonic ID allocator, starting from 1.
    next: AtomicU64,
}

impl SymbolTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            token_to_id: DashMap::new(),
            id_to_token: DashMap::new(),
            next: AtomicU64::new(1),
        }
    }

    /// Intern a token, returning its id. Repeated calls with the same token
    /// return the same id.
    pub fn intern(&self, token: &str) -> TaxoResult<SymbolId> {
        if let Some(existing) = self.token_to_id.get(token) {
            return Ok(*existing.value());
        }
        let raw = self.next.fetch_add(1, Ordering::Relaxed);
        let id = SymbolId::new(raw).ok_or(SymbolError::AllocatorExhausted)?;
        // Entry API arbitrates concurrent interns of the same token.
        let id = *self.token_to_id.entry(token.to_string()).or_insert(id);
        self.id_to_token.entry(id).or_insert_with(|| token.to_string());
        Ok(id)
    }

    /// Look up a token without interning it.
    pub fn lookup(&self, token: &str) -> Option<SymbolId> {
        self.token_to_id.get(token).map(|r| *r.value())
    }

    /// Resolve an id back to its token.
    pub fn token(&self, id: SymbolId) -> Option<String> {
        self.id_to_token.get(&id).map(|r| r.value().clone())
    }

    /// Resolve an id to a human-readable string, falling back to `sym:{id}`.
    pub fn resolve_label(&self, id: SymbolId) -> String {
        self.token(id).unwrap_or_else(|| format!("sym:{}", id.get()))
    }

    /// Number of interned tokens.
    pub fn len(&self) -> usize {
        self.token_to_id.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.token_to_id.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolTable")
            .field("count", &self.len())
            .finish()
    }
}
