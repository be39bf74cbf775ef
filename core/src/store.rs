//! Artifact store contract and the in-memory store.

use crate::{ResourceKey, Resolver};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mutable store of generated resolver artifacts, owned by the host.
///
/// Access is read-then-write: callers take a copy with `get`, modify it and
/// hand it back with `set`. Hosts that run fields concurrently must
/// serialize access per key to keep block ordering stable.
pub trait ArtifactStore {
    /// Get a copy of the artifact stored under `key`, if any.
    fn get(&self, key: &ResourceKey) -> Option<Resolver>;

    /// Store `resolver` under `key`, replacing any previous artifact.
    fn set(&mut self, key: &ResourceKey, resolver: Resolver);

    fn contains(&self, key: &ResourceKey) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory artifact store keyed by resource identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceMap {
    resources: BTreeMap<String, Resolver>,
}

impl ResourceMap {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the artifact stored under `key`.
    pub fn resolver(&self, key: &ResourceKey) -> Option<&Resolver> {
        self.resources.get(&key.resource_id())
    }

    /// Remove and return the artifact stored under `key`.
    pub fn remove(&mut self, key: &ResourceKey) -> Option<Resolver> {
        self.resources.remove(&key.resource_id())
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ArtifactStore for ResourceMap {
    fn get(&self, key: &ResourceKey) -> Option<Resolver> {
        self.resolver(key).cloned()
    }

    fn set(&mut self, key: &ResourceKey, resolver: Resolver) {
        self.resources.insert(key.resource_id(), resolver);
    }

    fn contains(&self, key: &ResourceKey) -> bool {
        self.resources.contains_key(&key.resource_id())
    }
}
