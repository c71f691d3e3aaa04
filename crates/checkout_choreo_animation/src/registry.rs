// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-owner sets of in-flight animation keys.
//!
//! A key is present in an owner's [`KeyRegistry`] exactly while an animation
//! with that key is running on the owner. The [`OwnerRegistry`] maps owner
//! handles to their key registries and is torn down alongside the owner.

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque handle identifying a visual owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub Uuid);

impl OwnerId {
    /// Create a new random owner ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys currently animating on one owner
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    keys: HashSet<String>,
}

impl KeyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether an animation with this key is in flight
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Mark a key as in flight. Returns false if it already was.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    /// Release a key. Returns false if it was not held.
    pub fn remove(&mut self, key: &str) -> bool {
        self.keys.remove(key)
    }

    /// Number of keys in flight
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing is animating
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys currently held
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

/// Key registry shared between the scheduler and in-flight animations
pub type SharedKeyRegistry = Arc<Mutex<KeyRegistry>>;

/// Maps owner handles to their key registries
#[derive(Debug, Default)]
pub struct OwnerRegistry {
    owners: RwLock<IndexMap<OwnerId, SharedKeyRegistry>>,
}

impl OwnerRegistry {
    /// Create an empty owner registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new owner and return its handle
    pub fn register(&self) -> OwnerId {
        let owner = OwnerId::new();
        self.owners.write().insert(owner, SharedKeyRegistry::default());
        owner
    }

    /// Get an owner's key registry, creating an empty one on first use
    pub fn registry(&self, owner: OwnerId) -> SharedKeyRegistry {
        if let Some(registry) = self.owners.read().get(&owner) {
            return Arc::clone(registry);
        }
        Arc::clone(self.owners.write().entry(owner).or_default())
    }

    /// Get an owner's key registry if the owner is still tracked
    pub fn get(&self, owner: OwnerId) -> Option<SharedKeyRegistry> {
        self.owners.read().get(&owner).map(Arc::clone)
    }

    /// Drop an owner's registry when the owner is destroyed
    pub fn release(&self, owner: OwnerId) -> Option<SharedKeyRegistry> {
        let registry = self.owners.write().swap_remove(&owner)?;
        let held = registry.lock().len();
        if held > 0 {
            tracing::warn!("Released owner {:?} with {} animation(s) still in flight", owner, held);
        }
        Some(registry)
    }

    /// Check if an owner is known
    pub fn contains_owner(&self, owner: OwnerId) -> bool {
        self.owners.read().contains_key(&owner)
    }

    /// Check whether `key` is in flight on `owner` without creating a registry
    pub fn is_animating(&self, owner: OwnerId, key: &str) -> bool {
        self.owners
            .read()
            .get(&owner)
            .is_some_and(|registry| registry.lock().contains(key))
    }

    /// Number of tracked owners
    pub fn owner_count(&self) -> usize {
        self.owners.read().len()
    }
}
