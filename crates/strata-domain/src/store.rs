//! Per-object property storage.

use indexmap::IndexMap;
use strata_core::{ElementKind, PropKey, PropertyArray};

/// The arrays stored directly on one domain or subdomain.
///
/// Keys keep insertion order, so listings are stable across calls.
/// Replacing a key keeps its original position.
#[derive(Clone, Debug, Default)]
pub struct PropertyStore {
    arrays: IndexMap<PropKey, PropertyArray>,
}

impl PropertyStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The array stored under `key`.
    pub fn get(&self, key: &PropKey) -> Option<&PropertyArray> {
        self.arrays.get(key)
    }

    /// Whether `key` is stored here.
    pub fn contains(&self, key: &PropKey) -> bool {
        self.arrays.contains_key(key)
    }

    /// Store `array` under `key`, returning the replaced array.
    pub(crate) fn insert(&mut self, key: PropKey, array: PropertyArray) -> Option<PropertyArray> {
        self.arrays.insert(key, array)
    }

    /// Remove `key`, preserving the order of the remaining keys.
    pub(crate) fn remove(&mut self, key: &PropKey) -> Option<PropertyArray> {
        self.arrays.shift_remove(key)
    }

    /// All stored keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &PropKey> {
        self.arrays.keys()
    }

    /// Stored keys of one element kind.
    pub fn keys_of(&self, kind: ElementKind) -> impl Iterator<Item = &PropKey> {
        self.arrays.keys().filter(move |k| k.kind() == kind)
    }

    /// Number of stored arrays.
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }
}
