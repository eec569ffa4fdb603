//! The domain: full-scope property owner and subdomain registry.
//!
//! # Resolution
//!
//! A key is stored on at most one level: the domain or its subdomains
//! (several sibling subdomains may each hold their share of it). Lookups
//! delegate across levels:
//!
//! - On the domain: own array, else the interleave of every subdomain
//!   holding the key over the full domain range.
//! - On a subdomain: own array, else the domain's array gathered at the
//!   subdomain's indices, else the interleave of siblings holding the key
//!   over the subdomain's own range.
//!
//! Delegated results are assembled on every call; nothing is cached, so a
//! write is visible to the next lookup without invalidation.

use std::borrow::Cow;

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use strata_core::{
    ElementCounts, ElementKind, Level, PropKey, PropertyArray, PropertyError, PropertyReader,
    PropertyValue, PropertyWriter, SubdomainId,
};

use crate::config::{ConfigError, DomainConfig, OverlapPolicy};
use crate::error::RegistryError;
use crate::interleave::{interleave, Placement};
use crate::locations::Locations;
use crate::store::PropertyStore;
use crate::subdomain::{Subdomain, SubdomainMut, SubdomainRef};

/// A full-scope container of per-element properties with delegation to
/// its associated subdomains.
#[derive(Clone, Debug)]
pub struct Domain {
    name: String,
    counts: ElementCounts,
    overlap: OverlapPolicy,
    store: PropertyStore,
    subdomains: IndexMap<SubdomainId, Subdomain>,
    next_id: u32,
}

// Compile-time assertion: Domain must be Send + Sync for SharedDomain.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Domain>();
};

impl Domain {
    /// Create an empty domain after validating `config`.
    pub fn new(config: DomainConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            counts: config.counts(),
            name: config.name,
            overlap: config.overlap,
            store: PropertyStore::new(),
            subdomains: IndexMap::new(),
            next_id: 0,
        })
    }

    /// Name given in the config.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of pores and throats.
    pub fn counts(&self) -> ElementCounts {
        self.counts
    }

    /// Overlap handling chosen in the config.
    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.overlap
    }

    /// Arrays stored directly on the domain.
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    // ── Registry ───────────────────────────────────────────────────

    /// Associate a new subdomain covering `locations`.
    ///
    /// The mapping is fixed for the subdomain's lifetime; to change it,
    /// remove the subdomain and add a new one.
    pub fn add_subdomain(
        &mut self,
        name: impl Into<String>,
        locations: Locations,
    ) -> Result<SubdomainId, RegistryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.subdomains.values().any(|s| s.name() == name) {
            return Err(RegistryError::DuplicateName { name });
        }
        for kind in ElementKind::ALL {
            let count = self.counts.get(kind);
            if let Some(index) = locations.iter(kind).find(|&i| i >= count) {
                return Err(RegistryError::IndexOutOfRange { kind, index, count });
            }
        }
        if let Some((kind, index, owner)) = self.first_overlap(&locations) {
            match self.overlap {
                OverlapPolicy::Reject => {
                    return Err(RegistryError::Overlap {
                        kind,
                        index,
                        owner: owner.to_string(),
                    });
                }
                OverlapPolicy::Allow => tracing::warn!(
                    domain = %self.name,
                    subdomain = %name,
                    %kind,
                    index,
                    owner,
                    "subdomain overlaps an existing subdomain; later registration wins"
                ),
            }
        }

        let id = SubdomainId(self.next_id);
        self.next_id += 1;
        let counts = locations.counts();
        self.subdomains
            .insert(id, Subdomain::new(id, name, locations));
        tracing::debug!(
            domain = %self.name,
            subdomain = %id,
            pores = counts.pores,
            throats = counts.throats,
            "associated subdomain"
        );
        Ok(id)
    }

    fn first_overlap(&self, locations: &Locations) -> Option<(ElementKind, usize, &str)> {
        ElementKind::ALL.into_iter().find_map(|kind| {
            locations.iter(kind).find_map(|index| {
                self.subdomains
                    .values()
                    .find(|s| s.locations().contains(kind, index))
                    .map(|s| (kind, index, s.name()))
            })
        })
    }

    /// Detach a subdomain, returning it with its data.
    ///
    /// Remaining subdomains keep their registration order.
    pub fn remove_subdomain(&mut self, id: SubdomainId) -> Result<Subdomain, RegistryError> {
        let sub = self
            .subdomains
            .shift_remove(&id)
            .ok_or(RegistryError::UnknownSubdomain { id })?;
        tracing::debug!(
            domain = %self.name,
            subdomain = %id,
            arrays = sub.store().len(),
            "removed subdomain"
        );
        Ok(sub)
    }

    /// Read-only view of an associated subdomain.
    pub fn subdomain(&self, id: SubdomainId) -> Result<SubdomainRef<'_>, RegistryError> {
        let pos = self.position(id)?;
        Ok(SubdomainRef::new(self, pos))
    }

    /// Read-write view of an associated subdomain.
    pub fn subdomain_mut(&mut self, id: SubdomainId) -> Result<SubdomainMut<'_>, RegistryError> {
        let pos = self.position(id)?;
        Ok(SubdomainMut::new(self, pos))
    }

    /// Look up an associated subdomain by name.
    pub fn find_subdomain(&self, name: &str) -> Option<SubdomainRef<'_>> {
        self.subdomains
            .values()
            .position(|s| s.name() == name)
            .map(|pos| SubdomainRef::new(self, pos))
    }

    fn position(&self, id: SubdomainId) -> Result<usize, RegistryError> {
        self.subdomains
            .get_index_of(&id)
            .ok_or(RegistryError::UnknownSubdomain { id })
    }

    pub(crate) fn subdomain_at(&self, pos: usize) -> &Subdomain {
        &self.subdomains[pos]
    }

    /// Ids of associated subdomains in registration order.
    pub fn subdomain_ids(&self) -> impl Iterator<Item = SubdomainId> + '_ {
        self.subdomains.keys().copied()
    }

    /// Associated subdomains in registration order.
    pub fn subdomains(&self) -> impl Iterator<Item = &Subdomain> {
        self.subdomains.values()
    }

    /// Number of associated subdomains.
    pub fn subdomain_count(&self) -> usize {
        self.subdomains.len()
    }

    /// Every subdomain covering element `index` of `kind`.
    pub fn owners_of(&self, kind: ElementKind, index: usize) -> SmallVec<[SubdomainId; 2]> {
        self.subdomains
            .values()
            .filter(|s| s.locations().contains(kind, index))
            .map(Subdomain::id)
            .collect()
    }

    /// The first-registered subdomain covering element `index` of `kind`.
    pub fn owner_of(&self, kind: ElementKind, index: usize) -> Option<SubdomainId> {
        self.subdomains
            .values()
            .find(|s| s.locations().contains(kind, index))
            .map(Subdomain::id)
    }

    /// Every key of `kind` that resolves on the domain.
    ///
    /// Domain keys come first, then subdomain keys in registration order,
    /// without repeats.
    pub fn keys(&self, kind: ElementKind) -> Vec<PropKey> {
        let mut keys: IndexSet<&PropKey> = self.store.keys_of(kind).collect();
        for sub in self.subdomains.values() {
            keys.extend(sub.store.keys_of(kind));
        }
        keys.into_iter().cloned().collect()
    }

    /// The level holding `key`, if any.
    ///
    /// For keys spread over several subdomains, the first holder in
    /// registration order is reported.
    pub fn level_of(&self, key: &PropKey) -> Option<Level> {
        if self.store.contains(key) {
            return Some(Level::Domain);
        }
        self.subdomains
            .values()
            .find(|s| s.store.contains(key))
            .map(level)
    }

    // ── Subdomain-side resolution ──────────────────────────────────

    pub(crate) fn resolve_on_subdomain(
        &self,
        pos: usize,
        key: &PropKey,
    ) -> Result<Cow<'_, PropertyArray>, PropertyError> {
        let sub = &self.subdomains[pos];
        if let Some(array) = sub.store.get(key) {
            return Ok(Cow::Borrowed(array));
        }

        let kind = key.kind();
        let own = sub.locations();
        if let Some(array) = self.store.get(key) {
            tracing::trace!(key = %key, subdomain = %sub.id(), "slicing domain array");
            return Ok(Cow::Owned(array.gather(own.iter(kind))));
        }

        let placements: Vec<Placement<'_>> = self
            .subdomains
            .values()
            .enumerate()
            .filter(|&(i, _)| i != pos)
            .filter_map(|(_, sibling)| {
                let array = sibling.store.get(key)?;
                let rows = sibling
                    .locations()
                    .iter(kind)
                    .enumerate()
                    .filter_map(|(src, global)| own.to_local(kind, global).map(|dst| (src, dst)))
                    .collect();
                Some(Placement { array, rows })
            })
            .collect();
        if placements.is_empty() {
            return Err(PropertyError::KeyNotFound { key: key.clone() });
        }
        interleave(key, own.count(kind), &placements).map(Cow::Owned)
    }

    pub(crate) fn set_on_subdomain(
        &mut self,
        pos: usize,
        key: &PropKey,
        value: PropertyValue,
    ) -> Result<(), PropertyError> {
        if self.store.contains(key) {
            return Err(PropertyError::WriteConflict {
                key: key.clone(),
                owner: Level::Domain,
            });
        }
        let count = self.subdomains[pos].locations().count(key.kind());
        let array = value.resolve(key, count)?;
        // Siblings holding the key must agree on its shape, or the
        // domain-level interleave could never be built.
        let sibling = self
            .subdomains
            .values()
            .enumerate()
            .filter(|&(i, _)| i != pos)
            .find_map(|(_, s)| s.store.get(key));
        if let Some(held) = sibling {
            if held.components() != array.components() {
                return Err(PropertyError::ComponentMismatch {
                    key: key.clone(),
                    expected: held.components(),
                    found: array.components(),
                });
            }
        }
        let sub = &mut self.subdomains[pos];
        sub.store.insert(key.clone(), array);
        tracing::debug!(key = %key, subdomain = %sub.id(), "stored subdomain property");
        Ok(())
    }

    pub(crate) fn remove_on_subdomain(&mut self, pos: usize, key: &PropKey) -> Option<PropertyArray> {
        self.subdomains[pos].store.remove(key)
    }
}

fn level(sub: &Subdomain) -> Level {
    Level::Subdomain {
        id: sub.id(),
        name: sub.name().to_string(),
    }
}

impl PropertyReader for Domain {
    fn get(&self, key: &PropKey) -> Result<Cow<'_, PropertyArray>, PropertyError> {
        if let Some(array) = self.store.get(key) {
            return Ok(Cow::Borrowed(array));
        }
        let kind = key.kind();
        let placements: Vec<Placement<'_>> = self
            .subdomains
            .values()
            .filter_map(|sub| {
                let array = sub.store.get(key)?;
                let rows = sub.locations().iter(kind).enumerate().collect();
                Some(Placement { array, rows })
            })
            .collect();
        if placements.is_empty() {
            return Err(PropertyError::KeyNotFound { key: key.clone() });
        }
        interleave(key, self.counts.get(kind), &placements).map(Cow::Owned)
    }

    fn holds(&self, key: &PropKey) -> bool {
        self.store.contains(key)
    }

    fn element_count(&self, kind: ElementKind) -> usize {
        self.counts.get(kind)
    }

    fn contains(&self, key: &PropKey) -> bool {
        self.level_of(key).is_some()
    }
}

impl PropertyWriter for Domain {
    fn set(&mut self, key: &PropKey, value: PropertyValue) -> Result<(), PropertyError> {
        if let Some(sub) = self.subdomains.values().find(|s| s.store.contains(key)) {
            return Err(PropertyError::WriteConflict {
                key: key.clone(),
                owner: level(sub),
            });
        }
        let array = value.resolve(key, self.counts.get(key.kind()))?;
        self.store.insert(key.clone(), array);
        tracing::debug!(key = %key, domain = %self.name, "stored domain property");
        Ok(())
    }

    fn remove(&mut self, key: &PropKey) -> Option<PropertyArray> {
        self.store.remove(key)
    }
}
