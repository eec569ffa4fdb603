//! Subdomains and the borrowed views through which they are accessed.
//!
//! A [`Subdomain`] holds only its own arrays and index mapping. Lookups
//! that fall back to the parent domain or to siblings need the domain, so
//! they go through [`SubdomainRef`] and [`SubdomainMut`], views borrowed
//! from the [`Domain`]. The subdomain itself never references its domain.

use std::borrow::Cow;

use strata_core::{
    ElementCounts, ElementKind, PropKey, PropertyArray, PropertyError, PropertyReader,
    PropertyValue, PropertyWriter, SubdomainId,
};

use crate::domain::Domain;
use crate::locations::Locations;
use crate::store::PropertyStore;

/// A partial-scope container over a fixed subset of domain elements.
///
/// Created by [`Domain::add_subdomain`]. A subdomain returned from
/// [`Domain::remove_subdomain`] is detached: it keeps its arrays and
/// locations but no longer takes part in any resolution.
#[derive(Clone, Debug)]
pub struct Subdomain {
    id: SubdomainId,
    name: String,
    locations: Locations,
    pub(crate) store: PropertyStore,
}

impl Subdomain {
    pub(crate) fn new(id: SubdomainId, name: String, locations: Locations) -> Self {
        Self {
            id,
            name,
            locations,
            store: PropertyStore::new(),
        }
    }

    /// Handle assigned at association time.
    pub fn id(&self) -> SubdomainId {
        self.id
    }

    /// Name given at association time.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Domain indices covered by this subdomain.
    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    /// Arrays stored directly on this subdomain.
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    /// Number of covered elements of each kind.
    pub fn counts(&self) -> ElementCounts {
        self.locations.counts()
    }
}

/// Read-only view of an associated subdomain.
#[derive(Clone, Copy, Debug)]
pub struct SubdomainRef<'a> {
    domain: &'a Domain,
    pos: usize,
}

impl<'a> SubdomainRef<'a> {
    pub(crate) fn new(domain: &'a Domain, pos: usize) -> Self {
        Self { domain, pos }
    }

    /// The underlying subdomain.
    pub fn subdomain(&self) -> &'a Subdomain {
        self.domain.subdomain_at(self.pos)
    }

    /// The domain this subdomain is associated with.
    pub fn domain(&self) -> &'a Domain {
        self.domain
    }

    /// Handle of the subdomain.
    pub fn id(&self) -> SubdomainId {
        self.subdomain().id()
    }

    /// Name of the subdomain.
    pub fn name(&self) -> &'a str {
        self.subdomain().name()
    }

    /// Domain indices covered by the subdomain.
    pub fn locations(&self) -> &'a Locations {
        self.subdomain().locations()
    }

    /// Resolve `key` on the subdomain.
    ///
    /// Same as [`PropertyReader::get`], but the result borrows from the
    /// domain rather than from this view, so it outlives the view.
    pub fn get(&self, key: &PropKey) -> Result<Cow<'a, PropertyArray>, PropertyError> {
        self.domain.resolve_on_subdomain(self.pos, key)
    }
}

impl PropertyReader for SubdomainRef<'_> {
    fn get(&self, key: &PropKey) -> Result<Cow<'_, PropertyArray>, PropertyError> {
        SubdomainRef::get(self, key)
    }

    fn holds(&self, key: &PropKey) -> bool {
        self.subdomain().store.contains(key)
    }

    fn element_count(&self, kind: ElementKind) -> usize {
        self.subdomain().locations.count(kind)
    }

    fn contains(&self, key: &PropKey) -> bool {
        self.domain.level_of(key).is_some()
    }
}

/// Read-write view of an associated subdomain.
///
/// Holds the domain exclusively, so sibling and domain data cannot change
/// underneath a write's conflict check.
#[derive(Debug)]
pub struct SubdomainMut<'a> {
    domain: &'a mut Domain,
    pos: usize,
}

impl<'a> SubdomainMut<'a> {
    pub(crate) fn new(domain: &'a mut Domain, pos: usize) -> Self {
        Self { domain, pos }
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> SubdomainRef<'_> {
        SubdomainRef::new(&*self.domain, self.pos)
    }

    /// The underlying subdomain.
    pub fn subdomain(&self) -> &Subdomain {
        self.domain.subdomain_at(self.pos)
    }

    /// Handle of the subdomain.
    pub fn id(&self) -> SubdomainId {
        self.subdomain().id()
    }

    /// Name of the subdomain.
    pub fn name(&self) -> &str {
        self.subdomain().name()
    }
}

impl PropertyReader for SubdomainMut<'_> {
    fn get(&self, key: &PropKey) -> Result<Cow<'_, PropertyArray>, PropertyError> {
        self.domain.resolve_on_subdomain(self.pos, key)
    }

    fn holds(&self, key: &PropKey) -> bool {
        self.subdomain().store.contains(key)
    }

    fn element_count(&self, kind: ElementKind) -> usize {
        self.subdomain().locations.count(kind)
    }

    fn contains(&self, key: &PropKey) -> bool {
        self.domain.level_of(key).is_some()
    }
}

impl PropertyWriter for SubdomainMut<'_> {
    fn set(&mut self, key: &PropKey, value: PropertyValue) -> Result<(), PropertyError> {
        self.domain.set_on_subdomain(self.pos, key, value)
    }

    fn remove(&mut self, key: &PropKey) -> Option<PropertyArray> {
        self.domain.remove_on_subdomain(self.pos, key)
    }
}
