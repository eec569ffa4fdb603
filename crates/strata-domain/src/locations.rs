//! Subdomain-to-domain index mapping.

use indexmap::IndexSet;
use strata_core::{ElementCounts, ElementKind};

use crate::error::RegistryError;

/// The ordered domain-level indices a subdomain covers, per element kind.
///
/// Local index `i` of a subdomain corresponds to domain index
/// `indices(kind)[i]`. Indices need not be contiguous or sorted. Backed by
/// `IndexSet` so both directions of the mapping are O(1).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Locations {
    pores: IndexSet<usize>,
    throats: IndexSet<usize>,
}

impl Locations {
    /// Locations covering nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pore indices, replacing any previous ones.
    pub fn with_pores<I>(self, indices: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = usize>,
    {
        self.with(ElementKind::Pore, indices)
    }

    /// Set the throat indices, replacing any previous ones.
    pub fn with_throats<I>(self, indices: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = usize>,
    {
        self.with(ElementKind::Throat, indices)
    }

    /// Set the indices for `kind`, replacing any previous ones.
    ///
    /// Returns [`RegistryError::DuplicateIndex`] if an index repeats.
    pub fn with<I>(mut self, kind: ElementKind, indices: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = IndexSet::new();
        for index in indices {
            if !set.insert(index) {
                return Err(RegistryError::DuplicateIndex { kind, index });
            }
        }
        *self.slot_mut(kind) = set;
        Ok(self)
    }

    /// The ordered domain indices for `kind`.
    pub fn indices(&self, kind: ElementKind) -> &IndexSet<usize> {
        match kind {
            ElementKind::Pore => &self.pores,
            ElementKind::Throat => &self.throats,
        }
    }

    fn slot_mut(&mut self, kind: ElementKind) -> &mut IndexSet<usize> {
        match kind {
            ElementKind::Pore => &mut self.pores,
            ElementKind::Throat => &mut self.throats,
        }
    }

    /// Number of covered elements of `kind`.
    pub fn count(&self, kind: ElementKind) -> usize {
        self.indices(kind).len()
    }

    /// Covered element counts for both kinds.
    pub fn counts(&self) -> ElementCounts {
        ElementCounts::new(self.pores.len(), self.throats.len())
    }

    /// Domain index of local element `local`.
    pub fn to_global(&self, kind: ElementKind, local: usize) -> Option<usize> {
        self.indices(kind).get_index(local).copied()
    }

    /// Local index of domain element `global`, if covered.
    pub fn to_local(&self, kind: ElementKind, global: usize) -> Option<usize> {
        self.indices(kind).get_index_of(&global)
    }

    /// Whether domain element `global` is covered.
    pub fn contains(&self, kind: ElementKind, global: usize) -> bool {
        self.indices(kind).contains(&global)
    }

    /// Iterate over covered domain indices of `kind` in local order.
    pub fn iter(&self, kind: ElementKind) -> impl Iterator<Item = usize> + '_ {
        self.indices(kind).iter().copied()
    }
}
