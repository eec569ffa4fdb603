//! Thread-shared domain behind a single reader-writer lock.
//!
//! [`SharedDomain`] lets several threads resolve properties concurrently
//! while writes and registry changes are exclusive. Lookups return owned
//! arrays because borrowed results cannot outlive the read guard.

use std::borrow::Cow;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use strata_core::{
    PropKey, PropertyArray, PropertyError, PropertyReader, PropertyValue, PropertyWriter,
    SubdomainId,
};

use crate::domain::Domain;
use crate::error::RegistryError;
use crate::locations::Locations;
use crate::subdomain::Subdomain;

/// A cloneable handle to a [`Domain`] shared across threads.
///
/// Clones share the same domain. Every operation holds the lock for its
/// whole duration, so each runs atomically with respect to the others.
#[derive(Clone, Debug)]
pub struct SharedDomain {
    inner: Arc<RwLock<Domain>>,
}

// Compile-time assertion: SharedDomain must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SharedDomain>();
};

impl SharedDomain {
    /// Wrap `domain` for shared access.
    pub fn new(domain: Domain) -> Self {
        Self {
            inner: Arc::new(RwLock::new(domain)),
        }
    }

    // Domain mutations never leave partial state behind (failed writes
    // store nothing), so a poisoned lock still guards a consistent domain.
    fn read_guard(&self) -> RwLockReadGuard<'_, Domain> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Domain> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with shared access to the domain.
    pub fn read<R>(&self, f: impl FnOnce(&Domain) -> R) -> R {
        let guard = self.read_guard();
        f(&guard)
    }

    /// Run `f` with exclusive access to the domain.
    pub fn write<R>(&self, f: impl FnOnce(&mut Domain) -> R) -> R {
        let mut guard = self.write_guard();
        f(&mut guard)
    }

    /// Resolve `key` on the domain.
    pub fn get(&self, key: &PropKey) -> Result<PropertyArray, PropertyError> {
        self.read(|d| d.get(key).map(Cow::into_owned))
    }

    /// Resolve `key` on subdomain `id`.
    ///
    /// The outer error reports an unknown subdomain, the inner one the
    /// resolution result.
    pub fn get_on(
        &self,
        id: SubdomainId,
        key: &PropKey,
    ) -> Result<Result<PropertyArray, PropertyError>, RegistryError> {
        let guard = self.read_guard();
        let sub = guard.subdomain(id)?;
        let resolved = sub.get(key).map(Cow::into_owned);
        Ok(resolved)
    }

    /// Store `value` under `key` on the domain.
    pub fn set(
        &self,
        key: &PropKey,
        value: impl Into<PropertyValue>,
    ) -> Result<(), PropertyError> {
        self.write(|d| d.set(key, value.into()))
    }

    /// Store `value` under `key` on subdomain `id`.
    pub fn set_on(
        &self,
        id: SubdomainId,
        key: &PropKey,
        value: impl Into<PropertyValue>,
    ) -> Result<Result<(), PropertyError>, RegistryError> {
        let mut guard = self.write_guard();
        let mut sub = guard.subdomain_mut(id)?;
        let written = sub.set(key, value.into());
        Ok(written)
    }

    /// Associate a new subdomain.
    pub fn add_subdomain(
        &self,
        name: impl Into<String>,
        locations: Locations,
    ) -> Result<SubdomainId, RegistryError> {
        self.write(|d| d.add_subdomain(name, locations))
    }

    /// Detach a subdomain.
    pub fn remove_subdomain(&self, id: SubdomainId) -> Result<Subdomain, RegistryError> {
        self.write(|d| d.remove_subdomain(id))
    }
}

impl From<Domain> for SharedDomain {
    fn from(domain: Domain) -> Self {
        Self::new(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomainConfig;
    use std::thread;

    fn shared() -> (SharedDomain, SubdomainId, SubdomainId) {
        let d = Domain::new(DomainConfig::new("net", 8, 0)).unwrap();
        let shared = SharedDomain::new(d);
        let a = shared
            .add_subdomain("a", Locations::new().with_pores(0..4).unwrap())
            .unwrap();
        let b = shared
            .add_subdomain("b", Locations::new().with_pores(4..8).unwrap())
            .unwrap();
        (shared, a, b)
    }

    #[test]
    fn concurrent_readers_see_interleaved_values() {
        let (shared, a, b) = shared();
        let k = PropKey::pore("diameter").unwrap();
        shared.set_on(a, &k, 1.0).unwrap().unwrap();
        shared.set_on(b, &k, 2.0).unwrap().unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                let k = k.clone();
                thread::spawn(move || shared.get(&k).unwrap())
            })
            .collect();
        for h in handles {
            let v = h.join().unwrap();
            assert_eq!(
                v.as_f64().unwrap(),
                &[1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0]
            );
        }
    }

    #[test]
    fn conflicts_surface_through_handle() {
        let (shared, a, _) = shared();
        let k = PropKey::pore("volume").unwrap();
        shared.set(&k, 1.0).unwrap();
        let err = shared.set_on(a, &k, 2.0).unwrap().unwrap_err();
        assert!(matches!(err, PropertyError::WriteConflict { .. }));
        assert_eq!(
            shared.get_on(a, &k).unwrap().unwrap().as_f64().unwrap(),
            &[1.0; 4]
        );
    }

    #[test]
    fn unknown_subdomain_is_outer_error() {
        let (shared, a, _) = shared();
        shared.remove_subdomain(a).unwrap();
        let k = PropKey::pore("volume").unwrap();
        assert_eq!(
            shared.get_on(a, &k).unwrap_err(),
            RegistryError::UnknownSubdomain { id: a }
        );
    }

    #[test]
    fn poisoned_lock_still_serves_reads() {
        let (shared, _, _) = shared();
        let k = PropKey::pore("porosity").unwrap();
        shared.set(&k, 0.3).unwrap();
        let poisoner = shared.clone();
        let _ = thread::spawn(move || {
            poisoner.write(|_| panic!("poison the lock"));
        })
        .join();
        assert_eq!(shared.get(&k).unwrap().len(), 8);
    }
}
