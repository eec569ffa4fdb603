//! Domain configuration and validation.
//!
//! [`DomainConfig`] is the builder-input for [`Domain::new`](crate::Domain::new).
//! [`validate()`](DomainConfig::validate) checks structural invariants
//! before any storage is created.

use strata_core::ElementCounts;
use thiserror::Error;

// ── OverlapPolicy ──────────────────────────────────────────────────

/// What to do when a new subdomain claims elements another already covers.
///
/// Interleaving assumes each element has at most one owning subdomain.
/// `Reject` enforces that at association time; `Allow` accepts overlaps
/// and lets the later-registered subdomain win at shared positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Refuse the association with [`RegistryError::Overlap`](crate::RegistryError::Overlap).
    #[default]
    Reject,
    /// Accept the association and log a warning.
    Allow,
}

// ── DomainConfig ───────────────────────────────────────────────────

/// Configuration for a [`Domain`](crate::Domain).
#[derive(Clone, Debug)]
pub struct DomainConfig {
    /// Name used in diagnostics.
    pub name: String,
    /// Number of pores in the domain.
    pub pore_count: usize,
    /// Number of throats in the domain.
    pub throat_count: usize,
    /// Handling of overlapping subdomains. Default: `Reject`.
    pub overlap: OverlapPolicy,
}

impl DomainConfig {
    /// Create a config with the default overlap policy.
    pub fn new(name: impl Into<String>, pore_count: usize, throat_count: usize) -> Self {
        Self {
            name: name.into(),
            pore_count,
            throat_count,
            overlap: OverlapPolicy::default(),
        }
    }

    /// Replace the overlap policy.
    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Element counts described by this config.
    pub fn counts(&self) -> ElementCounts {
        ElementCounts::new(self.pore_count, self.throat_count)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.counts().total() == 0 {
            return Err(ConfigError::EmptyDomain);
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`DomainConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The domain name is empty or whitespace.
    #[error("domain name must not be empty")]
    EmptyName,
    /// The domain has neither pores nor throats.
    #[error("domain must have at least one pore or throat")]
    EmptyDomain,
}
