//! Errors from subdomain registration and lookup.

use strata_core::{ElementKind, SubdomainId};
use thiserror::Error;

/// Errors arising from associating, removing, or addressing subdomains.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Subdomain names must be non-empty.
    #[error("subdomain name must not be empty")]
    EmptyName,
    /// Another subdomain of the same domain already uses this name.
    #[error("a subdomain named '{name}' is already registered")]
    DuplicateName {
        /// The clashing name.
        name: String,
    },
    /// The id does not refer to a currently associated subdomain.
    #[error("no subdomain with id {id}")]
    UnknownSubdomain {
        /// The stale or foreign id.
        id: SubdomainId,
    },
    /// A location lies outside the domain.
    #[error("{kind} index {index} out of range: domain has {count}")]
    IndexOutOfRange {
        /// Element kind of the location.
        kind: ElementKind,
        /// The offending domain-level index.
        index: usize,
        /// Number of elements of that kind in the domain.
        count: usize,
    },
    /// The same location was listed twice for one subdomain.
    #[error("{kind} index {index} listed more than once")]
    DuplicateIndex {
        /// Element kind of the location.
        kind: ElementKind,
        /// The repeated index.
        index: usize,
    },
    /// The location is already covered by another subdomain.
    #[error("{kind} {index} is already assigned to subdomain '{owner}'")]
    Overlap {
        /// Element kind of the location.
        kind: ElementKind,
        /// The contested domain-level index.
        index: usize,
        /// Name of the subdomain already covering it.
        owner: String,
    },
}
