//! Error types for key parsing and property resolution.
//!
//! Resolution itself has two failure kinds, [`PropertyError::KeyNotFound`]
//! and [`PropertyError::WriteConflict`]. Both are contract violations by
//! the caller and are never retried. The remaining variants reject
//! writes whose shape does not fit the target.

use std::fmt;

use thiserror::Error;

use crate::id::SubdomainId;
use crate::key::PropKey;

/// Where a property array is stored.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// Stored directly on the domain.
    Domain,
    /// Stored on one subdomain.
    Subdomain {
        /// Handle of the owning subdomain.
        id: SubdomainId,
        /// Name of the owning subdomain.
        name: String,
    },
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain => write!(f, "the domain"),
            Self::Subdomain { id, name } => write!(f, "subdomain '{name}' (#{id})"),
        }
    }
}

/// Errors from property lookups and writes.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The key resolves to no array at any level.
    #[error("key '{key}' not found")]
    KeyNotFound {
        /// The requested key.
        key: PropKey,
    },
    /// The write would define the key on a second level.
    ///
    /// Nothing is stored when this is returned.
    #[error("cannot write '{key}': already defined on {owner}")]
    WriteConflict {
        /// The rejected key.
        key: PropKey,
        /// The level that already holds the key.
        owner: Level,
    },
    /// The written array does not have one entry per target element.
    #[error("cannot write '{key}': expected {expected} elements, got {found}")]
    LengthMismatch {
        /// The rejected key.
        key: PropKey,
        /// Element count of the target for the key's kind.
        expected: usize,
        /// Element count of the supplied array.
        found: usize,
    },
    /// Arrays being interleaved disagree on their component count.
    #[error("cannot interleave '{key}': component count {found} differs from {expected}")]
    ComponentMismatch {
        /// The key being interleaved.
        key: PropKey,
        /// Component count of the first source.
        expected: u32,
        /// Conflicting component count.
        found: u32,
    },
}

/// Errors from parsing a property key string.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The key has no `.` separating element prefix and name.
    #[error("key '{key}' has no element prefix (expected '<pore|throat>.<name>')")]
    MissingSeparator {
        /// The malformed key.
        key: String,
    },
    /// The prefix names no known element kind.
    #[error("unknown element prefix '{prefix}'")]
    UnknownElement {
        /// The unrecognised prefix.
        prefix: String,
    },
    /// The name after the prefix is empty.
    #[error("key '{key}' has an empty property name")]
    EmptyName {
        /// The malformed key.
        key: String,
    },
}
