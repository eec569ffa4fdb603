//! Element kinds and per-kind element counts.

use std::fmt;
use std::str::FromStr;

use crate::error::KeyError;

/// The index space a property belongs to.
///
/// Every property key starts with the prefix of one kind. Arrays of the
/// same kind are indexed by the same element numbering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    /// Pore bodies (network vertices).
    Pore,
    /// Throats connecting two pores (network edges).
    Throat,
}

impl ElementKind {
    /// Both kinds, in canonical order.
    pub const ALL: [ElementKind; 2] = [ElementKind::Pore, ElementKind::Throat];

    /// The key prefix for this kind (`"pore"` or `"throat"`).
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Pore => "pore",
            Self::Throat => "throat",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for ElementKind {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pore" => Ok(Self::Pore),
            "throat" => Ok(Self::Throat),
            other => Err(KeyError::UnknownElement {
                prefix: other.to_string(),
            }),
        }
    }
}

/// Number of pores and throats in a domain (or covered by a subdomain).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ElementCounts {
    /// Number of pores.
    pub pores: usize,
    /// Number of throats.
    pub throats: usize,
}

impl ElementCounts {
    /// Create a count pair.
    pub fn new(pores: usize, throats: usize) -> Self {
        Self { pores, throats }
    }

    /// Count for a single kind.
    pub fn get(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Pore => self.pores,
            ElementKind::Throat => self.throats,
        }
    }

    /// Total number of elements across both kinds.
    pub fn total(&self) -> usize {
        self.pores + self.throats
    }
}
