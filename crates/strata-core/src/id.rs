//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a subdomain within its parent domain.
///
/// Assigned sequentially by the domain at association time and never
/// reused, so a handle to a removed subdomain cannot alias a later one.
/// This is the subdomain's only link back to its domain: it does not
/// own or borrow the domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubdomainId(pub u32);

impl fmt::Display for SubdomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SubdomainId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
