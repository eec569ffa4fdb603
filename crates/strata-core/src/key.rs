//! Property keys of the form `"<element>.<name>"`.

use std::fmt;
use std::str::FromStr;

use crate::element::ElementKind;
use crate::error::KeyError;

/// A parsed property key such as `pore.diameter` or `throat.conduit_length`.
///
/// The element prefix is split off at the first `.`; the remainder is the
/// property name and may itself contain dots (`pore.diffusivity.water`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropKey {
    kind: ElementKind,
    name: String,
}

impl PropKey {
    /// Build a key from its parts.
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Result<Self, KeyError> {
        let name = name.into();
        if name.is_empty() {
            return Err(KeyError::EmptyName {
                key: format!("{kind}."),
            });
        }
        Ok(Self { kind, name })
    }

    /// Shorthand for a pore key.
    pub fn pore(name: impl Into<String>) -> Result<Self, KeyError> {
        Self::new(ElementKind::Pore, name)
    }

    /// Shorthand for a throat key.
    pub fn throat(name: impl Into<String>) -> Result<Self, KeyError> {
        Self::new(ElementKind::Throat, name)
    }

    /// The element kind, which determines the key's index space.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// The property name without the element prefix.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PropKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.name)
    }
}

impl FromStr for PropKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, name) = s.split_once('.').ok_or_else(|| KeyError::MissingSeparator {
            key: s.to_string(),
        })?;
        let kind = prefix.parse::<ElementKind>()?;
        if name.is_empty() {
            return Err(KeyError::EmptyName { key: s.to_string() });
        }
        Ok(Self {
            kind,
            name: name.to_string(),
        })
    }
}

impl TryFrom<&str> for PropKey {
    type Error = KeyError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
