//! The uniform key-value interface shared by domains and subdomains.

use std::borrow::Cow;

use crate::element::ElementKind;
use crate::error::PropertyError;
use crate::key::PropKey;
use crate::values::{PropertyArray, PropertyValue};

/// Read access to property arrays, with delegation.
///
/// Implementors return their own stored array when they hold the key
/// (borrowed, unchanged) and otherwise resolve it from related objects
/// (owned, freshly assembled). The returned array always has
/// [`element_count`](Self::element_count) rows for the key's kind.
pub trait PropertyReader {
    /// Resolve `key` to an array.
    ///
    /// Returns [`PropertyError::KeyNotFound`] if no related object holds it.
    fn get(&self, key: &PropKey) -> Result<Cow<'_, PropertyArray>, PropertyError>;

    /// Whether `key` is stored directly on this object (no delegation).
    fn holds(&self, key: &PropKey) -> bool;

    /// Number of elements of `kind` this object spans.
    fn element_count(&self, kind: ElementKind) -> usize;

    /// Whether `key` resolves, directly or through delegation.
    ///
    /// Implementors with access to the related stores should answer from
    /// them instead of assembling the array.
    fn contains(&self, key: &PropKey) -> bool {
        self.get(key).is_ok()
    }
}

/// Write access to property arrays.
///
/// Writes only ever store on the receiving object. A write that would
/// make the key ambiguous across levels is rejected with
/// [`PropertyError::WriteConflict`] and leaves all state unchanged.
pub trait PropertyWriter: PropertyReader {
    /// Store `value` under `key` on this object.
    fn set(&mut self, key: &PropKey, value: PropertyValue) -> Result<(), PropertyError>;

    /// Remove this object's own array for `key`, returning it.
    ///
    /// Never removes data stored on related objects.
    fn remove(&mut self, key: &PropKey) -> Option<PropertyArray>;
}
