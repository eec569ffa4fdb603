//! Merging per-subdomain arrays into one array over a target index range.
//!
//! The target is either the whole domain (domain-level fallback) or one
//! subdomain's own range (sibling fallback). Each source contributes
//! `(source row, target row)` pairs; target rows no source reaches keep
//! the missing-value sentinel of the result type.

use strata_core::{PropKey, PropertyArray, PropertyError, ValueType};

/// One source array and where its rows land in the result.
pub(crate) struct Placement<'a> {
    pub(crate) array: &'a PropertyArray,
    /// `(source row, target row)` pairs.
    pub(crate) rows: Vec<(usize, usize)>,
}

/// Build a `len`-row array for `key` from `placements`.
///
/// The result type is the join of the types of sources that reach at
/// least one target row, widened from `Int` to `Float` when any target
/// row is left uncovered (integers have no NaN). Sources are applied in order, so later placements win at rows
/// reached more than once.
pub(crate) fn interleave(
    key: &PropKey,
    len: usize,
    placements: &[Placement<'_>],
) -> Result<PropertyArray, PropertyError> {
    let Some(first) = placements.first() else {
        return Err(PropertyError::KeyNotFound { key: key.clone() });
    };

    // Sources that reach no target row do not shape the result.
    let mut contributing = placements.iter().filter(|p| !p.rows.is_empty());
    let reference = contributing.next().unwrap_or(first);
    let components = reference.array.components();
    let mut ty = reference.array.value_type();
    for p in contributing {
        if p.array.components() != components {
            return Err(PropertyError::ComponentMismatch {
                key: key.clone(),
                expected: components,
                found: p.array.components(),
            });
        }
        ty = ty.join(p.array.value_type());
    }

    let mut covered = vec![false; len];
    for p in placements {
        for &(_, dst) in &p.rows {
            covered[dst] = true;
        }
    }
    let covered = covered.iter().filter(|&&c| c).count();
    if !ty.has_sentinel() && covered < len {
        ty = ValueType::Float;
    }

    let mut out = PropertyArray::missing(ty, components, len);
    for p in placements.iter().filter(|p| !p.rows.is_empty()) {
        let src = p.array.cast(ty);
        for &(s, d) in &p.rows {
            out.copy_row_from(d, &src, s);
        }
    }

    tracing::trace!(
        key = %key,
        sources = placements.len(),
        covered,
        len,
        value_type = %ty,
        "interleaved property"
    );
    Ok(out)
}
