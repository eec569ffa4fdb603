//! Test utilities and fixtures for Strata development.
//!
//! Provides ready-made domains ([`fixtures`]) and small helpers for
//! building keys and checking interleaved results.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use strata_core::PropKey;

/// Parse a key, panicking on malformed input.
pub fn key(s: &str) -> PropKey {
    s.parse().unwrap_or_else(|e| panic!("bad test key {s:?}: {e}"))
}

/// Assert every value is NaN.
#[track_caller]
pub fn assert_all_nan(values: &[f64]) {
    if let Some(pos) = values.iter().position(|v| !v.is_nan()) {
        panic!("expected NaN at every position, found {} at {pos}", values[pos]);
    }
}

/// Assert every value equals `expected`.
#[track_caller]
pub fn assert_all_eq(values: &[f64], expected: f64) {
    if let Some(pos) = values.iter().position(|&v| v != expected) {
        panic!(
            "expected {expected} at every position, found {} at {pos}",
            values[pos]
        );
    }
}
