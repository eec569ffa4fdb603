//! Core types and traits for the Strata property registry.
//!
//! This is the leaf crate with no internal dependencies. It defines
//! the fundamental abstractions used throughout the Strata workspace:
//! element kinds, property keys, typed value arrays, error types, and
//! the uniform get/set traits shared by domains and subdomains.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod element;
pub mod error;
pub mod id;
pub mod key;
pub mod traits;
pub mod values;

pub use element::{ElementCounts, ElementKind};
pub use error::{KeyError, Level, PropertyError};
pub use id::SubdomainId;
pub use key::PropKey;
pub use traits::{PropertyReader, PropertyWriter};
pub use values::{PropertyArray, PropertyValue, Scalar, ShapeError, ValueType, Values};
