//! Domain/subdomain property registry for pore-network models.
//!
//! A [`Domain`] (the network) stores per-pore and per-throat property
//! arrays and delegates keys it does not hold to its associated
//! [`Subdomain`]s (geometry or physics regions), each covering a fixed
//! subset of the domain's elements.
//!
//! # Lookups
//!
//! - **Domain → subdomains:** arrays held by subdomains are interleaved
//!   into one domain-wide array; uncovered elements are NaN (or the
//!   missing value of the array's type).
//! - **Subdomain → domain:** a domain array is sliced at the subdomain's
//!   indices.
//! - **Subdomain → siblings:** sibling arrays are interleaved over the
//!   subdomain's own range.
//!
//! # Writes
//!
//! A key lives on exactly one level. Writing it to the domain while a
//! subdomain holds it, or to a subdomain while the domain holds it, fails
//! with [`PropertyError::WriteConflict`](strata_core::PropertyError::WriteConflict).
//!
//! Both roles expose the same interface through
//! [`PropertyReader`](strata_core::PropertyReader) and
//! [`PropertyWriter`](strata_core::PropertyWriter). [`SharedDomain`] wraps a
//! domain in a reader-writer lock for multi-threaded use.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;
pub mod health;
mod interleave;
pub mod locations;
pub mod shared;
pub mod store;
pub mod subdomain;

pub use config::{ConfigError, DomainConfig, OverlapPolicy};
pub use domain::Domain;
pub use error::RegistryError;
pub use health::{HealthReport, KindHealth};
pub use locations::Locations;
pub use shared::SharedDomain;
pub use store::PropertyStore;
pub use subdomain::{Subdomain, SubdomainMut, SubdomainRef};
