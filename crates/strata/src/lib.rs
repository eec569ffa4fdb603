//! Strata: per-element property storage for pore-network models, with
//! lookups interleaved across a domain and its subdomains.
//!
//! This is the facade crate re-exporting the public API of the Strata
//! sub-crates. For most users, adding `strata` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! // A 125-pore network split into two geometries.
//! let mut net = Domain::new(DomainConfig::new("net", 125, 0)).unwrap();
//! let geo1 = net
//!     .add_subdomain("geo_01", Locations::new().with_pores(0..75).unwrap())
//!     .unwrap();
//! let geo2 = net
//!     .add_subdomain("geo_02", Locations::new().with_pores(75..125).unwrap())
//!     .unwrap();
//!
//! let diameter: PropKey = "pore.diameter".parse().unwrap();
//! net.subdomain_mut(geo1).unwrap().set(&diameter, 1.0.into()).unwrap();
//! net.subdomain_mut(geo2).unwrap().set(&diameter, 0.1.into()).unwrap();
//!
//! // The network sees both geometries' values.
//! let all = net.get(&diameter).unwrap();
//! assert_eq!(all.as_f64().unwrap()[0], 1.0);
//! assert_eq!(all.as_f64().unwrap()[124], 0.1);
//!
//! // A key owned by the geometries cannot also be written on the network.
//! assert!(matches!(
//!     net.set(&diameter, 2.0.into()),
//!     Err(PropertyError::WriteConflict { .. })
//! ));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | Keys, element kinds, value arrays, errors, get/set traits |
//! | [`domain`] | `strata-domain` | Domain, subdomains, index mapping, health, shared access |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`strata-core`).
///
/// Contains property keys, typed arrays, error types, and the uniform
/// [`types::PropertyReader`] / [`types::PropertyWriter`] traits.
pub use strata_core as types;

/// Domain/subdomain registry and interleaved lookups (`strata-domain`).
pub use strata_domain as domain;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    pub use strata_core::{
        ElementKind, KeyError, Level, PropKey, PropertyArray, PropertyError, PropertyReader,
        PropertyValue, PropertyWriter, Scalar, SubdomainId, ValueType, Values,
    };

    pub use strata_domain::{
        ConfigError, Domain, DomainConfig, HealthReport, Locations, OverlapPolicy, RegistryError,
        SharedDomain, Subdomain, SubdomainMut, SubdomainRef,
    };
}
