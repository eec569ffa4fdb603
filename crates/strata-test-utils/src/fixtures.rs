//! Reusable domain fixtures.
//!
//! - [`split_domain`]: a 5×5×5 cubic network (125 pores, 300 throats)
//!   split into two subdomains with no gaps.
//! - [`gapped_domain`]: the same network with 25 pores and 60 throats
//!   left unassigned.

use strata_core::SubdomainId;
use strata_domain::{Domain, DomainConfig, Locations};

pub const PORES: usize = 125;
pub const THROATS: usize = 300;

/// A domain with two subdomains and their handles.
pub struct Fixture {
    pub domain: Domain,
    pub first: SubdomainId,
    pub second: SubdomainId,
}

fn build(first: Locations, second: Locations) -> Fixture {
    let mut domain = Domain::new(DomainConfig::new("net", PORES, THROATS))
        .unwrap_or_else(|e| panic!("fixture config rejected: {e}"));
    let first = domain
        .add_subdomain("geo_01", first)
        .unwrap_or_else(|e| panic!("fixture subdomain rejected: {e}"));
    let second = domain
        .add_subdomain("geo_02", second)
        .unwrap_or_else(|e| panic!("fixture subdomain rejected: {e}"));
    Fixture {
        domain,
        first,
        second,
    }
}

fn locations(pores: std::ops::Range<usize>, throats: std::ops::Range<usize>) -> Locations {
    Locations::new()
        .with_pores(pores)
        .and_then(|l| l.with_throats(throats))
        .unwrap_or_else(|e| panic!("fixture locations rejected: {e}"))
}

/// `geo_01` = pores 0..75, throats 0..180; `geo_02` = pores 75..125,
/// throats 180..300.
pub fn split_domain() -> Fixture {
    build(locations(0..75, 0..180), locations(75..125, 180..300))
}

/// `geo_01` = pores 0..50, throats 0..120; `geo_02` = pores 75..125,
/// throats 180..300. Pores 50..75 and throats 120..180 have no owner.
pub fn gapped_domain() -> Fixture {
    build(locations(0..50, 0..120), locations(75..125, 180..300))
}
