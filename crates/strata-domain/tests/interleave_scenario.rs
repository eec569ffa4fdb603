//! End-to-end lookups on the 125-pore cubic network split into two
//! geometry subdomains.

use strata_core::{ElementKind, Level, PropertyError, PropertyReader, PropertyWriter, ValueType};
use strata_domain::{Locations, RegistryError};
use strata_test_utils::fixtures::{gapped_domain, split_domain, Fixture, PORES};
use strata_test_utils::{assert_all_eq, assert_all_nan, key};

#[test]
fn diameter_interleaves_across_both_geometries() {
    let Fixture {
        mut domain,
        first,
        second,
    } = split_domain();
    let diameter = key("pore.diameter");
    domain
        .subdomain_mut(first)
        .unwrap()
        .set(&diameter, 1.0.into())
        .unwrap();
    domain
        .subdomain_mut(second)
        .unwrap()
        .set(&diameter, 0.1.into())
        .unwrap();

    let merged = domain.get(&diameter).unwrap();
    let v = merged.as_f64().unwrap();
    assert_eq!(v.len(), PORES);
    assert_all_eq(&v[..75], 1.0);
    assert_all_eq(&v[75..], 0.1);
}

#[test]
fn volume_on_one_geometry_reads_as_nan_on_the_other() {
    let Fixture {
        mut domain,
        first,
        second,
    } = split_domain();
    let volume = key("pore.volume");
    domain
        .subdomain_mut(first)
        .unwrap()
        .set(&volume, 3.0.into())
        .unwrap();

    let on_second = domain.subdomain(second).unwrap().get(&volume).unwrap();
    let v = on_second.as_f64().unwrap();
    assert_eq!(v.len(), 50);
    assert_all_nan(v);

    let merged = domain.get(&volume).unwrap();
    let v = merged.as_f64().unwrap();
    assert_all_eq(&v[..75], 3.0);
    assert_all_nan(&v[75..]);
}

#[test]
fn domain_write_rejected_while_geometry_owns_key() {
    let Fixture {
        mut domain,
        first,
        ..
    } = split_domain();
    let diameter = key("pore.diameter");
    domain
        .subdomain_mut(first)
        .unwrap()
        .set(&diameter, 1.0.into())
        .unwrap();
    let before = domain.get(&diameter).unwrap().into_owned();

    let err = domain.set(&diameter, 2.0.into()).unwrap_err();
    assert!(matches!(
        err,
        PropertyError::WriteConflict {
            owner: Level::Subdomain { id, .. },
            ..
        } if id == first
    ));
    let after = domain.get(&diameter).unwrap().into_owned();
    assert_eq!(before.as_f64().unwrap()[..75], after.as_f64().unwrap()[..75]);
    assert!(!domain.holds(&diameter));
}

#[test]
fn geometry_write_rejected_while_domain_owns_key() {
    let Fixture {
        mut domain, second, ..
    } = split_domain();
    let coords = key("pore.seed");
    domain.set(&coords, 0.5.into()).unwrap();
    let err = domain
        .subdomain_mut(second)
        .unwrap()
        .set(&coords, 0.7.into())
        .unwrap_err();
    assert_eq!(
        err,
        PropertyError::WriteConflict {
            key: coords.clone(),
            owner: Level::Domain
        }
    );
}

#[test]
fn geometry_reads_its_slice_of_a_domain_array() {
    let Fixture {
        mut domain,
        first,
        second,
    } = split_domain();
    let index = key("pore.index");
    let values: Vec<i64> = (0..PORES as i64).collect();
    domain.set(&index, values.into()).unwrap();

    let full = domain.get(&index).unwrap();
    for id in [first, second] {
        let sub = domain.subdomain(id).unwrap();
        let sliced = sub.get(&index).unwrap();
        assert_eq!(sliced.value_type(), ValueType::Int);
        let expected: Vec<i64> = sub
            .locations()
            .iter(ElementKind::Pore)
            .map(|p| full.as_i64().unwrap()[p])
            .collect();
        assert_eq!(sliced.as_i64().unwrap(), expected.as_slice());
    }
}

#[test]
fn unknown_key_is_not_found_everywhere() {
    let Fixture { domain, first, .. } = split_domain();
    let missing = key("throat.hydraulic_conductance");
    assert_eq!(
        domain.get(&missing).unwrap_err(),
        PropertyError::KeyNotFound {
            key: missing.clone()
        }
    );
    assert!(!domain.subdomain(first).unwrap().contains(&missing));
}

#[test]
fn integer_counts_widen_when_a_gap_exists() {
    let Fixture {
        mut domain,
        first,
        second,
    } = gapped_domain();
    let coordination = key("pore.coordination");
    domain
        .subdomain_mut(first)
        .unwrap()
        .set(&coordination, 6_i64.into())
        .unwrap();
    domain
        .subdomain_mut(second)
        .unwrap()
        .set(&coordination, 4_i64.into())
        .unwrap();

    let merged = domain.get(&coordination).unwrap();
    assert_eq!(merged.value_type(), ValueType::Float);
    let v = merged.as_f64().unwrap();
    assert_all_eq(&v[..50], 6.0);
    assert_all_nan(&v[50..75]);
    assert_all_eq(&v[75..], 4.0);

    let health = domain.health();
    assert_eq!(health.pores.unassigned, (50..75).collect::<Vec<_>>());
    assert_eq!(health.throats.unassigned, (120..180).collect::<Vec<_>>());
    assert!(health.pores.overlapping.is_empty());
}

#[test]
fn integer_counts_stay_integer_without_gaps() {
    let Fixture {
        mut domain,
        first,
        second,
    } = split_domain();
    let coordination = key("pore.coordination");
    for (id, n) in [(first, 6_i64), (second, 4)] {
        domain
            .subdomain_mut(id)
            .unwrap()
            .set(&coordination, n.into())
            .unwrap();
    }
    let merged = domain.get(&coordination).unwrap();
    assert_eq!(merged.value_type(), ValueType::Int);
    assert!(domain.health().is_healthy());
}

#[test]
fn labels_default_to_false_outside_owning_geometry() {
    let Fixture {
        mut domain, second, ..
    } = split_domain();
    let boundary = key("throat.boundary");
    domain
        .subdomain_mut(second)
        .unwrap()
        .set(&boundary, true.into())
        .unwrap();
    let merged = domain.get(&boundary).unwrap();
    let v = merged.as_bool().unwrap();
    assert!(v[..180].iter().all(|&b| !b));
    assert!(v[180..].iter().all(|&b| b));
}

#[test]
fn reassociation_requires_remove_then_add() {
    let Fixture {
        mut domain,
        first,
        second,
    } = split_domain();
    let diameter = key("pore.diameter");
    domain
        .subdomain_mut(second)
        .unwrap()
        .set(&diameter, 0.1.into())
        .unwrap();

    let err = domain
        .add_subdomain("geo_03", Locations::new().with_pores(70..80).unwrap())
        .unwrap_err();
    assert!(matches!(err, RegistryError::Overlap { index: 70, .. }));

    let old = domain.remove_subdomain(first).unwrap();
    assert_eq!(old.counts().pores, 75);
    let third = domain
        .add_subdomain("geo_03", Locations::new().with_pores(0..75).unwrap())
        .unwrap();
    domain
        .subdomain_mut(third)
        .unwrap()
        .set(&diameter, 2.0.into())
        .unwrap();
    let merged = domain.get(&diameter).unwrap();
    let v = merged.as_f64().unwrap();
    assert_all_eq(&v[..75], 2.0);
    assert_all_eq(&v[75..], 0.1);
}
