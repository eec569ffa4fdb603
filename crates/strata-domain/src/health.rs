//! Subdomain coverage diagnostics.

use strata_core::ElementKind;

use crate::domain::Domain;

/// Coverage findings for one element kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KindHealth {
    /// Elements no subdomain covers. Interleaved lookups leave these
    /// positions at the missing-value sentinel.
    pub unassigned: Vec<usize>,
    /// Elements covered by more than one subdomain.
    pub overlapping: Vec<usize>,
}

impl KindHealth {
    /// Returns `true` if every element has exactly one owner.
    pub fn is_healthy(&self) -> bool {
        self.unassigned.is_empty() && self.overlapping.is_empty()
    }
}

/// Coverage of a domain's elements by its subdomains.
///
/// Gaps are legal; the report is informational. Overlaps can only occur
/// under [`OverlapPolicy::Allow`](crate::OverlapPolicy::Allow).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HealthReport {
    /// Pore coverage.
    pub pores: KindHealth,
    /// Throat coverage.
    pub throats: KindHealth,
}

impl HealthReport {
    /// Findings for one kind.
    pub fn get(&self, kind: ElementKind) -> &KindHealth {
        match kind {
            ElementKind::Pore => &self.pores,
            ElementKind::Throat => &self.throats,
        }
    }

    /// Returns `true` if both kinds are fully and uniquely covered.
    pub fn is_healthy(&self) -> bool {
        self.pores.is_healthy() && self.throats.is_healthy()
    }
}

impl Domain {
    /// Report elements without a subdomain and elements with several.
    pub fn health(&self) -> HealthReport {
        let mut report = HealthReport::default();
        for kind in ElementKind::ALL {
            let mut owners = vec![0u32; self.counts().get(kind)];
            for sub in self.subdomains() {
                for index in sub.locations().iter(kind) {
                    owners[index] += 1;
                }
            }
            let health = match kind {
                ElementKind::Pore => &mut report.pores,
                ElementKind::Throat => &mut report.throats,
            };
            for (index, &n) in owners.iter().enumerate() {
                match n {
                    0 => health.unassigned.push(index),
                    1 => {}
                    _ => health.overlapping.push(index),
                }
            }
        }
        if !report.is_healthy() {
            tracing::debug!(
                domain = %self.name(),
                unassigned_pores = report.pores.unassigned.len(),
                unassigned_throats = report.throats.unassigned.len(),
                overlapping_pores = report.pores.overlapping.len(),
                overlapping_throats = report.throats.overlapping.len(),
                "subdomain coverage incomplete"
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use crate::{Domain, DomainConfig, Locations, OverlapPolicy};
    use strata_core::ElementKind;

    #[test]
    fn full_partition_is_healthy() {
        let mut d = Domain::new(DomainConfig::new("net", 4, 2)).unwrap();
        d.add_subdomain(
            "a",
            Locations::new()
                .with_pores(0..2)
                .unwrap()
                .with_throats(0..2)
                .unwrap(),
        )
        .unwrap();
        d.add_subdomain("b", Locations::new().with_pores(2..4).unwrap())
            .unwrap();
        assert!(d.health().is_healthy());
    }

    #[test]
    fn reports_gaps_and_overlaps() {
        let mut d =
            Domain::new(DomainConfig::new("net", 5, 3).with_overlap(OverlapPolicy::Allow)).unwrap();
        d.add_subdomain("a", Locations::new().with_pores(0..3).unwrap())
            .unwrap();
        d.add_subdomain("b", Locations::new().with_pores([2, 4]).unwrap())
            .unwrap();
        let report = d.health();
        assert!(!report.is_healthy());
        assert_eq!(report.pores.unassigned, vec![3]);
        assert_eq!(report.pores.overlapping, vec![2]);
        assert_eq!(report.get(ElementKind::Throat).unassigned, vec![0, 1, 2]);
        assert!(report.throats.overlapping.is_empty());
    }
}
