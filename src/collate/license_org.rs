//! Distinct licenses and organisations within a subtree

use crate::model::{ByOrganisation, License, Organisation, WithLicense};
use crate::traversal::Visitor;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Used to decide whether a directory or license group is entirely primary
/// content. Resources are irrelevant, so that layer is never entered.
#[derive(Debug, Default)]
pub struct LicenseAndOrganisationCollator {
    licenses: BTreeSet<Arc<License>>,
    organisations: BTreeSet<Arc<Organisation>>,
}

impl LicenseAndOrganisationCollator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn licenses(&self) -> &BTreeSet<Arc<License>> {
        &self.licenses
    }

    pub fn organisations(&self) -> &BTreeSet<Arc<Organisation>> {
        &self.organisations
    }

    /// True iff `license` is the one and only license seen
    pub fn is_only_license(&self, license: &License) -> bool {
        self.licenses.len() == 1 && self.licenses.iter().all(|seen| **seen == *license)
    }

    /// True iff `id` names the one and only organisation seen
    pub fn is_only_organisation(&self, id: &str) -> bool {
        self.organisations.len() == 1 && self.organisations.iter().all(|seen| seen.id() == id)
    }
}

impl Visitor for LicenseAndOrganisationCollator {
    fn traverse_resource(&self) -> bool {
        false
    }

    fn visit_with_license(&mut self, license: &WithLicense) {
        self.licenses.insert(Arc::clone(license.license()));
    }

    fn visit_by_organisation(&mut self, organisation: &ByOrganisation) {
        self.organisations
            .insert(Arc::clone(organisation.organisation()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Resource, WithinDirectory};

    fn license(id: &str) -> Arc<License> {
        Arc::new(License::new(id, id, "", false, "", Vec::<String>::new()).unwrap())
    }

    fn group(license: Arc<License>, org: &str) -> WithLicense {
        WithLicense::new(
            license,
            None,
            Vec::<(String, String)>::new(),
            vec![ByOrganisation::new(
                Arc::new(Organisation::new(org, org, "")),
                vec![Resource::new("r")],
            )],
        )
        .unwrap()
    }

    #[test]
    fn test_single_license_and_organisation() {
        let mit = license("mit");
        let dir = WithinDirectory::new(
            ".",
            vec![group(Arc::clone(&mit), "acme"), group(Arc::clone(&mit), "acme")],
            vec![],
        );
        let mut collator = LicenseAndOrganisationCollator::new();
        dir.accept(&mut collator);
        assert!(collator.is_only_license(&mit));
        assert!(collator.is_only_organisation("acme"));
        assert!(!collator.is_only_organisation("other"));
    }

    #[test]
    fn test_mixed_content() {
        let mit = license("mit");
        let dir = WithinDirectory::new(
            ".",
            vec![group(Arc::clone(&mit), "acme"), group(license("bsd"), "other")],
            vec![],
        );
        let mut collator = LicenseAndOrganisationCollator::new();
        dir.accept(&mut collator);
        assert!(!collator.is_only_license(&mit));
        assert!(!collator.is_only_organisation("acme"));
        assert_eq!(collator.licenses().len(), 2);
    }

    #[test]
    fn test_public_domain_counts_as_organisation_only() {
        let mit = license("mit");
        let dir = WithinDirectory::new(
            ".",
            vec![group(Arc::clone(&mit), "acme")],
            vec![ByOrganisation::new(Arc::new(Organisation::new("pd", "pd", "")), vec![])],
        );
        let mut collator = LicenseAndOrganisationCollator::new();
        dir.accept(&mut collator);
        assert!(collator.is_only_license(&mit));
        assert!(!collator.is_only_organisation("acme"));
    }
}
