//! Grouping entities: resources by organisation, by license, by directory

use super::{License, Organisation, Resource};
use crate::{DiscloseError, DiscloseResult};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

// ─── ByOrganisation ────────────────────────────────────────────────

/// Resources attributed to one organisation within a containing group.
///
/// Resources are kept sorted by name. Although resources compare by name,
/// this is a list rather than a set: repeated names are kept on purpose so
/// that [`IssueKind::Duplicate`](crate::IssueKind::Duplicate) can report them.
#[derive(Debug, Clone)]
pub struct ByOrganisation {
    organisation: Arc<Organisation>,
    resources: Vec<Resource>,
}

impl ByOrganisation {
    pub fn new(organisation: Arc<Organisation>, mut resources: Vec<Resource>) -> Self {
        resources.sort();
        Self {
            organisation,
            resources,
        }
    }

    pub fn organisation(&self) -> &Arc<Organisation> {
        &self.organisation
    }

    pub fn id(&self) -> &str {
        self.organisation.id()
    }

    pub fn name(&self) -> &str {
        self.organisation.name()
    }

    pub fn url(&self) -> &str {
        self.organisation.url()
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }
}

impl PartialEq for ByOrganisation {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ByOrganisation {}

impl PartialOrd for ByOrganisation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByOrganisation {
    /// Organisation name, then id
    fn cmp(&self, other: &Self) -> Ordering {
        self.name()
            .cmp(other.name())
            .then_with(|| self.id().cmp(other.id()))
    }
}

// ─── WithLicense ───────────────────────────────────────────────────

/// A license applied to one or more organisation groups within a directory.
#[derive(Debug, Clone)]
pub struct WithLicense {
    license: Arc<License>,
    copyright_notice: Option<String>,
    parameters: BTreeMap<String, String>,
    organisations: Vec<ByOrganisation>,
}

impl WithLicense {
    /// Parameters must match the license's expected names exactly; a name
    /// supplied twice is rejected before that check.
    pub fn new<I, K, V>(
        license: Arc<License>,
        copyright_notice: Option<String>,
        parameters: I,
        mut organisations: Vec<ByOrganisation>,
    ) -> DiscloseResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut validated = BTreeMap::new();
        for (name, value) in parameters {
            let name = name.into();
            if validated.contains_key(&name) {
                return Err(DiscloseError::DuplicateParameter {
                    license: license.id().to_string(),
                    parameter: name,
                });
            }
            validated.insert(name, value.into());
        }
        license.validate_parameters(&validated)?;

        organisations.sort();
        Ok(Self {
            license,
            copyright_notice,
            parameters: validated,
            organisations,
        })
    }

    pub fn license(&self) -> &Arc<License> {
        &self.license
    }

    pub fn copyright_notice(&self) -> Option<&str> {
        self.copyright_notice.as_deref()
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    pub fn organisations(&self) -> &[ByOrganisation] {
        &self.organisations
    }

    pub fn is_source_required(&self) -> bool {
        self.license.is_source_required()
    }

    /// License text rendered with this group's parameters
    pub fn text(&self) -> DiscloseResult<String> {
        self.license.text(&self.parameters)
    }
}

// ─── WithinDirectory ───────────────────────────────────────────────

/// Licensing facts declared for one directory, named relative to the scan
/// root (`.` for the root itself). Identity is the name alone.
#[derive(Debug, Clone)]
pub struct WithinDirectory {
    name: String,
    licenses: Vec<WithLicense>,
    public_domain: Vec<ByOrganisation>,
}

impl WithinDirectory {
    pub fn new(
        name: impl Into<String>,
        licenses: Vec<WithLicense>,
        mut public_domain: Vec<ByOrganisation>,
    ) -> Self {
        public_domain.sort();
        Self {
            name: name.into(),
            licenses,
            public_domain,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// License groups in declaration order
    pub fn licenses(&self) -> &[WithLicense] {
        &self.licenses
    }

    /// Unlicensed content grouped by organisation
    pub fn public_domain(&self) -> &[ByOrganisation] {
        &self.public_domain
    }

    pub fn has_public_domain(&self) -> bool {
        !self.public_domain.is_empty()
    }
}

impl PartialEq for WithinDirectory {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for WithinDirectory {}

impl PartialOrd for WithinDirectory {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WithinDirectory {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(id: &str, name: &str) -> Arc<Organisation> {
        Arc::new(Organisation::new(id, name, ""))
    }

    #[test]
    fn test_organisation_groups_sorted_by_name_then_id() {
        let license = Arc::new(License::new("mit", "MIT", "", false, "", Vec::<String>::new()).unwrap());
        let group = WithLicense::new(
            license,
            None,
            Vec::<(String, String)>::new(),
            vec![
                ByOrganisation::new(org("z", "Beta"), vec![]),
                ByOrganisation::new(org("b", "Alpha"), vec![]),
                ByOrganisation::new(org("a", "Alpha"), vec![]),
            ],
        )
        .unwrap();
        let ids: Vec<&str> = group.organisations().iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec!["a", "b", "z"]);
    }

    #[test]
    fn test_resources_sorted_and_duplicates_kept() {
        let group = ByOrganisation::new(
            org("a", "A"),
            vec![Resource::new("b"), Resource::new("a"), Resource::new("b")],
        );
        let names: Vec<&str> = group.resources().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["a", "b", "b"]);
    }

    #[test]
    fn test_duplicate_supplied_parameter_rejected() {
        let license = Arc::new(License::new("bsd", "BSD", "", false, "${year}", ["year"]).unwrap());
        let err = WithLicense::new(
            license,
            None,
            vec![("year", "2023"), ("year", "2024")],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, DiscloseError::DuplicateParameter { .. }));
    }

    #[test]
    fn test_with_license_renders_own_parameters() {
        let license = Arc::new(License::new("bsd", "BSD", "", false, "(c) ${year}", ["year"]).unwrap());
        let group = WithLicense::new(license.clone(), None, vec![("year", "2024")], vec![]).unwrap();
        assert_eq!(group.text().unwrap(), "(c) 2024");
        assert!(WithLicense::new(license, None, Vec::<(String, String)>::new(), vec![]).is_err());
    }
}
