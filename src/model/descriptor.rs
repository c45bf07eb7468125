//! The whole-distribution descriptor and its read-only query surface
//!
//! Renderers consume the descriptor only through the queries here. Every
//! derived answer is computed by running a collator over the relevant
//! subtree, never by walking the tree directly.

use super::{ByOrganisation, License, Organisation, Resource, WithLicense, WithinDirectory};
use crate::collate::{LicenseAndOrganisationCollator, NoticeCollator};
use crate::{DiscloseError, DiscloseResult};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Licensing facts for a whole distribution.
///
/// Built by [`DescriptorBuilder`](super::DescriptorBuilder), which guarantees
/// that the primary license and organisation resolve, that every id referenced
/// by a group resolves, and that directory names are unique.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub(super) primary_license: Arc<License>,
    pub(super) primary_organisation: Option<Arc<Organisation>>,
    pub(super) primary_copyright_notice: Option<String>,
    pub(super) primary_notice: Option<String>,
    pub(super) licenses: BTreeMap<String, Arc<License>>,
    pub(super) organisations: BTreeMap<String, Arc<Organisation>>,
    pub(super) notices: BTreeMap<String, String>,
    pub(super) directories: BTreeMap<String, WithinDirectory>,
}

impl Descriptor {
    pub fn primary_license(&self) -> &Arc<License> {
        &self.primary_license
    }

    pub fn primary_organisation(&self) -> Option<&Arc<Organisation>> {
        self.primary_organisation.as_ref()
    }

    pub fn primary_copyright_notice(&self) -> Option<&str> {
        self.primary_copyright_notice.as_deref()
    }

    pub fn primary_notice(&self) -> Option<&str> {
        self.primary_notice.as_deref()
    }

    pub fn licenses(&self) -> &BTreeMap<String, Arc<License>> {
        &self.licenses
    }

    pub fn organisations(&self) -> &BTreeMap<String, Arc<Organisation>> {
        &self.organisations
    }

    /// Notice id → notice text
    pub fn notices(&self) -> &BTreeMap<String, String> {
        &self.notices
    }

    /// Directories in name order
    pub fn directories(&self) -> impl Iterator<Item = &WithinDirectory> {
        self.directories.values()
    }

    pub fn directory(&self, name: &str) -> Option<&WithinDirectory> {
        self.directories.get(name)
    }

    pub fn license(&self, id: &str) -> DiscloseResult<&Arc<License>> {
        self.licenses
            .get(id)
            .ok_or_else(|| DiscloseError::UnknownLicense(id.to_string()))
    }

    pub fn organisation(&self, id: &str) -> DiscloseResult<&Arc<Organisation>> {
        self.organisations
            .get(id)
            .ok_or_else(|| DiscloseError::UnknownOrganisation(id.to_string()))
    }

    // ─── Primary content ───────────────────────────────────────────

    pub fn is_primary_license(&self, license: &License) -> bool {
        *self.primary_license == *license
    }

    pub fn is_primary_organisation(&self, group: &ByOrganisation) -> bool {
        self.primary_organisation
            .as_ref()
            .is_some_and(|primary| primary.id() == group.id())
    }

    /// True when the directory holds nothing but primary-licensed content
    /// from the primary organisation.
    pub fn is_only_primary_directory(&self, directory: &WithinDirectory) -> bool {
        let mut collator = LicenseAndOrganisationCollator::new();
        directory.accept(&mut collator);
        self.is_only_primary_content(&collator)
    }

    pub fn is_only_primary_license(&self, group: &WithLicense) -> bool {
        let mut collator = LicenseAndOrganisationCollator::new();
        group.accept(&mut collator);
        self.is_only_primary_content(&collator)
    }

    /// True when the whole distribution is primary content
    pub fn is_only_primary(&self) -> bool {
        let mut collator = LicenseAndOrganisationCollator::new();
        self.traverse(&mut collator);
        self.is_only_primary_content(&collator)
    }

    fn is_only_primary_content(&self, collator: &LicenseAndOrganisationCollator) -> bool {
        collator.is_only_license(&self.primary_license)
            && self
                .primary_organisation
                .as_ref()
                .is_some_and(|primary| collator.is_only_organisation(primary.id()))
    }

    /// Whether any license in use requires links to source
    pub fn is_source_required(&self) -> bool {
        let mut collator = LicenseAndOrganisationCollator::new();
        self.traverse(&mut collator);
        collator
            .licenses()
            .iter()
            .any(|license| license.is_source_required())
    }

    // ─── Notices ───────────────────────────────────────────────────

    /// Notice text → resources carrying that notice.
    ///
    /// Fails with [`DiscloseError::UnknownNotice`] when a resource refers to a
    /// notice id that has no text.
    pub fn resource_notices(&self) -> DiscloseResult<BTreeMap<String, BTreeSet<Resource>>> {
        let mut collator = NoticeCollator::new();
        self.traverse(&mut collator);
        collator.resource_notices(&self.notices)
    }

    /// The distinct copyright notices carried by license groups
    /// ([`WithLicense`]), excluding the primary copyright notice.
    ///
    /// These are not the texts of the notice map; resources grouped by those
    /// come from [`resource_notices`](Self::resource_notices).
    pub fn other_notices(&self) -> BTreeSet<String> {
        let mut collator = NoticeCollator::new();
        self.traverse(&mut collator);
        collator.other_notices(self.primary_copyright_notice.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DescriptorBuilder;

    fn fixture() -> Descriptor {
        let mut builder = DescriptorBuilder::new();
        let apache = builder
            .add_license(License::new("apache-2.0", "Apache 2.0", "", false, "Apache", Vec::<String>::new()).unwrap())
            .unwrap();
        let gpl = builder
            .add_license(License::new("gpl-2.0", "GPL 2.0", "", true, "GPL", Vec::<String>::new()).unwrap())
            .unwrap();
        let asf = builder
            .add_organisation(Organisation::new("asf", "Apache Software Foundation", ""))
            .unwrap();
        let fsf = builder
            .add_organisation(Organisation::new("fsf", "Free Software Foundation", ""))
            .unwrap();
        builder.add_notice("n1", "Includes software from FSF");
        builder.primary_copyright_notice("Copyright ASF");

        builder
            .add_directory(WithinDirectory::new(
                ".",
                vec![WithLicense::new(
                    apache.clone(),
                    Some("Copyright ASF".into()),
                    Vec::<(String, String)>::new(),
                    vec![ByOrganisation::new(asf.clone(), vec![Resource::new("README")])],
                )
                .unwrap()],
                vec![],
            ))
            .unwrap();
        builder
            .add_directory(WithinDirectory::new(
                "lib",
                vec![
                    WithLicense::new(
                        apache,
                        None,
                        Vec::<(String, String)>::new(),
                        vec![ByOrganisation::new(asf, vec![Resource::new("core.jar")])],
                    )
                    .unwrap(),
                    WithLicense::new(
                        gpl,
                        Some("Copyright FSF".into()),
                        Vec::<(String, String)>::new(),
                        vec![ByOrganisation::new(
                            fsf,
                            vec![Resource::new("readline.jar").with_notice("n1")],
                        )],
                    )
                    .unwrap(),
                ],
                vec![],
            ))
            .unwrap();
        builder.build("apache-2.0", Some("asf")).unwrap()
    }

    #[test]
    fn test_only_primary_directory() {
        let d = fixture();
        assert!(d.is_only_primary_directory(d.directory(".").unwrap()));
        assert!(!d.is_only_primary_directory(d.directory("lib").unwrap()));
        assert!(!d.is_only_primary());
    }

    #[test]
    fn test_only_primary_license_group() {
        let d = fixture();
        let lib = d.directory("lib").unwrap();
        assert!(d.is_only_primary_license(&lib.licenses()[0]));
        assert!(!d.is_only_primary_license(&lib.licenses()[1]));
        assert!(d.is_primary_license(lib.licenses()[0].license()));
        assert!(d.is_primary_organisation(&lib.licenses()[0].organisations()[0]));
        assert!(!d.is_primary_organisation(&lib.licenses()[1].organisations()[0]));
    }

    #[test]
    fn test_notices() {
        let d = fixture();
        let notices = d.resource_notices().unwrap();
        assert_eq!(notices.len(), 1);
        let resources = notices.get("Includes software from FSF").unwrap();
        assert!(resources.contains(&Resource::new("readline.jar")));

        let others = d.other_notices();
        assert_eq!(others.len(), 1);
        assert!(others.contains("Copyright FSF"));
        assert!(!others.contains("Includes software from FSF"));
    }

    #[test]
    fn test_source_required_and_lookup() {
        let d = fixture();
        assert!(d.is_source_required());
        assert_eq!(d.license("gpl-2.0").unwrap().name(), "GPL 2.0");
        assert!(matches!(
            d.license("bsd"),
            Err(DiscloseError::UnknownLicense(_))
        ));
        assert!(matches!(
            d.organisation("nobody"),
            Err(DiscloseError::UnknownOrganisation(_))
        ));
    }
}
