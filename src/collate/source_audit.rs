//! Source-link audit for licenses that require source information

use super::ResourceDescription;
use crate::model::{License, Resource, WithLicense, WithinDirectory};
use crate::traversal::Visitor;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Classifies every resource under a source-requiring license as having or
/// missing a link to its source. Public-domain content carries no license and
/// is never entered.
#[derive(Debug, Default)]
pub struct ResourceSourceAuditor {
    directory: Option<String>,
    license: Option<Arc<License>>,
    with_source: BTreeSet<ResourceDescription>,
    missing_source: BTreeSet<ResourceDescription>,
}

impl ResourceSourceAuditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resources_with_source(&self) -> &BTreeSet<ResourceDescription> {
        &self.with_source
    }

    pub fn resources_missing_source(&self) -> &BTreeSet<ResourceDescription> {
        &self.missing_source
    }

    pub fn is_complete(&self) -> bool {
        self.missing_source.is_empty()
    }
}

impl Visitor for ResourceSourceAuditor {
    fn traverse_public_domain(&self) -> bool {
        false
    }

    fn visit_within_directory(&mut self, directory: &WithinDirectory) {
        self.directory = Some(directory.name().to_string());
        self.license = None;
    }

    fn visit_with_license(&mut self, license: &WithLicense) {
        self.license = Some(Arc::clone(license.license()));
    }

    /// # Panics
    ///
    /// When no directory and license context has been established. That is a
    /// traversal-order bug, not a problem with the descriptor.
    fn visit_resource(&mut self, resource: &Resource) {
        let (directory, license) = match (&self.directory, &self.license) {
            (Some(directory), Some(license)) => (directory, license),
            _ => panic!(
                "resource '{}' visited before its directory and license",
                resource.name()
            ),
        };

        if !license.is_source_required() {
            return;
        }

        let description = ResourceDescription::new(directory.as_str(), resource.name());
        if resource.has_source() {
            self.with_source.insert(description);
        } else {
            self.missing_source.insert(description);
        }
    }
}
