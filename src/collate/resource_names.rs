//! Declared resource names and duplicate declarations

use super::ResourceDescription;
use crate::model::{Resource, WithinDirectory};
use crate::traversal::Visitor;
use std::collections::BTreeSet;

/// Collects every declared resource, keyed by the directory it is declared
/// in. The first declaration of a (directory, resource) pair is canonical;
/// any later declaration of the same pair is a duplicate.
#[derive(Debug, Default)]
pub struct ResourceNamesCollator {
    directory: Option<String>,
    seen: BTreeSet<ResourceDescription>,
    duplicates: BTreeSet<ResourceDescription>,
    names: BTreeSet<String>,
}

impl ResourceNamesCollator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct resource names across every directory visited
    pub fn resource_names(&self) -> &BTreeSet<String> {
        &self.names
    }

    /// Canonical (first) declarations
    pub fn resources(&self) -> &BTreeSet<ResourceDescription> {
        &self.seen
    }

    pub fn duplicates(&self) -> &BTreeSet<ResourceDescription> {
        &self.duplicates
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

impl Visitor for ResourceNamesCollator {
    fn visit_within_directory(&mut self, directory: &WithinDirectory) {
        self.directory = Some(directory.name().to_string());
    }

    /// # Panics
    ///
    /// When a resource arrives before any directory, which only happens if a
    /// caller drives traversal from below the directory level.
    fn visit_resource(&mut self, resource: &Resource) {
        let directory = match &self.directory {
            Some(directory) => directory,
            None => panic!(
                "resource '{}' visited outside of any directory",
                resource.name()
            ),
        };

        let description = ResourceDescription::new(directory.as_str(), resource.name());
        if self.seen.contains(&description) {
            self.duplicates.insert(description);
        } else {
            self.names.insert(resource.name().to_string());
            self.seen.insert(description);
        }
    }
}
