//! Descriptor construction — the loader-facing side of the model
//!
//! A loader registers licenses, organisations and notices first, resolves
//! shared handles by id while building directory groups, and finally names
//! the primary license and organisation. Structural problems abort
//! construction; there is no partially built descriptor.

use super::{Descriptor, License, Organisation, WithinDirectory};
use crate::{DiscloseError, DiscloseResult};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct DescriptorBuilder {
    licenses: BTreeMap<String, Arc<License>>,
    organisations: BTreeMap<String, Arc<Organisation>>,
    notices: BTreeMap<String, String>,
    directories: BTreeMap<String, WithinDirectory>,
    primary_copyright_notice: Option<String>,
    primary_notice: Option<String>,
}

impl DescriptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a license and return the shared handle groups should use
    pub fn add_license(&mut self, license: License) -> DiscloseResult<Arc<License>> {
        if self.licenses.contains_key(license.id()) {
            return Err(DiscloseError::DuplicateLicense(license.id().to_string()));
        }
        let license = Arc::new(license);
        self.licenses
            .insert(license.id().to_string(), Arc::clone(&license));
        Ok(license)
    }

    pub fn add_organisation(&mut self, organisation: Organisation) -> DiscloseResult<Arc<Organisation>> {
        if self.organisations.contains_key(organisation.id()) {
            return Err(DiscloseError::DuplicateOrganisation(
                organisation.id().to_string(),
            ));
        }
        let organisation = Arc::new(organisation);
        self.organisations
            .insert(organisation.id().to_string(), Arc::clone(&organisation));
        Ok(organisation)
    }

    pub fn add_notice(&mut self, id: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.notices.insert(id.into(), text.into());
        self
    }

    pub fn primary_copyright_notice(&mut self, text: impl Into<String>) -> &mut Self {
        self.primary_copyright_notice = Some(text.into());
        self
    }

    pub fn primary_notice(&mut self, text: impl Into<String>) -> &mut Self {
        self.primary_notice = Some(text.into());
        self
    }

    pub fn license(&self, id: &str) -> DiscloseResult<Arc<License>> {
        self.licenses
            .get(id)
            .cloned()
            .ok_or_else(|| DiscloseError::UnknownLicense(id.to_string()))
    }

    pub fn organisation(&self, id: &str) -> DiscloseResult<Arc<Organisation>> {
        self.organisations
            .get(id)
            .cloned()
            .ok_or_else(|| DiscloseError::UnknownOrganisation(id.to_string()))
    }

    /// Add a directory. Its name must be new and every license and
    /// organisation it references must already be registered.
    pub fn add_directory(&mut self, directory: WithinDirectory) -> DiscloseResult<()> {
        if self.directories.contains_key(directory.name()) {
            return Err(DiscloseError::DuplicateDirectory(
                directory.name().to_string(),
            ));
        }

        for group in directory.licenses() {
            self.license(group.license().id())?;
            for by_org in group.organisations() {
                self.organisation(by_org.id())?;
            }
        }
        for by_org in directory.public_domain() {
            self.organisation(by_org.id())?;
        }

        self.directories
            .insert(directory.name().to_string(), directory);
        Ok(())
    }

    pub fn build(
        self,
        primary_license_id: &str,
        primary_organisation_id: Option<&str>,
    ) -> DiscloseResult<Descriptor> {
        let primary_license = self.license(primary_license_id)?;
        let primary_organisation = match primary_organisation_id {
            Some(id) => Some(self.organisation(id)?),
            None => None,
        };

        tracing::debug!(
            "Descriptor built: {} directories, {} licenses, {} organisations",
            self.directories.len(),
            self.licenses.len(),
            self.organisations.len()
        );

        Ok(Descriptor {
            primary_license,
            primary_organisation,
            primary_copyright_notice: self.primary_copyright_notice,
            primary_notice: self.primary_notice,
            licenses: self.licenses,
            organisations: self.organisations,
            notices: self.notices,
            directories: self.directories,
        })
    }
}
