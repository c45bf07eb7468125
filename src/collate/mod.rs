//! Collators — traversal consumers that each derive one result
//!
//! - `resource_names` — declared resource names and duplicate declarations
//! - `source_audit` — resources whose license requires a missing source link
//! - `notices` — resources grouped by notice text
//! - `license_org` — distinct licenses and organisations in a subtree

pub mod resource_names;
pub mod source_audit;
pub mod notices;
pub mod license_org;

pub use resource_names::ResourceNamesCollator;
pub use source_audit::ResourceSourceAuditor;
pub use notices::NoticeCollator;
pub use license_org::LicenseAndOrganisationCollator;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resource located by directory. Ordered directory first, then resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceDescription {
    pub directory: String,
    pub resource: String,
}

impl ResourceDescription {
    pub fn new(directory: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            resource: resource.into(),
        }
    }
}

impl fmt::Display for ResourceDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.directory, self.resource)
    }
}
