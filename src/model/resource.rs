//! Resources — named artifacts inside a directory

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A named artifact declared in a directory.
///
/// Equality and ordering use the name alone, so two resources with the same
/// name in different directories or groups compare equal. Directory-scoped
/// identity is tracked by the collators through explicit (directory, name)
/// pairs instead.
#[derive(Debug, Clone)]
pub struct Resource {
    name: String,
    notice_id: Option<String>,
    source: Option<String>,
}

impl Resource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notice_id: None,
            source: None,
        }
    }

    /// Link this resource to a notice declared on the descriptor
    pub fn with_notice(mut self, notice_id: impl Into<String>) -> Self {
        self.notice_id = Some(notice_id.into());
        self
    }

    /// Locator for the resource's source code
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn notice_id(&self) -> Option<&str> {
        self.notice_id.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// True iff a non-empty source locator is present
    pub fn has_source(&self) -> bool {
        self.source.as_deref().is_some_and(|s| !s.is_empty())
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Resource {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Resource {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}
