//! Analyst — reconciles a descriptor against itself and the scanned tree
//!
//! Two modes:
//!
//! - **generate-only** (no scanned directories): one traversal of the whole
//!   descriptor, reporting duplicate declarations and missing source links.
//! - **audit** (scanned directories supplied): each scanned directory is
//!   traversed on its own and its declared resource names are compared with
//!   what is on disk.
//!
//! Issues are collected, never thrown one by one. `validate` surfaces them
//! all at once as a single [`ValidationFailure`].

use crate::collate::{ResourceDescription, ResourceNamesCollator, ResourceSourceAuditor};
use crate::model::Descriptor;
use crate::scanner::Directory;
use crate::DiscloseResult;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

// ─── Issue Kinds ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    /// On disk, but not declared
    MissingLicense,
    /// Declared, but not on disk
    ExtraLicense,
    /// Declared more than once in the same directory
    Duplicate,
    /// Needs a link to source and has none
    MissingSource,
}

impl IssueKind {
    pub const ALL: [IssueKind; 4] = [
        IssueKind::MissingLicense,
        IssueKind::ExtraLicense,
        IssueKind::Duplicate,
        IssueKind::MissingSource,
    ];

    /// Human-readable heading used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingLicense => "Missing license(s)",
            Self::ExtraLicense => "Extra license(s)",
            Self::Duplicate => "Duplicate resource(s)",
            Self::MissingSource => "Missing link to source",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ─── Issue Map ─────────────────────────────────────────────────────

/// Reconciliation issues bucketed by kind. Every kind is always present;
/// entries in a bucket are ordered by directory, then resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Issues {
    buckets: BTreeMap<IssueKind, BTreeSet<ResourceDescription>>,
}

impl Default for Issues {
    fn default() -> Self {
        Self {
            buckets: IssueKind::ALL
                .iter()
                .map(|kind| (*kind, BTreeSet::new()))
                .collect(),
        }
    }
}

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: IssueKind, description: ResourceDescription) {
        self.buckets.entry(kind).or_default().insert(description);
    }

    pub fn extend<I>(&mut self, kind: IssueKind, descriptions: I)
    where
        I: IntoIterator<Item = ResourceDescription>,
    {
        self.buckets.entry(kind).or_default().extend(descriptions);
    }

    pub fn get(&self, kind: IssueKind) -> &BTreeSet<ResourceDescription> {
        static EMPTY: BTreeSet<ResourceDescription> = BTreeSet::new();
        self.buckets.get(&kind).unwrap_or(&EMPTY)
    }

    pub fn is_valid(&self) -> bool {
        self.buckets.values().all(BTreeSet::is_empty)
    }

    /// Total number of issues across all kinds
    pub fn len(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.is_valid()
    }

    /// Non-empty buckets in kind order
    pub fn iter(&self) -> impl Iterator<Item = (IssueKind, &BTreeSet<ResourceDescription>)> {
        self.buckets
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(kind, entries)| (*kind, entries))
    }

    pub fn to_json(&self) -> DiscloseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, entries) in self.iter() {
            writeln!(f, "{}:", kind.label())?;
            for entry in entries {
                writeln!(f, "  {} (in {})", entry.resource, entry.directory)?;
            }
        }
        Ok(())
    }
}

// ─── Validation Failure ────────────────────────────────────────────

/// Every reconciliation issue found by one `validate` call
#[derive(Error, Debug, Clone)]
#[error("Licensing descriptor is invalid ({} issue(s)):\n{issues}", .issues.len())]
pub struct ValidationFailure {
    pub issues: Issues,
}

// ─── Analyst ───────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Analyst {
    directories: Option<BTreeSet<Directory>>,
    issues: Issues,
}

impl Analyst {
    /// Generate-only mode: the descriptor is checked against itself
    pub fn new() -> Self {
        Self::default()
    }

    /// Audit mode: the descriptor is also checked against scanned directories
    pub fn with_directories(directories: BTreeSet<Directory>) -> Self {
        Self {
            directories: Some(directories),
            issues: Issues::new(),
        }
    }

    pub fn is_audit(&self) -> bool {
        self.directories.is_some()
    }

    /// Issues from the most recent `analyse`
    pub fn issues(&self) -> &Issues {
        &self.issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_valid()
    }

    /// Run a full analysis, replacing the issues of any previous run.
    pub fn analyse(&mut self, descriptor: &Descriptor) -> &Issues {
        let mut issues = Issues::new();
        match &self.directories {
            None => {
                tracing::info!("Analysing descriptor (generate-only)");
                analyse_whole(descriptor, &mut issues);
            }
            Some(directories) => {
                tracing::info!(
                    "Analysing descriptor against {} scanned directories",
                    directories.len()
                );
                analyse_directories(descriptor, directories, &mut issues);
            }
        }

        for kind in IssueKind::ALL {
            let count = issues.get(kind).len();
            if count > 0 {
                tracing::info!("  {}: {}", kind.label(), count);
            }
        }

        self.issues = issues;
        &self.issues
    }

    /// Return `descriptor` unchanged when no issues are found, otherwise one
    /// failure carrying every issue.
    pub fn validate<'d>(&mut self, descriptor: &'d Descriptor) -> Result<&'d Descriptor, ValidationFailure> {
        self.analyse(descriptor);
        if self.is_valid() {
            Ok(descriptor)
        } else {
            Err(ValidationFailure {
                issues: self.issues.clone(),
            })
        }
    }
}

fn analyse_whole(descriptor: &Descriptor, issues: &mut Issues) {
    let mut names = ResourceNamesCollator::new();
    let mut auditor = ResourceSourceAuditor::new();
    descriptor.traverse(&mut names);
    descriptor.traverse(&mut auditor);

    issues.extend(IssueKind::Duplicate, names.duplicates().iter().cloned());
    issues.extend(
        IssueKind::MissingSource,
        auditor.resources_missing_source().iter().cloned(),
    );
}

fn analyse_directories(
    descriptor: &Descriptor,
    directories: &BTreeSet<Directory>,
    issues: &mut Issues,
) {
    for directory in directories {
        let declared = analyse_subtree(descriptor, directory.name(), issues);
        let actual = directory.contents();

        tracing::debug!(
            "{}: {} declared, {} on disk",
            directory.name(),
            declared.len(),
            actual.len()
        );

        issues.extend(
            IssueKind::ExtraLicense,
            declared
                .difference(actual)
                .map(|name| ResourceDescription::new(directory.name(), name.as_str())),
        );
        issues.extend(
            IssueKind::MissingLicense,
            actual
                .difference(&declared)
                .map(|name| ResourceDescription::new(directory.name(), name.as_str())),
        );
    }

    // Declared directories that were not found on disk at all
    let scanned: BTreeSet<&str> = directories.iter().map(Directory::name).collect();
    for declared_directory in descriptor.directories() {
        let name = declared_directory.name();
        if scanned.contains(name) {
            continue;
        }
        tracing::warn!("Declared directory {} was not found on disk", name);
        let declared = analyse_subtree(descriptor, name, issues);
        issues.extend(
            IssueKind::ExtraLicense,
            declared
                .iter()
                .map(|resource| ResourceDescription::new(name, resource.as_str())),
        );
    }
}

/// Traverse one directory of the descriptor, recording duplicates and
/// missing sources. Returns the resource names it declares.
fn analyse_subtree(descriptor: &Descriptor, name: &str, issues: &mut Issues) -> BTreeSet<String> {
    let mut names = ResourceNamesCollator::new();
    let mut auditor = ResourceSourceAuditor::new();
    if descriptor.traverse_directory(name, &mut names) {
        descriptor.traverse_directory(name, &mut auditor);
    }

    issues.extend(IssueKind::Duplicate, names.duplicates().iter().cloned());
    issues.extend(
        IssueKind::MissingSource,
        auditor.resources_missing_source().iter().cloned(),
    );
    names.resource_names().clone()
}
