//! # disclose — Licensing Descriptor Reconciliation
//!
//! Checks a declarative description of a distribution's licensing obligations
//! against the distribution's actual contents, and against itself, before any
//! LICENSE or NOTICE text is generated from it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Engine                              │
//! │  ┌────────────┐   ┌─────────────┐   ┌─────────────────────┐  │
//! │  │ Descriptor │   │  Directory  │   │   DiscloseConfig    │  │
//! │  │  (model)   │   │   Scanner   │   │ (.disclose.toml)    │  │
//! │  └─────┬──────┘   └──────┬──────┘   └─────────────────────┘  │
//! │        │ traverse        │ Directory set                     │
//! │  ┌─────▼─────────────────▼────────────────────────────────┐  │
//! │  │ Analyst: ResourceNames │ SourceAudit │ reconciliation  │  │
//! │  └─────────────────────────┬──────────────────────────────┘  │
//! │                            ▼                                 │
//! │             Issues (MISSING / EXTRA / DUPLICATE / SOURCE)    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - `model` — immutable licensing facts: licenses, organisations, resources
//! - `traversal` — the single visitor protocol every analysis plugs into
//! - `scanner` — breadth-first discovery of the on-disk directory structure
//! - `collate` — visitors that each derive one fact from a traversal
//! - `analyst` — runs collators and aggregates reconciliation issues
//! - `config` — per-invocation configuration loaded from TOML
//! - `engine` — wires config, scanner and analyst together

pub mod model;
pub mod traversal;
pub mod scanner;
pub mod collate;
pub mod analyst;
pub mod config;
pub mod engine;

// Re-exports for convenience
pub use model::{
    ByOrganisation, Descriptor, DescriptorBuilder, License, Organisation, Resource, WithLicense,
    WithinDirectory,
};
pub use traversal::Visitor;
pub use scanner::{Directory, DirectoryScanner};
pub use collate::{
    LicenseAndOrganisationCollator, NoticeCollator, ResourceDescription, ResourceNamesCollator,
    ResourceSourceAuditor,
};
pub use analyst::{Analyst, IssueKind, Issues, ValidationFailure};
pub use config::DiscloseConfig;
pub use engine::{Engine, Validated};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscloseError {
    #[error("Unknown license: {0}")]
    UnknownLicense(String),

    #[error("Unknown organisation: {0}")]
    UnknownOrganisation(String),

    #[error("Unknown notice: {0}")]
    UnknownNotice(String),

    #[error("Duplicate directory: {0}")]
    DuplicateDirectory(String),

    #[error("Duplicate license: {0}")]
    DuplicateLicense(String),

    #[error("Duplicate organisation: {0}")]
    DuplicateOrganisation(String),

    #[error("Duplicate parameter '{parameter}' for license {license}")]
    DuplicateParameter { license: String, parameter: String },

    #[error(
        "Parameters do not match license {license}: missing [{}], unexpected [{}]",
        .missing.join(", "),
        .unexpected.join(", ")
    )]
    ParameterMismatch {
        license: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Scan root does not exist: {}", .0.display())]
    ScanRootMissing(PathBuf),

    #[error("Scan root is not a directory: {}", .0.display())]
    ScanRootNotDirectory(PathBuf),

    #[error("Cannot list directory {}: {reason}", .path.display())]
    Unlistable { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Invalid(#[from] ValidationFailure),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type DiscloseResult<T> = Result<T, DiscloseError>;
