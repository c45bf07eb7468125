//! # Engine — one validation run
//!
//! Picks the analysis mode from configuration, scans the distribution when
//! auditing, and hands back either the validated descriptor (with the
//! rendering options the run was configured with) or a single failure that
//! lists every issue.

use crate::analyst::{Analyst, Issues};
use crate::config::DiscloseConfig;
use crate::model::Descriptor;
use crate::scanner::DirectoryScanner;
use crate::DiscloseResult;

/// A descriptor that passed validation, with the options renderers need
#[derive(Debug, Clone, Copy)]
pub struct Validated<'d> {
    pub descriptor: &'d Descriptor,
    pub include_source_urls: bool,
}

pub struct Engine {
    config: DiscloseConfig,
}

impl Engine {
    pub fn new(config: DiscloseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiscloseConfig {
        &self.config
    }

    /// Scan (when auditing) and build the analyst for this run
    fn analyst(&self) -> DiscloseResult<Analyst> {
        match &self.config.source_dir {
            Some(source_dir) => {
                let directories = DirectoryScanner::new(source_dir)?
                    .with_ignored(self.config.ignore.iter().cloned())
                    .scan()?;
                Ok(Analyst::with_directories(directories))
            }
            None => Ok(Analyst::new()),
        }
    }

    /// All issues for `descriptor`, without failing on them
    pub fn analyse(&self, descriptor: &Descriptor) -> DiscloseResult<Issues> {
        let mut analyst = self.analyst()?;
        Ok(analyst.analyse(descriptor).clone())
    }

    /// Validate `descriptor`. Reconciliation issues come back as
    /// [`DiscloseError::Invalid`](crate::DiscloseError::Invalid); scan
    /// failures propagate as they are.
    pub fn run<'d>(&self, descriptor: &'d Descriptor) -> DiscloseResult<Validated<'d>> {
        let start = std::time::Instant::now();
        let mut analyst = self.analyst()?;
        let result = analyst.validate(descriptor);
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(descriptor) => {
                tracing::info!("✓ Descriptor valid ({}ms)", duration_ms);
                Ok(Validated {
                    descriptor,
                    include_source_urls: self.config.include_source_urls,
                })
            }
            Err(failure) => {
                tracing::error!(
                    "✗ Descriptor invalid: {} issue(s) ({}ms)",
                    failure.issues.len(),
                    duration_ms
                );
                Err(failure.into())
            }
        }
    }
}
