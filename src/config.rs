//! Run configuration of the word tracker.

use crate::store::DEFAULT_REPOSITORY;
use std::path::PathBuf;

/// Environment variable overriding the snapshot location.
pub const REPOSITORY_ENV: &str = "WORDTRACKER_REPOSITORY";

/// Everything one run of the tracker needs to know.
///
/// The report flag is kept as given and only validated when rendering, so
/// that an unknown flag does not prevent the input from being indexed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Snapshot file of the index
    pub repository: PathBuf,
    /// Text file to index
    pub input: PathBuf,
    /// Report flag (`-pf`, `-pl` or `-po`)
    pub report: String,
    /// Report destination; standard output if `None`
    pub output: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            repository: PathBuf::from(DEFAULT_REPOSITORY),
            input: PathBuf::new(),
            report: "-pf".to_string(),
            output: None,
        }
    }
}

impl TrackerConfig {
    /// Creates a configuration for indexing `input` and rendering `report`.
    pub fn new(input: impl Into<PathBuf>, report: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            report: report.into(),
            ..Self::default()
        }
    }

    /// Writes the report to `output` instead of standard output.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Uses `repository` as snapshot file.
    pub fn with_repository(mut self, repository: impl Into<PathBuf>) -> Self {
        self.repository = repository.into();
        self
    }
}
