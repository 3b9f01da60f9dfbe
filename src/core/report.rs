//! Outcome reporting
//!
//! Summarises a [`DispatchOutcome`] and, on any failure, writes the failure
//! log one message per line.

use crate::config::ReportConfig;
use crate::core::dispatch::DispatchOutcome;
use crate::utils::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    AllSucceeded,
    PartialFailure,
    TotalFailure,
}

/// What the user is told once a batch finishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeReport {
    pub kind: OutcomeKind,
    pub attempted: usize,
    pub failed: usize,
    /// Error log path, present whenever something failed
    pub artifact: Option<PathBuf>,
    /// Canvas data changed and should be re-read before further edits
    pub remote_changed: bool,
    pub message: String,
}

impl OutcomeReport {
    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::AllSucceeded
    }
}

impl fmt::Display for OutcomeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Turns dispatch outcomes into user-facing summaries
#[derive(Debug, Clone)]
pub struct OutcomeReporter {
    output_dir: PathBuf,
    error_file: String,
    noun: String,
    next_step: Option<String>,
}

impl OutcomeReporter {
    /// `noun` names what was sent, e.g. `"comments"` or `"scores"`
    pub fn new<S: Into<String>>(config: &ReportConfig, noun: S) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            error_file: config.error_file.clone(),
            noun: noun.into(),
            next_step: None,
        }
    }

    /// Extra instruction appended to failure messages
    pub fn with_next_step<S: Into<String>>(mut self, step: S) -> Self {
        self.next_step = Some(step.into());
        self
    }

    pub fn error_path(&self) -> PathBuf {
        self.output_dir.join(&self.error_file)
    }

    pub async fn report(&self, outcome: &DispatchOutcome) -> Result<OutcomeReport> {
        let failed = outcome.failures.len();
        let remote_changed = outcome.succeeded() > 0;

        if failed == 0 {
            info!(attempted = outcome.attempted, "All requests succeeded");
            return Ok(OutcomeReport {
                kind: OutcomeKind::AllSucceeded,
                attempted: outcome.attempted,
                failed,
                artifact: None,
                remote_changed,
                message: format!("All {} imported successfully!", self.noun),
            });
        }

        let path = self.error_path();
        write_failures(&path, &outcome.failures).await?;

        let kind = if failed >= outcome.attempted {
            OutcomeKind::TotalFailure
        } else {
            OutcomeKind::PartialFailure
        };
        let mut message = match kind {
            OutcomeKind::TotalFailure => format!(
                "Import failed. ERROR: all {} {} failed to import. See {} for details",
                failed,
                self.noun,
                path.display()
            ),
            _ => format!(
                "Import complete. WARNING: {} of {} {} failed to import. See {} for details",
                failed,
                outcome.attempted,
                self.noun,
                path.display()
            ),
        };
        match &self.next_step {
            Some(step) => message.push_str(&format!(" and then {}.", step)),
            None => message.push('.'),
        }
        if remote_changed {
            message.push_str(" Canvas data has changed; reload it before making further edits.");
        }

        warn!(failed, attempted = outcome.attempted, path = %path.display(), "Requests failed");
        Ok(OutcomeReport {
            kind,
            attempted: outcome.attempted,
            failed,
            artifact: Some(path),
            remote_changed,
            message,
        })
    }
}

async fn write_failures(path: &Path, failures: &[String]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut contents = String::new();
    for failure in failures {
        contents.push_str(failure.trim_end_matches('\n'));
        contents.push('\n');
    }
    tokio::fs::write(path, contents).await?;
    Ok(())
}
