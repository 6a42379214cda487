// src/models/report.rs

//! Summary of one pass over all targets.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// What happened to a single target during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetOutcome {
    /// A new article was sent
    Notified { title: String, link: String },
    /// Every candidate was already in the ledger or had no link
    NothingNew,
    /// The selector matched nothing
    NoCandidates,
    /// Fetching, extraction, or delivery failed
    Failed { error: String },
}

/// Per-target line of a pass report.
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub url: String,
    pub outcome: TargetOutcome,
}

/// Result of one pass.
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub targets: Vec<TargetReport>,
}

impl PassReport {
    /// Number of article notifications sent.
    pub fn notified_count(&self) -> usize {
        self.count(|o| matches!(o, TargetOutcome::Notified { .. }))
    }

    /// Number of targets whose selector matched nothing.
    pub fn empty_count(&self) -> usize {
        self.count(|o| matches!(o, TargetOutcome::NoCandidates))
    }

    /// Number of targets that failed.
    pub fn failure_count(&self) -> usize {
        self.count(|o| matches!(o, TargetOutcome::Failed { .. }))
    }

    /// Wall-clock duration of the pass in milliseconds.
    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    fn count(&self, pred: impl Fn(&TargetOutcome) -> bool) -> usize {
        self.targets.iter().filter(|t| pred(&t.outcome)).count()
    }
}
