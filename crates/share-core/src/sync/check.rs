//! Check types for SyncEngine validation
//!
//! Provides types for reporting how declared shares differ from the shares
//! the tool reports.

use serde::Serialize;
use share_model::PendingEdit;

/// Status of the check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckStatus {
    /// Every declared share matches
    Healthy,
    /// Some declared shares do not exist yet
    Missing,
    /// Some shares exist with the wrong attributes, or exist but should not
    Drifted,
    /// The declarations or the listing could not be processed
    Broken,
}

/// A declared share that does not match the system
#[derive(Debug, Clone, Serialize)]
pub struct DriftItem {
    /// Path of the share
    pub path: String,
    /// Name the share is registered under, if it exists
    pub share_name: Option<String>,
    /// Human-readable description of the drift
    pub description: String,
    /// Edits a sync would send
    pub edits: Vec<PendingEdit>,
}

/// Report from a check
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Overall status of the check
    pub status: CheckStatus,
    /// Shares whose attributes or existence differ
    pub drifted: Vec<DriftItem>,
    /// Shares that should exist but do not
    pub missing: Vec<DriftItem>,
    /// Additional messages, such as listing blocks that could not be parsed
    pub messages: Vec<String>,
}

impl CheckReport {
    /// Create a healthy check report with no issues
    pub fn healthy() -> Self {
        Self {
            status: CheckStatus::Healthy,
            drifted: Vec::new(),
            missing: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Create a check report with missing items
    pub fn with_missing(missing: Vec<DriftItem>) -> Self {
        Self {
            status: CheckStatus::Missing,
            missing,
            ..Self::healthy()
        }
    }

    /// Create a check report with drifted items
    pub fn with_drifted(drifted: Vec<DriftItem>) -> Self {
        Self {
            status: CheckStatus::Drifted,
            drifted,
            ..Self::healthy()
        }
    }

    /// Create a check report indicating nothing could be checked
    pub fn broken(message: String) -> Self {
        Self {
            status: CheckStatus::Broken,
            messages: vec![message],
            ..Self::healthy()
        }
    }

    /// Attach an informational message without changing the status
    pub fn with_message(mut self, message: String) -> Self {
        self.messages.push(message);
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.status == CheckStatus::Healthy
    }

    /// Merge two check reports, combining their issues
    ///
    /// The resulting status is the "worst" of the two:
    /// Broken > Drifted > Missing > Healthy
    pub fn merge(mut self, other: CheckReport) -> Self {
        self.drifted.extend(other.drifted);
        self.missing.extend(other.missing);
        self.messages.extend(other.messages);

        self.status = match (self.status, other.status) {
            (CheckStatus::Broken, _) | (_, CheckStatus::Broken) => CheckStatus::Broken,
            (CheckStatus::Drifted, _) | (_, CheckStatus::Drifted) => CheckStatus::Drifted,
            (CheckStatus::Missing, _) | (_, CheckStatus::Missing) => CheckStatus::Missing,
            (CheckStatus::Healthy, CheckStatus::Healthy) => CheckStatus::Healthy,
        };

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(path: &str, description: &str) -> DriftItem {
        DriftItem {
            path: path.to_string(),
            share_name: None,
            description: description.to_string(),
            edits: Vec::new(),
        }
    }

    #[test]
    fn test_healthy_report() {
        let report = CheckReport::healthy();
        assert!(report.is_healthy());
        assert!(report.drifted.is_empty());
        assert!(report.missing.is_empty());
        assert!(report.messages.is_empty());
    }

    #[test]
    fn test_message_keeps_status() {
        let report = CheckReport::healthy().with_message("note".to_string());
        assert!(report.is_healthy());
        assert_eq!(report.messages.len(), 1);
    }

    #[test]
    fn test_merge_reports() {
        let report1 = CheckReport::with_missing(vec![item("/Shares/A", "Missing")]);
        let report2 = CheckReport::with_drifted(vec![item("/Shares/B", "Drifted")]);

        let merged = report1.merge(report2);

        // Drifted is "worse" than Missing
        assert_eq!(merged.status, CheckStatus::Drifted);
        assert_eq!(merged.missing.len(), 1);
        assert_eq!(merged.drifted.len(), 1);
    }

    #[test]
    fn test_broken_wins_merge() {
        let merged = CheckReport::with_drifted(vec![item("/Shares/B", "Drifted")])
            .merge(CheckReport::broken("bad".to_string()));
        assert_eq!(merged.status, CheckStatus::Broken);
        assert_eq!(merged.messages, vec!["bad".to_string()]);
    }
}
