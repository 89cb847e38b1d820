//! Deployment status domain types

use serde::{Deserialize, Serialize};

use crate::domain::history::HistoryEntry;

/// Outcome state of a pipeline version's deployment attempt
///
/// The wire representation is a closed-but-extensible string enumeration:
/// values the server does not recognize decode to `Unknown` instead of
/// failing, so newer producers never break older consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeployStatus {
    Deployed,
    InProgress,
    Dirty,
    Failed,
    #[serde(other)]
    Unknown,
}

impl Default for DeployStatus {
    fn default() -> Self {
        DeployStatus::Unknown
    }
}

impl DeployStatus {
    /// Map the status to its user-facing semantic category.
    ///
    /// Total over every variant, including `Unknown`.
    pub fn category(self) -> DeployCategory {
        match self {
            DeployStatus::Deployed => DeployCategory::Success,
            DeployStatus::InProgress => DeployCategory::InProgress,
            DeployStatus::Dirty => DeployCategory::Warning,
            DeployStatus::Failed => DeployCategory::Failure,
            DeployStatus::Unknown => DeployCategory::Unknown,
        }
    }

    /// Whether a deployment attempt is still in flight for this version
    pub fn is_in_flight(self) -> bool {
        self == DeployStatus::InProgress
    }
}

/// User-facing semantic category of a deploy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeployCategory {
    Success,
    InProgress,
    Warning,
    Failure,
    Unknown,
}

impl DeployCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DeployCategory::Success => "success",
            DeployCategory::InProgress => "in-progress",
            DeployCategory::Warning => "warning",
            DeployCategory::Failure => "failure",
            DeployCategory::Unknown => "unknown",
        }
    }
}

/// Interpreted deployment state of one history entry
///
/// Pairs the semantic category with the entry's human-readable result
/// message. An empty message is tolerated (typical for `Unknown`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployState {
    pub category: DeployCategory,
    pub message: String,
}

impl DeployState {
    /// Interpret a history entry's deployment outcome for display
    pub fn of(entry: &HistoryEntry) -> Self {
        Self {
            category: entry.deploy_status.category(),
            message: entry.deploy_result.clone(),
        }
    }
}
