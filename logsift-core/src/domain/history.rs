//! Version history domain types

use serde::{Deserialize, Serialize};

use crate::domain::deploy::{DeployState, DeployStatus};

/// Element type discriminator for the log-pipelines lineage
pub const ELEMENT_TYPE_LOG_PIPELINES: &str = "log_pipelines";

/// Content fingerprint of a configuration at a given version
///
/// The wire format is fixed: `<elementType>:<version>`.
pub fn conf_hash(element_type: &str, version: i32) -> String {
    format!("{}:{}", element_type, version)
}

/// Immutable snapshot of one pipeline version and its deployment outcome
///
/// Structure shared between server (persists) and client/CLI (renders the
/// change-history view). Entries are ordered newest first within a history
/// log; version numbers need not be contiguous relative to list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub version: i32,
    #[serde(rename = "elementType")]
    pub element_type: String,
    pub active: bool,
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    pub disabled: bool,
    #[serde(rename = "deployStatus")]
    pub deploy_status: DeployStatus,
    #[serde(rename = "deployResult")]
    pub deploy_result: String,
    #[serde(rename = "lastHash")]
    pub last_hash: String,
    #[serde(rename = "lastConf")]
    pub last_conf: String,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "createdByName")]
    pub created_by_name: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl HistoryEntry {
    /// Interpret this entry's deployment outcome for display
    pub fn deploy_state(&self) -> DeployState {
        DeployState::of(self)
    }
}
