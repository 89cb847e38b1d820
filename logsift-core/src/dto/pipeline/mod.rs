//! Pipeline DTOs for inter-service communication

use serde::{Deserialize, Serialize};

use crate::domain::deploy::DeployStatus;
use crate::domain::filter::FilterSet;
use crate::domain::history::HistoryEntry;
use crate::domain::operation::Operation;

/// Request to save a new pipeline version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePipelines {
    pub stages: Vec<PostableStage>,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "createdByName")]
    pub created_by_name: String,
}

/// A stage as posted by an editor, before the server assigns identity
///
/// Mirrors `Stage` minus the server-assigned `id`/`createdBy`/`createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostableStage {
    #[serde(rename = "orderId")]
    pub order_id: i32,
    pub name: String,
    pub alias: String,
    #[serde(default)]
    pub description: String,
    pub enabled: bool,
    pub filter: FilterSet,
    pub config: Vec<Operation>,
}

/// Lightweight version record for listing, without the configuration blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionSummary {
    pub id: String,
    pub version: i32,
    #[serde(rename = "elementType")]
    pub element_type: String,
    #[serde(rename = "deployStatus")]
    pub deploy_status: DeployStatus,
    #[serde(rename = "deployResult")]
    pub deploy_result: String,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "createdByName")]
    pub created_by_name: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<HistoryEntry> for VersionSummary {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.id,
            version: entry.version,
            element_type: entry.element_type,
            deploy_status: entry.deploy_status,
            deploy_result: entry.deploy_result,
            created_by: entry.created_by,
            created_by_name: entry.created_by_name,
            created_at: entry.created_at,
        }
    }
}
