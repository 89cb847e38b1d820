//! Pipeline domain types

use serde::{Deserialize, Serialize};

use crate::domain::deploy::DeployStatus;
use crate::domain::history::HistoryEntry;
use crate::domain::stage::Stage;

/// Pipeline definition
///
/// The current editable configuration of the log-pipelines element: its
/// identifying/version fields, the ordered list of stages, and the embedded
/// version history. Only the definition is mutable (through saves that mint
/// new versions); history entries are immutable snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: String,
    pub version: i32,
    #[serde(rename = "elementType")]
    pub element_type: String,
    pub active: bool,
    // The definition serializes its validity flag as snake_case `is_valid`,
    // unlike history entries which use `isValid`. Both spellings are part of
    // the wire contract.
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
    pub pipelines: Vec<Stage>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl Pipeline {
    /// Read-only view of the version ledger, newest first
    ///
    /// Absence of history is an empty slice, never an error.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::tests::container_filter;
    use crate::domain::history::tests::sample_entry;
    use crate::domain::history::{ELEMENT_TYPE_LOG_PIPELINES, conf_hash};
    use crate::domain::operation::tests::regex_op;

    fn sample_pipeline() -> Pipeline {
        Pipeline {
            id: "test-id-1".to_string(),
            version: 24,
            element_type: ELEMENT_TYPE_LOG_PIPELINES.to_string(),
            active: false,
            is_valid: false,
            disabled: false,
            deploy_status: DeployStatus::Deployed,
            deploy_result: "Deployment was successful".to_string(),
            last_hash: conf_hash(ELEMENT_TYPE_LOG_PIPELINES, 24),
            last_conf: "{}".to_string(),
            created_by: "test-created-by".to_string(),
            pipelines: vec![Stage {
                id: "stage-1".to_string(),
                order_id: 1,
                name: "hotrod logs parser".to_string(),
                alias: "hotrodlogsparser".to_string(),
                description: "parses hotrod logs".to_string(),
                enabled: true,
                filter: container_filter("hotrod"),
                config: vec![regex_op(1, Some("op-2")), regex_op(2, None)],
                created_by: "test@email".to_string(),
                created_at: chrono::Utc::now(),
            }],
            history: vec![sample_entry(24), sample_entry(23)],
        }
    }

    #[test]
    fn test_history_accessor() {
        let pipeline = sample_pipeline();
        let history = pipeline.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].version, 24);
    }

    #[test]
    fn test_history_accessor_empty_is_not_an_error() {
        let mut pipeline = sample_pipeline();
        pipeline.history.clear();
        assert!(pipeline.history().is_empty());
    }

    #[test]
    fn test_definition_uses_snake_case_validity_flag() {
        let pipeline = sample_pipeline();
        let json = serde_json::to_value(&pipeline).unwrap();

        assert!(json.get("is_valid").is_some());
        assert!(json.get("isValid").is_none());
        // ...while embedded history entries keep the camelCase spelling.
        assert!(json["history"][0].get("isValid").is_some());
    }

    #[test]
    fn test_round_trip_field_for_field() {
        let pipeline = sample_pipeline();
        let json = serde_json::to_string(&pipeline).unwrap();
        let back: Pipeline = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pipeline);
    }

    #[test]
    fn test_missing_history_deserializes_to_empty() {
        let mut json = serde_json::to_value(&sample_pipeline()).unwrap();
        json.as_object_mut().unwrap().remove("history");

        let pipeline: Pipeline = serde_json::from_value(json).unwrap();
        assert!(pipeline.history().is_empty());
    }
}
