//! Stage domain types

use serde::{Deserialize, Serialize};

use crate::domain::filter::FilterSet;
use crate::domain::operation::Operation;

/// One filtering + transformation unit within a pipeline
///
/// Stages are ordered by `orderId`, 1-based and contiguous within their
/// pipeline. The filter selects which records the stage applies to; `config`
/// is the ordered chain of operations run on matching records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    #[serde(rename = "orderId")]
    pub order_id: i32,
    pub name: String,
    pub alias: String,
    #[serde(default)]
    pub description: String,
    pub enabled: bool,
    pub filter: FilterSet,
    pub config: Vec<Operation>,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::tests::container_filter;
    use crate::domain::operation::tests::regex_op;

    #[test]
    fn test_wire_field_names() {
        let stage = Stage {
            id: "stage-1".to_string(),
            order_id: 1,
            name: "hotrod logs parser".to_string(),
            alias: "hotrodlogsparser".to_string(),
            description: String::new(),
            enabled: true,
            filter: container_filter("hotrod"),
            config: vec![regex_op(1, None)],
            created_by: "test@email".to_string(),
            created_at: chrono::Utc::now(),
        };

        let json = serde_json::to_value(&stage).unwrap();
        assert!(json.get("orderId").is_some());
        assert!(json.get("createdBy").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("order_id").is_none());
    }
}
