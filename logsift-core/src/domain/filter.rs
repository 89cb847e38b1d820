//! Stage filter domain types
//!
//! A filter decides which log records a stage applies to. It is a recursive
//! boolean expression tree: an operator (`AND`/`OR`) over items, where each
//! item is either a leaf comparison or a nested group.

use serde::{Deserialize, Serialize};

/// Boolean combinator over the items of a filter group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterOp {
    And,
    Or,
}

/// A group of filter conditions joined by one boolean operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    pub op: FilterOp,
    pub items: Vec<FilterNode>,
}

impl FilterSet {
    /// An AND group with no conditions, matching every record
    pub fn match_all() -> Self {
        Self {
            op: FilterOp::And,
            items: Vec::new(),
        }
    }
}

/// One node of the filter tree: a nested group or a leaf comparison
///
/// Untagged on the wire; a group is recognized by its `items` field, a leaf
/// by its `key` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterNode {
    Group(FilterSet),
    Item(FilterItem),
}

/// Leaf comparison of a typed attribute key against a literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterItem {
    pub key: AttributeKey,
    pub id: String,
    pub value: serde_json::Value,
    pub op: String,
}

/// Typed key identifying a log attribute, resource field, or column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeKey {
    pub key: String,
    #[serde(rename = "dataType")]
    pub data_type: AttributeDataType,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "isColumn")]
    pub is_column: bool,
    #[serde(rename = "isJSON")]
    pub is_json: bool,
}

/// Data type of an attribute key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeDataType {
    String,
    Int64,
    Float64,
    Bool,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn container_filter(name: &str) -> FilterSet {
        FilterSet {
            op: FilterOp::And,
            items: vec![FilterNode::Item(FilterItem {
                key: AttributeKey {
                    key: "container_name".to_string(),
                    data_type: AttributeDataType::String,
                    kind: "tag".to_string(),
                    is_column: false,
                    is_json: false,
                },
                id: "sampleid".to_string(),
                value: serde_json::Value::String(name.to_string()),
                op: "=".to_string(),
            })],
        }
    }

    #[test]
    fn test_deserialize_leaf_filter() {
        let json = r#"{
            "op": "AND",
            "items": [
                {
                    "key": {
                        "key": "container_name",
                        "dataType": "string",
                        "type": "tag",
                        "isColumn": false,
                        "isJSON": false
                    },
                    "id": "sampleid",
                    "value": "hotrod",
                    "op": "="
                }
            ]
        }"#;

        let filter: FilterSet = serde_json::from_str(json).unwrap();
        assert_eq!(filter.op, FilterOp::And);
        assert_eq!(filter.items.len(), 1);
        match &filter.items[0] {
            FilterNode::Item(item) => {
                assert_eq!(item.key.key, "container_name");
                assert_eq!(item.op, "=");
            }
            FilterNode::Group(_) => panic!("expected a leaf item"),
        }
    }

    #[test]
    fn test_deserialize_nested_group() {
        let json = r#"{
            "op": "OR",
            "items": [
                {
                    "op": "AND",
                    "items": [
                        {
                            "key": {
                                "key": "service",
                                "dataType": "string",
                                "type": "tag",
                                "isColumn": false,
                                "isJSON": false
                            },
                            "id": "nested-1",
                            "value": "customer",
                            "op": "="
                        }
                    ]
                }
            ]
        }"#;

        let filter: FilterSet = serde_json::from_str(json).unwrap();
        assert_eq!(filter.op, FilterOp::Or);
        match &filter.items[0] {
            FilterNode::Group(group) => assert_eq!(group.op, FilterOp::And),
            FilterNode::Item(_) => panic!("expected a nested group"),
        }
    }

    #[test]
    fn test_round_trip() {
        let filter = container_filter("hotrod");
        let json = serde_json::to_string(&filter).unwrap();
        let back: FilterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, filter);
    }

    #[test]
    fn test_match_all_is_empty_and_group() {
        let filter = FilterSet::match_all();
        assert_eq!(filter.op, FilterOp::And);
        assert!(filter.items.is_empty());
    }
}
