//! Stage operation domain types
//!
//! An operation is one atomic transformation step within a stage's config
//! chain. Operations are tagged by `type` on the wire; each kind carries only
//! its relevant fields on top of the common id/output/orderId/enabled/name
//! set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One transformation step within a stage's operation chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    /// Id of the next operation in the chain; absent on the chain tail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(rename = "orderId")]
    pub order_id: i32,
    pub enabled: bool,
    pub name: String,
    #[serde(flatten)]
    pub kind: OperationKind,
}

impl Operation {
    /// Wire name of this operation's kind (the `type` tag)
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            OperationKind::RegexParser { .. } => "regex_parser",
            OperationKind::GrokParser { .. } => "grok_parser",
            OperationKind::JsonParser { .. } => "json_parser",
            OperationKind::Add { .. } => "add",
            OperationKind::Remove { .. } => "remove",
            OperationKind::Move { .. } => "move",
            OperationKind::Copy { .. } => "copy",
            OperationKind::TimeParser { .. } => "time_parser",
            OperationKind::SeverityParser { .. } => "severity_parser",
        }
    }
}

/// Kind-specific payload of an operation, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationKind {
    RegexParser {
        regex: String,
        parse_from: String,
        parse_to: String,
        #[serde(default)]
        on_error: OnError,
    },
    GrokParser {
        pattern: String,
        parse_from: String,
        parse_to: String,
        #[serde(default)]
        on_error: OnError,
    },
    JsonParser {
        parse_from: String,
        parse_to: String,
    },
    Add {
        field: String,
        value: String,
    },
    Remove {
        field: String,
    },
    Move {
        from: String,
        to: String,
    },
    Copy {
        from: String,
        to: String,
    },
    TimeParser {
        parse_from: String,
        layout_type: String,
        layout: String,
    },
    SeverityParser {
        parse_from: String,
        #[serde(default)]
        mapping: HashMap<String, Vec<String>>,
        #[serde(default)]
        overwrite_text: bool,
    },
}

/// Policy applied when a parse operation fails on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// Pass the record through unmodified
    Send,
    /// Drop the record
    Drop,
}

impl Default for OnError {
    fn default() -> Self {
        OnError::Send
    }
}
