//! Deploy DTOs for inter-service communication

use serde::{Deserialize, Serialize};

/// Deployment outcome reported by the deployment agent to the server
///
/// An empty message is replaced server-side with a standard result string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployStatusUpdate {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
