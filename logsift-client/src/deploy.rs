//! Deploy-lifecycle API endpoints

use crate::PipelineClient;
use crate::error::Result;
use logsift_core::domain::history::HistoryEntry;
use logsift_core::dto::deploy::DeployStatusUpdate;

impl PipelineClient {
    // =============================================================================
    // Deploy Lifecycle
    // =============================================================================

    /// Start deploying a pipeline version
    ///
    /// # Arguments
    /// * `version` - The version number to deploy
    ///
    /// # Returns
    /// The version record, now IN_PROGRESS
    pub async fn deploy(&self, version: i32) -> Result<HistoryEntry> {
        let url = format!("{}/pipeline/{}/deploy", self.base_url, version);
        let response = self.client.post(&url).send().await?;

        self.handle_response(response).await
    }

    /// Report the outcome of a deployment attempt
    ///
    /// Used by the deployment agent once the collector configuration has been
    /// applied (or failed to apply).
    ///
    /// # Arguments
    /// * `version` - The version the report is for
    /// * `update` - Success flag and optional result message
    pub async fn report_deploy_status(
        &self,
        version: i32,
        update: DeployStatusUpdate,
    ) -> Result<HistoryEntry> {
        let url = format!("{}/pipeline/{}/status", self.base_url, version);
        let response = self.client.post(&url).json(&update).send().await?;

        self.handle_response(response).await
    }
}
