//! Pipeline-version API endpoints

use crate::PipelineClient;
use crate::error::Result;
use logsift_core::domain::history::HistoryEntry;
use logsift_core::domain::pipeline::Pipeline;
use logsift_core::dto::pipeline::{SavePipelines, VersionSummary};

impl PipelineClient {
    // =============================================================================
    // Pipeline Versions
    // =============================================================================

    /// Save a new pipeline version
    ///
    /// # Arguments
    /// * `req` - The stages to save plus authorship
    ///
    /// # Returns
    /// The new version materialized as a full pipeline definition
    pub async fn save(&self, req: SavePipelines) -> Result<Pipeline> {
        let url = format!("{}/pipeline/save", self.base_url);
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// List all pipeline versions as lightweight summaries
    pub async fn list_versions(&self) -> Result<Vec<VersionSummary>> {
        let url = format!("{}/pipeline/list", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Get the newest pipeline version as a full definition
    pub async fn latest(&self) -> Result<Pipeline> {
        let url = format!("{}/pipeline/latest", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Get a specific pipeline version as a full definition
    ///
    /// # Arguments
    /// * `version` - The version number
    pub async fn get_version(&self, version: i32) -> Result<Pipeline> {
        let url = format!("{}/pipeline/{}", self.base_url, version);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Get the full change history, newest first
    ///
    /// An element with no saved versions yields an empty list.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        let url = format!("{}/pipeline/history", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
