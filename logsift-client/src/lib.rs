//! Logsift HTTP Client
//!
//! A simple, type-safe HTTP client for communicating with the Logsift server
//! API.
//!
//! This crate provides a unified interface for the CLI and the deployment
//! agent to interact with the server, eliminating code duplication and
//! ensuring consistency.
//!
//! # Example
//!
//! ```no_run
//! use logsift_client::PipelineClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PipelineClient::new("http://localhost:8080");
//!
//!     // Render the change history
//!     for entry in client.history().await? {
//!         println!("v{}: {:?}", entry.version, entry.deploy_status);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod deploy;
mod pipelines;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Logsift server API
///
/// This client provides methods for all server API endpoints, organized
/// into logical groups:
/// - Pipeline versions (save, list, latest, get, history)
/// - Deploy lifecycle (deploy, status reporting)
#[derive(Debug, Clone)]
pub struct PipelineClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl PipelineClient {
    /// Create a new pipeline client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the server API (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use logsift_client::PipelineClient;
    ///
    /// let client = PipelineClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new pipeline client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the server API
    /// * `client` - A configured reqwest Client
    ///
    /// # Example
    /// ```
    /// use logsift_client::PipelineClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = PipelineClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
