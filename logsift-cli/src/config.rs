//! Configuration module
//!
//! Handles CLI configuration including the server URL and other settings.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the Logsift server
    pub server_url: String,
}
