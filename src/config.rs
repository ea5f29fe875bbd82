//! Configuration module

use crate::constants;

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Prediction backend base URL (no trailing slash)
    pub api_url: String,

    /// Route prefix of the Data Lab endpoints
    pub datalab_prefix: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Threshold used when a prediction omits `threshold_used`
    pub fallback_threshold: f64,

    /// Live sensor polling interval in seconds
    pub live_interval_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: constants::DEFAULT_API_URL.to_string(),
            datalab_prefix: constants::DEFAULT_DATALAB_PREFIX.to_string(),
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
            fallback_threshold: constants::DEFAULT_FALLBACK_THRESHOLD,
            live_interval_secs: constants::DEFAULT_LIVE_INTERVAL_SECS,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            api_url: constants::get_api_url(),
            datalab_prefix: constants::get_datalab_prefix(),
            timeout_secs: constants::get_timeout_secs(),
            fallback_threshold: constants::get_fallback_threshold(),
            live_interval_secs: constants::get_live_interval_secs(),
        }
    }

    /// Same config pointed at another backend
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Absolute URL of a top-level endpoint, e.g. `/predict`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Absolute URL of a Data Lab endpoint, e.g. `/eda/{id}`
    pub fn datalab_endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.api_url, self.datalab_prefix, path)
    }
}
