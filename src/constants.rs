//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default prediction backend, only edit this file.

/// Default prediction backend URL
///
/// Fallback when `WQ_API_URL` is not set.
/// For development: http://localhost:8000
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Route prefix of the Data Lab endpoints
pub const DEFAULT_DATALAB_PREFIX: &str = "/api/datalab";

/// Decision threshold used when the backend omits `threshold_used`
pub const DEFAULT_FALLBACK_THRESHOLD: f64 = 0.35;

/// Per-request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Live sensor polling interval (seconds)
pub const DEFAULT_LIVE_INTERVAL_SECS: u64 = 3;

/// Number of attributions shown on a result card
pub const TOP_FEATURES: usize = 5;

/// Number of global importances shown on the stats dashboard
pub const TOP_IMPORTANCES: usize = 7;

/// Reference R2 (percent) the forecasting model is compared against
pub const R2_TARGET_PERCENT: f64 = 80.0;

/// Approximate baseline recall (percent) of the unoptimized classifier
pub const BASELINE_RECALL_PERCENT: f64 = 65.0;

/// Version of the backend response contract this client validates against
pub const CONTRACT_VERSION: u8 = 1;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Water Quality AI";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get backend URL from environment or use default
pub fn get_api_url() -> String {
    std::env::var("WQ_API_URL")
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Get Data Lab route prefix from environment or use default
pub fn get_datalab_prefix() -> String {
    std::env::var("WQ_DATALAB_PREFIX")
        .unwrap_or_else(|_| DEFAULT_DATALAB_PREFIX.to_string())
}

/// Get request timeout from environment or use default
pub fn get_timeout_secs() -> u64 {
    positive_secs("WQ_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
}

/// Get fallback threshold from environment or use default.
///
/// Values outside (0, 1) are ignored.
pub fn get_fallback_threshold() -> f64 {
    std::env::var("WQ_FALLBACK_THRESHOLD")
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|t| t.is_finite() && *t > 0.0 && *t < 1.0)
        .unwrap_or(DEFAULT_FALLBACK_THRESHOLD)
}

/// Get live polling interval from environment or use default
pub fn get_live_interval_secs() -> u64 {
    positive_secs("WQ_LIVE_INTERVAL_SECS", DEFAULT_LIVE_INTERVAL_SECS)
}

/// Non-zero whole seconds from `var`; zero or garbage falls back
fn positive_secs(var: &str, default: u64) -> u64 {
    std::env::var(var)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|s| *s > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seconds_falls_back() {
        std::env::set_var("WQ_TEST_ZERO_SECS", "0");
        assert_eq!(positive_secs("WQ_TEST_ZERO_SECS", 30), 30);

        std::env::set_var("WQ_TEST_ZERO_SECS", "12");
        assert_eq!(positive_secs("WQ_TEST_ZERO_SECS", 30), 12);

        assert_eq!(positive_secs("WQ_TEST_UNSET_SECS", 5), 5);
    }
}
