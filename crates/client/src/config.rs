//! Client configuration loaded from environment variables.

/// Connection settings for the forecasting backend.
///
/// All fields have defaults suitable for local development; override
/// via environment variables in production.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API (no trailing slash required).
    pub base_url: String,
    /// Per-request timeout in seconds (default: `20`).
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                        |
    /// |------------------------------|--------------------------------|
    /// | `FLOE_API_URL`               | `http://localhost:9000/seaice` |
    /// | `FLOE_REQUEST_TIMEOUT_SECS`  | `20`                           |
    pub fn from_env() -> Self {
        let base_url = std::env::var("FLOE_API_URL")
            .unwrap_or_else(|_| "http://localhost:9000/seaice".into());

        let request_timeout_secs: u64 = std::env::var("FLOE_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("FLOE_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            request_timeout_secs,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000/seaice".into(),
            request_timeout_secs: 20,
        }
    }
}
