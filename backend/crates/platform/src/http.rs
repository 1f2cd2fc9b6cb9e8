//! Outbound HTTP Client Construction
//!
//! One place to build `reqwest` clients so every upstream call shares the
//! same timeout and TLS posture.

use std::time::Duration;

/// Outbound client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Total per-request timeout
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// User-Agent sent on upstream requests
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            user_agent: "kubito-backend".to_string(),
        }
    }
}

/// Build a `reqwest` client from the given configuration.
pub fn build_client(config: &HttpClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()
}
