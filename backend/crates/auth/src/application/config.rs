//! Application Configuration
//!
//! Configuration for the identity-provider connection.

use platform::http::HttpClientConfig;

/// Identity provider configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the provider's auth REST surface
    /// (e.g. `https://<project>.supabase.co/auth/v1`)
    pub base_url: String,
    /// API key sent as the `apikey` header on every provider call
    pub api_key: String,
    /// Outbound client settings
    pub http: HttpClientConfig,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9999".to_string(),
            api_key: String::new(),
            http: HttpClientConfig::default(),
        }
    }
}

impl IdentityConfig {
    /// Create config for development (local provider, no key)
    pub fn development() -> Self {
        Self::default()
    }

    /// Create config from explicit values, trimming a trailing slash so
    /// endpoint joining stays predictable
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            api_key: api_key.into(),
            http: HttpClientConfig::default(),
        }
    }
}
