use std::env;

use geoconvert_core::config::LayeredConfig;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    /// Delimiters, default hemisphere and placemark prefix
    pub conversion: LayeredConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("GEOCONVERT_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3001);

        let cors_origin = env::var("GEOCONVERT_CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            port,
            cors_origin,
            conversion: LayeredConfig::with_defaults().load_from_env(),
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
