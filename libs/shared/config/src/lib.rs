use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_BACKEND_API_URL: &str =
    "https://caresetubackend-g5eacseahxevh5bp.centralindia-01.azurewebsites.net";
pub const DEFAULT_SESSION_STORE_PATH: &str = ".caresetu/session.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_api_url: String,
    pub session_store_path: PathBuf,
    pub bind_address: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_api_url: DEFAULT_BACKEND_API_URL.to_string(),
            session_store_path: PathBuf::from(DEFAULT_SESSION_STORE_PATH),
            bind_address: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            backend_api_url: env::var("BACKEND_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("BACKEND_API_URL not set, using default");
                    DEFAULT_BACKEND_API_URL.to_string()
                }),
            session_store_path: env::var("SESSION_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("SESSION_STORE_PATH not set, using {}", DEFAULT_SESSION_STORE_PATH);
                    PathBuf::from(DEFAULT_SESSION_STORE_PATH)
                }),
            bind_address: env::var("PORTAL_BIND_ADDR")
                .unwrap_or_else(|_| {
                    warn!("PORTAL_BIND_ADDR not set, using {}", DEFAULT_BIND_ADDR);
                    DEFAULT_BIND_ADDR.to_string()
                }),
        };

        if !config.is_configured() {
            warn!("Portal not fully configured - backend URL is empty");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.backend_api_url.is_empty()
            && !self.session_store_path.as_os_str().is_empty()
    }

    /// Joins an API path onto the backend base URL.
    pub fn backend_url(&self, path: &str) -> String {
        format!("{}{}", self.backend_api_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_production_backend() {
        let config = AppConfig::default();
        assert_eq!(config.backend_api_url, DEFAULT_BACKEND_API_URL);
        assert!(config.is_configured());
    }

    #[test]
    fn backend_url_joins_paths() {
        let config = AppConfig {
            backend_api_url: "http://localhost:8000".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            config.backend_url("/api/v1/doctor/signup"),
            "http://localhost:8000/api/v1/doctor/signup"
        );
    }

    #[test]
    fn empty_backend_url_is_not_configured() {
        let config = AppConfig {
            backend_api_url: String::new(),
            ..AppConfig::default()
        };
        assert!(!config.is_configured());
    }
}
