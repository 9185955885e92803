use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::ClientError;

/// Backend origin used when running against a local development server.
pub const DEVELOPMENT_ORIGIN: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Explicit origin override; wins over the environment default
    pub base_url: Option<String>,
    /// Origin the app is served from in production
    pub origin: Option<String>,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub config_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("CLARIFY_API_URL") {
            if !v.trim().is_empty() {
                self.api.base_url = Some(v.trim().to_string());
            }
        }
        if let Ok(v) = env::var("CLARIFY_ORIGIN") {
            if !v.trim().is_empty() {
                self.api.origin = Some(v.trim().to_string());
            }
        }
        if let Ok(v) = env::var("CLARIFY_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("CLARIFY_CONFIG_DIR") {
            self.storage.config_dir = Some(PathBuf::from(v));
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: None,
                origin: None,
                enable_request_logging: true,
            },
            storage: StorageConfig { config_dir: None },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: None,
                origin: None,
                enable_request_logging: false,
            },
            storage: StorageConfig { config_dir: None },
        }
    }

    /// Resolve the backend origin every page talks to.
    ///
    /// One resolver for all pages: an explicit override first, then loopback in
    /// development, then the same-origin deployment address in production.
    pub fn base_url(&self) -> Result<String, ClientError> {
        if let Some(url) = &self.api.base_url {
            return Ok(url.trim_end_matches('/').to_string());
        }

        match self.environment {
            Environment::Development => Ok(DEVELOPMENT_ORIGIN.to_string()),
            Environment::Production => self
                .api
                .origin
                .as_ref()
                .map(|o| o.trim_end_matches('/').to_string())
                .ok_or_else(|| {
                    ClientError::Config(
                        "CLARIFY_ORIGIN or CLARIFY_API_URL must be set in production".to_string(),
                    )
                }),
        }
    }

    /// Directory holding the durable session file
    pub fn config_dir(&self) -> Result<PathBuf, ClientError> {
        if let Some(dir) = &self.storage.config_dir {
            return Ok(dir.clone());
        }
        let home = env::var("HOME")
            .map_err(|_| ClientError::Config("HOME environment variable not set".to_string()))?;
        Ok(PathBuf::from(home).join(".config").join("clarify"))
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
