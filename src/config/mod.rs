use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

/// Key used when running in development without `LEARNING_API_KEY`
pub const DEV_API_KEY: &str = "your-secret-api-key";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub decks_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub enable_cors: bool,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("enable_cors", &self.enable_cors)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("LEARNING_API_KEY must be set outside development")]
    MissingApiKey,

    #[error("LEARNING_API_KEY must not be empty")]
    EmptyApiKey,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let environment = match var("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(var)
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        // Server overrides
        if let Some(v) = var("LEARNING_API_HOST") {
            self.server.host = v.parse().unwrap_or(self.server.host);
        }
        if let Some(v) = var("LEARNING_API_PORT").or_else(|| var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Storage overrides
        if let Some(v) = var("DECKS_DIR") {
            if !v.trim().is_empty() {
                self.storage.decks_dir = PathBuf::from(v);
            }
        }

        // API overrides
        if let Some(v) = var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Some(v) = var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Some(v) = var("LEARNING_API_KEY") {
            self.security.api_key = Some(v);
        }
        if let Some(v) = var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Some(v) = var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    /// Reject configurations the server must not start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.security.api_key.as_deref() {
            None => Err(ConfigError::MissingApiKey),
            Some(key) if key.is_empty() => Err(ConfigError::EmptyApiKey),
            Some(_) => Ok(()),
        }
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.validate()?;
        self.security.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }

    pub fn uses_dev_api_key(&self) -> bool {
        self.security.api_key.as_deref() == Some(DEV_API_KEY)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }

    fn base(environment: Environment) -> Self {
        Self {
            environment,
            server: ServerConfig {
                host: IpAddr::from([0, 0, 0, 0]),
                port: 8000,
            },
            storage: StorageConfig {
                decks_dir: PathBuf::from("shared").join("data").join("decks"),
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                api_key: None,
                enable_cors: true,
                cors_origins: Vec::new(),
            },
        }
    }

    pub fn development() -> Self {
        let mut config = Self::base(Environment::Development);
        config.security.api_key = Some(DEV_API_KEY.to_string());
        config
    }

    pub fn staging() -> Self {
        let mut config = Self::base(Environment::Staging);
        config.api.max_request_size_bytes = 5 * 1024 * 1024; // 5MB
        config
    }

    pub fn production() -> Self {
        let mut config = Self::base(Environment::Production);
        config.api.enable_request_logging = false;
        config.api.max_request_size_bytes = 2 * 1024 * 1024; // 2MB
        config.security.enable_cors = false;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::from_vars(vars(&[]));
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.api_key(), Ok(DEV_API_KEY));
        assert!(config.uses_dev_api_key());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.storage.decks_dir, PathBuf::from("shared/data/decks"));
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.validate(), Err(ConfigError::MissingApiKey));
        assert!(!config.security.enable_cors);
        assert_eq!(config.api.max_request_size_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn env_overrides_apply() {
        let config = AppConfig::from_vars(vars(&[
            ("APP_ENV", "prod"),
            ("LEARNING_API_KEY", "k"),
            ("DECKS_DIR", "/srv/decks"),
            ("PORT", "9000"),
            ("SECURITY_CORS_ORIGINS", "https://a.example, ,https://b.example"),
        ]));

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.api_key(), Ok("k"));
        assert_eq!(config.storage.decks_dir, PathBuf::from("/srv/decks"));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.security.cors_origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn specific_port_wins_over_generic_port() {
        let config = AppConfig::from_vars(vars(&[("PORT", "9000"), ("LEARNING_API_PORT", "9100")]));
        assert_eq!(config.server.port, 9100);
    }

    #[test]
    fn unparseable_values_keep_defaults() {
        let config = AppConfig::from_vars(vars(&[
            ("LEARNING_API_PORT", "eighty"),
            ("API_MAX_REQUEST_SIZE_BYTES", "lots"),
        ]));
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.api.max_request_size_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let config = AppConfig::from_vars(vars(&[("LEARNING_API_KEY", "")]));
        assert_eq!(config.validate(), Err(ConfigError::EmptyApiKey));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig::from_vars(vars(&[("LEARNING_API_KEY", "hunter2")]));
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
