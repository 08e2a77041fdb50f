//! Application configuration
//!
//! Loaded once at startup from a TOML file, then overridden by a small set of
//! environment variables. Nothing below the bootstrap code reads the process
//! environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// `~/.config/address-utility/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("address-utility")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub geocoding: GeocodingConfig,
    pub auth: AuthConfig,
    pub activity: ActivityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./address-utility.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Which geocoding backend serves verification requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Google,
    Mapbox,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::Mapbox => "mapbox",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(ProviderKind::Google),
            "mapbox" => Ok(ProviderKind::Mapbox),
            other => Err(ConfigError::Invalid(format!(
                "unknown geocoding provider '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub provider: ProviderKind,
    /// Upper bound for a single outbound provider call
    pub timeout_secs: u64,
    pub google_base_url: String,
    pub mapbox_base_url: String,
    pub google_api_key: Option<String>,
    pub mapbox_access_token: Option<String>,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Google,
            timeout_secs: 10,
            google_base_url: "https://maps.googleapis.com".to_string(),
            mapbox_base_url: "https://api.mapbox.com".to_string(),
            google_api_key: None,
            mapbox_access_token: None,
        }
    }
}

/// How sessions are resolved from request headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Bearer tokens signed with a shared secret
    #[default]
    Jwt,
    /// Ask the external auth service for the current session
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub mode: AuthMode,
    /// Base URL of the auth service (remote mode)
    pub base_url: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Upper bound for the session lookup call (remote mode)
    pub timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::Jwt,
            base_url: "http://localhost:3000".to_string(),
            jwt_secret: "change-me-in-production".to_string(),
            jwt_issuer: "address-utility".to_string(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    /// Maximum number of entries returned by the activity feed
    pub page_size: u64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self { page_size: 50 }
    }
}

impl AppConfig {
    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Apply process environment overrides. Called once by the bootstrap code.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("GOOGLE_MAPS_API_KEY") {
            self.geocoding.google_api_key = Some(key);
        }
        if let Some(token) = get("MAPBOX_ACCESS_TOKEN") {
            self.geocoding.mapbox_access_token = Some(token);
        }
        if let Some(provider) = get("GEOCODING_PROVIDER") {
            self.geocoding.provider = provider.parse()?;
        }
        if let Some(url) = get("BETTER_AUTH_URL") {
            self.auth.base_url = url;
        }
        if let Some(secret) = get("AUTH_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database.url = url;
        }
        Ok(())
    }

    /// Credentials for the selected provider, if configured.
    pub fn provider_credentials(&self) -> Option<&str> {
        match self.geocoding.provider {
            ProviderKind::Google => self.geocoding.google_api_key.as_deref(),
            ProviderKind::Mapbox => self.geocoding.mapbox_access_token.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.geocoding.provider, ProviderKind::Google);
        assert_eq!(cfg.geocoding.timeout_secs, 10);
        assert_eq!(cfg.activity.page_size, 50);
        assert_eq!(cfg.auth.mode, AuthMode::Jwt);
        assert!(cfg.provider_credentials().is_none());
    }

    #[test]
    fn test_partial_toml() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [geocoding]
            provider = "mapbox"
            mapbox_access_token = "pk.test"

            [auth]
            mode = "remote"
            base_url = "http://auth.internal"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.geocoding.provider, ProviderKind::Mapbox);
        assert_eq!(cfg.provider_credentials(), Some("pk.test"));
        assert_eq!(cfg.auth.mode, AuthMode::Remote);
        assert_eq!(cfg.auth.base_url, "http://auth.internal");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("GOOGLE_MAPS_API_KEY", "g-key"),
            ("MAPBOX_ACCESS_TOKEN", ""),
            ("BETTER_AUTH_URL", "https://auth.example.com"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]
        .into_iter()
        .collect();

        let mut cfg = AppConfig::default();
        cfg.apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(cfg.geocoding.google_api_key.as_deref(), Some("g-key"));
        assert!(cfg.geocoding.mapbox_access_token.is_none());
        assert_eq!(cfg.auth.base_url, "https://auth.example.com");
        assert_eq!(cfg.database.url, "sqlite::memory:");
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let mut cfg = AppConfig::default();
        let result = cfg.apply_overrides(|k| {
            (k == "GEOCODING_PROVIDER").then(|| "here".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let cfg = AppConfig::load(Path::new("/nonexistent/address-utility.toml")).unwrap();
        assert_eq!(cfg.server.port, 8080);
    }
}
