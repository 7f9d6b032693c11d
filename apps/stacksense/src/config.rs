//! # Configuration
//!
//! Layered settings for the StackSense binary. Later layers win:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config`, or `stacksense.toml` in the working directory)
//! 3. Environment variables
//! 4. Command-line flags
//!
//! ## Environment Variables
//!
//! - `STACKSENSE_CATALOG`: Path to the catalog JSON file
//! - `STACKSENSE_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all
//! - `STACKSENSE_RATE_LIMIT`: Requests per second (0 disables)
//! - `STACKSENSE_LOG_FORMAT`: `text` or `json`

use serde::{Deserialize, Serialize};
use stacksense_core::{DEFAULT_CATALOG_PATH, StackError};
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "stacksense.toml";

/// Maximum size of a configuration file (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

pub const ENV_CATALOG: &str = "STACKSENSE_CATALOG";
pub const ENV_CORS_ORIGINS: &str = "STACKSENSE_CORS_ORIGINS";
pub const ENV_RATE_LIMIT: &str = "STACKSENSE_RATE_LIMIT";
pub const ENV_LOG_FORMAT: &str = "STACKSENSE_LOG_FORMAT";

// =============================================================================
// SETTINGS
// =============================================================================

/// Complete application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    pub cors: CorsSettings,
    pub rate_limit: RateLimitSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub body_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            body_limit_bytes: 2 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogSettings {
    pub path: PathBuf,
    /// Enables `POST /catalog/reload`.
    pub allow_reload: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CATALOG_PATH),
            allow_reload: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsSettings {
    /// Allowed origins. A single `"*"` allows every origin.
    pub origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

impl CorsSettings {
    #[must_use]
    pub fn allows_any(&self) -> bool {
        self.origins.iter().any(|o| o.trim() == "*")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RateLimitSettings {
    /// Requests per second across all clients; 0 disables limiting.
    pub requests_per_second: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            requests_per_second: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parse `text` / `json`, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub format: LogFormat,
    /// Default `EnvFilter` directive; `RUST_LOG` still takes precedence.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            filter: "stacksense=info,tower_http=debug".to_string(),
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl Settings {
    /// Parse settings from TOML text. Missing sections and keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, StackError> {
        toml::from_str(content).map_err(|e| StackError::Config(format!("Invalid TOML: {}", e)))
    }

    /// Read settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, StackError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            StackError::Config(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(StackError::Config(format!(
                "Config '{}' is {} bytes, maximum is {} bytes",
                path.display(),
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            StackError::Config(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            StackError::Config(format!("Invalid TOML in '{}': {}", path.display(), e))
        })
    }

    /// Defaults, then the config file, then the process environment.
    ///
    /// An explicit `path` must exist. Without one, `stacksense.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, StackError> {
        let mut settings = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)?
                } else {
                    Self::default()
                }
            }
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Apply environment overrides, reading variables through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), StackError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_CATALOG).filter(|v| !v.trim().is_empty()) {
            self.catalog.path = PathBuf::from(path.trim());
        }

        if let Some(origins) = lookup(ENV_CORS_ORIGINS) {
            let parsed: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
            if !parsed.is_empty() {
                self.cors.origins = parsed;
            }
        }

        if let Some(rate) = lookup(ENV_RATE_LIMIT) {
            self.rate_limit.requests_per_second = rate.trim().parse().map_err(|_| {
                StackError::Config(format!(
                    "{} must be a non-negative integer, got '{}'",
                    ENV_RATE_LIMIT, rate
                ))
            })?;
        }

        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = LogFormat::parse(&format).ok_or_else(|| {
                StackError::Config(format!(
                    "{} must be 'text' or 'json', got '{}'",
                    ENV_LOG_FORMAT, format
                ))
            })?;
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.catalog.path, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert!(!settings.catalog.allow_reload);
        assert_eq!(settings.rate_limit.requests_per_second, 100);
        assert!(!settings.cors.allows_any());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            [server]
            port = 9000

            [catalog]
            allow_reload = true
            "#,
        )
        .expect("parse");

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert!(settings.catalog.allow_reload);
        assert_eq!(settings.rate_limit, RateLimitSettings::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = Settings::from_toml_str("[server]\nprot = 9000\n");
        assert!(matches!(result, Err(StackError::Config(_))));
    }

    #[test]
    fn log_format_in_toml() {
        let settings = Settings::from_toml_str("[logging]\nformat = \"json\"\n").expect("parse");
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn env_overrides_file_values() {
        let mut settings = Settings::from_toml_str("[rate_limit]\nrequests_per_second = 5\n")
            .expect("parse");
        settings
            .apply_env(env(&[
                (ENV_RATE_LIMIT, "0"),
                (ENV_CATALOG, "/srv/catalog.json"),
                (ENV_CORS_ORIGINS, "https://a.example, https://b.example,"),
                (ENV_LOG_FORMAT, "JSON"),
            ]))
            .expect("apply");

        assert_eq!(settings.rate_limit.requests_per_second, 0);
        assert_eq!(settings.catalog.path, PathBuf::from("/srv/catalog.json"));
        assert_eq!(
            settings.cors.origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn wildcard_cors_from_env() {
        let mut settings = Settings::default();
        settings
            .apply_env(env(&[(ENV_CORS_ORIGINS, "*")]))
            .expect("apply");
        assert!(settings.cors.allows_any());
    }

    #[test]
    fn invalid_env_values_are_errors() {
        let mut settings = Settings::default();
        assert!(settings.apply_env(env(&[(ENV_RATE_LIMIT, "fast")])).is_err());
        assert!(settings.apply_env(env(&[(ENV_LOG_FORMAT, "xml")])).is_err());
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("stacksense.toml");
        std::fs::write(&path, "[server]\nhost = \"0.0.0.0\"\n").expect("write");

        let settings = Settings::from_file(&path).expect("load");
        assert_eq!(settings.server.host, "0.0.0.0");

        let missing = Settings::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(StackError::Config(_))));
    }
}
