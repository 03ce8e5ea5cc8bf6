use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ai::retry::RetryPolicy;
use crate::error::AppError;

pub const DEFAULT_GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-09-2025:generateContent";

/// Settings for the text-generation client.
///
/// Resolved once at startup and passed by value into the recipe pipeline;
/// nothing below the request layer reads the process environment.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

// Hand-written so the credential never ends up in a log line.
impl std::fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

fn default_endpoint() -> String {
    DEFAULT_GEMINI_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_retries() -> u32 {
    2
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

impl GenerationConfig {
    /// The credential, if one is set and not blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Per-attempt timeout. A `timeout_ms` of 0 means "unset" and falls back
    /// to the 20s default.
    pub fn timeout(&self) -> Duration {
        match self.timeout_ms {
            0 => Duration::from_millis(default_timeout_ms()),
            ms => Duration::from_millis(ms),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub generation: GenerationConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            generation: GenerationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the path to the config file in the user config dir
    pub fn config_path() -> Result<PathBuf, AppError> {
        let data_dir = dirs::config_dir()
            .ok_or_else(|| AppError::ConfigError("Cannot find config directory".into()))?;
        Ok(data_dir.join("nutritrack").join("config.json"))
    }

    /// Load config from disk (or defaults), then apply environment overrides.
    pub fn load() -> Result<Self, AppError> {
        let base = match Self::config_path() {
            Ok(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)?;
                serde_json::from_str(&contents)
                    .map_err(|e| AppError::ConfigError(format!("{}: {}", path.display(), e)))?
            }
            _ => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup. `lookup` is `std::env::var` in
    /// production and a map in tests.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("GOOGLE_API_KEY")) {
            self.generation.api_key = Some(key);
        }
        if let Some(endpoint) = non_empty("GEMINI_ENDPOINT") {
            self.generation.endpoint = endpoint;
        }
        if let Some(raw) = non_empty("GEMINI_TIMEOUT_MS") {
            self.generation.timeout_ms = parse_var("GEMINI_TIMEOUT_MS", &raw)?;
        }
        if let Some(raw) = non_empty("GEMINI_MAX_RETRIES") {
            self.generation.max_retries = parse_var("GEMINI_MAX_RETRIES", &raw)?;
        }
        if let Some(host) = non_empty("HOST") {
            self.host = host;
        }
        if let Some(raw) = non_empty("PORT") {
            self.port = parse_var("PORT", &raw)?;
        }
        if let Some(level) = non_empty("LOG_LEVEL") {
            self.log_level = level;
        }
        Ok(self)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::ConfigError(format!("{} has invalid value '{}'", name, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.generation.timeout_ms, 20_000);
        assert_eq!(config.generation.max_retries, 2);
        assert_eq!(config.generation.endpoint, DEFAULT_GEMINI_ENDPOINT);
        assert!(config.generation.credential().is_none());
    }

    #[test]
    fn test_partial_json_uses_field_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "port": 8080, "generation": { "max_retries": 5 } }"#).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.generation.max_retries, 5);
        assert_eq!(config.generation.timeout_ms, 20_000);
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default()
            .with_overrides(lookup(&[
                ("GEMINI_API_KEY", "abc"),
                ("GEMINI_ENDPOINT", "http://localhost:9999/gen"),
                ("GEMINI_TIMEOUT_MS", "1500"),
                ("GEMINI_MAX_RETRIES", "0"),
                ("PORT", "7000"),
            ]))
            .unwrap();
        assert_eq!(config.generation.credential(), Some("abc"));
        assert_eq!(config.generation.endpoint, "http://localhost:9999/gen");
        assert_eq!(config.generation.timeout(), Duration::from_millis(1500));
        assert_eq!(config.generation.max_retries, 0);
        assert_eq!(config.port, 7000);
    }

    #[test]
    fn test_google_api_key_is_secondary() {
        let config = AppConfig::default()
            .with_overrides(lookup(&[("GOOGLE_API_KEY", "google")]))
            .unwrap();
        assert_eq!(config.generation.credential(), Some("google"));

        let config = AppConfig::default()
            .with_overrides(lookup(&[("GEMINI_API_KEY", "gemini"), ("GOOGLE_API_KEY", "google")]))
            .unwrap();
        assert_eq!(config.generation.credential(), Some("gemini"));
    }

    #[test]
    fn test_blank_credential_counts_as_absent() {
        let config = GenerationConfig {
            api_key: Some("   ".to_string()),
            ..GenerationConfig::default()
        };
        assert!(config.credential().is_none());
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let err = AppConfig::default()
            .with_overrides(lookup(&[("GEMINI_TIMEOUT_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let config = AppConfig::default()
            .with_overrides(lookup(&[("GEMINI_TIMEOUT_MS", "0")]))
            .unwrap();
        assert_eq!(config.generation.timeout(), Duration::from_secs(20));

        let config: AppConfig =
            serde_json::from_str(r#"{ "generation": { "timeout_ms": 0 } }"#).unwrap();
        assert_eq!(config.generation.timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_debug_redacts_credential() {
        let config = GenerationConfig {
            api_key: Some("super-secret".to_string()),
            ..GenerationConfig::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
