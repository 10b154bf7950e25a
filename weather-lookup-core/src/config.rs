use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::DEFAULT_CITY;

pub const ENV_API_KEY: &str = "WEATHER_API_KEY";
pub const ENV_DEFAULT_CITY: &str = "WEATHER_DEFAULT_CITY";
pub const ENV_ENDPOINT: &str = "WEATHER_API_URL";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Coimbatore"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,

    /// City searched at startup.
    pub default_city: Option<String>,

    /// Override for the OpenWeather current-weather endpoint.
    pub endpoint: Option<String>,
}

impl Config {
    /// Load config from disk, then apply `.env` and process environment overrides.
    pub fn load_with_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e).context("Failed to read .env file"),
        }

        let mut cfg = Self::load()?;
        cfg.apply_overrides(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-lookup", "weather-lookup")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay non-empty values from `lookup` (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(city) = get(ENV_DEFAULT_CITY) {
            self.default_city = Some(city);
        }
        if let Some(url) = get(ENV_ENDPOINT) {
            self.endpoint = Some(url);
        }
    }

    /// The API key, or an error telling the user how to provide one.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: set {ENV_API_KEY} or run `weather-lookup configure`."
            )
        })
    }

    pub fn default_city(&self) -> &str {
        self.default_city.as_deref().unwrap_or(DEFAULT_CITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn missing_api_key_errors_with_hint() {
        let cfg = Config::default();
        let err = cfg.require_api_key().unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("weather-lookup configure"));
    }

    #[test]
    fn defaults_without_file_or_env() {
        let cfg = Config::default();
        assert_eq!(cfg.default_city(), "Coimbatore");
        assert!(cfg.endpoint.is_none());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = Config {
            api_key: Some("FILE_KEY".into()),
            default_city: Some("Chennai".into()),
            endpoint: None,
        };

        cfg.apply_overrides(env(&[
            (ENV_API_KEY, "ENV_KEY"),
            (ENV_ENDPOINT, "http://localhost:8080/weather"),
        ]));

        assert_eq!(cfg.require_api_key().unwrap(), "ENV_KEY");
        assert_eq!(cfg.default_city(), "Chennai");
        assert_eq!(cfg.endpoint.as_deref(), Some("http://localhost:8080/weather"));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut cfg = Config {
            api_key: Some("FILE_KEY".into()),
            ..Default::default()
        };

        cfg.apply_overrides(env(&[(ENV_API_KEY, "  "), (ENV_DEFAULT_CITY, "")]));

        assert_eq!(cfg.require_api_key().unwrap(), "FILE_KEY");
        assert_eq!(cfg.default_city(), "Coimbatore");
    }

    #[test]
    fn toml_roundtrip_keeps_fields() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            default_city: Some("Madurai".into()),
            endpoint: None,
        };

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back: Config = toml::from_str(&text).expect("parse");

        assert_eq!(back.api_key.as_deref(), Some("KEY"));
        assert_eq!(back.default_city(), "Madurai");
        assert!(back.endpoint.is_none());
    }
}
