use crate::error::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ENV_API_BASE: &str = "FLIPBOOK_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "FLIPBOOK_TIMEOUT_SECS";
pub const ENV_FLIP_MS: &str = "FLIPBOOK_FLIP_MS";

/// Runtime settings for the viewer and its store client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Root of the document store, e.g. `http://localhost:8000`
    pub api_base: String,
    pub request_timeout_secs: u64,
    /// Duration of one page-turn animation
    pub flipping_time_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            flipping_time_ms: 600,
        }
    }
}

impl ViewerConfig {
    /// Defaults overlaid with `FLIPBOOK_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ViewerConfig::from_env`] with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup(ENV_API_BASE) {
            config.api_base = base;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.request_timeout_secs = parse_number(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_FLIP_MS) {
            config.flipping_time_ms = parse_number(ENV_FLIP_MS, &raw)?;
        }

        config.api_base_url()?;
        Ok(config)
    }

    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|_| ConfigError::InvalidApiBase(self.api_base.clone()))?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidApiBase(self.api_base.clone()));
        }
        // joins must append below the base, not replace its last segment
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn flipping_time(&self) -> Duration {
        Duration::from_millis(self.flipping_time_ms)
    }
}

fn parse_number(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = ViewerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.flipping_time(), Duration::from_millis(600));
    }

    #[test]
    fn env_overrides() {
        let config = ViewerConfig::from_lookup(lookup(&[
            (ENV_API_BASE, "https://books.example.com/viewer"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_FLIP_MS, " 250 "),
        ]))
        .unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.flipping_time_ms, 250);
        assert_eq!(
            config.api_base_url().unwrap().as_str(),
            "https://books.example.com/viewer/"
        );
    }

    #[test]
    fn rejects_bad_values() {
        let err = ViewerConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS,
                ..
            }
        ));

        let err = ViewerConfig::from_lookup(lookup(&[(ENV_API_BASE, "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiBase(_)));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: ViewerConfig = serde_json::from_str(r#"{"flipping_time_ms": 900}"#).unwrap();
        assert_eq!(config.flipping_time_ms, 900);
        assert_eq!(config.api_base, "http://localhost:8000");
    }
}
