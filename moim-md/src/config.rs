//! Configuration resolution for moim-md
//!
//! Multi-tier resolution with ENV → TOML → compiled default priority. The
//! TOML file is `moim-md.toml` in the platform configuration directory;
//! environment variables use the `MOIM_` prefix.

use moim_common::{config as common_config, Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// Records per visible page (client-side pagination)
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Background poll cadence
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 180;
/// Page-size hint passed through to the feed
pub const DEFAULT_FETCH_SIZE_HINT: u32 = 100;
/// Feed request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// `moim-md.toml` file shape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub feed_base_url: Option<String>,
    pub page_size: Option<usize>,
    pub poll_interval_secs: Option<u64>,
    pub fetch_size_hint: Option<u32>,
    pub mission_id: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

/// Resolved discovery pipeline configuration
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Base URL of the meetings listing endpoint
    pub feed_base_url: String,
    /// Fixed records-per-page constant for client-side pagination
    pub page_size: usize,
    /// Background poll cadence
    pub poll_interval: Duration,
    /// Page-size hint passed through to the feed
    pub fetch_size_hint: u32,
    /// Optional mission scope applied to every feed request
    pub mission_id: Option<String>,
    pub request_timeout: Duration,
}

impl DiscoveryConfig {
    /// Configuration with compiled defaults for everything but the URL
    pub fn new(feed_base_url: impl Into<String>) -> Self {
        Self {
            feed_base_url: feed_base_url.into(),
            page_size: DEFAULT_PAGE_SIZE,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            fetch_size_hint: DEFAULT_FETCH_SIZE_HINT,
            mission_id: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Resolve with ENV → TOML → compiled default priority
    pub fn resolve() -> Result<Self> {
        let toml_config: TomlConfig = match common_config::config_file_path("moim-md") {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading moim-md configuration");
                common_config::load_toml(&path)?
            }
            None => TomlConfig::default(),
        };

        Self::resolve_with(&toml_config, &|name| std::env::var(name).ok())
    }

    /// Resolution against explicit sources; `env` is injected so tests can
    /// run without touching process environment
    fn resolve_with(
        toml_config: &TomlConfig,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let feed_base_url = env("MOIM_FEED_BASE_URL")
            .or_else(|| toml_config.feed_base_url.clone())
            .ok_or_else(|| {
                Error::Config(
                    "Feed base URL not configured. Set MOIM_FEED_BASE_URL or \
                     feed_base_url in moim-md.toml"
                        .to_string(),
                )
            })?;

        let page_size = env_parse(env, "MOIM_PAGE_SIZE")?
            .or(toml_config.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }

        let poll_interval_secs = env_parse(env, "MOIM_POLL_INTERVAL_SECS")?
            .or(toml_config.poll_interval_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
        if poll_interval_secs == 0 {
            return Err(Error::Config(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }

        let fetch_size_hint = env_parse(env, "MOIM_FETCH_SIZE_HINT")?
            .or(toml_config.fetch_size_hint)
            .unwrap_or(DEFAULT_FETCH_SIZE_HINT);

        let mission_id = env("MOIM_MISSION_ID").or_else(|| toml_config.mission_id.clone());

        let request_timeout_secs = env_parse(env, "MOIM_REQUEST_TIMEOUT_SECS")?
            .or(toml_config.request_timeout_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self {
            feed_base_url,
            page_size,
            poll_interval: Duration::from_secs(poll_interval_secs),
            fetch_size_hint,
            mission_id,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

fn env_parse<T: std::str::FromStr>(
    env: &dyn Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<T>> {
    match env(name) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has invalid value: {}", name, value))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_from_minimal_toml() {
        let toml_config = TomlConfig {
            feed_base_url: Some("https://api.moim.example".to_string()),
            ..Default::default()
        };

        let config = DiscoveryConfig::resolve_with(&toml_config, &no_env).unwrap();
        assert_eq!(config.feed_base_url, "https://api.moim.example");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.poll_interval, Duration::from_secs(180));
        assert_eq!(config.fetch_size_hint, DEFAULT_FETCH_SIZE_HINT);
        assert!(config.mission_id.is_none());
    }

    #[test]
    fn test_missing_url_is_config_error() {
        let result = DiscoveryConfig::resolve_with(&TomlConfig::default(), &no_env);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_env_overrides_toml() {
        let toml_config = TomlConfig {
            feed_base_url: Some("https://toml.moim.example".to_string()),
            page_size: Some(20),
            ..Default::default()
        };
        let env_values: HashMap<&str, &str> = [
            ("MOIM_FEED_BASE_URL", "https://env.moim.example"),
            ("MOIM_PAGE_SIZE", "5"),
        ]
        .into_iter()
        .collect();
        let env = move |name: &str| env_values.get(name).map(|v| v.to_string());

        let config = DiscoveryConfig::resolve_with(&toml_config, &env).unwrap();
        assert_eq!(config.feed_base_url, "https://env.moim.example");
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn test_invalid_env_number_is_config_error() {
        let toml_config = TomlConfig {
            feed_base_url: Some("https://api.moim.example".to_string()),
            ..Default::default()
        };
        let env = |name: &str| {
            (name == "MOIM_PAGE_SIZE").then(|| "lots".to_string())
        };

        let result = DiscoveryConfig::resolve_with(&toml_config, &env);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let toml_config = TomlConfig {
            feed_base_url: Some("https://api.moim.example".to_string()),
            page_size: Some(0),
            ..Default::default()
        };

        let result = DiscoveryConfig::resolve_with(&toml_config, &no_env);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
