use crate::banners::ROTATION_INTERVAL;
use crate::gateway::types::DEFAULT_API_URL;
use crate::gateway::GatewayConfig;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

pub const API_URL_VAR: &str = "LISTINGS_API_URL";
pub const TIMEOUT_VAR: &str = "LISTINGS_API_TIMEOUT_SECS";
pub const BANNER_INTERVAL_VAR: &str = "LISTINGS_BANNER_INTERVAL_MS";

/// Runtime settings, read from the environment (and `.env` if present)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub banner_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: GatewayConfig::default().timeout,
            banner_interval: ROTATION_INTERVAL,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; unset or blank keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(API_URL_VAR) {
            config.api_url = url.trim().to_string();
        }
        if let Some(secs) = get(TIMEOUT_VAR) {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", TIMEOUT_VAR))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = get(BANNER_INTERVAL_VAR) {
            let ms: u64 = ms
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of milliseconds", BANNER_INTERVAL_VAR))?;
            anyhow::ensure!(ms > 0, "{} must be greater than zero", BANNER_INTERVAL_VAR);
            config.banner_interval = Duration::from_millis(ms);
        }

        Ok(config)
    }

    /// Command-line override for the API location
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            base_url: self.api_url.clone(),
            timeout: self.timeout,
            ..GatewayConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.banner_interval, Duration::from_millis(5000));
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://listings.example/api"),
            (TIMEOUT_VAR, "5"),
            (BANNER_INTERVAL_VAR, "1500"),
        ]))
        .unwrap();
        assert_eq!(config.gateway_config().base_url, "https://listings.example/api");
        assert_eq!(config.gateway_config().timeout, Duration::from_secs(5));
        assert_eq!(config.banner_interval, Duration::from_millis(1500));
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(AppConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[(BANNER_INTERVAL_VAR, "0")])).is_err());
    }

    #[test]
    fn cli_flag_wins() {
        let config = AppConfig::default().with_api_url(Some("http://10.0.0.2/api".to_string()));
        assert_eq!(config.api_url, "http://10.0.0.2/api");
    }
}
