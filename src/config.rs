//! Runtime configuration
//!
//! Read once at startup from environment variables. Missing provider
//! credentials are not an error: the server then runs without ingredient
//! lookups and customization falls back to the approximate estimate.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::customization::DEFAULT_LOOKUP_TIMEOUT;
use crate::provider::edamam::DEFAULT_BASE_URL;
use crate::provider::{
    EdamamClient, EdamamConfig, IngredientLookup, NoProvider, NormalizingLookup, ProviderError,
};

pub const ENV_APP_ID: &str = "NVE_EDAMAM_APP_ID";
pub const ENV_APP_KEY: &str = "NVE_EDAMAM_APP_KEY";
pub const ENV_BASE_URL: &str = "NVE_EDAMAM_BASE_URL";
pub const ENV_LOOKUP_TIMEOUT: &str = "NVE_LOOKUP_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Edamam credentials, when both id and key are set
    pub edamam: Option<EdamamConfig>,
    pub lookup_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let lookup_timeout = match var(ENV_LOOKUP_TIMEOUT) {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_LOOKUP_TIMEOUT,
                    value: raw.clone(),
                    reason: "expected whole seconds",
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_LOOKUP_TIMEOUT,
                        value: raw,
                        reason: "must be at least 1",
                    });
                }
                Duration::from_secs(secs)
            }
            None => {
                info!("{} not set, using default: {}s", ENV_LOOKUP_TIMEOUT, DEFAULT_LOOKUP_TIMEOUT.as_secs());
                DEFAULT_LOOKUP_TIMEOUT
            }
        };

        let edamam = match (var(ENV_APP_ID), var(ENV_APP_KEY)) {
            (Some(app_id), Some(app_key)) => {
                let mut config = EdamamConfig::new(app_id, app_key);
                config.base_url = var(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
                config.request_timeout = lookup_timeout;
                Some(config)
            }
            (None, None) => {
                warn!("Edamam credentials not set; ingredient lookups disabled");
                None
            }
            _ => {
                warn!("Only one of {} / {} is set; ingredient lookups disabled", ENV_APP_ID, ENV_APP_KEY);
                None
            }
        };

        Ok(Self { edamam, lookup_timeout })
    }

    pub fn provider_configured(&self) -> bool {
        self.edamam.is_some()
    }

    /// The ingredient lookup this configuration describes
    pub fn build_lookup(&self) -> Result<Arc<dyn IngredientLookup>, ProviderError> {
        match &self.edamam {
            Some(edamam) => {
                info!("Using Edamam nutrition provider at {}", edamam.base_url);
                let client = EdamamClient::new(edamam.clone())?;
                Ok(Arc::new(NormalizingLookup::new(client)))
            }
            None => Ok(Arc::new(NoProvider)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_credentials() {
        let config = config(&[]).unwrap();
        assert!(!config.provider_configured());
        assert_eq!(config.lookup_timeout, DEFAULT_LOOKUP_TIMEOUT);
    }

    #[test]
    fn test_full_configuration() {
        let config = config(&[
            (ENV_APP_ID, "abc"),
            (ENV_APP_KEY, "secret"),
            (ENV_BASE_URL, "http://localhost:9000"),
            (ENV_LOOKUP_TIMEOUT, "3"),
        ])
        .unwrap();

        let edamam = config.edamam.as_ref().unwrap();
        assert_eq!(edamam.app_id, "abc");
        assert_eq!(edamam.base_url, "http://localhost:9000");
        assert_eq!(edamam.request_timeout, Duration::from_secs(3));
        assert_eq!(config.lookup_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_partial_credentials_disable_provider() {
        let config = config(&[(ENV_APP_ID, "abc"), (ENV_APP_KEY, "  ")]).unwrap();
        assert!(!config.provider_configured());
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(matches!(
            config(&[(ENV_LOOKUP_TIMEOUT, "soon")]),
            Err(ConfigError::InvalidValue { key: ENV_LOOKUP_TIMEOUT, .. })
        ));
        assert!(config(&[(ENV_LOOKUP_TIMEOUT, "0")]).is_err());
    }

    #[test]
    fn test_default_base_url() {
        let config = config(&[(ENV_APP_ID, "abc"), (ENV_APP_KEY, "secret")]).unwrap();
        assert_eq!(config.edamam.unwrap().base_url, DEFAULT_BASE_URL);
    }
}
