//! Edamam nutrition-data API client
//!
//! Fetches per-ingredient nutrition for a free-text ingredient line such as
//! "1 cup cooked rice". The response is returned as raw JSON; normalization
//! happens in [`super::NormalizingLookup`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::NutritionSource;

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://api.edamam.com";

/// Errors from the HTTP provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request for one ingredient ran past the HTTP timeout
    #[error("HTTP request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Whether the provider as a whole cannot serve requests
    ///
    /// Transport failures, rejected credentials, rate limiting and server
    /// errors all count; a bad answer for one ingredient does not.
    pub fn is_unavailable(&self) -> bool {
        match self {
            ProviderError::Transport(_) => true,
            ProviderError::Status { status, .. } => {
                matches!(status, 401 | 403 | 429) || *status >= 500
            }
            ProviderError::Timeout(_) | ProviderError::Decode(_) => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::Status { status: 404, .. })
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout(e.to_string())
        } else {
            ProviderError::Transport(e)
        }
    }
}

/// Credentials and endpoint for the Edamam API
#[derive(Debug, Clone)]
pub struct EdamamConfig {
    pub app_id: String,
    pub app_key: String,
    pub base_url: String,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl EdamamConfig {
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Edamam Nutrition Analysis API client
pub struct EdamamClient {
    config: EdamamConfig,
    http_client: reqwest::Client,
}

impl EdamamClient {
    pub fn new(config: EdamamConfig) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { config, http_client })
    }

    /// Full nutrition-data endpoint URL
    pub fn endpoint(&self) -> String {
        format!("{}/api/nutrition-data", self.config.base_url.trim_end_matches('/'))
    }

    /// Fetch the raw nutrition-data response for one ingredient line
    pub async fn nutrition_data(&self, ingredient: &str) -> Result<Value, ProviderError> {
        let url = self.endpoint();
        debug!("Requesting Edamam nutrition data for '{}'", ingredient);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("app_id", self.config.app_id.as_str()),
                ("app_key", self.config.app_key.as_str()),
                ("nutrition-type", "cooking"),
                ("ingr", ingredient),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Edamam returned HTTP {} for '{}'", status.as_u16(), ingredient);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(e.to_string())
            } else {
                ProviderError::Decode(e.to_string())
            }
        })
    }
}

#[async_trait]
impl NutritionSource for EdamamClient {
    async fn fetch(&self, ingredient: &str) -> Result<Value, ProviderError> {
        self.nutrition_data(ingredient).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customization::ModificationEngine;
    use crate::models::{
        CalculationMethod, Modification, ModificationRequest, Nutrient, NutritionVector, SkipReason,
        VectorBasis,
    };
    use crate::provider::{IngredientLookup, LookupError, NormalizingLookup};

    fn status(code: u16) -> ProviderError {
        ProviderError::Status {
            status: code,
            body: String::new(),
        }
    }

    #[test]
    fn test_unavailable_statuses() {
        assert!(status(401).is_unavailable());
        assert!(status(403).is_unavailable());
        assert!(status(429).is_unavailable());
        assert!(status(502).is_unavailable());
        assert!(!status(404).is_unavailable());
        assert!(!status(422).is_unavailable());
        assert!(!ProviderError::Decode("eof".to_string()).is_unavailable());
        assert!(!ProviderError::Timeout("slow".to_string()).is_unavailable());
    }

    #[test]
    fn test_not_found() {
        assert!(status(404).is_not_found());
        assert!(!status(400).is_not_found());
    }

    /// Accepts connections and never answers
    async fn silent_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{}", addr)
    }

    async fn slow_client() -> EdamamClient {
        let mut config = EdamamConfig::new("id", "key");
        config.base_url = silent_server().await;
        config.request_timeout = Duration::from_millis(200);
        EdamamClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_request_timeout_is_not_an_outage() {
        let err = slow_client().await.nutrition_data("1 egg").await.unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(_)), "got {:?}", err);
        assert!(!err.is_unavailable());
    }

    #[tokio::test]
    async fn test_slow_lookup_skips_only_that_modification() {
        let lookup = NormalizingLookup::new(slow_client().await);
        assert!(matches!(lookup.lookup("1 egg").await, Err(LookupError::Timeout(_))));

        // Engine and HTTP client share the same deadline
        let engine = ModificationEngine::new(lookup, Duration::from_millis(200));
        let request = ModificationRequest {
            nutrition: NutritionVector::zero().with(Nutrient::Calories, 400.0),
            basis: VectorBasis::RecipeTotal,
            modifications: vec![Modification::Omit {
                original_ingredient: "1 egg".to_string(),
                reduction_percent: Some(50.0),
            }],
            servings: None,
        };
        let result = engine.apply(&request).await;
        assert_eq!(result.calculation_method, CalculationMethod::Precise);
        assert_eq!(result.skipped_modifications.len(), 1);
        assert!(matches!(result.skipped_modifications[0].reason, SkipReason::LookupFailed { .. }));
        assert_eq!(result.modified_nutrition.calories(), 400.0);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut config = EdamamConfig::new("id", "key");
        config.base_url = "http://localhost:8080/".to_string();
        let client = EdamamClient::new(config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/api/nutrition-data");
    }
}
