//! Ingredient nutrition lookup
//!
//! The boundary between the modification engine and whatever resolves an
//! ingredient description into a nutrition vector.

pub mod edamam;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::NutritionVector;
use crate::nutrition::normalize;

pub use edamam::{EdamamClient, EdamamConfig, ProviderError};

/// Why an ingredient lookup produced no vector
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    /// The provider does not know the ingredient
    #[error("ingredient not found: {0}")]
    NotFound(String),

    /// The provider answered but the payload had no usable nutrition
    #[error("no nutrition data: {0}")]
    NoData(String),

    #[error("lookup timed out: {0}")]
    Timeout(String),

    /// The provider cannot serve any lookup right now
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl LookupError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, LookupError::Unavailable(_))
    }
}

/// Resolves an ingredient description to its nutrition
#[async_trait]
pub trait IngredientLookup: Send + Sync {
    async fn lookup(&self, ingredient: &str) -> Result<NutritionVector, LookupError>;
}

#[async_trait]
impl<T: IngredientLookup + ?Sized> IngredientLookup for Arc<T> {
    async fn lookup(&self, ingredient: &str) -> Result<NutritionVector, LookupError> {
        (**self).lookup(ingredient).await
    }
}

/// Source of raw provider payloads
#[async_trait]
pub trait NutritionSource: Send + Sync {
    async fn fetch(&self, ingredient: &str) -> Result<Value, ProviderError>;
}

/// Lookup that fetches raw payloads and runs them through the normalizer
pub struct NormalizingLookup<S> {
    source: S,
}

impl<S: NutritionSource> NormalizingLookup<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S: NutritionSource> IngredientLookup for NormalizingLookup<S> {
    async fn lookup(&self, ingredient: &str) -> Result<NutritionVector, LookupError> {
        let raw = self.source.fetch(ingredient).await.map_err(|e| {
            if e.is_unavailable() {
                LookupError::Unavailable(e.to_string())
            } else if let ProviderError::Timeout(_) = e {
                LookupError::Timeout(format!("'{}': {}", ingredient, e))
            } else if e.is_not_found() {
                LookupError::NotFound(ingredient.to_string())
            } else {
                LookupError::NoData(e.to_string())
            }
        })?;

        normalize(&raw).ok_or_else(|| LookupError::NoData(ingredient.to_string()))
    }
}

/// Lookup used when no provider is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProvider;

#[async_trait]
impl IngredientLookup for NoProvider {
    async fn lookup(&self, _ingredient: &str) -> Result<NutritionVector, LookupError> {
        Err(LookupError::Unavailable("no nutrition provider configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Macro;
    use serde_json::json;

    struct CannedSource(Result<Value, u16>);

    #[async_trait]
    impl NutritionSource for CannedSource {
        async fn fetch(&self, _ingredient: &str) -> Result<Value, ProviderError> {
            self.0.clone().map_err(|status| ProviderError::Status {
                status,
                body: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_normalizing_lookup_converts_payload() {
        let lookup = NormalizingLookup::new(CannedSource(Ok(json!({
            "ENERC_KCAL": {"label": "Energy", "quantity": 52.0, "unit": "kcal"},
            "PROCNT": {"label": "Protein", "quantity": 0.3, "unit": "g"}
        }))));

        let vector = lookup.lookup("1 apple").await.unwrap();
        assert_eq!(vector.calories(), 52.0);
        assert_eq!(vector.quantity(Macro::Protein), 0.3);
    }

    #[tokio::test]
    async fn test_unrecognized_payload_is_no_data() {
        let lookup = NormalizingLookup::new(CannedSource(Ok(json!({"calories": 0, "ingredients": []}))));
        assert_eq!(
            lookup.lookup("1 glorp").await,
            Err(LookupError::NoData("1 glorp".to_string()))
        );
    }

    #[tokio::test]
    async fn test_status_classification() {
        let missing = NormalizingLookup::new(CannedSource(Err(404)));
        assert_eq!(missing.lookup("x").await, Err(LookupError::NotFound("x".to_string())));

        let bad_request = NormalizingLookup::new(CannedSource(Err(422)));
        assert!(matches!(bad_request.lookup("x").await, Err(LookupError::NoData(_))));

        for status in [401, 403, 429, 500, 503] {
            let down = NormalizingLookup::new(CannedSource(Err(status)));
            assert!(down.lookup("x").await.unwrap_err().is_unavailable(), "status {}", status);
        }
    }

    #[tokio::test]
    async fn test_no_provider_is_unavailable() {
        let lookup: Arc<dyn IngredientLookup> = Arc::new(NoProvider);
        assert!(lookup.lookup("1 egg").await.unwrap_err().is_unavailable());
    }
}
