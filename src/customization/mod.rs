//! Recipe customization
//!
//! Applies ingredient-level modifications to a recipe's nutrition. Each
//! modification is handed to a [`ModificationStrategy`]; the engine folds the
//! outcomes and falls back to the approximate estimator when the provider is
//! unavailable.

mod approximate;
mod engine;
mod precise;

use async_trait::async_trait;

use crate::models::{CalculationMethod, Modification, NutritionVector, SkipReason};
use crate::provider::LookupError;

pub use approximate::ApproximateEstimator;
pub use engine::{ModificationEngine, DEFAULT_LOOKUP_TIMEOUT};
pub use precise::PreciseStrategy;

/// Result of applying one modification
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// New running vector
    Applied(NutritionVector),
    /// Modification left out; the running vector is unchanged
    Skipped(SkipReason),
    /// The provider cannot serve lookups; abandon this strategy
    ProviderUnavailable(String),
}

impl StepOutcome {
    /// Classify a failed lookup for `ingredient`
    pub fn from_lookup_error(ingredient: &str, error: LookupError) -> Self {
        match error {
            LookupError::Unavailable(detail) => StepOutcome::ProviderUnavailable(detail),
            other => StepOutcome::Skipped(SkipReason::LookupFailed {
                ingredient: ingredient.to_string(),
                detail: other.to_string(),
            }),
        }
    }
}

/// One way of turning a modification into a nutrition change
#[async_trait]
pub trait ModificationStrategy: Send + Sync {
    fn method(&self) -> CalculationMethod;

    /// Whether vitamins and minerals are adjusted alongside macros
    fn tracks_micronutrients(&self) -> bool;

    async fn apply(&self, adjusted: &NutritionVector, modification: &Modification) -> StepOutcome;
}
