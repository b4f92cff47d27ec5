//! Per-ingredient modification using provider lookups

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{ModificationStrategy, StepOutcome};
use crate::models::{CalculationMethod, Modification, NutritionVector};
use crate::nutrition::{add, multiply, subtract};
use crate::provider::{IngredientLookup, LookupError};

/// Looks up each referenced ingredient and applies its exact contribution
pub struct PreciseStrategy<L> {
    lookup: L,
    timeout: Duration,
}

impl<L: IngredientLookup> PreciseStrategy<L> {
    pub fn new(lookup: L, timeout: Duration) -> Self {
        Self { lookup, timeout }
    }

    async fn fetch(&self, ingredient: &str) -> Result<NutritionVector, LookupError> {
        match tokio::time::timeout(self.timeout, self.lookup.lookup(ingredient)).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout(format!(
                "'{}' after {}ms",
                ingredient,
                self.timeout.as_millis()
            ))),
        }
    }

    /// Fetch or convert the failure into a step outcome
    async fn fetch_or_outcome(&self, ingredient: &str) -> Result<NutritionVector, StepOutcome> {
        self.fetch(ingredient).await.map_err(|e| {
            warn!("Lookup failed for '{}': {}", ingredient, e);
            StepOutcome::from_lookup_error(ingredient, e)
        })
    }
}

#[async_trait]
impl<L: IngredientLookup> ModificationStrategy for PreciseStrategy<L> {
    fn method(&self) -> CalculationMethod {
        CalculationMethod::Precise
    }

    fn tracks_micronutrients(&self) -> bool {
        true
    }

    async fn apply(&self, adjusted: &NutritionVector, modification: &Modification) -> StepOutcome {
        debug!("Applying {} precisely", modification.kind());

        let result = match modification {
            Modification::Replace {
                original_ingredient,
                new_ingredient,
            } => {
                // Both lookups must succeed before anything changes
                let old = match self.fetch_or_outcome(original_ingredient).await {
                    Ok(v) => v,
                    Err(outcome) => return outcome,
                };
                let new = match self.fetch_or_outcome(new_ingredient).await {
                    Ok(v) => v,
                    Err(outcome) => return outcome,
                };
                add(&subtract(adjusted, &old), &new)
            }
            Modification::Omit {
                original_ingredient,
                ..
            } => match self.fetch_or_outcome(original_ingredient).await {
                Ok(v) => subtract(adjusted, &v),
                Err(outcome) => return outcome,
            },
            Modification::Add { new_ingredient } => match self.fetch_or_outcome(new_ingredient).await {
                Ok(v) => add(adjusted, &v),
                Err(outcome) => return outcome,
            },
            Modification::Reduce {
                original_ingredient,
                reduction_percent,
            } => match self.fetch_or_outcome(original_ingredient).await {
                Ok(v) => {
                    let share = reduction_percent.clamp(0.0, 100.0) / 100.0;
                    subtract(adjusted, &multiply(&v, share))
                }
                Err(outcome) => return outcome,
            },
        };

        StepOutcome::Applied(result)
    }
}
