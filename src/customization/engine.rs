//! Modification engine
//!
//! Folds an ordered batch of modifications over a recipe vector, then scales
//! the result to the requested serving basis.

use std::time::Duration;

use tracing::{info, warn};

use super::{ApproximateEstimator, ModificationStrategy, PreciseStrategy, StepOutcome};
use crate::models::{
    Modification, ModificationRequest, ModificationResult, NutritionVector, SkippedModification,
    VectorBasis,
};
use crate::nutrition::multiply;
use crate::provider::IngredientLookup;

/// Lookup timeout used when none is configured
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Default)]
struct Pass {
    adjusted: NutritionVector,
    applied: Vec<Modification>,
    skipped: Vec<SkippedModification>,
    /// Set when the strategy gave up because the provider is down
    unavailable: Option<String>,
}

async fn run_pass(strategy: &dyn ModificationStrategy, request: &ModificationRequest) -> Pass {
    let mut pass = Pass {
        adjusted: request.nutrition.clone(),
        ..Pass::default()
    };

    for modification in &request.modifications {
        match strategy.apply(&pass.adjusted, modification).await {
            StepOutcome::Applied(next) => {
                pass.adjusted = next;
                pass.applied.push(modification.clone());
            }
            StepOutcome::Skipped(reason) => pass.skipped.push(SkippedModification {
                modification: modification.clone(),
                reason,
            }),
            StepOutcome::ProviderUnavailable(detail) => {
                pass.unavailable = Some(detail);
                return pass;
            }
        }
    }

    pass
}

/// Scale to the other basis when a serving count is supplied
fn scale_for_servings(vector: &NutritionVector, basis: VectorBasis, servings: Option<f64>) -> NutritionVector {
    match servings {
        Some(n) if n > 0.0 => match basis {
            VectorBasis::PerServing => multiply(vector, n),
            VectorBasis::RecipeTotal => multiply(vector, 1.0 / n),
        },
        _ => vector.clone(),
    }
}

/// Applies modification batches, precise first with an approximate fallback
pub struct ModificationEngine<L> {
    precise: PreciseStrategy<L>,
    fallback: ApproximateEstimator,
}

impl<L: IngredientLookup> ModificationEngine<L> {
    pub fn new(lookup: L, lookup_timeout: Duration) -> Self {
        Self {
            precise: PreciseStrategy::new(lookup, lookup_timeout),
            fallback: ApproximateEstimator,
        }
    }

    /// Apply every modification in the request
    ///
    /// `servings` must be >= 1 and percents within [0, 100]; callers validate.
    pub async fn apply(&self, request: &ModificationRequest) -> ModificationResult {
        let mut strategy: &dyn ModificationStrategy = &self.precise;
        let mut pass = run_pass(strategy, request).await;

        if let Some(detail) = pass.unavailable.take() {
            warn!("Nutrition provider unavailable ({}); falling back to approximate estimate", detail);
            strategy = &self.fallback;
            pass = run_pass(strategy, request).await;
        }

        let method = strategy.method();
        info!(
            "Applied {} of {} modifications ({:?})",
            pass.applied.len(),
            request.modifications.len(),
            method
        );

        ModificationResult {
            original_nutrition: request.nutrition.clone(),
            modified_nutrition: scale_for_servings(&pass.adjusted, request.basis, request.servings),
            modifications: pass.applied,
            skipped_modifications: pass.skipped,
            calculation_method: method,
            accuracy: method.into(),
            micronutrients_included: strategy.tracks_micronutrients(),
        }
    }
}
