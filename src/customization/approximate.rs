//! Uniform estimate used when no ingredient data can be fetched
//!
//! Omit and reduce shrink calories and every macro by the modification's
//! percent. Vitamins and minerals are carried through unchanged. Replace and
//! add have nothing to apply without substitute data.

use async_trait::async_trait;

use super::{ModificationStrategy, StepOutcome};
use crate::models::{CalculationMethod, Modification, NutrientAmount, NutritionVector, SkipReason};

#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateEstimator;

impl ApproximateEstimator {
    /// Scale calories and macros, leaving micros and weight alone
    fn shrink(vector: &NutritionVector, factor: f64) -> NutritionVector {
        let factor = factor.max(0.0);
        let mut result = vector.clone();
        result.calories = NutrientAmount::new(vector.calories.quantity * factor, vector.calories.unit);
        for amount in result.macros.values_mut() {
            amount.quantity *= factor;
        }
        result
    }
}

#[async_trait]
impl ModificationStrategy for ApproximateEstimator {
    fn method(&self) -> CalculationMethod {
        CalculationMethod::Approximate
    }

    fn tracks_micronutrients(&self) -> bool {
        false
    }

    async fn apply(&self, adjusted: &NutritionVector, modification: &Modification) -> StepOutcome {
        match (modification, modification.reduction_percent()) {
            (Modification::Omit { .. } | Modification::Reduce { .. }, Some(percent)) => {
                let factor = 1.0 - percent.clamp(0.0, 100.0) / 100.0;
                StepOutcome::Applied(Self::shrink(adjusted, factor))
            }
            _ => StepOutcome::Skipped(SkipReason::NotEstimable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Macro, Mineral, Nutrient};

    fn recipe() -> NutritionVector {
        NutritionVector::zero()
            .with(Nutrient::Calories, 400.0)
            .with(Macro::Protein, 20.0)
            .with(Macro::Sugar, 30.0)
            .with(Mineral::Iron, 3.0)
    }

    #[tokio::test]
    async fn test_reduce_shrinks_macros_uniformly() {
        let modification = Modification::Reduce {
            original_ingredient: "1 cup sugar".to_string(),
            reduction_percent: 25.0,
        };
        let StepOutcome::Applied(result) = ApproximateEstimator.apply(&recipe(), &modification).await else {
            panic!("reduce should be estimable");
        };
        assert_eq!(result.calories(), 300.0);
        assert_eq!(result.quantity(Macro::Protein), 15.0);
        assert_eq!(result.quantity(Macro::Sugar), 22.5);
        assert_eq!(result.quantity(Mineral::Iron), 3.0);
    }

    #[tokio::test]
    async fn test_omit_with_percent() {
        let modification = Modification::Omit {
            original_ingredient: "2 tbsp butter".to_string(),
            reduction_percent: Some(10.0),
        };
        let StepOutcome::Applied(result) = ApproximateEstimator.apply(&recipe(), &modification).await else {
            panic!("omit with a percent should be estimable");
        };
        assert!((result.calories() - 360.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_replace_add_and_bare_omit_are_not_estimable() {
        let modifications = [
            Modification::Replace {
                original_ingredient: "butter".to_string(),
                new_ingredient: "olive oil".to_string(),
            },
            Modification::Add {
                new_ingredient: "1 egg".to_string(),
            },
            Modification::Omit {
                original_ingredient: "salt".to_string(),
                reduction_percent: None,
            },
        ];
        for modification in &modifications {
            assert_eq!(
                ApproximateEstimator.apply(&recipe(), modification).await,
                StepOutcome::Skipped(SkipReason::NotEstimable)
            );
        }
    }
}
