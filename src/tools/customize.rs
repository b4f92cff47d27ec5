//! Recipe Customization MCP Tools
//!
//! Validates modification batches and runs them through the engine.

use crate::customization::ModificationEngine;
use crate::models::{Modification, ModificationRequest, ModificationResult};
use crate::provider::IngredientLookup;
use crate::tools::nutrition::validate_servings;

/// Check a single modification's scalars and ingredient names
pub fn validate_modification(modification: &Modification) -> Result<(), String> {
    let names: Vec<&str> = match modification {
        Modification::Replace {
            original_ingredient,
            new_ingredient,
        } => vec![original_ingredient.as_str(), new_ingredient.as_str()],
        Modification::Omit {
            original_ingredient, ..
        }
        | Modification::Reduce {
            original_ingredient, ..
        } => vec![original_ingredient.as_str()],
        Modification::Add { new_ingredient } => vec![new_ingredient.as_str()],
    };

    if names.iter().any(|n| n.trim().is_empty()) {
        return Err(format!("{} modification is missing an ingredient", modification.kind()));
    }

    if let Some(percent) = modification.reduction_percent() {
        if !(0.0..=100.0).contains(&percent) {
            return Err(format!(
                "reductionPercent must be between 0 and 100 (got {})",
                percent
            ));
        }
    }

    Ok(())
}

/// Apply a validated modification batch and round the vectors for display
pub async fn customize_recipe<L: IngredientLookup>(
    engine: &ModificationEngine<L>,
    request: &ModificationRequest,
) -> Result<ModificationResult, String> {
    if let Some(servings) = request.servings {
        validate_servings(servings)?;
    }
    for modification in &request.modifications {
        validate_modification(modification)?;
    }

    let mut result = engine.apply(request).await;
    result.original_nutrition = result.original_nutrition.rounded();
    result.modified_nutrition = result.modified_nutrition.rounded();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customization::DEFAULT_LOOKUP_TIMEOUT;
    use crate::models::{CalculationMethod, Nutrient, NutritionVector, VectorBasis};
    use crate::provider::NoProvider;

    fn reduce(percent: f64) -> Modification {
        Modification::Reduce {
            original_ingredient: "1 cup sugar".to_string(),
            reduction_percent: percent,
        }
    }

    #[test]
    fn test_percent_bounds() {
        assert!(validate_modification(&reduce(0.0)).is_ok());
        assert!(validate_modification(&reduce(100.0)).is_ok());
        assert!(validate_modification(&reduce(-5.0)).is_err());
        assert!(validate_modification(&reduce(150.0)).is_err());
    }

    #[test]
    fn test_blank_ingredient_rejected() {
        let add = Modification::Add {
            new_ingredient: "   ".to_string(),
        };
        assert!(validate_modification(&add).is_err());
    }

    #[tokio::test]
    async fn test_customize_rounds_and_validates() {
        let engine = ModificationEngine::new(NoProvider, DEFAULT_LOOKUP_TIMEOUT);
        let mut request = ModificationRequest {
            nutrition: NutritionVector::zero().with(Nutrient::Calories, 333.33),
            basis: VectorBasis::RecipeTotal,
            modifications: vec![reduce(10.0)],
            servings: Some(3.0),
        };

        let result = customize_recipe(&engine, &request).await.unwrap();
        assert_eq!(result.calculation_method, CalculationMethod::Approximate);
        assert_eq!(result.original_nutrition.calories(), 333.3);
        assert_eq!(result.modified_nutrition.calories(), 100.0);

        request.servings = Some(0.0);
        assert!(customize_recipe(&engine, &request).await.is_err());
    }
}
