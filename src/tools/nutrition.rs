//! Nutrition MCP Tools
//!
//! Payload normalization and recipe aggregation.

use serde::Serialize;
use serde_json::Value;

use crate::models::{NutritionVector, RecipeIngredient, RecipeNutrition};
use crate::nutrition::{aggregate, detect_format, normalize, PayloadFormat};

/// Response for normalize_nutrition
#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub recognized: bool,
    pub format: Option<PayloadFormat>,
    pub nutrition: Option<NutritionVector>,
}

/// Validate a serving count
pub fn validate_servings(servings: f64) -> Result<f64, String> {
    if !servings.is_finite() || servings < 1.0 {
        return Err(format!("servings must be at least 1 (got {})", servings));
    }
    Ok(servings)
}

/// Normalize one raw payload into a rounded nutrition vector
pub fn normalize_nutrition(raw: &Value) -> NormalizeResponse {
    let format = detect_format(raw);
    let nutrition = normalize(raw).map(|v| v.rounded());

    NormalizeResponse {
        recognized: nutrition.is_some(),
        format,
        nutrition,
    }
}

/// Aggregate ingredient payloads into rounded recipe nutrition
pub fn calculate_recipe_nutrition(
    ingredients: &[RecipeIngredient],
    servings: f64,
) -> Result<RecipeNutrition, String> {
    let servings = validate_servings(servings)?;

    if ingredients.iter().any(|i| i.name.trim().is_empty()) {
        return Err("Every ingredient needs a name".to_string());
    }

    Ok(aggregate(ingredients, servings).rounded())
}
