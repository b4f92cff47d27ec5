//! Recipe model
//!
//! Ingredients as received from the caller and the aggregated recipe nutrition.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::NutritionVector;

/// One ingredient with its provider nutrition payload
///
/// The payload is already scaled to the quantity used in the recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(default)]
    pub nutrition: Option<Value>,
}

/// Aggregated nutrition for a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeNutrition {
    pub servings: f64,
    pub total: NutritionVector,
    pub per_serving: NutritionVector,
    /// Present when the total weight is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_100g: Option<NutritionVector>,
    pub ingredient_count: usize,
    /// Ingredients folded in as zero because no nutrition was available
    pub ingredients_without_data: Vec<String>,
}
