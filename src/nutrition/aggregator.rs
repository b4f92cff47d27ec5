//! Recipe aggregation
//!
//! Folds ingredient vectors into a recipe total and derives per-serving and
//! per-100g vectors. Ingredients without usable nutrition count as zero and
//! are listed in the result.

use serde_json::Value;
use tracing::{debug, warn};

use super::arithmetic::{add, multiply};
use super::normalizer::normalize;
use crate::models::{NutritionVector, RecipeIngredient, RecipeNutrition};

/// Per-serving vector for a recipe total
///
/// `servings` must be >= 1; callers validate before reaching the engine.
pub fn per_serving(total: &NutritionVector, servings: f64) -> NutritionVector {
    multiply(total, 1.0 / servings)
}

/// Incremental recipe builder
#[derive(Debug, Clone)]
pub struct RecipeAggregator {
    servings: f64,
    total: NutritionVector,
    ingredient_count: usize,
    without_data: Vec<String>,
}

impl RecipeAggregator {
    pub fn new(servings: f64) -> Self {
        Self {
            servings,
            total: NutritionVector::zero(),
            ingredient_count: 0,
            without_data: Vec::new(),
        }
    }

    /// Fold in an already-normalized ingredient
    pub fn push(&mut self, name: &str, nutrition: Option<NutritionVector>) -> &mut Self {
        self.ingredient_count += 1;
        match nutrition {
            Some(vector) => self.total = add(&self.total, &vector),
            None => {
                warn!("No nutrition data for ingredient '{}'; counting it as zero", name);
                self.without_data.push(name.to_string());
            }
        }
        self
    }

    /// Normalize a raw provider payload and fold it in
    pub fn push_raw(&mut self, name: &str, raw: Option<&Value>) -> &mut Self {
        let nutrition = raw.and_then(normalize);
        self.push(name, nutrition)
    }

    pub fn finish(self) -> RecipeNutrition {
        let per_serving = per_serving(&self.total, self.servings);
        let per_100g = self
            .total
            .weight
            .filter(|w| *w > 0.0)
            .map(|w| multiply(&self.total, 100.0 / w));

        debug!(
            "Aggregated {} ingredients ({} without data) into {:.1} kcal",
            self.ingredient_count,
            self.without_data.len(),
            self.total.calories()
        );

        RecipeNutrition {
            servings: self.servings,
            total: self.total,
            per_serving,
            per_100g,
            ingredient_count: self.ingredient_count,
            ingredients_without_data: self.without_data,
        }
    }
}

/// Aggregate raw ingredient payloads into recipe nutrition
pub fn aggregate(ingredients: &[RecipeIngredient], servings: f64) -> RecipeNutrition {
    let mut aggregator = RecipeAggregator::new(servings);
    for ingredient in ingredients {
        aggregator.push_raw(&ingredient.name, ingredient.nutrition.as_ref());
    }
    aggregator.finish()
}
