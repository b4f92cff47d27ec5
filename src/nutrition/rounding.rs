//! Presentation rounding
//!
//! Applied once when a vector leaves the engine. Arithmetic never rounds.

use std::collections::BTreeMap;

use crate::models::{Micros, NutrientAmount, NutritionVector, RecipeNutrition};

/// Decimal places for calories, macros and weight
pub const MACRO_DECIMALS: i32 = 1;
/// Decimal places for vitamins and minerals
pub const MICRO_DECIMALS: i32 = 2;

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn round_map<K: Ord + Copy>(
    map: &BTreeMap<K, NutrientAmount>,
    decimals: i32,
) -> BTreeMap<K, NutrientAmount> {
    map.iter()
        .map(|(k, a)| (*k, NutrientAmount::new(round_to(a.quantity, decimals), a.unit)))
        .collect()
}

impl NutritionVector {
    /// Copy rounded for display
    pub fn rounded(&self) -> Self {
        Self {
            calories: NutrientAmount::new(round_to(self.calories.quantity, MACRO_DECIMALS), self.calories.unit),
            macros: round_map(&self.macros, MACRO_DECIMALS),
            micros: Micros {
                vitamins: round_map(&self.micros.vitamins, MICRO_DECIMALS),
                minerals: round_map(&self.micros.minerals, MICRO_DECIMALS),
            },
            weight: self.weight.map(|w| round_to(w, MACRO_DECIMALS)),
        }
    }
}

impl RecipeNutrition {
    /// Copy with every vector rounded for display
    pub fn rounded(&self) -> Self {
        Self {
            servings: self.servings,
            total: self.total.rounded(),
            per_serving: self.per_serving.rounded(),
            per_100g: self.per_100g.as_ref().map(NutritionVector::rounded),
            ingredient_count: self.ingredient_count,
            ingredients_without_data: self.ingredients_without_data.clone(),
        }
    }
}
