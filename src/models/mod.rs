//! Data models
//!
//! Types exchanged between the normalizer, the arithmetic core and callers.

mod modification;
mod nutrient;
mod nutrition;
mod recipe;

pub use modification::{
    Accuracy, CalculationMethod, Modification, ModificationRequest, ModificationResult,
    SkipReason, SkippedModification, VectorBasis,
};
pub use nutrient::{Macro, Mineral, Nutrient, NutrientAmount, Unit, Vitamin};
pub use nutrition::{Micros, NutritionVector};
pub use recipe::{RecipeIngredient, RecipeNutrition};
