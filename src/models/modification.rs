//! Recipe modification model
//!
//! Ingredient-level changes to a recipe and the result of applying them.

use rmcp::schemars;
use serde::{Deserialize, Serialize};

use super::NutritionVector;

/// One caller-specified change to a recipe's ingredients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Modification {
    /// Swap one ingredient for another
    #[serde(rename_all = "camelCase")]
    Replace {
        original_ingredient: String,
        new_ingredient: String,
    },
    /// Remove an ingredient entirely
    ///
    /// `reduction_percent` is the caller's estimate of the ingredient's share
    /// of the recipe; only the approximate estimator reads it.
    #[serde(rename_all = "camelCase")]
    Omit {
        original_ingredient: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reduction_percent: Option<f64>,
    },
    /// Add a new ingredient
    #[serde(rename_all = "camelCase")]
    Add { new_ingredient: String },
    /// Use less of an ingredient. `reduction_percent` is in [0, 100].
    #[serde(rename_all = "camelCase")]
    Reduce {
        original_ingredient: String,
        reduction_percent: f64,
    },
}

impl Modification {
    /// Short name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Modification::Replace { .. } => "replace",
            Modification::Omit { .. } => "omit",
            Modification::Add { .. } => "add",
            Modification::Reduce { .. } => "reduce",
        }
    }

    /// Percent used by the approximate estimator, if this variant has one
    pub fn reduction_percent(&self) -> Option<f64> {
        match self {
            Modification::Omit { reduction_percent, .. } => *reduction_percent,
            Modification::Reduce { reduction_percent, .. } => Some(*reduction_percent),
            Modification::Replace { .. } | Modification::Add { .. } => None,
        }
    }
}

/// Whether a nutrition vector describes one serving or the whole recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum VectorBasis {
    PerServing,
    #[default]
    RecipeTotal,
}

/// Input to the modification engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationRequest {
    pub nutrition: NutritionVector,
    #[serde(default)]
    pub basis: VectorBasis,
    pub modifications: Vec<Modification>,
    /// Serving count; must be >= 1 when present
    #[serde(default)]
    pub servings: Option<f64>,
}

/// How the modified vector was computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMethod {
    /// Per-ingredient provider lookups
    Precise,
    /// Uniform fallback estimate
    Approximate,
}

/// Accuracy flag surfaced to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accuracy {
    Precise,
    Approximate,
}

impl From<CalculationMethod> for Accuracy {
    fn from(method: CalculationMethod) -> Self {
        match method {
            CalculationMethod::Precise => Accuracy::Precise,
            CalculationMethod::Approximate => Accuracy::Approximate,
        }
    }
}

/// Why a modification was not applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum SkipReason {
    /// A referenced ingredient could not be looked up
    #[serde(rename_all = "camelCase")]
    LookupFailed { ingredient: String, detail: String },
    /// The approximate estimator has no data to apply this modification
    NotEstimable,
}

/// A modification that was left out of the result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedModification {
    pub modification: Modification,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Output of the modification engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationResult {
    pub original_nutrition: NutritionVector,
    pub modified_nutrition: NutritionVector,
    /// Modifications actually applied, in order
    pub modifications: Vec<Modification>,
    pub skipped_modifications: Vec<SkippedModification>,
    pub calculation_method: CalculationMethod,
    pub accuracy: Accuracy,
    pub micronutrients_included: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_modification_wire_format() {
        let modification: Modification = serde_json::from_value(json!({
            "type": "reduce",
            "originalIngredient": "1 cup sugar",
            "reductionPercent": 50
        }))
        .unwrap();
        assert_eq!(
            modification,
            Modification::Reduce {
                original_ingredient: "1 cup sugar".to_string(),
                reduction_percent: 50.0,
            }
        );
    }

    #[test]
    fn test_reduce_requires_percent() {
        let result: Result<Modification, _> = serde_json::from_value(json!({
            "type": "reduce",
            "originalIngredient": "1 cup sugar"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_omit_percent_is_optional() {
        let modification: Modification = serde_json::from_value(json!({
            "type": "omit",
            "originalIngredient": "2 tbsp butter"
        }))
        .unwrap();
        assert_eq!(modification.reduction_percent(), None);
        assert_eq!(modification.kind(), "omit");
    }

    #[test]
    fn test_skipped_modification_flattens_reason() {
        let skipped = SkippedModification {
            modification: Modification::Add { new_ingredient: "1 egg".to_string() },
            reason: SkipReason::NotEstimable,
        };
        let value = serde_json::to_value(&skipped).unwrap();
        assert_eq!(value["reason"], "notEstimable");
        assert_eq!(value["modification"]["type"], "add");
    }
}
