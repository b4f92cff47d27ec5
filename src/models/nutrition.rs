//! Shared nutrition data structure
//!
//! The canonical nutrition vector used by the normalizer, the recipe
//! aggregator and the modification engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::nutrient::{Macro, Mineral, Nutrient, NutrientAmount, Unit, Vitamin};
use crate::nutrition::units::canonical_unit;

/// Sparse micronutrient maps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Micros {
    #[serde(default)]
    pub vitamins: BTreeMap<Vitamin, NutrientAmount>,
    #[serde(default)]
    pub minerals: BTreeMap<Mineral, NutrientAmount>,
}

impl Micros {
    pub fn is_empty(&self) -> bool {
        self.vitamins.is_empty() && self.minerals.is_empty()
    }
}

/// Nutritional content of a food, ingredient or recipe
///
/// A key missing from `macros` or `micros` means zero. Arithmetic lives in
/// [`crate::nutrition::arithmetic`] and always returns a new vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionVector {
    pub calories: NutrientAmount,
    #[serde(default)]
    pub macros: BTreeMap<Macro, NutrientAmount>,
    #[serde(default)]
    pub micros: Micros,
    /// Total grams this vector represents, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Default for NutritionVector {
    fn default() -> Self {
        Self::empty()
    }
}

impl NutritionVector {
    /// Zero calories and no other keys
    pub fn empty() -> Self {
        Self {
            calories: NutrientAmount::new(0.0, Unit::Kilocalorie),
            macros: BTreeMap::new(),
            micros: Micros::default(),
            weight: None,
        }
    }

    /// Zero calories with every required macro present at zero
    pub fn zero() -> Self {
        let mut vector = Self::empty();
        for m in Macro::REQUIRED {
            vector.macros.insert(*m, NutrientAmount::new(0.0, canonical_unit(Nutrient::Macro(*m))));
        }
        vector
    }

    /// Return a copy with one field set, using the canonical unit for that field
    pub fn with(mut self, nutrient: impl Into<Nutrient>, quantity: f64) -> Self {
        self.set(nutrient.into(), quantity);
        self
    }

    /// Return a copy with the weight set
    pub fn with_weight(mut self, grams: f64) -> Self {
        self.weight = Some(grams);
        self
    }

    /// Set a field in place, using the canonical unit for that field
    pub(crate) fn set(&mut self, nutrient: Nutrient, quantity: f64) {
        self.set_amount(nutrient, NutrientAmount::new(quantity, canonical_unit(nutrient)));
    }

    pub(crate) fn set_amount(&mut self, nutrient: Nutrient, amount: NutrientAmount) {
        match nutrient {
            Nutrient::Calories => self.calories = amount,
            Nutrient::Macro(m) => {
                self.macros.insert(m, amount);
            }
            Nutrient::Vitamin(v) => {
                self.micros.vitamins.insert(v, amount);
            }
            Nutrient::Mineral(m) => {
                self.micros.minerals.insert(m, amount);
            }
        }
    }

    /// The entry for a field, if populated
    pub fn amount(&self, nutrient: Nutrient) -> Option<&NutrientAmount> {
        match nutrient {
            Nutrient::Calories => Some(&self.calories),
            Nutrient::Macro(m) => self.macros.get(&m),
            Nutrient::Vitamin(v) => self.micros.vitamins.get(&v),
            Nutrient::Mineral(m) => self.micros.minerals.get(&m),
        }
    }

    /// Quantity of a field, zero when absent
    pub fn quantity(&self, nutrient: impl Into<Nutrient>) -> f64 {
        self.amount(nutrient.into()).map(|a| a.quantity).unwrap_or(0.0)
    }

    pub fn calories(&self) -> f64 {
        self.calories.quantity
    }

    /// Every populated field, calories first
    pub fn fields(&self) -> impl Iterator<Item = (Nutrient, &NutrientAmount)> + '_ {
        std::iter::once((Nutrient::Calories, &self.calories))
            .chain(self.macros.iter().map(|(k, v)| (Nutrient::Macro(*k), v)))
            .chain(self.micros.vitamins.iter().map(|(k, v)| (Nutrient::Vitamin(*k), v)))
            .chain(self.micros.minerals.iter().map(|(k, v)| (Nutrient::Mineral(*k), v)))
    }

    /// True when at least one vitamin or mineral is populated
    pub fn has_micros(&self) -> bool {
        !self.micros.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_zero_has_required_macros() {
        let zero = NutritionVector::zero();
        assert_eq!(zero.macros.len(), Macro::REQUIRED.len());
        assert_eq!(zero.macros[&Macro::Sodium].unit, Unit::Milligram);
        assert!(!zero.has_micros());
    }

    #[test]
    fn test_missing_field_reads_as_zero() {
        let v = NutritionVector::empty().with(Macro::Protein, 5.0);
        assert_eq!(v.quantity(Macro::Protein), 5.0);
        assert_eq!(v.quantity(Vitamin::VitaminC), 0.0);
        assert!(v.amount(Nutrient::Vitamin(Vitamin::VitaminC)).is_none());
    }

    #[test]
    fn test_with_uses_canonical_unit() {
        let v = NutritionVector::empty()
            .with(Vitamin::VitaminA, 500.0)
            .with(Mineral::Selenium, 12.0);
        assert_eq!(v.micros.vitamins[&Vitamin::VitaminA].unit, Unit::InternationalUnit);
        assert_eq!(v.micros.minerals[&Mineral::Selenium].unit, Unit::Microgram);
    }

    #[test]
    fn test_serialized_shape() {
        let v = NutritionVector::empty()
            .with(Nutrient::Calories, 120.0)
            .with(Macro::SaturatedFat, 1.5)
            .with(Vitamin::VitaminC, 9.0);
        let value = serde_json::to_value(&v).unwrap();
        assert_eq!(
            value,
            json!({
                "calories": {"quantity": 120.0, "unit": "kcal"},
                "macros": {"saturatedFat": {"quantity": 1.5, "unit": "g"}},
                "micros": {
                    "vitamins": {"vitaminC": {"quantity": 9.0, "unit": "mg"}},
                    "minerals": {}
                }
            })
        );
    }

    #[test]
    fn test_fields_lists_calories_first() {
        let v = NutritionVector::empty().with(Mineral::Iron, 2.0);
        let fields: Vec<Nutrient> = v.fields().map(|(n, _)| n).collect();
        assert_eq!(fields, vec![Nutrient::Calories, Nutrient::Mineral(Mineral::Iron)]);
    }
}
