//! Provider nutrient code tables
//!
//! Maps provider-specific nutrient identifiers onto vector fields. Codes not
//! listed here are dropped by the normalizer.

use crate::models::{Macro, Mineral, Nutrient, Vitamin};

/// Edamam nutrient codes
pub const EDAMAM_CODES: &[(&str, Nutrient)] = &[
    ("ENERC_KCAL", Nutrient::Calories),
    // Macros
    ("PROCNT", Nutrient::Macro(Macro::Protein)),
    ("CHOCDF", Nutrient::Macro(Macro::Carbs)),
    ("FAT", Nutrient::Macro(Macro::Fat)),
    ("FIBTG", Nutrient::Macro(Macro::Fiber)),
    ("SUGAR", Nutrient::Macro(Macro::Sugar)),
    ("NA", Nutrient::Macro(Macro::Sodium)),
    ("CHOLE", Nutrient::Macro(Macro::Cholesterol)),
    ("FASAT", Nutrient::Macro(Macro::SaturatedFat)),
    ("FATRN", Nutrient::Macro(Macro::TransFat)),
    ("FAMS", Nutrient::Macro(Macro::MonounsaturatedFat)),
    ("FAPU", Nutrient::Macro(Macro::PolyunsaturatedFat)),
    // Vitamins
    ("VITA_RAE", Nutrient::Vitamin(Vitamin::VitaminA)),
    ("VITC", Nutrient::Vitamin(Vitamin::VitaminC)),
    ("VITD", Nutrient::Vitamin(Vitamin::VitaminD)),
    ("TOCPHA", Nutrient::Vitamin(Vitamin::VitaminE)),
    ("VITK1", Nutrient::Vitamin(Vitamin::VitaminK)),
    ("THIA", Nutrient::Vitamin(Vitamin::Thiamin)),
    ("RIBF", Nutrient::Vitamin(Vitamin::Riboflavin)),
    ("NIA", Nutrient::Vitamin(Vitamin::Niacin)),
    ("VITB6A", Nutrient::Vitamin(Vitamin::VitaminB6)),
    ("FOLDFE", Nutrient::Vitamin(Vitamin::Folate)),
    ("VITB12", Nutrient::Vitamin(Vitamin::VitaminB12)),
    ("BIOT", Nutrient::Vitamin(Vitamin::Biotin)),
    ("PANTAC", Nutrient::Vitamin(Vitamin::PantothenicAcid)),
    // Minerals
    ("CA", Nutrient::Mineral(Mineral::Calcium)),
    ("FE", Nutrient::Mineral(Mineral::Iron)),
    ("MG", Nutrient::Mineral(Mineral::Magnesium)),
    ("P", Nutrient::Mineral(Mineral::Phosphorus)),
    ("K", Nutrient::Mineral(Mineral::Potassium)),
    ("ZN", Nutrient::Mineral(Mineral::Zinc)),
    ("CU", Nutrient::Mineral(Mineral::Copper)),
    ("MN", Nutrient::Mineral(Mineral::Manganese)),
    ("SE", Nutrient::Mineral(Mineral::Selenium)),
    ("ID", Nutrient::Mineral(Mineral::Iodine)),
    ("CR", Nutrient::Mineral(Mineral::Chromium)),
    ("MO", Nutrient::Mineral(Mineral::Molybdenum)),
];

/// Spoonacular nutrient display names
pub const SPOONACULAR_NAMES: &[(&str, Nutrient)] = &[
    ("Calories", Nutrient::Calories),
    // Macros
    ("Protein", Nutrient::Macro(Macro::Protein)),
    ("Carbohydrates", Nutrient::Macro(Macro::Carbs)),
    ("Fat", Nutrient::Macro(Macro::Fat)),
    ("Fiber", Nutrient::Macro(Macro::Fiber)),
    ("Sugar", Nutrient::Macro(Macro::Sugar)),
    ("Sodium", Nutrient::Macro(Macro::Sodium)),
    ("Cholesterol", Nutrient::Macro(Macro::Cholesterol)),
    ("Saturated Fat", Nutrient::Macro(Macro::SaturatedFat)),
    ("Trans Fat", Nutrient::Macro(Macro::TransFat)),
    ("Mono Unsaturated Fat", Nutrient::Macro(Macro::MonounsaturatedFat)),
    ("Monounsaturated Fat", Nutrient::Macro(Macro::MonounsaturatedFat)),
    ("Poly Unsaturated Fat", Nutrient::Macro(Macro::PolyunsaturatedFat)),
    ("Polyunsaturated Fat", Nutrient::Macro(Macro::PolyunsaturatedFat)),
    // Vitamins
    ("Vitamin A", Nutrient::Vitamin(Vitamin::VitaminA)),
    ("Vitamin C", Nutrient::Vitamin(Vitamin::VitaminC)),
    ("Vitamin D", Nutrient::Vitamin(Vitamin::VitaminD)),
    ("Vitamin E", Nutrient::Vitamin(Vitamin::VitaminE)),
    ("Vitamin K", Nutrient::Vitamin(Vitamin::VitaminK)),
    ("Vitamin B1", Nutrient::Vitamin(Vitamin::Thiamin)),
    ("Thiamin", Nutrient::Vitamin(Vitamin::Thiamin)),
    ("Vitamin B2", Nutrient::Vitamin(Vitamin::Riboflavin)),
    ("Riboflavin", Nutrient::Vitamin(Vitamin::Riboflavin)),
    ("Vitamin B3", Nutrient::Vitamin(Vitamin::Niacin)),
    ("Niacin", Nutrient::Vitamin(Vitamin::Niacin)),
    ("Vitamin B6", Nutrient::Vitamin(Vitamin::VitaminB6)),
    ("Folate", Nutrient::Vitamin(Vitamin::Folate)),
    ("Vitamin B12", Nutrient::Vitamin(Vitamin::VitaminB12)),
    ("Biotin", Nutrient::Vitamin(Vitamin::Biotin)),
    ("Vitamin B5", Nutrient::Vitamin(Vitamin::PantothenicAcid)),
    ("Pantothenic Acid", Nutrient::Vitamin(Vitamin::PantothenicAcid)),
    // Minerals
    ("Calcium", Nutrient::Mineral(Mineral::Calcium)),
    ("Iron", Nutrient::Mineral(Mineral::Iron)),
    ("Magnesium", Nutrient::Mineral(Mineral::Magnesium)),
    ("Phosphorus", Nutrient::Mineral(Mineral::Phosphorus)),
    ("Potassium", Nutrient::Mineral(Mineral::Potassium)),
    ("Zinc", Nutrient::Mineral(Mineral::Zinc)),
    ("Copper", Nutrient::Mineral(Mineral::Copper)),
    ("Manganese", Nutrient::Mineral(Mineral::Manganese)),
    ("Selenium", Nutrient::Mineral(Mineral::Selenium)),
    ("Iodine", Nutrient::Mineral(Mineral::Iodine)),
    ("Chromium", Nutrient::Mineral(Mineral::Chromium)),
    ("Molybdenum", Nutrient::Mineral(Mineral::Molybdenum)),
];

/// Field for an Edamam nutrient code
pub fn edamam_nutrient(code: &str) -> Option<Nutrient> {
    EDAMAM_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, nutrient)| *nutrient)
}

/// Field for a Spoonacular nutrient name (case-insensitive)
pub fn spoonacular_nutrient(name: &str) -> Option<Nutrient> {
    let name = name.trim();
    SPOONACULAR_NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, nutrient)| *nutrient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_edamam_lookup() {
        assert_eq!(edamam_nutrient("ENERC_KCAL"), Some(Nutrient::Calories));
        assert_eq!(edamam_nutrient("PROCNT"), Some(Nutrient::Macro(Macro::Protein)));
        assert_eq!(edamam_nutrient("FE"), Some(Nutrient::Mineral(Mineral::Iron)));
        assert_eq!(edamam_nutrient("WATER"), None);
        assert_eq!(edamam_nutrient("procnt"), None);
    }

    #[test]
    fn test_edamam_codes_are_unique() {
        let codes: HashSet<&str> = EDAMAM_CODES.iter().map(|(c, _)| *c).collect();
        assert_eq!(codes.len(), EDAMAM_CODES.len());
    }

    #[test]
    fn test_every_field_has_an_edamam_code() {
        let mapped: HashSet<Nutrient> = EDAMAM_CODES.iter().map(|(_, n)| *n).collect();
        for m in Macro::ALL {
            assert!(mapped.contains(&Nutrient::Macro(*m)), "{} unmapped", m);
        }
        for v in Vitamin::ALL {
            assert!(mapped.contains(&Nutrient::Vitamin(*v)), "{} unmapped", v);
        }
        for m in Mineral::ALL {
            assert!(mapped.contains(&Nutrient::Mineral(*m)), "{} unmapped", m);
        }
    }

    #[test]
    fn test_spoonacular_lookup() {
        assert_eq!(spoonacular_nutrient("Saturated Fat"), Some(Nutrient::Macro(Macro::SaturatedFat)));
        assert_eq!(spoonacular_nutrient("vitamin c"), Some(Nutrient::Vitamin(Vitamin::VitaminC)));
        assert_eq!(spoonacular_nutrient("Net Carbohydrates"), None);
    }
}
