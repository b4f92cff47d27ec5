//! Canonical units and unit conversion
//!
//! The single table that fixes the unit of every nutrient key, plus the
//! conversion factors used when a provider reports something else.

use crate::models::{Macro, Mineral, Nutrient, NutrientAmount, Unit, Vitamin};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Micrograms per gram
pub const UG_PER_G: f64 = 1_000_000.0;
/// Micrograms per milligram
pub const UG_PER_MG: f64 = 1_000.0;
/// Kilojoules per kilocalorie
pub const KJ_PER_KCAL: f64 = 4.184;

/// Micrograms of retinol activity per IU of vitamin A
pub const VITAMIN_A_UG_PER_IU: f64 = 0.3;
/// Micrograms of cholecalciferol per IU of vitamin D
pub const VITAMIN_D_UG_PER_IU: f64 = 0.025;
/// Milligrams of alpha-tocopherol per IU of vitamin E
pub const VITAMIN_E_MG_PER_IU: f64 = 0.67;

// ============================================================================
// Canonical Unit Table
// ============================================================================

/// The unit a nutrient is always stored in
pub fn canonical_unit(nutrient: Nutrient) -> Unit {
    match nutrient {
        Nutrient::Calories => Unit::Kilocalorie,
        Nutrient::Macro(m) => match m {
            Macro::Sodium | Macro::Cholesterol => Unit::Milligram,
            Macro::Protein
            | Macro::Carbs
            | Macro::Fat
            | Macro::Fiber
            | Macro::Sugar
            | Macro::SaturatedFat
            | Macro::TransFat
            | Macro::MonounsaturatedFat
            | Macro::PolyunsaturatedFat => Unit::Gram,
        },
        Nutrient::Vitamin(v) => match v {
            Vitamin::VitaminA => Unit::InternationalUnit,
            Vitamin::VitaminD
            | Vitamin::VitaminK
            | Vitamin::Folate
            | Vitamin::VitaminB12
            | Vitamin::Biotin => Unit::Microgram,
            Vitamin::VitaminC
            | Vitamin::VitaminE
            | Vitamin::Thiamin
            | Vitamin::Riboflavin
            | Vitamin::Niacin
            | Vitamin::VitaminB6
            | Vitamin::PantothenicAcid => Unit::Milligram,
        },
        Nutrient::Mineral(m) => match m {
            Mineral::Selenium | Mineral::Iodine | Mineral::Chromium | Mineral::Molybdenum => {
                Unit::Microgram
            }
            Mineral::Calcium
            | Mineral::Iron
            | Mineral::Magnesium
            | Mineral::Phosphorus
            | Mineral::Potassium
            | Mineral::Zinc
            | Mineral::Copper
            | Mineral::Manganese => Unit::Milligram,
        },
    }
}

// ============================================================================
// Unit Recognition
// ============================================================================

/// Parse a provider unit string
pub fn parse_unit(unit: &str) -> Option<Unit> {
    let lower = unit.trim().to_lowercase();

    match lower.as_str() {
        "kcal" | "cal" | "calories" | "kilocalorie" | "kilocalories" => Some(Unit::Kilocalorie),
        "kj" | "kilojoule" | "kilojoules" => Some(Unit::Kilojoule),
        "g" | "gram" | "grams" => Some(Unit::Gram),
        "mg" | "milligram" | "milligrams" => Some(Unit::Milligram),
        "µg" | "μg" | "mcg" | "ug" | "microgram" | "micrograms" => Some(Unit::Microgram),
        "iu" => Some(Unit::InternationalUnit),
        _ => None,
    }
}

/// Micrograms per unit for mass units
pub fn micrograms_per_unit(unit: Unit) -> Option<f64> {
    match unit {
        Unit::Gram => Some(UG_PER_G),
        Unit::Milligram => Some(UG_PER_MG),
        Unit::Microgram => Some(1.0),
        Unit::Kilocalorie | Unit::Kilojoule | Unit::InternationalUnit => None,
    }
}

/// Micrograms per IU for vitamins that have an IU definition
fn micrograms_per_iu(nutrient: Nutrient) -> Option<f64> {
    match nutrient {
        Nutrient::Vitamin(Vitamin::VitaminA) => Some(VITAMIN_A_UG_PER_IU),
        Nutrient::Vitamin(Vitamin::VitaminD) => Some(VITAMIN_D_UG_PER_IU),
        Nutrient::Vitamin(Vitamin::VitaminE) => Some(VITAMIN_E_MG_PER_IU * UG_PER_MG),
        _ => None,
    }
}

/// Express a quantity in micrograms, if the unit is a mass or an IU with a known factor
fn to_micrograms(quantity: f64, unit: Unit, nutrient: Nutrient) -> Option<f64> {
    match unit {
        Unit::InternationalUnit => micrograms_per_iu(nutrient).map(|f| quantity * f),
        _ => micrograms_per_unit(unit).map(|f| quantity * f),
    }
}

/// Convert a quantity of `nutrient` between units
///
/// Returns None if the units are not interconvertible for this nutrient.
pub fn convert(quantity: f64, from: Unit, to: Unit, nutrient: Nutrient) -> Option<f64> {
    if from == to {
        return Some(quantity);
    }

    match (from, to) {
        (Unit::Kilojoule, Unit::Kilocalorie) => Some(quantity / KJ_PER_KCAL),
        (Unit::Kilocalorie, Unit::Kilojoule) => Some(quantity * KJ_PER_KCAL),
        _ => {
            let micrograms = to_micrograms(quantity, from, nutrient)?;
            let per_target = to_micrograms(1.0, to, nutrient)?;
            Some(micrograms / per_target)
        }
    }
}

/// Build the canonical entry for a provider quantity
///
/// A missing or unconvertible provider unit keeps the quantity as reported and
/// assigns the canonical unit. Negative quantities are clamped to zero.
pub fn canonical_amount(nutrient: Nutrient, quantity: f64, reported_unit: Option<&str>) -> NutrientAmount {
    let target = canonical_unit(nutrient);
    let quantity = quantity.max(0.0);

    let converted = match reported_unit.map(|u| (u, parse_unit(u))) {
        Some((_, Some(from))) => match convert(quantity, from, target, nutrient) {
            Some(q) => q,
            None => {
                tracing::debug!(
                    "Cannot convert {} from {} to {}; keeping reported quantity",
                    nutrient,
                    from,
                    target
                );
                quantity
            }
        },
        Some((raw, None)) if !raw.trim().is_empty() => {
            tracing::debug!("Unrecognized unit '{}' for {}; assuming {}", raw, nutrient, target);
            quantity
        }
        _ => quantity,
    };

    NutrientAmount::new(converted, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_canonical_units() {
        assert_eq!(canonical_unit(Nutrient::Calories), Unit::Kilocalorie);
        assert_eq!(canonical_unit(Macro::Protein.into()), Unit::Gram);
        assert_eq!(canonical_unit(Macro::Sodium.into()), Unit::Milligram);
        assert_eq!(canonical_unit(Vitamin::VitaminA.into()), Unit::InternationalUnit);
        assert_eq!(canonical_unit(Vitamin::VitaminC.into()), Unit::Milligram);
        assert_eq!(canonical_unit(Mineral::Iron.into()), Unit::Milligram);
        assert_eq!(canonical_unit(Mineral::Selenium.into()), Unit::Microgram);
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!(parse_unit("g"), Some(Unit::Gram));
        assert_eq!(parse_unit(" mg "), Some(Unit::Milligram));
        assert_eq!(parse_unit("µg"), Some(Unit::Microgram));
        assert_eq!(parse_unit("mcg"), Some(Unit::Microgram));
        assert_eq!(parse_unit("IU"), Some(Unit::InternationalUnit));
        assert_eq!(parse_unit("kJ"), Some(Unit::Kilojoule));
        assert_eq!(parse_unit("%"), None);
    }

    #[test]
    fn test_mass_conversions() {
        let sodium = Nutrient::Macro(Macro::Sodium);
        assert!(close(convert(1.2, Unit::Gram, Unit::Milligram, sodium).unwrap(), 1200.0));
        assert!(close(convert(500.0, Unit::Microgram, Unit::Milligram, sodium).unwrap(), 0.5));
    }

    #[test]
    fn test_iu_conversions() {
        let vitamin_a = Nutrient::Vitamin(Vitamin::VitaminA);
        // 30 µg RAE = 100 IU
        assert!(close(convert(30.0, Unit::Microgram, Unit::InternationalUnit, vitamin_a).unwrap(), 100.0));

        let vitamin_d = Nutrient::Vitamin(Vitamin::VitaminD);
        assert!(close(convert(400.0, Unit::InternationalUnit, Unit::Microgram, vitamin_d).unwrap(), 10.0));

        // IU is meaningless for minerals
        let iron = Nutrient::Mineral(Mineral::Iron);
        assert_eq!(convert(10.0, Unit::InternationalUnit, Unit::Milligram, iron), None);
    }

    #[test]
    fn test_energy_conversion() {
        let kcal = convert(418.4, Unit::Kilojoule, Unit::Kilocalorie, Nutrient::Calories).unwrap();
        assert!(close(kcal, 100.0));
        assert_eq!(convert(1.0, Unit::Kilojoule, Unit::Gram, Nutrient::Calories), None);
    }

    #[test]
    fn test_canonical_amount() {
        let sodium = canonical_amount(Macro::Sodium.into(), 0.4, Some("g"));
        assert_eq!(sodium.unit, Unit::Milligram);
        assert!(close(sodium.quantity, 400.0));

        // Unknown unit: quantity kept, canonical unit assigned
        let protein = canonical_amount(Macro::Protein.into(), 7.0, Some("oz-ish"));
        assert_eq!(protein, NutrientAmount::new(7.0, Unit::Gram));

        let negative = canonical_amount(Macro::Fat.into(), -3.0, None);
        assert_eq!(negative.quantity, 0.0);
    }
}
