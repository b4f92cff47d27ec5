//! Provider payload normalization
//!
//! Detects which known shape a raw nutrition payload is in and converts it
//! into a [`NutritionVector`]. Unrecognized payloads yield `None`; callers
//! treat that as "no nutrition data for this ingredient".

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::codes::{edamam_nutrient, spoonacular_nutrient};
use super::units::canonical_amount;
use crate::models::{Macro, Mineral, Nutrient, NutrientAmount, NutritionVector, Vitamin};

/// Payload shapes the normalizer recognizes, in detection priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PayloadFormat {
    /// Already a nutrition vector
    Standardized,
    /// Edamam nutrition-data response: `ingredients[0].parsed[0].nutrients`
    EdamamNested,
    /// Edamam nutrient codes at the root, or under `nutrients` / `totalNutrients`
    EdamamFlat,
    /// Spoonacular `nutrients: [{name, amount, unit}]`
    SpoonacularList,
    /// Bare numbers: `{calories, protein, carbs, ...}` or `{calories, macros: {protein, ...}}`
    Simplified,
}

/// Detect the shape of a raw payload
pub fn detect_format(raw: &Value) -> Option<PayloadFormat> {
    let root = raw.as_object()?;

    if is_standardized(root) {
        Some(PayloadFormat::Standardized)
    } else if edamam_nested_node(raw).is_some() {
        Some(PayloadFormat::EdamamNested)
    } else if edamam_code_object(root).is_some() {
        Some(PayloadFormat::EdamamFlat)
    } else if spoonacular_list(raw).is_some() {
        Some(PayloadFormat::SpoonacularList)
    } else if is_simplified(root) {
        Some(PayloadFormat::Simplified)
    } else {
        None
    }
}

/// Normalize a raw payload into a nutrition vector
pub fn normalize(raw: &Value) -> Option<NutritionVector> {
    let Some(format) = detect_format(raw) else {
        let keys: Vec<&str> = raw
            .as_object()
            .map(|o| o.keys().map(String::as_str).take(10).collect())
            .unwrap_or_default();
        warn!("Unrecognized nutrition payload format (keys: {:?})", keys);
        return None;
    };

    debug!("Normalizing nutrition payload as {:?}", format);

    // detect_format guarantees the lookups below succeed
    let root = raw.as_object()?;
    let vector = match format {
        PayloadFormat::Standardized | PayloadFormat::Simplified => from_standardized(root),
        PayloadFormat::EdamamNested => {
            let parsed = edamam_nested_node(raw)?;
            let nutrients = parsed.get("nutrients")?.as_object()?;
            let weight = parsed.get("weight").and_then(Value::as_f64);
            from_edamam_codes(nutrients, weight)
        }
        PayloadFormat::EdamamFlat => {
            let nutrients = edamam_code_object(root)?;
            let weight = root.get("totalWeight").and_then(Value::as_f64);
            from_edamam_codes(nutrients, weight)
        }
        PayloadFormat::SpoonacularList => from_spoonacular(raw)?,
    };

    Some(vector)
}

// ============================================================================
// Shape Detection
// ============================================================================

fn is_amount(entry: &Value) -> bool {
    entry
        .as_object()
        .map(|o| o.contains_key("quantity") && o.contains_key("unit"))
        .unwrap_or(false)
}

/// A vector this module produced: `macros.protein` as an amount, or, for
/// sparse vectors, calories and every macro entry as amounts
fn is_standardized(root: &Map<String, Value>) -> bool {
    let Some(calories) = root.get("calories") else {
        return false;
    };
    let Some(macros) = root.get("macros").and_then(Value::as_object) else {
        return false;
    };

    macros.get("protein").map(is_amount).unwrap_or(false)
        || (is_amount(calories) && macros.values().all(is_amount))
}

fn edamam_nested_node(raw: &Value) -> Option<&Map<String, Value>> {
    let parsed = raw
        .get("ingredients")?
        .as_array()?
        .first()?
        .get("parsed")?
        .as_array()?
        .first()?
        .as_object()?;
    parsed.get("nutrients")?.as_object()?;
    Some(parsed)
}

fn has_edamam_code(object: &Map<String, Value>) -> bool {
    object
        .iter()
        .any(|(code, entry)| edamam_nutrient(code).is_some() && entry.is_object())
}

fn edamam_code_object(root: &Map<String, Value>) -> Option<&Map<String, Value>> {
    for wrapper in ["totalNutrients", "nutrients"] {
        if let Some(inner) = root.get(wrapper).and_then(Value::as_object) {
            if has_edamam_code(inner) {
                return Some(inner);
            }
        }
    }
    has_edamam_code(root).then_some(root)
}

fn spoonacular_list(raw: &Value) -> Option<(&Vec<Value>, Option<&Value>)> {
    let nutrition = [
        Some(raw),
        raw.get("nutrition"),
        raw.get("rawData").and_then(|r| r.get("nutrition")),
    ];

    nutrition.into_iter().flatten().find_map(|node| {
        let list = node.get("nutrients")?.as_array()?;
        let named = list.iter().any(|n| n.get("name").is_some() && n.get("amount").is_some());
        named.then(|| (list, node.get("weightPerServing")))
    })
}

fn is_simplified(root: &Map<String, Value>) -> bool {
    let has_calories = root.get("calories").map(Value::is_number).unwrap_or(false);
    let has_macros = root.get("macros").map(Value::is_object).unwrap_or(false)
        || Macro::REQUIRED
            .iter()
            .any(|m| root.get(m.key()).map(Value::is_number).unwrap_or(false));
    has_calories && has_macros
}

// ============================================================================
// Conversion
// ============================================================================

/// Read a `{quantity, unit}` object or a bare number
fn read_entry(nutrient: Nutrient, entry: &Value) -> Option<NutrientAmount> {
    match entry {
        Value::Number(n) => Some(canonical_amount(nutrient, n.as_f64()?, None)),
        Value::Object(o) => {
            let quantity = o.get("quantity").and_then(Value::as_f64)?;
            let unit = o.get("unit").and_then(Value::as_str);
            Some(canonical_amount(nutrient, quantity, unit))
        }
        _ => None,
    }
}

fn read_section<K>(
    vector: &mut NutritionVector,
    section: Option<&Value>,
    parse_key: impl Fn(&str) -> Option<K>,
) where
    K: Into<Nutrient>,
{
    let Some(entries) = section.and_then(Value::as_object) else {
        return;
    };

    for (key, entry) in entries {
        match parse_key(key) {
            Some(k) => {
                let nutrient = k.into();
                if let Some(amount) = read_entry(nutrient, entry) {
                    vector.set_amount(nutrient, amount);
                }
            }
            None => debug!("Dropping unknown nutrient key '{}'", key),
        }
    }
}

fn from_standardized(root: &Map<String, Value>) -> NutritionVector {
    let mut vector = NutritionVector::empty();

    if let Some(calories) = root.get("calories").and_then(|c| read_entry(Nutrient::Calories, c)) {
        vector.calories = calories;
    }

    if root.contains_key("macros") {
        read_section(&mut vector, root.get("macros"), Macro::from_key);
    } else {
        // Legacy flat numbers at the root
        for m in Macro::ALL {
            if let Some(amount) = root.get(m.key()).and_then(|e| read_entry((*m).into(), e)) {
                vector.set_amount((*m).into(), amount);
            }
        }
    }

    let micros = root.get("micros");
    read_section(&mut vector, micros.and_then(|m| m.get("vitamins")), Vitamin::from_key);
    read_section(&mut vector, micros.and_then(|m| m.get("minerals")), Mineral::from_key);

    vector.weight = root.get("weight").and_then(Value::as_f64);
    vector
}

fn from_edamam_codes(nutrients: &Map<String, Value>, weight: Option<f64>) -> NutritionVector {
    let mut vector = NutritionVector::zero();

    for (code, entry) in nutrients {
        let Some(nutrient) = edamam_nutrient(code) else {
            continue;
        };
        if let Some(amount) = read_entry(nutrient, entry) {
            vector.set_amount(nutrient, amount);
        }
    }

    vector.weight = weight;
    vector
}

fn from_spoonacular(raw: &Value) -> Option<NutritionVector> {
    let (list, weight) = spoonacular_list(raw)?;
    let mut vector = NutritionVector::zero();

    for item in list {
        let Some(nutrient) = item.get("name").and_then(Value::as_str).and_then(spoonacular_nutrient) else {
            continue;
        };
        let Some(amount) = item.get("amount").and_then(Value::as_f64) else {
            continue;
        };
        let unit = item.get("unit").and_then(Value::as_str);
        vector.set_amount(nutrient, canonical_amount(nutrient, amount, unit));
    }

    vector.weight = weight
        .filter(|w| w.get("unit").and_then(Value::as_str).map(|u| u == "g").unwrap_or(true))
        .and_then(|w| w.get("amount"))
        .and_then(Value::as_f64);
    Some(vector)
}
