//! Nutrient keys and unit-tagged quantities
//!
//! Every nutrient the engine tracks is a typed key. Keys serialize as the
//! camelCase names used on the wire (`saturatedFat`, `vitaminB12`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Measurement unit attached to a nutrient quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kcal")]
    Kilocalorie,
    /// Only seen on provider input; canonical energy is always kcal
    #[serde(rename = "kJ")]
    Kilojoule,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "mg")]
    Milligram,
    #[serde(rename = "µg", alias = "mcg", alias = "μg", alias = "ug")]
    Microgram,
    #[serde(rename = "IU")]
    InternationalUnit,
}

impl Unit {
    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Kilocalorie => "kcal",
            Unit::Kilojoule => "kJ",
            Unit::Gram => "g",
            Unit::Milligram => "mg",
            Unit::Microgram => "µg",
            Unit::InternationalUnit => "IU",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A quantity with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientAmount {
    pub quantity: f64,
    pub unit: Unit,
}

impl NutrientAmount {
    pub fn new(quantity: f64, unit: Unit) -> Self {
        Self { quantity, unit }
    }
}

/// Declares a nutrient key enum with its wire names and a list of all keys.
macro_rules! nutrient_keys {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $key:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire name of this key
            pub fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            /// Look up a key by its wire name
            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

nutrient_keys! {
    /// Macronutrients (plus sodium and cholesterol, which travel with them)
    Macro {
        Protein => "protein",
        Carbs => "carbs",
        Fat => "fat",
        Fiber => "fiber",
        Sugar => "sugar",
        Sodium => "sodium",
        Cholesterol => "cholesterol",
        SaturatedFat => "saturatedFat",
        TransFat => "transFat",
        MonounsaturatedFat => "monounsaturatedFat",
        PolyunsaturatedFat => "polyunsaturatedFat",
    }
}

nutrient_keys! {
    Vitamin {
        VitaminA => "vitaminA",
        VitaminC => "vitaminC",
        VitaminD => "vitaminD",
        VitaminE => "vitaminE",
        VitaminK => "vitaminK",
        Thiamin => "thiamin",
        Riboflavin => "riboflavin",
        Niacin => "niacin",
        VitaminB6 => "vitaminB6",
        Folate => "folate",
        VitaminB12 => "vitaminB12",
        Biotin => "biotin",
        PantothenicAcid => "pantothenicAcid",
    }
}

nutrient_keys! {
    Mineral {
        Calcium => "calcium",
        Iron => "iron",
        Magnesium => "magnesium",
        Phosphorus => "phosphorus",
        Potassium => "potassium",
        Zinc => "zinc",
        Copper => "copper",
        Manganese => "manganese",
        Selenium => "selenium",
        Iodine => "iodine",
        Chromium => "chromium",
        Molybdenum => "molybdenum",
    }
}

impl Macro {
    /// Keys every normalized provider vector carries, zero when not reported
    pub const REQUIRED: &'static [Macro] = &[
        Macro::Protein,
        Macro::Carbs,
        Macro::Fat,
        Macro::Fiber,
        Macro::Sugar,
        Macro::Sodium,
    ];
}

/// Any field of a nutrition vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Calories,
    Macro(Macro),
    Vitamin(Vitamin),
    Mineral(Mineral),
}

impl From<Macro> for Nutrient {
    fn from(m: Macro) -> Self {
        Nutrient::Macro(m)
    }
}

impl From<Vitamin> for Nutrient {
    fn from(v: Vitamin) -> Self {
        Nutrient::Vitamin(v)
    }
}

impl From<Mineral> for Nutrient {
    fn from(m: Mineral) -> Self {
        Nutrient::Mineral(m)
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nutrient::Calories => f.write_str("calories"),
            Nutrient::Macro(m) => fmt::Display::fmt(m, f),
            Nutrient::Vitamin(v) => fmt::Display::fmt(v, f),
            Nutrient::Mineral(m) => fmt::Display::fmt(m, f),
        }
    }
}
