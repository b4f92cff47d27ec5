//! Vector arithmetic
//!
//! Pure add / subtract / multiply over nutrition vectors. Results are built
//! into fresh maps; inputs are never mutated. No rounding happens here.

use std::collections::BTreeMap;

use crate::models::{Micros, NutrientAmount, NutritionVector};

/// Combine two sparse maps over the union of their keys
fn merge<K: Ord + Copy>(
    a: &BTreeMap<K, NutrientAmount>,
    b: &BTreeMap<K, NutrientAmount>,
    op: impl Fn(f64, f64) -> f64,
) -> BTreeMap<K, NutrientAmount> {
    let mut result = BTreeMap::new();

    for (key, left) in a {
        let right = b.get(key).map(|r| r.quantity).unwrap_or(0.0);
        result.insert(*key, NutrientAmount::new(op(left.quantity, right), left.unit));
    }
    for (key, right) in b {
        if !a.contains_key(key) {
            result.insert(*key, NutrientAmount::new(op(0.0, right.quantity), right.unit));
        }
    }

    result
}

fn scale_map<K: Ord + Copy>(
    map: &BTreeMap<K, NutrientAmount>,
    scalar: f64,
) -> BTreeMap<K, NutrientAmount> {
    map.iter()
        .map(|(key, amount)| (*key, NutrientAmount::new(scale_quantity(amount.quantity, scalar), amount.unit)))
        .collect()
}

fn scale_quantity(quantity: f64, scalar: f64) -> f64 {
    (quantity * scalar).max(0.0)
}

fn combine(a: &NutritionVector, b: &NutritionVector, op: impl Fn(f64, f64) -> f64 + Copy) -> NutritionVector {
    let weight = match (a.weight, b.weight) {
        (None, None) => None,
        (left, right) => Some(op(left.unwrap_or(0.0), right.unwrap_or(0.0))),
    };

    NutritionVector {
        calories: NutrientAmount::new(op(a.calories.quantity, b.calories.quantity), a.calories.unit),
        macros: merge(&a.macros, &b.macros, op),
        micros: Micros {
            vitamins: merge(&a.micros.vitamins, &b.micros.vitamins, op),
            minerals: merge(&a.micros.minerals, &b.micros.minerals, op),
        },
        weight,
    }
}

/// Field-wise sum over the union of keys
pub fn add(a: &NutritionVector, b: &NutritionVector) -> NutritionVector {
    combine(a, b, |x, y| x + y)
}

/// Field-wise `max(0, a - b)` over the union of keys
pub fn subtract(a: &NutritionVector, b: &NutritionVector) -> NutritionVector {
    combine(a, b, |x, y| (x - y).max(0.0))
}

/// Scale every populated quantity
///
/// `scalar` is expected to be non-negative; a negative scalar yields zeros.
pub fn multiply(a: &NutritionVector, scalar: f64) -> NutritionVector {
    NutritionVector {
        calories: NutrientAmount::new(scale_quantity(a.calories.quantity, scalar), a.calories.unit),
        macros: scale_map(&a.macros, scalar),
        micros: Micros {
            vitamins: scale_map(&a.micros.vitamins, scalar),
            minerals: scale_map(&a.micros.minerals, scalar),
        },
        weight: a.weight.map(|w| scale_quantity(w, scalar)),
    }
}

impl NutritionVector {
    /// Add another vector to this one
    pub fn add(&self, other: &NutritionVector) -> Self {
        add(self, other)
    }

    /// Subtract another vector, clamping each field at zero
    pub fn subtract(&self, other: &NutritionVector) -> Self {
        subtract(self, other)
    }

    /// Scale every value by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        multiply(self, multiplier)
    }
}

impl std::ops::Add for NutritionVector {
    type Output = NutritionVector;

    fn add(self, other: NutritionVector) -> NutritionVector {
        add(&self, &other)
    }
}

impl std::ops::Sub for NutritionVector {
    type Output = NutritionVector;

    fn sub(self, other: NutritionVector) -> NutritionVector {
        subtract(&self, &other)
    }
}

impl std::ops::Mul<f64> for NutritionVector {
    type Output = NutritionVector;

    fn mul(self, multiplier: f64) -> NutritionVector {
        multiply(&self, multiplier)
    }
}

impl std::iter::Sum for NutritionVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutritionVector::zero(), |acc, n| acc + n)
    }
}
