//! Nutrition calculation module
//!
//! Format normalization, unit handling, vector arithmetic and recipe
//! aggregation. Everything here is pure and synchronous.

pub mod aggregator;
pub mod arithmetic;
pub mod codes;
pub mod normalizer;
pub mod rounding;
pub mod units;

pub use aggregator::{aggregate, per_serving, RecipeAggregator};
pub use arithmetic::{add, multiply, subtract};
pub use normalizer::{detect_format, normalize, PayloadFormat};
pub use rounding::round_to;
pub use units::{canonical_unit, convert, parse_unit};
