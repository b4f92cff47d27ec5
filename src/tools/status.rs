//! NVE Status Tool
//!
//! Provides runtime status information about the NVE service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::{BUILD_NUMBER, BUILD_TIMESTAMP, VERSION};

/// Usage instructions for AI assistants
pub const NUTRITION_INSTRUCTIONS: &str = r#"
# NVE Nutrition Instructions

The Nutrition Vector Engine turns raw nutrition payloads into unit-aware
vectors, totals recipes and applies ingredient changes.

## Nutrition Vectors

Every vector has the same shape:

```json
{
  "calories": {"quantity": 350.0, "unit": "kcal"},
  "macros": {"protein": {"quantity": 17.0, "unit": "g"}},
  "micros": {
    "vitamins": {"vitaminC": {"quantity": 12.5, "unit": "mg"}},
    "minerals": {"iron": {"quantity": 2.1, "unit": "mg"}}
  },
  "weight": 420.0
}
```

A missing nutrient means zero. Units are fixed per nutrient (sodium and
cholesterol in mg, vitamin A in IU, selenium in µg, ...).

## Tools

1. **normalize_nutrition** - pass any provider payload (Edamam nutrition-data
   response, Edamam nutrient codes, Spoonacular nutrient list, simple
   numbers, or an existing vector). Returns the detected format and the vector.
2. **calculate_recipe_nutrition** - pass `ingredients: [{name, nutrition}]`
   where each payload is already scaled to the amount used, plus `servings`
   (at least 1). Returns total, per-serving and (when weight is known)
   per-100g vectors. Ingredients without data are listed, not fatal.
3. **customize_recipe** - pass the recipe vector, whether it is `perServing`
   or `recipeTotal`, an ordered list of modifications and optionally
   `servings`.

## Modifications

| type | fields |
|------|--------|
| replace | originalIngredient, newIngredient |
| omit | originalIngredient, reductionPercent (optional) |
| add | newIngredient |
| reduce | originalIngredient, reductionPercent (0-100) |

Describe ingredients with quantities ("2 tbsp butter", "1 cup brown rice");
they are looked up as written.

## Reading Results

- `calculationMethod: precise` - every applied change used real ingredient data.
- `calculationMethod: approximate` - the nutrition provider was unavailable.
  Omit/reduce shrank calories and macros by the percent; replace/add were
  skipped. Tell the user the numbers are estimates.
- `micronutrientsIncluded: false` - vitamins and minerals were not adjusted.
- `skippedModifications` - changes that could not be applied, with the reason.
  Mention these to the user.

When `servings` is given, a `recipeTotal` input comes back per serving and a
`perServing` input comes back as a recipe total.
"#;

/// Runtime status of the NVE service
#[derive(Debug, Clone, Serialize)]
pub struct NveStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Whether ingredient lookups go to a real provider
    pub provider_configured: bool,
    pub lookup_timeout_secs: u64,

    /// Process information
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: String,
    provider_configured: bool,
    lookup_timeout_secs: u64,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(provider_configured: bool, lookup_timeout_secs: u64) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            provider_configured,
            lookup_timeout_secs,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> NveStatus {
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        NveStatus {
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            version: VERSION,
            provider_configured: self.provider_configured,
            lookup_timeout_secs: self.lookup_timeout_secs,
            started_at: self.started_at.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_configuration() {
        let status = StatusTracker::new(true, 7).get_status();
        assert!(status.provider_configured);
        assert_eq!(status.lookup_timeout_secs, 7);
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
        assert!(status.started_at.ends_with('Z'));
    }
}
