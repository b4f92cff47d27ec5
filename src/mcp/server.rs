//! NVE MCP Server Implementation
//!
//! Exposes normalization, recipe aggregation and customization as MCP tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::customization::ModificationEngine;
use crate::models::{Modification, ModificationRequest, RecipeIngredient, VectorBasis};
use crate::nutrition::normalize;
use crate::provider::IngredientLookup;
use crate::tools::customize;
use crate::tools::nutrition;
use crate::tools::status::StatusTracker;

/// NVE MCP Service
#[derive(Clone)]
pub struct NveService {
    engine: Arc<ModificationEngine<Arc<dyn IngredientLookup>>>,
    status_tracker: Arc<Mutex<StatusTracker>>,
    tool_router: ToolRouter<NveService>,
}

impl NveService {
    pub fn new(config: &Config, lookup: Arc<dyn IngredientLookup>) -> Self {
        Self {
            engine: Arc::new(ModificationEngine::new(lookup, config.lookup_timeout)),
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(
                config.provider_configured(),
                config.lookup_timeout.as_secs(),
            ))),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NormalizeNutritionParams {
    /// Raw nutrition payload in any supported provider format
    pub payload: Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IngredientParam {
    pub name: String,
    /// Provider payload already scaled to the amount used in the recipe
    #[serde(default)]
    pub nutrition: Option<Value>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateRecipeNutritionParams {
    pub ingredients: Vec<IngredientParam>,
    #[serde(default = "default_servings")]
    pub servings: f64,
}

fn default_servings() -> f64 { 1.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CustomizeRecipeParams {
    /// Current recipe nutrition in any supported format
    pub nutrition: Value,
    /// Whether `nutrition` is one serving or the whole recipe
    #[serde(default)]
    pub basis: VectorBasis,
    /// Applied in order
    pub modifications: Vec<Modification>,
    pub servings: Option<f64>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl NveService {
    // --- Status ---

    #[tool(description = "Get the current status of the NVE service including build info, provider configuration, and process information")]
    async fn get_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for the nutrition tools: vector format, supported payloads, modification types and how to read accuracy flags.")]
    fn nutrition_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::NUTRITION_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(NUTRITION_INSTRUCTIONS)]))
    }

    // --- Nutrition ---

    #[tool(description = "Normalize a raw nutrition payload (Edamam, Spoonacular, simple numbers or an existing vector) into a unit-aware nutrition vector")]
    fn normalize_nutrition(&self, Parameters(p): Parameters<NormalizeNutritionParams>) -> Result<CallToolResult, McpError> {
        let result = nutrition::normalize_nutrition(&p.payload);
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Sum ingredient nutrition payloads into recipe totals, per-serving and per-100g values. Ingredients without usable data count as zero and are listed.")]
    fn calculate_recipe_nutrition(&self, Parameters(p): Parameters<CalculateRecipeNutritionParams>) -> Result<CallToolResult, McpError> {
        let ingredients: Vec<RecipeIngredient> = p
            .ingredients
            .into_iter()
            .map(|i| RecipeIngredient { name: i.name, nutrition: i.nutrition })
            .collect();
        let result = nutrition::calculate_recipe_nutrition(&ingredients, p.servings)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Customization ---

    #[tool(description = "Apply replace/omit/add/reduce modifications to a recipe's nutrition. Uses per-ingredient lookups when the provider is available, otherwise an approximate estimate flagged in the result.")]
    async fn customize_recipe(&self, Parameters(p): Parameters<CustomizeRecipeParams>) -> Result<CallToolResult, McpError> {
        let nutrition = normalize(&p.nutrition)
            .ok_or_else(|| McpError::internal_error("Unrecognized nutrition payload".to_string(), None))?;
        let request = ModificationRequest {
            nutrition,
            basis: p.basis,
            modifications: p.modifications,
            servings: p.servings,
        };
        let result = customize::customize_recipe(self.engine.as_ref(), &request)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NveService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nve".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nutrition Vector Engine".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nutrition Vector Engine (NVE) - unit-aware nutrition arithmetic. \
                 Call nutrition_instructions first. \
                 normalize_nutrition converts provider payloads; \
                 calculate_recipe_nutrition totals ingredients; \
                 customize_recipe applies replace/omit/add/reduce and reports calculationMethod, accuracy and skipped modifications. \
                 get_status reports build and provider state."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_customize_params_parse_modifications() {
        let params: CustomizeRecipeParams = serde_json::from_value(json!({
            "nutrition": {"calories": 500, "protein": 20},
            "basis": "perServing",
            "modifications": [
                {"type": "replace", "originalIngredient": "butter", "newIngredient": "olive oil"},
                {"type": "reduce", "originalIngredient": "sugar", "reductionPercent": 25}
            ],
            "servings": 4
        }))
        .unwrap();
        assert_eq!(params.basis, VectorBasis::PerServing);
        assert_eq!(params.modifications.len(), 2);
        assert_eq!(params.modifications[1].reduction_percent(), Some(25.0));
        assert_eq!(params.servings, Some(4.0));
    }

    #[test]
    fn test_modification_schema_is_tagged() {
        let schema = serde_json::to_value(schemars::schema_for!(CustomizeRecipeParams)).unwrap();
        assert!(schema.to_string().contains("originalIngredient"));
    }

    #[test]
    fn test_basis_defaults_to_recipe_total() {
        let params: CustomizeRecipeParams = serde_json::from_value(json!({
            "nutrition": {"calories": 100, "protein": 1},
            "modifications": []
        }))
        .unwrap();
        assert_eq!(params.basis, VectorBasis::RecipeTotal);
        assert!(params.servings.is_none());
    }
}
