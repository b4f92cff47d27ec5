//! NVE Tools module
//!
//! MCP tool implementations for the Nutrition Vector Engine.

pub mod customize;
pub mod nutrition;
pub mod status;
