//! Nutrition Vector Engine (NVE) Library
//!
//! Unit-aware nutrition vectors: normalization from provider payloads,
//! recipe aggregation and ingredient-level customization.

pub mod build_info;
pub mod config;
pub mod customization;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod provider;
pub mod tools;
