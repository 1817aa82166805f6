//! WebAssembly module for the coffee roast simulator
//!
//! Provides client-side computation for:
//! - Roast profile generation
//! - Profile lookups at an elapsed time
//! - Roasting tips per level

use shared::{generate_from_labels, recommendations_for, RoastLevel, RoastProfile};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("Roast simulator module loaded"));
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Generate a roast profile and return it as JSON
#[wasm_bindgen]
pub fn generate_roast_profile(
    bean_type: &str,
    roast_level: &str,
    charge_temp: f64,
    development_time_pct: f64,
) -> Result<String, JsValue> {
    let profile = generate_from_labels(bean_type, roast_level, charge_temp, development_time_pct)
        .map_err(to_js_error)?;
    serde_json::to_string(&profile).map_err(to_js_error)
}

/// Parse a profile from JSON, rejecting empty or unordered samples
fn parse_profile(profile_json: &str) -> Result<RoastProfile, String> {
    serde_json::from_str(profile_json).map_err(|e| format!("Invalid profile JSON: {}", e))
}

/// Expected temperature of a JSON profile at `elapsed_minutes`
#[wasm_bindgen]
pub fn profile_temperature_at(profile_json: &str, elapsed_minutes: f64) -> Result<f64, JsValue> {
    let profile = parse_profile(profile_json).map_err(to_js_error)?;
    profile.temperature_at(elapsed_minutes).map_err(to_js_error)
}

/// Roasting tips for a level as JSON
#[wasm_bindgen]
pub fn roast_recommendations(roast_level: &str) -> Result<String, JsValue> {
    let level: RoastLevel = roast_level.parse().map_err(to_js_error)?;
    serde_json::to_string(&recommendations_for(level)).map_err(to_js_error)
}

/// Roast level labels, lightest first, as a JSON array
#[wasm_bindgen]
pub fn roast_levels() -> String {
    let labels: Vec<String> = RoastLevel::ALL.iter().map(|l| l.to_string()).collect();
    serde_json::to_string(&labels).unwrap_or_else(|_| "[]".to_string())
}
