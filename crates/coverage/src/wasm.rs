//! WASM bindings for the coverage crate.
//!
//! These bindings let the browser map viewer run the analysis directly,
//! exchanging JSON strings with JavaScript.

use crate::{
    analyze_coverage, covered_areas, distance_km, is_within_any_layer_a, AnalysisOptions, Boundary, Office,
    Point, RadiusPolicy,
};
use wasm_bindgen::prelude::*;

fn parse_json<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("{} parse error: {}", what, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

fn parse_policy(use_management_radius: bool) -> RadiusPolicy {
    if use_management_radius {
        RadiusPolicy::Management
    } else {
        RadiusPolicy::Reception
    }
}

/// Calculate distance between two points.
///
/// # Returns
/// Distance in kilometers
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    distance_km(&Point::new(lat1, lng1), &Point::new(lat2, lng2))
}

/// Run the full coverage analysis.
///
/// # Arguments
/// * `offices_json` - JSON array of offices
/// * `boundaries_json` - JSON array of boundaries
/// * `options_json` - JSON analysis options; an empty string uses defaults
///
/// # Returns
/// JSON string of the `CoverageAnalysis`
#[wasm_bindgen]
pub fn analyze_coverage_json(offices_json: &str, boundaries_json: &str, options_json: &str) -> Result<String, JsValue> {
    let offices: Vec<Office> = parse_json(offices_json, "Offices")?;
    let boundaries: Vec<Boundary> = parse_json(boundaries_json, "Boundaries")?;
    let options: AnalysisOptions = if options_json.trim().is_empty() {
        AnalysisOptions::default()
    } else {
        parse_json(options_json, "Options")?
    };

    crate::validation::validate(&offices, &boundaries).map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&analyze_coverage(&offices, &boundaries, &options))
}

/// Names of the boundaries covered by one office.
///
/// # Returns
/// JSON array of boundary names
#[wasm_bindgen]
pub fn covered_areas_json(office_json: &str, boundaries_json: &str, use_management_radius: bool) -> Result<String, JsValue> {
    let office: Office = parse_json(office_json, "Office")?;
    let boundaries: Vec<Boundary> = parse_json(boundaries_json, "Boundaries")?;

    to_json(&covered_areas(&office, &boundaries, parse_policy(use_management_radius)))
}

/// Find the Layer-A office whose circle contains a Layer-B office.
///
/// # Returns
/// JSON object `{"isWithin": bool, "containingOffice"?: Office}`
#[wasm_bindgen]
pub fn layer_a_container_json(
    office_b_json: &str,
    layer_a_json: &str,
    use_management_radius: bool,
) -> Result<String, JsValue> {
    let office_b: Office = parse_json(office_b_json, "Office")?;
    let layer_a: Vec<Office> = parse_json(layer_a_json, "Offices")?;

    to_json(&is_within_any_layer_a(&office_b, &layer_a, parse_policy(use_management_radius)))
}
