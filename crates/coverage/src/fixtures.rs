//! Loading offices and boundaries from the bundled JSON fixtures.
//!
//! Supports:
//! - Office records: `{"id", "name", "lat", "lng", "layer", "radius_km"}`, with
//!   optional `reception_radius_km`/`management_radius_km` for Layer A and an
//!   optional GeoJSON `location` point instead of `lat`/`lng`
//! - Boundaries: GeoJSON `FeatureCollection` of `Polygon`/`MultiPolygon`
//!   features (or a bare array of features), coordinates in `[lng, lat]` order

use crate::options::DefaultRadii;
use crate::validation::{validate_boundary, validate_offices};
use crate::{Boundary, CoverageError, Layer, Office, Point, Result, ServiceRadius};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Office identifiers appear both as strings and as numbers in the fixtures.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordId {
    Text(String),
    Number(i64),
}

impl RecordId {
    fn into_string(self) -> String {
        match self {
            RecordId::Text(s) => s,
            RecordId::Number(n) => n.to_string(),
        }
    }
}

/// Raw office record as stored in the fixtures.
#[derive(Debug, Deserialize)]
struct OfficeRecord {
    id: RecordId,
    name: String,
    layer: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default, alias = "lon")]
    lng: Option<f64>,
    #[serde(default)]
    location: Option<Value>,
    #[serde(default)]
    radius_km: Option<f64>,
    #[serde(default)]
    reception_radius_km: Option<f64>,
    #[serde(default)]
    management_radius_km: Option<f64>,
}

impl OfficeRecord {
    fn into_office(self, defaults: &DefaultRadii) -> Result<Office> {
        let id = self.id.into_string();

        let layer: Layer = self
            .layer
            .parse()
            .map_err(|e| CoverageError::InvalidFixture(format!("office {}: {}", id, e)))?;

        let location = match (self.lat, self.lng, &self.location) {
            (Some(lat), Some(lng), _) => Point::new(lat, lng),
            (_, _, Some(value)) => parse_point_value(value).ok_or_else(|| {
                CoverageError::InvalidFixture(format!("office {}: unreadable location", id))
            })?,
            _ => {
                return Err(CoverageError::InvalidFixture(format!(
                    "office {}: missing coordinates",
                    id
                )))
            }
        };

        let radius = match layer {
            Layer::A => ServiceRadius::Dual {
                reception_km: self
                    .reception_radius_km
                    .or(self.radius_km)
                    .unwrap_or(defaults.layer_a_reception_km),
                management_km: self
                    .management_radius_km
                    .unwrap_or(defaults.layer_a_management_km),
            },
            Layer::B | Layer::C => match self.radius_km {
                Some(km) => ServiceRadius::Single(km),
                None => defaults.for_layer(layer),
            },
        };

        Ok(Office::new(id, self.name, location, layer, radius))
    }
}

/// Parse a point from a GeoJSON object or a bare `[lng, lat]` array.
fn parse_point_value(value: &Value) -> Option<Point> {
    let coords = match value {
        Value::Object(_) => value.get("coordinates")?,
        Value::Array(_) => value,
        _ => return None,
    };
    parse_position(coords)
}

/// Parse a GeoJSON position `[lng, lat, ...]`.
fn parse_position(value: &Value) -> Option<Point> {
    let coords = value.as_array()?;
    if coords.len() < 2 {
        return None;
    }
    let lng = coords[0].as_f64()?;
    let lat = coords[1].as_f64()?;
    Some(Point::new(lat, lng))
}

/// Load offices from a JSON array of office records.
///
/// Missing radii are filled from `defaults`. Identifiers must be unique and
/// every office must pass [`validate_offices`](crate::validation::validate_offices).
///
/// # Example
/// ```
/// use danang_coverage::{fixtures::load_offices, DefaultRadii, Layer};
///
/// let json = r#"[{"id": 1, "name": "Hai Chau", "lat": 16.047, "lng": 108.206, "layer": "A"}]"#;
/// let offices = load_offices(json, &DefaultRadii::default()).unwrap();
/// assert_eq!(offices[0].id, "1");
/// assert_eq!(offices[0].layer, Layer::A);
/// ```
pub fn load_offices(json: &str, defaults: &DefaultRadii) -> Result<Vec<Office>> {
    let records: Vec<OfficeRecord> = serde_json::from_str(json)?;

    let offices = records
        .into_iter()
        .map(|record| record.into_office(defaults))
        .collect::<Result<Vec<_>>>()?;
    validate_offices(&offices)?;

    debug!(count = offices.len(), "Loaded offices");
    Ok(offices)
}

/// Load boundaries from GeoJSON.
///
/// Features without a `Polygon`/`MultiPolygon` geometry are skipped.
pub fn load_boundaries(json: &str) -> Result<Vec<Boundary>> {
    let value: Value = serde_json::from_str(json)?;

    let features = match &value {
        Value::Array(items) => items,
        Value::Object(_) => value
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| CoverageError::InvalidFixture("expected a FeatureCollection".into()))?,
        _ => return Err(CoverageError::InvalidFixture("expected a FeatureCollection".into())),
    };

    let mut boundaries = Vec::with_capacity(features.len());
    for (index, feature) in features.iter().enumerate() {
        if let Some(boundary) = parse_feature(index, feature)? {
            validate_boundary(&boundary)?;
            boundaries.push(boundary);
        }
    }

    debug!(count = boundaries.len(), skipped = features.len() - boundaries.len(), "Loaded boundaries");
    Ok(boundaries)
}

fn feature_name(feature: &Value) -> String {
    let properties = feature.get("properties");
    ["name", "ten"]
        .iter()
        .find_map(|key| properties.and_then(|p| p.get(*key)).and_then(Value::as_str))
        .unwrap_or("Unnamed")
        .to_string()
}

fn parse_feature(index: usize, feature: &Value) -> Result<Option<Boundary>> {
    let name = feature_name(feature);

    let Some(geometry) = feature.get("geometry").filter(|g| !g.is_null()) else {
        warn!(index, name = %name, "Skipping feature without geometry");
        return Ok(None);
    };

    let coordinates = geometry.get("coordinates");
    let rings = match (geometry.get("type").and_then(Value::as_str), coordinates) {
        (Some("Polygon"), Some(coords)) => parse_rings(&name, coords)?,
        (Some("MultiPolygon"), Some(coords)) => {
            let polygons = coords.as_array().ok_or_else(|| malformed(&name, "MultiPolygon"))?;
            let mut rings = Vec::new();
            for polygon in polygons {
                rings.extend(parse_rings(&name, polygon)?);
            }
            rings
        }
        (kind, _) => {
            warn!(index, name = %name, geometry = ?kind, "Skipping feature with unsupported geometry");
            return Ok(None);
        }
    };

    Ok(Some(Boundary::new(name, rings)))
}

fn parse_rings(name: &str, value: &Value) -> Result<Vec<Vec<Point>>> {
    let rings = value.as_array().ok_or_else(|| malformed(name, "rings"))?;

    rings
        .iter()
        .map(|ring| -> Result<Vec<Point>> {
            ring.as_array()
                .ok_or_else(|| malformed(name, "ring"))?
                .iter()
                .map(|position| parse_position(position).ok_or_else(|| malformed(name, "position")))
                .collect()
        })
        .collect()
}

fn malformed(name: &str, what: &str) -> CoverageError {
    CoverageError::InvalidFixture(format!("boundary {}: malformed {}", name, what))
}
