//! Service-coverage analysis for Da Nang's administrative offices.
//!
//! This crate provides:
//! - Haversine distance and circle predicates
//! - A centroid-or-vertex heuristic for circle/ward coverage
//! - Per-layer coverage aggregation and overlap clustering
//! - Layer-B-in-Layer-A containment and Layer-C duplicate filtering
//! - Fixture loading for offices and GeoJSON ward boundaries
//! - WASM bindings for the browser map viewer
//!
//! # Example
//!
//! ```
//! use danang_coverage::{analyze_coverage, AnalysisOptions, Boundary, Layer, Office, Point, ServiceRadius};
//!
//! let offices = vec![Office::new(
//!     "b-thach-thang",
//!     "Thach Thang Ward",
//!     Point::new(16.0760, 108.2210),
//!     Layer::B,
//!     ServiceRadius::Single(3.0),
//! )];
//! let wards = vec![Boundary::new("Thach Thang", vec![vec![Point::new(16.0770, 108.2200)]])];
//!
//! let analysis = analyze_coverage(&offices, &wards, &AnalysisOptions::default());
//! assert_eq!(analysis.total_coverage.layer_b, vec!["Thach Thang".to_string()]);
//! ```

mod analysis;
mod boundary;
mod cluster;
mod error;
mod haversine;
mod office;
mod options;
pub mod fixtures;
pub mod layers;
pub mod validation;

#[cfg(feature = "wasm")]
mod wasm;

pub use analysis::{
    aggregate_by_layer, analyze_coverage, coverage_by_office, try_analyze_coverage, CoverageAnalysis,
    CoverageOverlap, LayerCoverage, OfficeCoverage, OverlapType,
};
pub use boundary::{centroid_or_vertex_heuristic, covered_areas, Boundary};
pub use error::{CoverageError, CoverageErrorCode, Result};
pub use haversine::{circles_overlap, distance_km, is_within_circle, EARTH_RADIUS_KM};
pub use layers::{filter_layer_c, is_within_any_layer_a, same_location, Containment, LOCATION_TOLERANCE_DEG};
pub use office::{Layer, Office, RadiusPolicy, ServiceRadius};
pub use options::{AnalysisOptions, ClusterStrategy, DefaultRadii};

/// A geographic point with latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Latitude in degrees
    #[serde(alias = "lat")]
    pub latitude: f64,
    /// Longitude in degrees
    #[serde(alias = "lng")]
    pub longitude: f64,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if neither component is NaN or infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}
