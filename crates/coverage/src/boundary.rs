//! Administrative boundaries and the polygon coverage predicate.

use crate::haversine::is_within_circle;
use crate::{Office, Point, RadiusPolicy};
use serde::{Deserialize, Serialize};

/// A ward/commune boundary made of one or more closed rings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    /// Ward or commune label
    pub name: String,
    /// Closed rings; multipolygon parts are flattened into this list
    pub rings: Vec<Vec<Point>>,
}

impl Boundary {
    /// Creates a boundary from its rings.
    pub fn new(name: impl Into<String>, rings: Vec<Vec<Point>>) -> Self {
        Self {
            name: name.into(),
            rings,
        }
    }

    /// Iterates every vertex of every ring.
    pub fn vertices(&self) -> impl Iterator<Item = &Point> {
        self.rings.iter().flatten()
    }

    /// Total number of vertices across all rings.
    pub fn vertex_count(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    /// Arithmetic mean of all vertices, ignoring ring structure.
    ///
    /// For concave or multi-ring shapes this point can fall outside every
    /// ring. A boundary without vertices yields `(0, 0)`.
    pub fn centroid(&self) -> Point {
        let count = self.vertex_count();
        if count == 0 {
            return Point::new(0.0, 0.0);
        }

        let (lat_sum, lng_sum) = self
            .vertices()
            .fold((0.0, 0.0), |(lat, lng), p| (lat + p.latitude, lng + p.longitude));

        Point::new(lat_sum / count as f64, lng_sum / count as f64)
    }
}

/// Judges whether a coverage circle covers `boundary`.
///
/// Covered means the boundary's centroid or at least one of its vertices lies
/// inside the circle. A circle that only clips an edge is not detected.
pub fn centroid_or_vertex_heuristic(boundary: &Boundary, center: &Point, radius_km: f64) -> bool {
    is_within_circle(&boundary.centroid(), center, radius_km)
        || boundary
            .vertices()
            .any(|vertex| is_within_circle(vertex, center, radius_km))
}

/// Names of the boundaries covered by `office`, in input order.
pub fn covered_areas(office: &Office, boundaries: &[Boundary], policy: RadiusPolicy) -> Vec<String> {
    let radius_km = office.governing_radius_km(policy);

    boundaries
        .iter()
        .filter(|boundary| centroid_or_vertex_heuristic(boundary, &office.location, radius_km))
        .map(|boundary| boundary.name.clone())
        .collect()
}
