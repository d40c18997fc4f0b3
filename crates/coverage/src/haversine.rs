//! Haversine distance and the circle predicates built on it.
//!
//! All coverage decisions go through [`distance_km`]: a great-circle distance
//! on a spherical Earth. Circles are planar approximations on top of that
//! distance, which holds up at city scale.

use crate::Point;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two points in kilometers.
///
/// # Example
/// ```
/// use danang_coverage::{distance_km, Point};
///
/// let han_market = Point::new(16.0685, 108.2240);
/// let my_khe = Point::new(16.0544, 108.2478);
///
/// let distance = distance_km(&han_market, &my_khe);
/// assert!((distance - 2.9).abs() < 0.2);
/// ```
#[inline]
pub fn distance_km(from: &Point, to: &Point) -> f64 {
    let (lat1, lng1) = from.to_radians();
    let (lat2, lng2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lng = lng2 - lng1;

    let mut h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h just past 1 for near-antipodal points; NaN passes through.
    if h > 1.0 {
        h = 1.0;
    }

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Returns true if `point` lies inside the circle, boundary included.
#[inline]
pub fn is_within_circle(point: &Point, center: &Point, radius_km: f64) -> bool {
    distance_km(point, center) <= radius_km
}

/// Returns true if two coverage circles intersect.
///
/// Tangent circles count as overlapping.
#[inline]
pub fn circles_overlap(center1: &Point, radius1_km: f64, center2: &Point, radius2_km: f64) -> bool {
    distance_km(center1, center2) <= radius1_km + radius2_km
}
