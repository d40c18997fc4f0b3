//! Coverage aggregation: per-office coverage, per-layer totals and overlap
//! clusters.

use crate::boundary::covered_areas;
use crate::cluster::{self, extend_unique};
use crate::options::{AnalysisOptions, ClusterStrategy};
use crate::validation::validate;
use crate::{Boundary, Layer, Office, Point, RadiusPolicy, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Kind of overlap a cluster represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapType {
    /// Circles intersect without one containing the other
    Partial,
    /// Reserved; not produced by the current analysis
    Complete,
}

/// A group of offices whose coverage circles overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageOverlap {
    /// Derived from the ids of the two offices that seeded the cluster
    pub id: String,
    /// Participating layers, in order of first appearance
    pub layers: Vec<Layer>,
    /// Participating offices, each listed once
    pub offices: Vec<Office>,
    /// Mean of the member office locations
    pub centroid: Point,
    /// Union of the members' covered areas, first-seen order
    pub covered_areas: Vec<String>,
    pub overlap_type: OverlapType,
}

/// Deduplicated covered-area names per layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerCoverage {
    pub layer_a: Vec<String>,
    pub layer_b: Vec<String>,
    pub layer_c: Vec<String>,
}

impl LayerCoverage {
    /// Covered areas for `layer`.
    pub fn get(&self, layer: Layer) -> &[String] {
        match layer {
            Layer::A => &self.layer_a,
            Layer::B => &self.layer_b,
            Layer::C => &self.layer_c,
        }
    }

    fn get_mut(&mut self, layer: Layer) -> &mut Vec<String> {
        match layer {
            Layer::A => &mut self.layer_a,
            Layer::B => &mut self.layer_b,
            Layer::C => &mut self.layer_c,
        }
    }
}

/// Result of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageAnalysis {
    pub overlaps: Vec<CoverageOverlap>,
    pub total_coverage: LayerCoverage,
}

impl CoverageAnalysis {
    /// Number of offices that belong to some overlap cluster.
    pub fn overlapping_office_count(&self) -> usize {
        self.overlaps.iter().map(|o| o.offices.len()).sum()
    }
}

/// Covered areas of a single office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeCoverage {
    pub office_id: String,
    pub layer: Layer,
    pub covered_areas: Vec<String>,
}

/// Computes the covered areas of every office, in office order.
///
/// Runs on the rayon pool when the `parallel` feature is enabled.
pub fn coverage_by_office(
    offices: &[Office],
    boundaries: &[Boundary],
    policy: RadiusPolicy,
) -> Vec<OfficeCoverage> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        offices
            .par_iter()
            .map(|office| single_office_coverage(office, boundaries, policy))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        offices
            .iter()
            .map(|office| single_office_coverage(office, boundaries, policy))
            .collect()
    }
}

#[inline]
fn single_office_coverage(office: &Office, boundaries: &[Boundary], policy: RadiusPolicy) -> OfficeCoverage {
    OfficeCoverage {
        office_id: office.id.clone(),
        layer: office.layer,
        covered_areas: covered_areas(office, boundaries, policy),
    }
}

/// Unions per-office coverage into one deduplicated list per layer.
pub fn aggregate_by_layer(coverage: &[OfficeCoverage]) -> LayerCoverage {
    let mut totals = LayerCoverage::default();
    for entry in coverage {
        extend_unique(totals.get_mut(entry.layer), &entry.covered_areas);
    }
    totals
}

/// Runs the full coverage analysis.
///
/// Empty inputs are not errors: no offices yields an empty result, no
/// boundaries yields empty coverage lists while overlaps are still reported.
///
/// # Example
/// ```
/// use danang_coverage::{analyze_coverage, AnalysisOptions, Layer, Office, Point, ServiceRadius};
///
/// let offices = vec![
///     Office::new("a1", "Hai Chau", Point::new(16.047, 108.206), Layer::A, ServiceRadius::Single(7.0)),
///     Office::new("a2", "Son Tra", Point::new(16.106, 108.252), Layer::A, ServiceRadius::Single(7.0)),
/// ];
///
/// let analysis = analyze_coverage(&offices, &[], &AnalysisOptions::default());
/// assert_eq!(analysis.overlaps.len(), 1);
/// assert!(analysis.total_coverage.layer_a.is_empty());
/// ```
pub fn analyze_coverage(
    offices: &[Office],
    boundaries: &[Boundary],
    options: &AnalysisOptions,
) -> CoverageAnalysis {
    let policy = options.radius_policy;

    let coverage = coverage_by_office(offices, boundaries, policy);
    let total_coverage = aggregate_by_layer(&coverage);

    let overlaps = match options.clustering {
        ClusterStrategy::Greedy => cluster::greedy(offices, boundaries, &coverage, policy),
        ClusterStrategy::ConnectedComponents => cluster::connected_components(offices, &coverage, policy),
    };

    debug!(
        offices = offices.len(),
        boundaries = boundaries.len(),
        overlaps = overlaps.len(),
        strategy = ?options.clustering,
        policy = ?policy,
        "Coverage analysis complete"
    );

    CoverageAnalysis {
        overlaps,
        total_coverage,
    }
}

/// Validates the inputs, then runs [`analyze_coverage`].
///
/// Returns [`CoverageError::InvalidGeometry`](crate::CoverageError::InvalidGeometry)
/// for non-finite coordinates or unusable radii, and
/// [`CoverageError::DuplicateOffice`](crate::CoverageError::DuplicateOffice)
/// when two offices share an id.
pub fn try_analyze_coverage(
    offices: &[Office],
    boundaries: &[Boundary],
    options: &AnalysisOptions,
) -> Result<CoverageAnalysis> {
    validate(offices, boundaries)?;
    Ok(analyze_coverage(offices, boundaries, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CoverageError, ServiceRadius, EARTH_RADIUS_KM};

    fn km_north(km: f64) -> f64 {
        (km / EARTH_RADIUS_KM).to_degrees()
    }

    fn office(id: &str, layer: Layer, north_km: f64, radius_km: f64) -> Office {
        Office::new(
            id,
            id,
            Point::new(16.0 + km_north(north_km), 108.2),
            layer,
            ServiceRadius::Single(radius_km),
        )
    }

    /// Tiny ward centred `north_km` north of the origin.
    fn ward(name: &str, north_km: f64) -> Boundary {
        let lat = 16.0 + km_north(north_km);
        Boundary::new(
            name,
            vec![vec![
                Point::new(lat - 0.0001, 108.1999),
                Point::new(lat - 0.0001, 108.2001),
                Point::new(lat + 0.0001, 108.2001),
                Point::new(lat + 0.0001, 108.1999),
            ]],
        )
    }

    fn sample_wards() -> Vec<Boundary> {
        vec![
            ward("Hai Chau 1", 0.0),
            ward("Thach Thang", 4.0),
            ward("Thanh Binh", 9.0),
            ward("Man Thai", 30.0),
        ]
    }

    #[test]
    fn test_empty_offices() {
        let analysis = analyze_coverage(&[], &sample_wards(), &AnalysisOptions::default());
        assert!(analysis.overlaps.is_empty());
        assert_eq!(analysis.total_coverage, LayerCoverage::default());
    }

    #[test]
    fn test_empty_boundaries_still_reports_overlaps() {
        let offices = vec![office("a1", Layer::A, 0.0, 7.0), office("a2", Layer::A, 10.0, 7.0)];
        let analysis = analyze_coverage(&offices, &[], &AnalysisOptions::default());

        assert_eq!(analysis.overlaps.len(), 1);
        assert!(analysis.overlaps[0].covered_areas.is_empty());
        assert!(analysis.total_coverage.layer_a.is_empty());
        assert!(coverage_by_office(&offices, &[], RadiusPolicy::Reception)
            .iter()
            .all(|c| c.covered_areas.is_empty()));
    }

    #[test]
    fn test_two_district_offices_form_one_cluster() {
        let offices = vec![office("A1", Layer::A, 0.0, 7.0), office("A2", Layer::A, 10.0, 7.0)];
        let analysis = analyze_coverage(&offices, &sample_wards(), &AnalysisOptions::default());

        assert_eq!(analysis.overlaps.len(), 1);
        let cluster = &analysis.overlaps[0];
        assert_eq!(cluster.layers, vec![Layer::A]);
        assert_eq!(cluster.offices.len(), 2);
        assert_eq!(
            cluster.covered_areas,
            vec!["Hai Chau 1".to_string(), "Thach Thang".to_string(), "Thanh Binh".to_string()]
        );
    }

    #[test]
    fn test_layer_totals_are_deduplicated_in_first_seen_order() {
        let offices = vec![
            office("b-north", Layer::B, 9.0, 1.0),
            office("b-south", Layer::B, 0.0, 5.0),
            office("b-again", Layer::B, 9.0, 1.0),
            office("c-1", Layer::C, 30.0, 1.0),
        ];
        let analysis = analyze_coverage(&offices, &sample_wards(), &AnalysisOptions::default());

        assert_eq!(
            analysis.total_coverage.layer_b,
            vec!["Thanh Binh".to_string(), "Hai Chau 1".to_string(), "Thach Thang".to_string()]
        );
        assert_eq!(analysis.total_coverage.layer_c, vec!["Man Thai".to_string()]);
        assert!(analysis.total_coverage.get(Layer::A).is_empty());
    }

    #[test]
    fn test_pinned_chain_behaviour() {
        let offices = vec![
            office("A1", Layer::A, 0.0, 1.0),
            office("B1", Layer::B, 1.5, 1.0),
            office("B2", Layer::B, 3.0, 1.0),
        ];
        let analysis = analyze_coverage(&offices, &[], &AnalysisOptions::default());

        assert_eq!(analysis.overlaps.len(), 1);
        assert_eq!(analysis.overlapping_office_count(), 3);
        assert_eq!(analysis.overlaps[0].layers, vec![Layer::A, Layer::B]);
    }

    #[test]
    fn test_management_policy_widens_circles() {
        let dual = |id: &str, north_km: f64| {
            Office::new(
                id,
                id,
                Point::new(16.0 + km_north(north_km), 108.2),
                Layer::A,
                ServiceRadius::Dual { reception_km: 2.0, management_km: 6.0 },
            )
        };
        let offices = vec![dual("a1", 0.0), dual("a2", 10.0)];

        let reception = analyze_coverage(&offices, &[], &AnalysisOptions::with_policy(RadiusPolicy::Reception));
        let management = analyze_coverage(&offices, &[], &AnalysisOptions::with_policy(RadiusPolicy::Management));

        assert!(reception.overlaps.is_empty());
        assert_eq!(management.overlaps.len(), 1);
    }

    #[test]
    fn test_json_field_names() {
        let offices = vec![office("A1", Layer::A, 0.0, 7.0), office("A2", Layer::A, 10.0, 7.0)];
        let analysis = analyze_coverage(&offices, &sample_wards(), &AnalysisOptions::default());
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["overlaps"][0]["overlapType"], "partial");
        assert_eq!(json["overlaps"][0]["id"], "overlap-A1-A2");
        assert!(json["overlaps"][0]["coveredAreas"].is_array());
        assert!(json["totalCoverage"]["layerA"].is_array());
    }

    #[test]
    fn test_try_analyze_rejects_nan() {
        let offices = vec![Office::new(
            "bad",
            "Bad",
            Point::new(f64::NAN, 108.2),
            Layer::B,
            ServiceRadius::Single(1.0),
        )];
        let err = try_analyze_coverage(&offices, &[], &AnalysisOptions::default()).unwrap_err();
        assert!(matches!(err, CoverageError::InvalidGeometry(_)));
    }

    #[test]
    fn test_try_analyze_rejects_repeated_ids() {
        let offices = vec![
            office("A1", Layer::A, 0.0, 7.0),
            office("B1", Layer::B, 1.0, 1.0),
            office("A1", Layer::A, 10.0, 7.0),
        ];
        let err = try_analyze_coverage(&offices, &[], &AnalysisOptions::default()).unwrap_err();
        assert!(matches!(err, CoverageError::DuplicateOffice(ref id) if id == "A1"));
    }

    #[test]
    fn test_try_analyze_accepts_valid_input() {
        let offices = vec![office("A1", Layer::A, 0.0, 7.0)];
        let analysis = try_analyze_coverage(&offices, &sample_wards(), &AnalysisOptions::default()).unwrap();
        assert!(analysis.overlaps.is_empty());
        assert_eq!(analysis.total_coverage.layer_a.len(), 2);
    }
}
