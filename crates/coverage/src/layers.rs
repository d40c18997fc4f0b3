//! Relations between layers: Layer-B offices inside Layer-A circles and
//! Layer-C offices duplicating a Layer-A/B location.

use crate::haversine::is_within_circle;
use crate::{Layer, Office, Point, RadiusPolicy};
use serde::Serialize;

/// Two locations closer than this in both latitude and longitude are the
/// same place (about 100 m at Da Nang's latitude).
pub const LOCATION_TOLERANCE_DEG: f64 = 0.001;

/// Outcome of a containment check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Containment<'a> {
    pub is_within: bool,
    /// First Layer-A office whose circle holds the location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub containing_office: Option<&'a Office>,
}

/// Returns true when both coordinates differ by at most
/// [`LOCATION_TOLERANCE_DEG`].
#[inline]
pub fn same_location(a: &Point, b: &Point) -> bool {
    (a.latitude - b.latitude).abs() <= LOCATION_TOLERANCE_DEG
        && (a.longitude - b.longitude).abs() <= LOCATION_TOLERANCE_DEG
}

/// Checks whether `office_b` lies inside any Layer-A coverage circle.
///
/// Candidates are scanned in order and the first containing office wins.
/// Entries of `layer_a_offices` that are not Layer A are ignored.
pub fn is_within_any_layer_a<'a>(
    office_b: &Office,
    layer_a_offices: &'a [Office],
    policy: RadiusPolicy,
) -> Containment<'a> {
    let containing_office = layer_a_offices.iter().find(|a| {
        a.layer == Layer::A && is_within_circle(&office_b.location, &a.location, a.governing_radius_km(policy))
    });

    Containment {
        is_within: containing_office.is_some(),
        containing_office,
    }
}

/// Pairs every Layer-B office in `offices` with the Layer-A office that
/// contains it, skipping B offices that stand alone.
pub fn layer_b_within_layer_a(offices: &[Office], policy: RadiusPolicy) -> Vec<(&Office, &Office)> {
    offices
        .iter()
        .filter(|office| office.layer == Layer::B)
        .filter_map(|office_b| {
            is_within_any_layer_a(office_b, offices, policy)
                .containing_office
                .map(|office_a| (office_b, office_a))
        })
        .collect()
}

/// Drops Layer-C offices sitting at the same place as a Layer-A or Layer-B
/// office. Everything else passes through in order.
pub fn filter_layer_c(offices: &[Office]) -> Vec<Office> {
    let anchors: Vec<&Point> = offices
        .iter()
        .filter(|office| office.layer != Layer::C)
        .map(|office| &office.location)
        .collect();

    offices
        .iter()
        .filter(|office| {
            office.layer != Layer::C || !anchors.iter().any(|anchor| same_location(anchor, &office.location))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceRadius;

    fn district(id: &str, lat: f64, lng: f64) -> Office {
        Office::new(
            id,
            id,
            Point::new(lat, lng),
            Layer::A,
            ServiceRadius::Dual { reception_km: 1.0, management_km: 6.0 },
        )
    }

    fn ward(id: &str, layer: Layer, lat: f64, lng: f64) -> Office {
        Office::new(id, id, Point::new(lat, lng), layer, ServiceRadius::Single(2.0))
    }

    #[test]
    fn test_same_location_tolerance() {
        let base = Point::new(16.05, 108.2);
        assert!(same_location(&base, &Point::new(16.0505, 108.1995)));
        assert!(!same_location(&base, &Point::new(16.052, 108.2)));
        assert!(!same_location(&base, &Point::new(16.05, 108.1985)));
    }

    #[test]
    fn test_within_depends_on_policy() {
        let districts = vec![district("hai-chau", 16.05, 108.2)];
        // ~3.3 km north
        let b = ward("b-1", Layer::B, 16.08, 108.2);

        let reception = is_within_any_layer_a(&b, &districts, RadiusPolicy::Reception);
        assert!(!reception.is_within);
        assert!(reception.containing_office.is_none());

        let management = is_within_any_layer_a(&b, &districts, RadiusPolicy::Management);
        assert!(management.is_within);
        assert_eq!(management.containing_office.map(|o| o.id.as_str()), Some("hai-chau"));
    }

    #[test]
    fn test_first_containing_office_wins() {
        let districts = vec![
            district("far", 16.5, 108.5),
            district("first", 16.06, 108.2),
            district("second", 16.05, 108.2),
        ];
        let b = ward("b-1", Layer::B, 16.055, 108.2);
        let result = is_within_any_layer_a(&b, &districts, RadiusPolicy::Reception);
        assert_eq!(result.containing_office.map(|o| o.id.as_str()), Some("first"));
    }

    #[test]
    fn test_non_layer_a_candidates_ignored() {
        let candidates = vec![ward("b-big", Layer::B, 16.05, 108.2)];
        let b = ward("b-1", Layer::B, 16.05, 108.2);
        assert!(!is_within_any_layer_a(&b, &candidates, RadiusPolicy::Management).is_within);
    }

    #[test]
    fn test_empty_layer_a() {
        let b = ward("b-1", Layer::B, 16.05, 108.2);
        assert!(!is_within_any_layer_a(&b, &[], RadiusPolicy::Reception).is_within);
    }

    #[test]
    fn test_layer_b_within_layer_a_pairs() {
        let offices = vec![
            district("a-1", 16.05, 108.2),
            ward("b-inside", Layer::B, 16.052, 108.2),
            ward("b-outside", Layer::B, 16.3, 108.2),
            ward("c-inside", Layer::C, 16.051, 108.2),
        ];
        let pairs = layer_b_within_layer_a(&offices, RadiusPolicy::Reception);
        let ids: Vec<(&str, &str)> = pairs.iter().map(|(b, a)| (b.id.as_str(), a.id.as_str())).collect();
        assert_eq!(ids, vec![("b-inside", "a-1")]);
    }

    #[test]
    fn test_filter_layer_c_removes_duplicates() {
        let offices = vec![
            district("a-1", 16.05, 108.2),
            ward("c-dup", Layer::C, 16.0502, 108.2003),
            ward("b-1", Layer::B, 16.1, 108.25),
            ward("c-keep", Layer::C, 16.2, 108.1),
            ward("c-dup-b", Layer::C, 16.1004, 108.2496),
        ];
        let kept: Vec<String> = filter_layer_c(&offices).into_iter().map(|o| o.id).collect();
        assert_eq!(kept, vec!["a-1", "b-1", "c-keep"]);
    }

    #[test]
    fn test_filter_layer_c_keeps_c_only_sets() {
        let offices = vec![
            ward("c-1", Layer::C, 16.05, 108.2),
            ward("c-2", Layer::C, 16.05, 108.2),
        ];
        assert_eq!(filter_layer_c(&offices).len(), 2);
    }
}
