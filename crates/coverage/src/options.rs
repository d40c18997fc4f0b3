//! Options passed into an analysis run.

use crate::{Layer, RadiusPolicy, ServiceRadius};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How overlapping offices are grouped into clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterStrategy {
    /// Pairwise first-match merging; clusters are never merged with each
    /// other, so a connected group can be reported in pieces.
    #[default]
    Greedy,
    /// One cluster per connected component of the overlap graph.
    ConnectedComponents,
}

impl FromStr for ClusterStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(ClusterStrategy::Greedy),
            "connected" | "connected_components" | "connected-components" => {
                Ok(ClusterStrategy::ConnectedComponents)
            }
            other => Err(format!("unknown clustering strategy: {}", other)),
        }
    }
}

/// Per-run analysis options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Governing radius for Layer-A offices
    #[serde(default)]
    pub radius_policy: RadiusPolicy,
    /// Overlap grouping
    #[serde(default)]
    pub clustering: ClusterStrategy,
}

impl AnalysisOptions {
    /// Options with the given radius policy and the default clustering.
    pub fn with_policy(radius_policy: RadiusPolicy) -> Self {
        Self {
            radius_policy,
            ..Self::default()
        }
    }

    /// Replaces the clustering strategy.
    pub fn clustering(mut self, clustering: ClusterStrategy) -> Self {
        self.clustering = clustering;
        self
    }
}

/// Radii applied when fixture records leave them out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultRadii {
    #[serde(default = "default_layer_a_reception_km")]
    pub layer_a_reception_km: f64,
    #[serde(default = "default_layer_a_management_km")]
    pub layer_a_management_km: f64,
    #[serde(default = "default_layer_b_km")]
    pub layer_b_km: f64,
    #[serde(default = "default_layer_c_km")]
    pub layer_c_km: f64,
}

impl Default for DefaultRadii {
    fn default() -> Self {
        Self {
            layer_a_reception_km: default_layer_a_reception_km(),
            layer_a_management_km: default_layer_a_management_km(),
            layer_b_km: default_layer_b_km(),
            layer_c_km: default_layer_c_km(),
        }
    }
}

impl DefaultRadii {
    /// The default service radius for an office of `layer`.
    pub fn for_layer(&self, layer: Layer) -> ServiceRadius {
        match layer {
            Layer::A => ServiceRadius::Dual {
                reception_km: self.layer_a_reception_km,
                management_km: self.layer_a_management_km,
            },
            Layer::B => ServiceRadius::Single(self.layer_b_km),
            Layer::C => ServiceRadius::Single(self.layer_c_km),
        }
    }
}

fn default_layer_a_reception_km() -> f64 {
    5.0
}

fn default_layer_a_management_km() -> f64 {
    10.0
}

fn default_layer_b_km() -> f64 {
    3.0
}

fn default_layer_c_km() -> f64 {
    2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AnalysisOptions::default();
        assert_eq!(options.radius_policy, RadiusPolicy::Reception);
        assert_eq!(options.clustering, ClusterStrategy::Greedy);
    }

    #[test]
    fn test_builder() {
        let options = AnalysisOptions::with_policy(RadiusPolicy::Management)
            .clustering(ClusterStrategy::ConnectedComponents);
        assert_eq!(options.radius_policy, RadiusPolicy::Management);
        assert_eq!(options.clustering, ClusterStrategy::ConnectedComponents);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("greedy".parse::<ClusterStrategy>().unwrap(), ClusterStrategy::Greedy);
        assert_eq!(
            "connected".parse::<ClusterStrategy>().unwrap(),
            ClusterStrategy::ConnectedComponents
        );
        assert!("kmeans".parse::<ClusterStrategy>().is_err());
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: AnalysisOptions =
            serde_json::from_str(r#"{"radius_policy": "management"}"#).unwrap();
        assert_eq!(options.radius_policy, RadiusPolicy::Management);
        assert_eq!(options.clustering, ClusterStrategy::Greedy);
    }

    #[test]
    fn test_default_radii_per_layer() {
        let radii = DefaultRadii::default();
        assert_eq!(
            radii.for_layer(Layer::A),
            ServiceRadius::Dual { reception_km: 5.0, management_km: 10.0 }
        );
        assert_eq!(radii.for_layer(Layer::C), ServiceRadius::Single(2.0));

        let partial: DefaultRadii = serde_json::from_str(r#"{"layer_b_km": 4.5}"#).unwrap();
        assert_eq!(partial.layer_b_km, 4.5);
        assert_eq!(partial.layer_c_km, 2.0);
    }
}
