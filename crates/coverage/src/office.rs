//! Service offices and the radius that governs their coverage circle.

use crate::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Administrative layer an office belongs to.
///
/// - `A`: district-level offices
/// - `B`: new commune/ward offices
/// - `C`: legacy commune/ward offices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    A,
    B,
    C,
}

impl Layer {
    /// All layers in reporting order.
    pub const ALL: [Layer; 3] = [Layer::A, Layer::B, Layer::C];
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Layer::A => "A",
            Layer::B => "B",
            Layer::C => "C",
        };
        f.write_str(label)
    }
}

impl FromStr for Layer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Layer::A),
            "B" | "b" => Ok(Layer::B),
            "C" | "c" => Ok(Layer::C),
            other => Err(format!("unknown layer: {}", other)),
        }
    }
}

/// Which of a Layer-A office's two radii governs a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusPolicy {
    /// The smaller walk-in reception area
    #[default]
    Reception,
    /// The wider administrative management area
    Management,
}

impl FromStr for RadiusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reception" => Ok(RadiusPolicy::Reception),
            "management" => Ok(RadiusPolicy::Management),
            other => Err(format!("unknown radius policy: {}", other)),
        }
    }
}

/// Service radius of an office, in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceRadius {
    /// Layer B/C offices carry one radius.
    Single(f64),
    /// Layer A offices carry a reception and a management radius.
    Dual { reception_km: f64, management_km: f64 },
}

impl ServiceRadius {
    /// Returns the radius selected by `policy`.
    ///
    /// A single radius ignores the policy.
    #[inline]
    pub fn governing(&self, policy: RadiusPolicy) -> f64 {
        match (*self, policy) {
            (ServiceRadius::Single(km), _) => km,
            (ServiceRadius::Dual { reception_km, .. }, RadiusPolicy::Reception) => reception_km,
            (ServiceRadius::Dual { management_km, .. }, RadiusPolicy::Management) => management_km,
        }
    }

    /// Iterates every radius value carried, for validation.
    pub(crate) fn values(&self) -> impl Iterator<Item = f64> {
        let (first, second) = match *self {
            ServiceRadius::Single(km) => (km, None),
            ServiceRadius::Dual { reception_km, management_km } => (reception_km, Some(management_km)),
        };
        std::iter::once(first).chain(second)
    }
}

/// A service office with a coverage circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Office {
    /// Stable identifier, unique within a working set
    pub id: String,
    /// Display name
    pub name: String,
    /// Office location
    pub location: Point,
    /// Layer membership
    pub layer: Layer,
    /// Service radius
    pub radius: ServiceRadius,
}

impl Office {
    /// Creates a new office.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Point,
        layer: Layer,
        radius: ServiceRadius,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            layer,
            radius,
        }
    }

    /// Radius of this office's coverage circle under `policy`.
    #[inline]
    pub fn governing_radius_km(&self, policy: RadiusPolicy) -> f64 {
        self.radius.governing(policy)
    }
}
