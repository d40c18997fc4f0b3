//! Input checks applied at the boundary of the engine.
//!
//! The predicates accept any `f64` and degrade silently on garbage; callers
//! that want a hard failure run [`validate`] first.

use crate::{Boundary, CoverageError, Office, Point, Result};
use std::collections::HashSet;

fn check_point(point: &Point, what: impl FnOnce() -> String) -> Result<()> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(CoverageError::InvalidGeometry(format!(
            "{} has non-finite coordinates ({}, {})",
            what(),
            point.latitude,
            point.longitude
        )))
    }
}

/// Checks one office: finite location, finite non-negative radii.
pub fn validate_office(office: &Office) -> Result<()> {
    check_point(&office.location, || format!("office {}", office.id))?;

    for radius in office.radius.values() {
        if !radius.is_finite() || radius < 0.0 {
            return Err(CoverageError::InvalidGeometry(format!(
                "office {} has unusable radius {}",
                office.id, radius
            )));
        }
    }

    Ok(())
}

/// Checks that every vertex of `boundary` is finite.
pub fn validate_boundary(boundary: &Boundary) -> Result<()> {
    for vertex in boundary.vertices() {
        check_point(vertex, || format!("boundary {}", boundary.name))?;
    }
    Ok(())
}

/// Checks every office and that no two offices share an id.
pub fn validate_offices(offices: &[Office]) -> Result<()> {
    let mut seen = HashSet::with_capacity(offices.len());
    for office in offices {
        validate_office(office)?;
        if !seen.insert(office.id.as_str()) {
            return Err(CoverageError::DuplicateOffice(office.id.clone()));
        }
    }
    Ok(())
}

/// Checks all offices and boundaries, stopping at the first problem.
pub fn validate(offices: &[Office], boundaries: &[Boundary]) -> Result<()> {
    validate_offices(offices)?;
    boundaries.iter().try_for_each(validate_boundary)
}
