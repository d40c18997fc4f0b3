//! Error types for the coverage crate.

use thiserror::Error;

/// Result type alias for coverage operations.
pub type Result<T> = std::result::Result<T, CoverageError>;

/// Errors that can occur at the input boundary of the coverage engine.
///
/// The geometric predicates themselves are infallible; these errors only come
/// from validation and fixture loading.
#[derive(Debug, Error)]
pub enum CoverageError {
    /// Non-finite coordinates or an unusable radius
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Fixture data with the wrong shape
    #[error("Invalid fixture: {0}")]
    InvalidFixture(String),

    /// Two offices share an identifier
    #[error("Duplicate office id: {0}")]
    DuplicateOffice(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error code for programmatic handling by callers.
/// Range: 11xxx for coverage errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageErrorCode {
    /// Non-finite coordinates or an unusable radius
    InvalidGeometry = 11001,
    /// Fixture data with the wrong shape
    InvalidFixture = 11002,
    /// JSON parsing error
    JsonParsing = 11003,
    /// Two offices share an identifier
    DuplicateOffice = 11004,
}

impl CoverageError {
    /// Returns the error code for this error.
    pub fn code(&self) -> CoverageErrorCode {
        match self {
            CoverageError::InvalidGeometry(_) => CoverageErrorCode::InvalidGeometry,
            CoverageError::InvalidFixture(_) => CoverageErrorCode::InvalidFixture,
            CoverageError::Json(_) => CoverageErrorCode::JsonParsing,
            CoverageError::DuplicateOffice(_) => CoverageErrorCode::DuplicateOffice,
        }
    }
}
