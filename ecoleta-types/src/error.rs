//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error, PartialEq)]
pub enum EcoletaTypesError {
    /// Coordinate could not be parsed from its text form.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
    /// Point cannot be represented in the target projection.
    #[error("point is outside of the projection bounds")]
    OutOfBounds,
}
