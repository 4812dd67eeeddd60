use thiserror::Error;

/// Broad classification of a [`DosError`].
///
/// Callers that only need to know whether a failure came from bad shapes, bad
/// types, or an internal inconsistency can match on this instead of on every
/// individual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Invalid values: mismatched lengths, uneven grids, bad parameters.
    Value,
    /// Incompatible kinds: wrong entity in a collection, mixed combinations.
    Type,
    /// Out-of-range indices and malformed array shapes.
    Index,
    /// A consistency check inside the library failed.
    Internal,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DosError {
    #[error("Energies and weights must be the same length (got {energies} energies, {weights} weights)")]
    LengthMismatch { energies: usize, weights: usize },

    #[error("Energies must be an evenly-spaced 1-D grid")]
    UnevenGrid,

    #[error("Energy axes do not match: {0}")]
    EnergyAxisMismatch(String),

    #[error("No data to sum")]
    EmptyCollection,

    #[error("Invalid weights shape: {0}")]
    Shape(String),

    #[error("Length of info ({info}) must match number of rows in weights ({rows})")]
    InfoLengthMismatch { info: usize, rows: usize },

    #[error("Index {index} is out of range for a collection of length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("Info must map strings to strings: value for key '{key}' is not a string")]
    InvalidInfo { key: String },

    #[error("{left} can only be combined with other {left} objects, got {right}")]
    IncompatibleKinds {
        left: &'static str,
        right: &'static str,
    },

    #[error("{collection} can only store {expected} objects, got {found}")]
    UnsupportedEntity {
        collection: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Cannot add 0 or negative width smearing (got {0})")]
    InvalidWidth(f64),

    #[error("Requested smearing type not recognized. Got {0}")]
    UnknownSmearing(String),

    #[error("Invalid sampling grid: {0}")]
    InvalidGrid(String),

    #[error("Internal consistency error: {0}")]
    Internal(String),
}

impl DosError {
    pub fn class(&self) -> ErrorClass {
        match self {
            DosError::LengthMismatch { .. }
            | DosError::UnevenGrid
            | DosError::EnergyAxisMismatch(_)
            | DosError::EmptyCollection
            | DosError::InfoLengthMismatch { .. }
            | DosError::InvalidWidth(_)
            | DosError::UnknownSmearing(_)
            | DosError::InvalidGrid(_) => ErrorClass::Value,
            DosError::InvalidInfo { .. }
            | DosError::IncompatibleKinds { .. }
            | DosError::UnsupportedEntity { .. } => ErrorClass::Type,
            DosError::Shape(_) | DosError::IndexOutOfRange { .. } => ErrorClass::Index,
            DosError::Internal(_) => ErrorClass::Internal,
        }
    }
}
