//! Error types for laserpath.

use thiserror::Error;

/// Result type alias for laserpath operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the data model and registry.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid path provided.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Laser settings outside their physical domain.
    #[error("Invalid laser settings: {0}")]
    InvalidSettings(String),

    /// A machine or material table failed validation.
    #[error("Invalid registry: {0}")]
    InvalidRegistry(String),

    /// Machine id not present in the registry.
    #[error("Unknown machine: {0}")]
    UnknownMachine(String),

    /// Material id not present in the registry.
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    /// Serialization error.
    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}
