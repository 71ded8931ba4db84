//! Error types for settings recommendation.

use thiserror::Error;

/// Failures that leave no best-effort answer to give.
///
/// Weaker problems (thickness mismatch, incompatibility, clamping) are
/// reported as notes with a lowered confidence instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendationError {
    /// Machine id not found in the registry.
    #[error("Unknown machine: {0}")]
    UnknownMachine(String),

    /// Material id not found and no same-category substitute exists.
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    /// Requested thickness is not a positive finite number.
    #[error("Invalid thickness: {0} mm")]
    InvalidThickness(f64),
}

/// Result type for recommendation operations.
pub type Result<T> = std::result::Result<T, RecommendationError>;
