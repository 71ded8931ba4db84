//! Recommendation output.

use laserpath_core::{LaserSettings, Operation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings derived for one material, thickness and operation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerSpeedRecommendation {
    /// Display name of the material the settings were derived from. This
    /// is the substitute's name when the requested id was unknown.
    pub material_name: String,
    /// Requested stock thickness in mm.
    pub thickness: f64,
    pub operation: Operation,
    pub recommended: LaserSettings,
    /// Variants to try when the recommendation misbehaves, all within the
    /// machine's limits.
    pub alternatives: Vec<LaserSettings>,
    /// How much to trust `recommended`, in `[0, 1]`.
    pub confidence: f64,
    /// How the settings were derived, one line per adjustment.
    pub notes: Vec<String>,
}

impl PowerSpeedRecommendation {
    /// Returns true if no heuristic adjustment lowered the confidence.
    pub fn is_measured(&self) -> bool {
        self.confidence >= 1.0
    }
}
