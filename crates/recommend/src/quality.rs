//! Quality presets.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trade-off between job time and finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum QualityLevel {
    /// Fast and rough: less power, much more speed.
    Draft,
    /// Reference settings as measured.
    #[default]
    Normal,
    /// Slower, slightly hotter.
    High,
    /// Slowest, hottest.
    Ultra,
}

impl QualityLevel {
    /// All presets, fastest first.
    pub const ALL: [QualityLevel; 4] = [
        QualityLevel::Draft,
        QualityLevel::Normal,
        QualityLevel::High,
        QualityLevel::Ultra,
    ];

    /// `(power, speed)` multipliers applied to the base settings.
    pub fn multipliers(self) -> (f64, f64) {
        match self {
            QualityLevel::Draft => (0.8, 1.5),
            QualityLevel::Normal => (1.0, 1.0),
            QualityLevel::High => (1.1, 0.8),
            QualityLevel::Ultra => (1.2, 0.6),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityLevel::Draft => "draft",
            QualityLevel::Normal => "normal",
            QualityLevel::High => "high",
            QualityLevel::Ultra => "ultra",
        }
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        QualityLevel::ALL
            .iter()
            .copied()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| format!("unknown quality level '{}' (draft, normal, high, ultra)", s))
    }
}
