//! Material profiles and categories.

use std::fmt;
use std::str::FromStr;

use crate::settings::{LaserSettings, Operation};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Broad material family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MaterialCategory {
    Wood,
    Acrylic,
    Leather,
    Fabric,
    Paper,
    Metal,
    Other,
}

/// Id prefixes recognised when a material id is not in the registry.
const CATEGORY_PREFIXES: &[(&str, MaterialCategory)] = &[
    ("wood", MaterialCategory::Wood),
    ("basswood", MaterialCategory::Wood),
    ("plywood", MaterialCategory::Wood),
    ("birch", MaterialCategory::Wood),
    ("walnut", MaterialCategory::Wood),
    ("maple", MaterialCategory::Wood),
    ("cherry", MaterialCategory::Wood),
    ("oak", MaterialCategory::Wood),
    ("pine", MaterialCategory::Wood),
    ("bamboo", MaterialCategory::Wood),
    ("mdf", MaterialCategory::Wood),
    ("acrylic", MaterialCategory::Acrylic),
    ("plexiglass", MaterialCategory::Acrylic),
    ("pmma", MaterialCategory::Acrylic),
    ("leather", MaterialCategory::Leather),
    ("fabric", MaterialCategory::Fabric),
    ("felt", MaterialCategory::Fabric),
    ("cotton", MaterialCategory::Fabric),
    ("denim", MaterialCategory::Fabric),
    ("canvas", MaterialCategory::Fabric),
    ("paper", MaterialCategory::Paper),
    ("cardstock", MaterialCategory::Paper),
    ("cardboard", MaterialCategory::Paper),
    ("metal", MaterialCategory::Metal),
    ("steel", MaterialCategory::Metal),
    ("stainless", MaterialCategory::Metal),
    ("aluminum", MaterialCategory::Metal),
    ("aluminium", MaterialCategory::Metal),
    ("anodized", MaterialCategory::Metal),
    ("brass", MaterialCategory::Metal),
    ("copper", MaterialCategory::Metal),
];

impl MaterialCategory {
    /// All categories, in declaration order.
    pub const ALL: [MaterialCategory; 7] = [
        MaterialCategory::Wood,
        MaterialCategory::Acrylic,
        MaterialCategory::Leather,
        MaterialCategory::Fabric,
        MaterialCategory::Paper,
        MaterialCategory::Metal,
        MaterialCategory::Other,
    ];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            MaterialCategory::Wood => "wood",
            MaterialCategory::Acrylic => "acrylic",
            MaterialCategory::Leather => "leather",
            MaterialCategory::Fabric => "fabric",
            MaterialCategory::Paper => "paper",
            MaterialCategory::Metal => "metal",
            MaterialCategory::Other => "other",
        }
    }

    /// Derives a category from the prefix of a material id
    /// (`"walnut-4mm"` → `Wood`).
    ///
    /// The prefix is the text before the first `-`, compared
    /// case-insensitively.
    pub fn from_material_id(id: &str) -> Option<MaterialCategory> {
        let prefix = id.split('-').next()?.trim().to_ascii_lowercase();
        if prefix.is_empty() {
            return None;
        }
        CATEGORY_PREFIXES
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|&(_, category)| category)
            .or_else(|| prefix.parse().ok())
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        MaterialCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::InvalidSettings(format!("unknown material category '{}'", s)))
    }
}

/// Reference data for one material stock.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaterialProfile {
    /// Registry key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Material family.
    pub category: MaterialCategory,
    /// Stock thickness in mm, strictly positive.
    pub thickness: f64,
    /// Density in g/cm³.
    pub density: f64,
    /// Measured cut settings at `thickness`.
    pub cut_settings: LaserSettings,
    /// Measured engrave settings.
    pub engrave_settings: LaserSettings,
    /// Handling and fume warnings shown to the operator.
    #[cfg_attr(feature = "serde", serde(default))]
    pub safety_notes: Vec<String>,
    /// Upper bound on passes, if the material tolerates only so many.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_passes: Option<u32>,
}

impl MaterialProfile {
    /// Base settings for `operation`.
    ///
    /// Score has no measured data: power and speed are the mean of the cut
    /// and engrave settings, with a single pass.
    pub fn settings_for(&self, operation: Operation) -> LaserSettings {
        match operation {
            Operation::Cut => self.cut_settings,
            Operation::Engrave => self.engrave_settings,
            Operation::Score => LaserSettings {
                power: (self.cut_settings.power + self.engrave_settings.power) / 2.0,
                speed: (self.cut_settings.speed + self.engrave_settings.speed) / 2.0,
                passes: 1,
                air_assist: self.cut_settings.air_assist,
            },
        }
    }

    /// Upper bound on passes, defaulting to `fallback`.
    pub fn pass_limit(&self, fallback: u32) -> u32 {
        self.max_passes.unwrap_or(fallback).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_id() {
        assert_eq!(
            MaterialCategory::from_material_id("walnut-4mm"),
            Some(MaterialCategory::Wood)
        );
        assert_eq!(
            MaterialCategory::from_material_id("Acrylic-clear-3mm"),
            Some(MaterialCategory::Acrylic)
        );
        assert_eq!(
            MaterialCategory::from_material_id("stainless-steel"),
            Some(MaterialCategory::Metal)
        );
        assert_eq!(
            MaterialCategory::from_material_id("other-foam"),
            Some(MaterialCategory::Other)
        );
        assert_eq!(MaterialCategory::from_material_id("unobtainium-1mm"), None);
        assert_eq!(MaterialCategory::from_material_id(""), None);
    }

    #[test]
    fn test_score_settings_interpolated() {
        let material = MaterialProfile {
            id: "m".into(),
            name: "M".into(),
            category: MaterialCategory::Wood,
            thickness: 3.0,
            density: 0.5,
            cut_settings: LaserSettings::new(100.0, 200.0, 2).with_air_assist(true),
            engrave_settings: LaserSettings::new(30.0, 3000.0, 1),
            safety_notes: Vec::new(),
            max_passes: None,
        };
        let score = material.settings_for(Operation::Score);
        assert_eq!(score.power, 65.0);
        assert_eq!(score.speed, 1600.0);
        assert_eq!(score.passes, 1);
        assert!(score.air_assist);
        assert_eq!(material.pass_limit(3), 3);
    }
}
