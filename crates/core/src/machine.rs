//! Machine profiles: work envelope, power and speed limits.

use crate::geometry::Point2D;
use crate::material::MaterialCategory;
use crate::settings::LaserSettings;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Creates a new range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies in `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps `value` into `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Returns true if `min <= max` and both are finite.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Rectangular work envelope anchored at the machine origin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorkArea {
    /// Extent along X in mm.
    pub width: f64,
    /// Extent along Y in mm.
    pub height: f64,
}

impl WorkArea {
    /// Creates a new work area.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true if `p` lies inside the envelope, edges included.
    #[inline]
    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Optional machine capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MachineFeature {
    AirAssist,
    RotaryAttachment,
    Camera,
    Autofocus,
    Enclosure,
    FiberSource,
    BladeCutting,
}

/// Static description of a laser machine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineProfile {
    /// Registry key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Rated source power in watts (informational).
    pub laser_power_watts: f64,
    /// Work envelope.
    pub work_area: WorkArea,
    /// Power range in percent.
    pub power_range: Range,
    /// Speed range in mm/min.
    pub speed_range: Range,
    /// Material categories the machine can process.
    pub supported_material_categories: Vec<MaterialCategory>,
    /// Optional capabilities.
    #[cfg_attr(feature = "serde", serde(default))]
    pub features: Vec<MachineFeature>,
}

impl MachineProfile {
    /// Returns true if the machine can process `category`.
    pub fn supports(&self, category: MaterialCategory) -> bool {
        self.supported_material_categories.contains(&category)
    }

    /// Returns true if the machine has `feature`.
    pub fn has_feature(&self, feature: MachineFeature) -> bool {
        self.features.contains(&feature)
    }

    /// Clamps power into the machine's range.
    pub fn clamp_power(&self, power: f64) -> f64 {
        self.power_range.clamp(power)
    }

    /// Clamps speed into the machine's range.
    pub fn clamp_speed(&self, speed: f64) -> f64 {
        self.speed_range.clamp(speed)
    }

    /// Returns true if both power and speed lie within the machine's ranges.
    pub fn accepts(&self, settings: &LaserSettings) -> bool {
        self.power_range.contains(settings.power) && self.speed_range.contains(settings.speed)
    }

    /// Returns `settings` with power and speed clamped into range.
    ///
    /// Air assist is dropped on machines without the feature.
    pub fn clamp_settings(&self, settings: &LaserSettings) -> LaserSettings {
        LaserSettings {
            power: self.clamp_power(settings.power),
            speed: self.clamp_speed(settings.speed),
            passes: settings.passes.max(1),
            air_assist: settings.air_assist && self.has_feature(MachineFeature::AirAssist),
        }
    }
}
