//! Configuration for toolpath optimization.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use laserpath_core::Point2D;

/// Job-level optimization parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptimizationSettings {
    /// Registry id of the target machine.
    pub machine_id: String,

    /// Registry id of the stock material.
    pub material_id: String,

    /// Reorder paths with the nearest-neighbour heuristic.
    pub optimize_travel: bool,

    /// Soften corners sharper than `max_sharp_angle_deg`.
    pub minimize_sharp_turns: bool,

    /// Bucket paths by (operation, power, speed) before reordering.
    pub group_similar_operations: bool,

    /// Run engrave layers before score layers before cut layers.
    pub optimize_layer_order: bool,

    /// Clamp path settings into the machine's power/speed ranges and the
    /// material's pass limit.
    pub respect_material_limits: bool,

    /// Inward offset from the work-area edges in mm. Zero disables it.
    pub safety_margin: f64,

    /// Maximum perpendicular deviation (mm) of a dropped point.
    /// Zero removes only exactly collinear points.
    pub simplify_tolerance: f64,

    /// Largest allowed turn away from straight, in degrees.
    /// Corners whose interior angle is below `180 - max_sharp_angle_deg`
    /// get an extra point.
    pub max_sharp_angle_deg: f64,

    /// Where the head starts. Seeds the nearest-neighbour ordering.
    /// Default is the machine origin.
    pub home_position: Point2D,
}

impl Default for OptimizationSettings {
    fn default() -> Self {
        Self {
            machine_id: String::new(),
            material_id: String::new(),
            optimize_travel: true,
            minimize_sharp_turns: true,
            group_similar_operations: true,
            optimize_layer_order: true,
            respect_material_limits: true,
            safety_margin: 2.0,
            simplify_tolerance: 0.1,
            max_sharp_angle_deg: 90.0,
            home_position: Point2D::ORIGIN,
        }
    }
}

impl OptimizationSettings {
    /// Creates settings for a machine/material pair with default toggles.
    pub fn new(machine_id: impl Into<String>, material_id: impl Into<String>) -> Self {
        Self {
            machine_id: machine_id.into(),
            material_id: material_id.into(),
            ..Self::default()
        }
    }

    /// Sets travel optimization.
    pub fn with_optimize_travel(mut self, enabled: bool) -> Self {
        self.optimize_travel = enabled;
        self
    }

    /// Sets corner smoothing.
    pub fn with_minimize_sharp_turns(mut self, enabled: bool) -> Self {
        self.minimize_sharp_turns = enabled;
        self
    }

    /// Sets grouping of paths with identical settings.
    pub fn with_group_similar_operations(mut self, enabled: bool) -> Self {
        self.group_similar_operations = enabled;
        self
    }

    /// Sets layer reordering by operation priority.
    pub fn with_optimize_layer_order(mut self, enabled: bool) -> Self {
        self.optimize_layer_order = enabled;
        self
    }

    /// Sets clamping to machine/material limits.
    pub fn with_respect_material_limits(mut self, enabled: bool) -> Self {
        self.respect_material_limits = enabled;
        self
    }

    /// Sets the safety margin. Negative values are treated as zero.
    pub fn with_safety_margin(mut self, margin: f64) -> Self {
        self.safety_margin = margin.max(0.0);
        self
    }

    /// Sets the simplification tolerance. Negative values are treated as zero.
    pub fn with_simplify_tolerance(mut self, tolerance: f64) -> Self {
        self.simplify_tolerance = tolerance.max(0.0);
        self
    }

    /// Sets the sharp-turn threshold in degrees, clamped to [0, 180].
    pub fn with_max_sharp_angle(mut self, degrees: f64) -> Self {
        self.max_sharp_angle_deg = degrees.clamp(0.0, 180.0);
        self
    }

    /// Sets the home position.
    pub fn with_home_position(mut self, x: f64, y: f64) -> Self {
        self.home_position = Point2D::new(x, y);
        self
    }
}
