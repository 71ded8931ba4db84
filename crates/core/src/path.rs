//! Toolpaths and the layers that own them.

use crate::error::{Error, Result};
use crate::geometry::{polyline_length, Point2D};
use crate::settings::{LaserSettings, Operation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a toolpath layer.
pub type LayerId = String;

/// A single polyline or polygon the laser head follows.
///
/// A path with fewer than two points has zero length. Such paths are
/// carried through every stage unchanged.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaserPath {
    /// Identifier, unique within a job.
    pub id: String,
    /// Vertices in travel order.
    pub points: Vec<Point2D>,
    /// Whether the last point connects back to the first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub closed: bool,
    /// Operation performed along the path.
    pub operation: Operation,
    /// Laser settings for this path.
    #[cfg_attr(feature = "serde", serde(default))]
    pub settings: LaserSettings,
    /// Material this path is cut from.
    #[cfg_attr(feature = "serde", serde(default))]
    pub material_ref: String,
    /// Intra-layer execution hint.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
    /// Target depth in mm, if the operation is depth-controlled.
    #[cfg_attr(feature = "serde", serde(default))]
    pub depth: Option<f64>,
}

impl LaserPath {
    /// Creates an open path with default settings.
    pub fn new(id: impl Into<String>, operation: Operation, points: Vec<Point2D>) -> Self {
        Self {
            id: id.into(),
            points,
            closed: false,
            operation,
            settings: LaserSettings::default(),
            material_ref: String::new(),
            priority: 0,
            depth: None,
        }
    }

    /// Marks the path as closed.
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Sets the laser settings.
    pub fn with_settings(mut self, settings: LaserSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the material reference.
    pub fn with_material(mut self, material_ref: impl Into<String>) -> Self {
        self.material_ref = material_ref.into();
        self
    }

    /// Sets the execution priority hint.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the target depth.
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    /// First vertex, if any.
    pub fn first_point(&self) -> Option<Point2D> {
        self.points.first().copied()
    }

    /// Last vertex, if any.
    pub fn last_point(&self) -> Option<Point2D> {
        self.points.last().copied()
    }

    /// Returns true if the path has fewer than two points.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    /// Sum of consecutive-point distances, ignoring the closing segment.
    pub fn length(&self) -> f64 {
        polyline_length(&self.points)
    }

    /// Distance the head actually cuts, including the closing segment of
    /// a closed path.
    pub fn cut_length(&self) -> f64 {
        let open = self.length();
        match (self.closed, self.first_point(), self.last_point()) {
            (true, Some(first), Some(last)) if self.points.len() > 2 => open + last.distance(first),
            _ => open,
        }
    }

    /// Checks that every coordinate is finite.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] naming the first offending point.
    pub fn validate(&self) -> Result<()> {
        match self
            .points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            Some(i) => Err(Error::InvalidPath(format!(
                "path '{}' point {} is not finite",
                self.id, i
            ))),
            None => Ok(()),
        }
    }

    /// Reverses the point order in place.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Returns true if every point lies inside the given rectangle
    /// anchored at the origin.
    pub fn within(&self, width: f64, height: f64) -> bool {
        self.points
            .iter()
            .all(|p| (0.0..=width).contains(&p.x) && (0.0..=height).contains(&p.y))
    }
}

/// A named group of paths sharing an operation and default settings.
///
/// A layer owns its paths exclusively.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToolpathLayer {
    /// Layer identifier.
    pub id: LayerId,
    /// Display name.
    pub name: String,
    /// Operation type; drives execution order.
    pub operation: Operation,
    /// Paths in execution order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub paths: Vec<LaserPath>,
    /// Default settings for paths created on this layer.
    #[cfg_attr(feature = "serde", serde(default))]
    pub settings: LaserSettings,
    /// Whether the layer is shown in previews.
    #[cfg_attr(feature = "serde", serde(default = "default_visible"))]
    pub visible: bool,
    /// Locked layers are never rewritten by the optimizer.
    #[cfg_attr(feature = "serde", serde(default))]
    pub locked: bool,
}

#[cfg(feature = "serde")]
fn default_visible() -> bool {
    true
}

impl ToolpathLayer {
    /// Creates an empty, visible, unlocked layer.
    pub fn new(id: impl Into<LayerId>, name: impl Into<String>, operation: Operation) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            operation,
            paths: Vec::new(),
            settings: LaserSettings::default(),
            visible: true,
            locked: false,
        }
    }

    /// Sets the paths.
    pub fn with_paths(mut self, paths: Vec<LaserPath>) -> Self {
        self.paths = paths;
        self
    }

    /// Sets the layer default settings.
    pub fn with_settings(mut self, settings: LaserSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the lock flag.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Sets the visibility flag.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Validates every path on the layer.
    pub fn validate(&self) -> Result<()> {
        self.paths.iter().try_for_each(LaserPath::validate)
    }

    /// Total polyline length of all paths on the layer.
    pub fn total_length(&self) -> f64 {
        self.paths.iter().map(LaserPath::length).sum()
    }
}
