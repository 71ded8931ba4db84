//! Result types for toolpath optimization.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use laserpath_core::{LayerId, ToolpathLayer};

/// Aggregate metrics of one optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathOptimizationResult {
    /// Total path length before optimization, in mm.
    pub original_length: f64,

    /// Total path length after optimization, in mm.
    pub optimized_length: f64,

    /// Estimated machine time saved, in seconds.
    pub time_reduction: f64,

    /// Travel saved as a percentage of the original path length.
    /// Never negative.
    pub energy_saving_pct: f64,

    /// Layer ids in execution order.
    pub layer_order: Vec<LayerId>,

    /// Non-fatal findings for the operator.
    pub warnings: Vec<String>,

    /// Non-cutting travel in input order, in mm.
    pub travel_before: f64,

    /// Non-cutting travel after reordering, in mm.
    pub travel_after: f64,

    /// Number of paths across all layers.
    pub path_count: usize,

    /// Per-layer breakdown, in execution order.
    pub layers: Vec<LayerMetrics>,
}

impl PathOptimizationResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self {
            original_length: 0.0,
            optimized_length: 0.0,
            time_reduction: 0.0,
            energy_saving_pct: 0.0,
            layer_order: Vec::new(),
            warnings: Vec::new(),
            travel_before: 0.0,
            travel_after: 0.0,
            path_count: 0,
            layers: Vec::new(),
        }
    }

    /// Travel saved by reordering, in mm. Never negative.
    pub fn travel_reduction(&self) -> f64 {
        (self.travel_before - self.travel_after).max(0.0)
    }

    /// Returns true if any warning was raised.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Adds one layer's metrics to the job totals.
    pub(crate) fn accumulate(&mut self, metrics: LayerMetrics) {
        self.original_length += metrics.length_before;
        self.optimized_length += metrics.length_after;
        self.travel_before += metrics.travel_before;
        self.travel_after += metrics.travel_after;
        self.path_count += metrics.path_count;
        self.time_reduction += metrics.time_saved;
        self.layers.push(metrics);
    }
}

impl Default for PathOptimizationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Optimized layers together with the run's metrics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizedJob {
    /// Layers in execution order, paths rewritten and reordered.
    pub layers: Vec<ToolpathLayer>,

    /// Aggregate metrics and warnings.
    pub result: PathOptimizationResult,
}

/// Metrics for a single layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayerMetrics {
    /// Layer id.
    pub layer_id: LayerId,

    /// Path length before optimization, in mm.
    pub length_before: f64,

    /// Path length after optimization, in mm.
    pub length_after: f64,

    /// Travel in input order, in mm.
    pub travel_before: f64,

    /// Travel after reordering, in mm.
    pub travel_after: f64,

    /// Number of paths on the layer.
    pub path_count: usize,

    /// Estimated machine time saved on this layer, in seconds.
    /// Negative when smoothing lengthened the paths more than travel shrank.
    pub time_saved: f64,
}
