//! Job-level optimization pipeline and public API.
//!
//! Runs simplification, corner smoothing, safety-margin enforcement and
//! path ordering over every layer, then orders the layers themselves.
//! Everything here is synchronous and deterministic: identical inputs give
//! identical outputs, warnings included.

use laserpath_core::{LaserPath, MachineProfile, MaterialProfile, Registry, ToolpathLayer};

use crate::bounds::{apply_margin_counted, layer_bounds_warning};
use crate::config::OptimizationSettings;
use crate::result::{LayerMetrics, OptimizedJob, PathOptimizationResult};
use crate::sequence::{group_similar, reorder_from, travel_distance};
use crate::simplify::simplify;
use crate::smooth::smooth;

/// Travel speed (mm/min) used for time estimates when the machine is unknown.
pub const FALLBACK_TRAVEL_SPEED: f64 = 3000.0;

/// Pass cap applied when a material declares none.
const DEFAULT_MAX_PASSES: u32 = 3;

/// Optimizes a job against the builtin machine/material registry.
///
/// # Example
///
/// ```rust
/// use laserpath_core::{LaserPath, Operation, Point2D, ToolpathLayer};
/// use laserpath_cutting::{optimize_toolpaths, OptimizationSettings};
///
/// let layer = ToolpathLayer::new("outline", "Outline", Operation::Cut).with_paths(vec![
///     LaserPath::new("a", Operation::Cut, vec![Point2D::new(200.0, 10.0), Point2D::new(210.0, 10.0)]),
///     LaserPath::new("b", Operation::Cut, vec![Point2D::new(20.0, 10.0), Point2D::new(30.0, 10.0)]),
/// ]);
/// let settings = OptimizationSettings::new("xtool-d1", "basswood-3mm");
///
/// let job = optimize_toolpaths(vec![layer], &settings);
/// assert_eq!(job.layers[0].paths[0].id, "b");
/// assert!(job.result.travel_after <= job.result.travel_before);
/// ```
pub fn optimize_toolpaths(layers: Vec<ToolpathLayer>, settings: &OptimizationSettings) -> OptimizedJob {
    optimize_toolpaths_with(Registry::builtin(), layers, settings)
}

/// Optimizes a job against a caller-supplied registry.
pub fn optimize_toolpaths_with(
    registry: &Registry,
    layers: Vec<ToolpathLayer>,
    settings: &OptimizationSettings,
) -> OptimizedJob {
    let mut result = PathOptimizationResult::new();

    let machine = registry.get_machine(&settings.machine_id);
    if machine.is_none() {
        log::warn!("unknown machine '{}', skipping envelope checks", settings.machine_id);
        result.warnings.push(format!(
            "Unknown machine '{}': work area checks, safety margin and limit clamping skipped",
            settings.machine_id
        ));
    }

    let material = if settings.material_id.is_empty() {
        None
    } else {
        let found = registry.get_material(&settings.material_id);
        if found.is_none() {
            result
                .warnings
                .push(format!("Unknown material '{}'", settings.material_id));
        }
        found
    };

    if settings.respect_material_limits {
        if let (Some(machine), Some(material)) = (machine, material) {
            let report = registry.validate_compatibility(&material.id, &machine.id);
            result.warnings.extend(
                report
                    .issues
                    .into_iter()
                    .map(|issue| format!("Material compatibility: {}", issue)),
            );
        }
    }

    let ctx = LayerContext {
        settings,
        machine,
        material,
    };

    let mut outcomes = run_layers(layers, &ctx);

    // Same stable priority sort as `order_layers`, carrying metrics along.
    if settings.optimize_layer_order {
        outcomes.sort_by_key(|outcome| outcome.layer.operation.priority());
    }

    let mut ordered = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        result.layer_order.push(outcome.layer.id.clone());
        result.warnings.extend(outcome.warnings);
        result.accumulate(outcome.metrics);
        ordered.push(outcome.layer);
    }

    result.time_reduction = result.time_reduction.max(0.0);
    result.energy_saving_pct = if result.original_length > 0.0 {
        (result.travel_reduction() / result.original_length * 100.0).max(0.0)
    } else {
        0.0
    };

    log::debug!(
        "optimized {} layer(s), {} path(s): travel {:.1} -> {:.1} mm, {} warning(s)",
        ordered.len(),
        result.path_count,
        result.travel_before,
        result.travel_after,
        result.warnings.len()
    );

    OptimizedJob {
        layers: ordered,
        result,
    }
}

/// Job-wide inputs shared by every layer.
struct LayerContext<'a> {
    settings: &'a OptimizationSettings,
    machine: Option<&'a MachineProfile>,
    material: Option<&'a MaterialProfile>,
}

impl LayerContext<'_> {
    fn travel_speed(&self) -> f64 {
        self.machine
            .map(|m| m.speed_range.max)
            .unwrap_or(FALLBACK_TRAVEL_SPEED)
    }
}

struct LayerOutcome {
    layer: ToolpathLayer,
    metrics: LayerMetrics,
    warnings: Vec<String>,
}

#[cfg(not(feature = "parallel"))]
fn run_layers(layers: Vec<ToolpathLayer>, ctx: &LayerContext<'_>) -> Vec<LayerOutcome> {
    layers
        .into_iter()
        .map(|layer| optimize_layer(layer, ctx))
        .collect()
}

#[cfg(feature = "parallel")]
fn run_layers(layers: Vec<ToolpathLayer>, ctx: &LayerContext<'_>) -> Vec<LayerOutcome> {
    use rayon::prelude::*;

    layers
        .into_par_iter()
        .map(|layer| optimize_layer(layer, ctx))
        .collect()
}

/// Runs the per-layer pipeline: simplify → smooth → margin → clamp → order.
fn optimize_layer(mut layer: ToolpathLayer, ctx: &LayerContext<'_>) -> LayerOutcome {
    let settings = ctx.settings;
    let home = settings.home_position;
    let mut warnings = Vec::new();

    let length_before = layer.total_length();
    let travel_before = travel_distance(&layer.paths, home);
    let path_count = layer.paths.len();

    if let Some(machine) = ctx.machine {
        if let Some(warning) = layer_bounds_warning(&layer, &machine.work_area) {
            log::warn!("{}", warning);
            warnings.push(warning);
        }
    }

    if layer.locked {
        log::debug!("layer '{}' is locked, leaving paths untouched", layer.id);
        let metrics = LayerMetrics {
            layer_id: layer.id.clone(),
            length_before,
            length_after: length_before,
            travel_before,
            travel_after: travel_before,
            path_count,
            time_saved: 0.0,
        };
        return LayerOutcome {
            layer,
            metrics,
            warnings,
        };
    }

    let original = std::mem::take(&mut layer.paths);

    let mut paths: Vec<LaserPath> = original
        .iter()
        .map(|path| {
            let mut points = simplify(&path.points, settings.simplify_tolerance);
            if settings.minimize_sharp_turns {
                points = smooth(&points, settings.max_sharp_angle_deg);
            }
            LaserPath {
                points,
                ..path.clone()
            }
        })
        .collect();

    if let Some(machine) = ctx.machine {
        let (pulled, moved) = apply_margin_counted(paths, settings.safety_margin, &machine.work_area);
        paths = pulled;
        if moved > 0 {
            warnings.push(format!(
                "Layer '{}': {} point(s) moved inside the {} mm safety margin",
                layer.name, moved, settings.safety_margin
            ));
        }
    }

    let cut_seconds_saved: f64 = original
        .iter()
        .zip(&paths)
        .map(|(before, after)| {
            cut_seconds(before, before.cut_length()) - cut_seconds(before, after.cut_length())
        })
        .sum();

    if settings.respect_material_limits {
        if let Some(machine) = ctx.machine {
            let clamped = clamp_to_limits(&mut paths, machine, ctx.material);
            if clamped > 0 {
                warnings.push(format!(
                    "Layer '{}': settings of {} path(s) clamped to {} limits",
                    layer.name, clamped, machine.name
                ));
            }
        }
    }

    let paths = if settings.group_similar_operations {
        group_similar(paths, home, settings.optimize_travel)
    } else if settings.optimize_travel {
        reorder_from(paths, home)
    } else {
        paths
    };

    layer.paths = paths;

    let length_after = layer.total_length();
    let travel_after = travel_distance(&layer.paths, home);
    let travel_seconds_saved = (travel_before - travel_after) / ctx.travel_speed() * 60.0;

    let metrics = LayerMetrics {
        layer_id: layer.id.clone(),
        length_before,
        length_after,
        travel_before,
        travel_after,
        path_count,
        time_saved: travel_seconds_saved + cut_seconds_saved,
    };

    LayerOutcome {
        layer,
        metrics,
        warnings,
    }
}

/// Seconds to cut `length` mm with `path`'s speed and passes.
fn cut_seconds(path: &LaserPath, length: f64) -> f64 {
    if path.settings.speed > 0.0 {
        length * f64::from(path.settings.passes.max(1)) / path.settings.speed * 60.0
    } else {
        0.0
    }
}

/// Clamps each path's settings into the machine ranges and the material's
/// pass limit. Returns the number of paths changed.
fn clamp_to_limits(
    paths: &mut [LaserPath],
    machine: &MachineProfile,
    material: Option<&MaterialProfile>,
) -> usize {
    let pass_limit = material
        .map(|m| m.pass_limit(DEFAULT_MAX_PASSES))
        .unwrap_or(u32::MAX);

    let mut changed = 0;
    for path in paths.iter_mut() {
        let mut clamped = machine.clamp_settings(&path.settings);
        clamped.passes = clamped.passes.min(pass_limit);
        if clamped != path.settings {
            path.settings = clamped;
            changed += 1;
        }
    }
    changed
}
