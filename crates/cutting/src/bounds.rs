//! Work-envelope checks and safety-margin enforcement.

use laserpath_core::{LaserPath, Point2D, ToolpathLayer, WorkArea};

/// Returns true if every point of `path` lies inside `work_area`, edges
/// included. Paths without points are trivially in bounds.
pub fn in_bounds(path: &LaserPath, work_area: &WorkArea) -> bool {
    path.points.iter().all(|&p| work_area.contains(p))
}

/// Number of paths on `layer` with at least one point outside `work_area`.
pub fn count_out_of_bounds(layer: &ToolpathLayer, work_area: &WorkArea) -> usize {
    layer
        .paths
        .iter()
        .filter(|path| !in_bounds(path, work_area))
        .count()
}

/// Warning text for a layer with paths outside the work area, if any.
pub fn layer_bounds_warning(layer: &ToolpathLayer, work_area: &WorkArea) -> Option<String> {
    let outside = count_out_of_bounds(layer, work_area);
    if outside == 0 {
        return None;
    }
    Some(format!(
        "Layer '{}' has {} path(s) outside the machine work area ({} x {} mm)",
        layer.name, outside, work_area.width, work_area.height
    ))
}

/// Pulls every point at least `margin` away from the work-area edges.
///
/// Points already inside the inset envelope are untouched; others are
/// clamped onto it. If the margin leaves no room along an axis, points
/// collapse onto the centre line of that axis. A margin of zero (or less)
/// returns the paths exactly as given.
pub fn apply_margin(paths: Vec<LaserPath>, margin: f64, work_area: &WorkArea) -> Vec<LaserPath> {
    apply_margin_counted(paths, margin, work_area).0
}

/// [`apply_margin`], also returning how many points were moved.
pub fn apply_margin_counted(
    mut paths: Vec<LaserPath>,
    margin: f64,
    work_area: &WorkArea,
) -> (Vec<LaserPath>, usize) {
    if margin.is_nan() || margin <= 0.0 {
        return (paths, 0);
    }

    let mut moved = 0;
    for path in &mut paths {
        for point in &mut path.points {
            let pulled = Point2D::new(
                pull_in(point.x, work_area.width, margin),
                pull_in(point.y, work_area.height, margin),
            );
            if pulled != *point {
                *point = pulled;
                moved += 1;
            }
        }
    }
    (paths, moved)
}

fn pull_in(value: f64, extent: f64, margin: f64) -> f64 {
    let (lo, hi) = (margin, extent - margin);
    if lo > hi {
        extent / 2.0
    } else {
        value.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laserpath_core::Operation;

    fn path(id: &str, coords: &[(f64, f64)]) -> LaserPath {
        LaserPath::new(id, Operation::Cut, coords.iter().map(|&c| c.into()).collect())
    }

    #[test]
    fn test_in_bounds() {
        let area = WorkArea::new(400.0, 300.0);
        assert!(in_bounds(&path("a", &[(0.0, 0.0), (400.0, 300.0)]), &area));
        assert!(!in_bounds(&path("b", &[(10.0, 10.0), (401.0, 10.0)]), &area));
        assert!(!in_bounds(&path("c", &[(10.0, -1.0)]), &area));
        assert!(in_bounds(&path("d", &[]), &area));
    }

    #[test]
    fn test_layer_warning_names_layer() {
        let area = WorkArea::new(400.0, 300.0);
        let layer = ToolpathLayer::new("l1", "Outline", Operation::Cut)
            .with_paths(vec![path("p", &[(500.0, 500.0), (500.0, 500.0)])]);
        let warning = layer_bounds_warning(&layer, &area).expect("should warn");
        assert!(warning.contains("Outline"));
        assert!(warning.contains("work area"));

        let ok = ToolpathLayer::new("l2", "Inside", Operation::Cut)
            .with_paths(vec![path("p", &[(5.0, 5.0)])]);
        assert!(layer_bounds_warning(&ok, &area).is_none());
    }

    #[test]
    fn test_zero_margin_is_noop() {
        let area = WorkArea::new(100.0, 100.0);
        let paths = vec![
            path("a", &[(0.1 + 0.2, -5.0), (150.0, 1e-17)]),
            path("b", &[]),
        ];
        let (out, moved) = apply_margin_counted(paths.clone(), 0.0, &area);
        assert_eq!(out, paths);
        assert_eq!(moved, 0);
    }

    #[test]
    fn test_margin_pulls_points_inside() {
        let area = WorkArea::new(100.0, 50.0);
        let paths = vec![path("a", &[(1.0, 1.0), (50.0, 25.0), (99.0, 60.0)])];
        let (out, moved) = apply_margin_counted(paths, 5.0, &area);
        assert_eq!(moved, 2);
        assert_eq!(
            out[0].points,
            vec![
                Point2D::new(5.0, 5.0),
                Point2D::new(50.0, 25.0),
                Point2D::new(95.0, 45.0)
            ]
        );
    }

    #[test]
    fn test_oversized_margin_collapses_to_centre() {
        let area = WorkArea::new(10.0, 100.0);
        let out = apply_margin(vec![path("a", &[(1.0, 50.0)])], 6.0, &area);
        assert_eq!(out[0].points[0], Point2D::new(5.0, 50.0));
    }
}
