//! Polyline simplification.
//!
//! A cheap stand-in for Douglas–Peucker: each interior point is measured
//! against its neighbours only, not against the global chord. One sweep is
//! O(n). Sweeps repeat until nothing more is dropped, which makes the
//! result a fixed point (simplifying it again changes nothing). Every
//! repeated sweep drops at least one point, so the worst case is O(n²).

use laserpath_core::{perpendicular_distance, LaserPath, Point2D};

/// Removes near-collinear points from a polyline.
///
/// The first and last points are always kept. An interior point is dropped
/// when its perpendicular distance to the line through the last kept point
/// and the next input point is at most `tolerance`. Polylines with two or
/// fewer points are returned unchanged. A negative or NaN tolerance is
/// treated as zero.
pub fn simplify(points: &[Point2D], tolerance: f64) -> Vec<Point2D> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let tolerance = tolerance.max(0.0);

    let mut current = sweep(points, tolerance);
    while current.len() > 2 {
        let next = sweep(&current, tolerance);
        if next.len() == current.len() {
            break;
        }
        current = next;
    }
    current
}

/// Simplifies a path's points, keeping every other field.
pub fn simplify_path(path: &LaserPath, tolerance: f64) -> LaserPath {
    LaserPath {
        points: simplify(&path.points, tolerance),
        ..path.clone()
    }
}

/// Single O(n) pass. Requires at least three points.
fn sweep(points: &[Point2D], tolerance: f64) -> Vec<Point2D> {
    let n = points.len();
    let mut kept = Vec::with_capacity(n);
    kept.push(points[0]);

    for i in 1..n - 1 {
        let prev = kept[kept.len() - 1];
        let next = points[i + 1];
        if perpendicular_distance(points[i], prev, next) > tolerance {
            kept.push(points[i]);
        }
    }

    kept.push(points[n - 1]);
    kept
}
