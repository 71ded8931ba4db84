//! Sharp-corner softening.

use laserpath_core::{interior_angle_deg, LaserPath, Point2D};

/// Softens corners sharper than the allowed deviation from straight.
///
/// For every interior vertex whose interior angle is below
/// `180 - max_sharp_angle_deg`, the midpoint of its neighbours is inserted
/// just before it. Points are only ever added. Polylines with two or fewer
/// points, and vertices with a zero-length neighbour segment, pass through
/// unchanged.
pub fn smooth(points: &[Point2D], max_sharp_angle_deg: f64) -> Vec<Point2D> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }
    let threshold = 180.0 - max_sharp_angle_deg.clamp(0.0, 180.0);

    let mut out = Vec::with_capacity(n + n / 2);
    out.push(points[0]);

    for i in 1..n - 1 {
        let (prev, vertex, next) = (points[i - 1], points[i], points[i + 1]);
        if let Some(angle) = interior_angle_deg(prev, vertex, next) {
            if angle < threshold {
                out.push(prev.midpoint(next));
            }
        }
        out.push(vertex);
    }

    out.push(points[n - 1]);
    out
}

/// Smooths a path's points, keeping every other field.
pub fn smooth_path(path: &LaserPath, max_sharp_angle_deg: f64) -> LaserPath {
    LaserPath {
        points: smooth(&path.points, max_sharp_angle_deg),
        ..path.clone()
    }
}

/// Number of vertices that [`smooth`] would soften.
pub fn count_sharp_corners(points: &[Point2D], max_sharp_angle_deg: f64) -> usize {
    if points.len() <= 2 {
        return 0;
    }
    let threshold = 180.0 - max_sharp_angle_deg.clamp(0.0, 180.0);
    points
        .windows(3)
        .filter_map(|w| interior_angle_deg(w[0], w[1], w[2]))
        .filter(|&angle| angle < threshold)
        .count()
}
