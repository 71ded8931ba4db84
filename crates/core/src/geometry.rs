//! Geometry primitives.
//!
//! Plain value types and pure functions over 2D points. Every function here
//! tolerates empty and single-point inputs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length below which a segment is treated as degenerate.
pub const EPSILON: f64 = 1e-12;

/// A point (or vector) in the machine plane, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// The machine origin.
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point2D) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Squared Euclidean distance to `other`.
    /// Use this when comparing distances (avoids sqrt).
    #[inline]
    pub fn distance_sq(self, other: Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Midpoint between `self` and `other`.
    #[inline]
    pub fn midpoint(self, other: Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Vector from `self` to `other`.
    #[inline]
    pub fn to(self, other: Point2D) -> Point2D {
        Point2D::new(other.x - self.x, other.y - self.y)
    }

    /// Dot product, treating both points as vectors.
    #[inline]
    pub fn dot(self, other: Point2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Length of the vector from the origin.
    #[inline]
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Point2D::new(x, y)
    }
}

/// Sum of consecutive-point distances along an open polyline.
///
/// Returns 0.0 for fewer than two points.
pub fn polyline_length(points: &[Point2D]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
///
/// Falls back to the distance from `p` to `a` when `a` and `b` coincide.
pub fn perpendicular_distance(p: Point2D, a: Point2D, b: Point2D) -> f64 {
    let ab = a.to(b);
    let len = ab.norm();
    if len < EPSILON {
        return p.distance(a);
    }
    let ap = a.to(p);
    (ab.x * ap.y - ab.y * ap.x).abs() / len
}

/// Interior angle at `vertex` in degrees, between the rays towards `prev`
/// and `next`.
///
/// 180° means the three points are collinear and the path runs straight
/// through; values near 0° are hairpin turns. Returns `None` when either
/// ray is degenerate. The cosine is clamped to [-1, 1] before `acos`.
pub fn interior_angle_deg(prev: Point2D, vertex: Point2D, next: Point2D) -> Option<f64> {
    let v1 = vertex.to(prev);
    let v2 = vertex.to(next);
    let n1 = v1.norm();
    let n2 = v2.norm();
    if n1 < EPSILON || n2 < EPSILON {
        return None;
    }
    let cos = (v1.dot(v2) / (n1 * n2)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_relative_eq!(a.distance(b), 5.0);
        assert_relative_eq!(a.distance_sq(b), 25.0);
        assert_eq!(b.distance(b), 0.0);
    }

    #[test]
    fn test_midpoint() {
        let m = Point2D::new(0.0, 0.0).midpoint(Point2D::new(10.0, -4.0));
        assert_eq!(m, Point2D::new(5.0, -2.0));
    }

    #[test]
    fn test_polyline_length() {
        assert_eq!(polyline_length(&[]), 0.0);
        assert_eq!(polyline_length(&[Point2D::new(1.0, 1.0)]), 0.0);

        let pts = [
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 4.0),
            Point2D::new(3.0, 10.0),
        ];
        assert_relative_eq!(polyline_length(&pts), 11.0);
    }

    #[test]
    fn test_perpendicular_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(10.0, 0.0);
        assert_relative_eq!(perpendicular_distance(Point2D::new(5.0, 2.0), a, b), 2.0);
        // Beyond the segment end: still the distance to the infinite line.
        assert_relative_eq!(perpendicular_distance(Point2D::new(20.0, -3.0), a, b), 3.0);
    }

    #[test]
    fn test_perpendicular_distance_degenerate_line() {
        let a = Point2D::new(1.0, 1.0);
        assert_relative_eq!(perpendicular_distance(Point2D::new(4.0, 5.0), a, a), 5.0);
    }

    #[test]
    fn test_interior_angle() {
        let straight = interior_angle_deg(
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(2.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(straight, 180.0, epsilon = 1e-9);

        let right = interior_angle_deg(
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
        )
        .unwrap();
        assert_relative_eq!(right, 90.0, epsilon = 1e-9);

        let hairpin = interior_angle_deg(
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(0.0, 0.0),
        )
        .unwrap();
        assert!(hairpin.abs() < 1e-6);
        assert!(!hairpin.is_nan());
    }

    #[test]
    fn test_interior_angle_degenerate() {
        let p = Point2D::new(1.0, 1.0);
        assert!(interior_angle_deg(p, p, Point2D::new(2.0, 2.0)).is_none());
    }
}
