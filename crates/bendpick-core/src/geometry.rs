//! Geometry kernel
//!
//! Segment/segment and circle/segment intersection plus the angle helpers the
//! pick builder relies on. Degenerate input yields "no result", never a panic.

use crate::types::Point2D;

/// Below this determinant two segments are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Segments shorter than this (or with a squared length below it) are points.
pub const DEGENERATE_LENGTH: f64 = 1e-10;

/// Negative discriminants above this are floating-point tangency.
pub const DISCRIMINANT_EPSILON: f64 = 1e-10;

/// Accepted parameter band for circle roots before clamping to `[0, 1]`.
/// The slack keeps near-miss contacts on sloped segments.
pub const ROOT_BAND: (f64, f64) = (-0.1, 1.1);

/// One intersection of a circle with a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleHit {
    /// Point on the segment (after clamping `t`).
    pub point: Point2D,
    /// Clamped parameter along the segment.
    pub t: f64,
    /// Angle of `point` around the circle center, degrees in `(-180, 180]`.
    pub angle: f64,
}

/// Intersection of segment `p1` with segment `p2`.
///
/// Returns the point and its parameter along the first segment, or `None`
/// when the segments are parallel or do not reach each other.
pub fn intersect_lines(
    p1_start: Point2D,
    p1_end: Point2D,
    p2_start: Point2D,
    p2_end: Point2D,
) -> Option<(Point2D, f64)> {
    let (x1, y1) = (p1_start.x, p1_start.y);
    let (x2, y2) = (p1_end.x, p1_end.y);
    let (x3, y3) = (p2_start.x, p2_start.y);
    let (x4, y4) = (p2_end.x, p2_end.y);

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        let point = Point2D::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1));
        return Some((point, t));
    }

    None
}

/// Orthogonal projection of `reference` onto the segment, clamped to it.
pub fn closest_point_on_segment(reference: Point2D, seg_start: Point2D, seg_end: Point2D) -> Point2D {
    let d = seg_end - seg_start;
    let length_sq = d.dot(&d);
    if length_sq < DEGENERATE_LENGTH {
        return seg_start;
    }

    let t = ((reference - seg_start).dot(&d) / length_sq).clamp(0.0, 1.0);
    seg_start + d * t
}

/// Real roots of `a·t² + b·t + c = 0`, smaller root first.
///
/// Slightly negative discriminants are clamped to zero so a tangent contact
/// still yields a (double) root.
fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < -DISCRIMINANT_EPSILON {
        return None;
    }

    let sqrt_disc = discriminant.max(0.0).sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);
    Some((t1, t2))
}

/// Intersections of the circle `(center, radius)` with a segment.
pub fn circle_line_intersections(
    center: Point2D,
    radius: f64,
    seg_start: Point2D,
    seg_end: Point2D,
) -> Vec<CircleHit> {
    let d = seg_end - seg_start;
    if d.length() < DEGENERATE_LENGTH {
        return Vec::new();
    }

    let f = seg_start - center;
    let a = d.dot(&d);
    let b = 2.0 * f.dot(&d);
    let c = f.dot(&f) - radius * radius;

    let Some((t1, t2)) = solve_quadratic(a, b, c) else {
        return Vec::new();
    };

    [t1, t2]
        .into_iter()
        .filter(|t| (ROOT_BAND.0..=ROOT_BAND.1).contains(t))
        .map(|t| {
            let t = t.clamp(0.0, 1.0);
            let point = seg_start + d * t;
            let angle = (point.y - center.y).atan2(point.x - center.x).to_degrees();
            CircleHit { point, t, angle }
        })
        .collect()
}

/// Folds an angle in degrees into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Whether `angle` lies on the counter-clockwise sweep from `start` to `end`.
///
/// Bounds are inclusive; `start > end` (after normalization) wraps through 0°.
pub fn angle_between(angle: f64, start: f64, end: f64) -> bool {
    let angle = normalize_angle(angle);
    let start = normalize_angle(start);
    let end = normalize_angle(end);

    if start <= end {
        start <= angle && angle <= end
    } else {
        angle >= start || angle <= end
    }
}

/// Angular distance between two directions, in `[0, 180]`.
pub fn angular_span(start: f64, end: f64) -> f64 {
    let span = (end - start).abs();
    if span > 180.0 {
        360.0 - span
    } else {
        span
    }
}
