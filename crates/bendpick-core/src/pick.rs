//! Pick arc and trim construction
//!
//! A pick is the part of a small circle around the intersection point that
//! lies on the inner side of the contour. The contour stretch inside the
//! circle is cut out and replaced by the arc.

use std::fmt;

use crate::geometry::{angle_between, angular_span, circle_line_intersections, normalize_angle};
use crate::types::{CutPoint, LineSegment, PickSpec, Point2D, TrimSpec};

/// Why a pick candidate produced no arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickRejection {
    /// The circle meets the contour fewer than twice.
    TooFewRoots(usize),
    /// The arc opening is below the minimum span (numerical noise).
    DegenerateSpan(f64),
    /// The intersection coincides with the bend centroid.
    NoDirection,
}

impl fmt::Display for PickRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewRoots(n) => write!(f, "circle meets contour {} time(s)", n),
            Self::DegenerateSpan(span) => write!(f, "arc span {:.3}° is degenerate", span),
            Self::NoDirection => write!(f, "no convergence direction"),
        }
    }
}

/// Builds the pick arc centred on `center` and the matching contour trim.
///
/// `direction` is the unit vector pointing into the sheet; the arc is
/// oriented so that its counter-clockwise sweep passes through
/// `center + direction * radius`.
pub fn build_pick(
    center: Point2D,
    radius: f64,
    direction: Point2D,
    contour: &LineSegment,
    min_span: f64,
) -> Result<(PickSpec, TrimSpec), PickRejection> {
    let mut hits = circle_line_intersections(center, radius, contour.start, contour.end);
    if hits.len() < 2 {
        return Err(PickRejection::TooFewRoots(hits.len()));
    }
    hits.sort_by(|a, b| a.t.total_cmp(&b.t));

    let first = hits[0];
    let second = hits[1];

    let inner = center + direction * radius;
    let inner_angle = normalize_angle((inner.y - center.y).atan2(inner.x - center.x).to_degrees());

    let angle1 = normalize_angle(first.angle);
    let angle2 = normalize_angle(second.angle);

    let (start_angle, end_angle) = if angle_between(inner_angle, angle1, angle2) {
        (angle1, angle2)
    } else {
        (angle2, angle1)
    };

    let span = angular_span(start_angle, end_angle);
    if span < min_span {
        return Err(PickRejection::DegenerateSpan(span));
    }

    let pick = PickSpec {
        center,
        radius,
        start_angle,
        end_angle,
        layer: contour.layer.clone(),
    };
    let trim = TrimSpec {
        contour: contour.clone(),
        cut1: CutPoint {
            point: first.point,
            t: first.t,
        },
        cut2: CutPoint {
            point: second.point,
            t: second.t,
        },
    };

    Ok((pick, trim))
}
