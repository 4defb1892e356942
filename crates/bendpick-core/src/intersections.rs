//! Bend/contour intersection collection.

use crate::geometry::{closest_point_on_segment, intersect_lines};
use crate::types::{BendGroup, IntersectionKind, LineSegment, Point2D, RawIntersection};

/// Where a single bend segment meets a single contour segment.
///
/// Tries the exact crossing first. Failing that, a contour endpoint closer
/// than `proximity` to the bend counts as meeting it at its projection; the
/// start endpoint is checked before the end endpoint.
pub fn bend_contour_meeting(
    bend: &LineSegment,
    contour: &LineSegment,
    proximity: f64,
) -> Option<(Point2D, IntersectionKind)> {
    if let Some((point, _)) = intersect_lines(bend.start, bend.end, contour.start, contour.end) {
        return Some((point, IntersectionKind::Crossing));
    }

    [contour.start, contour.end].into_iter().find_map(|endpoint| {
        let projected = closest_point_on_segment(endpoint, bend.start, bend.end);
        (endpoint.distance_to(&projected) < proximity)
            .then_some((projected, IntersectionKind::Proximity))
    })
}

/// Every intersection between the members of `group` and the contour lines.
pub fn collect_intersections(
    group: &BendGroup,
    bend_lines: &[LineSegment],
    contour_lines: &[LineSegment],
    proximity: f64,
) -> Vec<RawIntersection> {
    let mut found = Vec::new();

    for &member in &group.member_indices {
        let bend = &bend_lines[member];

        for contour in contour_lines {
            if let Some((point, kind)) = bend_contour_meeting(bend, contour, proximity) {
                found.push(RawIntersection {
                    point,
                    contour: contour.clone(),
                    extremity_coord: group.orientation.varying(&point),
                    kind,
                });
            }
        }
    }

    found
}
