//! Colinear bend grouping
//!
//! Bend annotations are often drawn as several dashed segments. Segments on
//! the same horizontal or vertical line are merged into one [`BendGroup`] so
//! picks land only at the ends of the logical bend.
//!
//! Only axis-aligned lines are merged. Sheet-metal bends are assumed to be
//! orthogonal; a diagonal bend stays alone in its own group and is measured
//! along Y like a vertical one.

use crate::types::{BendGroup, LineSegment, Orientation};

/// Orientation of a segment, if it is axis-aligned within `tol`.
///
/// A segment that is both (zero length) is reported as horizontal.
pub fn axis_orientation(segment: &LineSegment, tol: f64) -> Option<Orientation> {
    if (segment.start.y - segment.end.y).abs() < tol {
        Some(Orientation::Horizontal)
    } else if (segment.start.x - segment.end.x).abs() < tol {
        Some(Orientation::Vertical)
    } else {
        None
    }
}

/// Whether two segments lie on the same horizontal or vertical line.
pub fn are_colinear(a: &LineSegment, b: &LineSegment, tol: f64) -> bool {
    let a_horizontal = (a.start.y - a.end.y).abs() < tol;
    let a_vertical = (a.start.x - a.end.x).abs() < tol;
    let b_horizontal = (b.start.y - b.end.y).abs() < tol;
    let b_vertical = (b.start.x - b.end.x).abs() < tol;

    if a_horizontal && b_horizontal {
        return (a.start.y - b.start.y).abs() < tol;
    }

    if a_vertical && b_vertical {
        return (a.start.x - b.start.x).abs() < tol;
    }

    false
}

/// Partitions the bend lines into colinear groups.
///
/// Grouping is greedy in input order: every ungrouped segment seeds a group
/// and absorbs each later ungrouped segment colinear with it. A diagonal
/// seed absorbs nothing and forms a singleton [`Orientation::Vertical`] group.
pub fn group_colinear(bend_lines: &[LineSegment], tol: f64) -> Vec<BendGroup> {
    let mut visited = vec![false; bend_lines.len()];
    let mut groups = Vec::new();

    for (i, seed) in bend_lines.iter().enumerate() {
        if visited[i] {
            continue;
        }
        visited[i] = true;

        let Some(orientation) = axis_orientation(seed, tol) else {
            tracing::debug!("Bend {} is not axis-aligned, kept as its own group", seed.id);
            groups.push(build_group(bend_lines, vec![i], Orientation::Vertical));
            continue;
        };

        let mut members = vec![i];
        for (j, other) in bend_lines.iter().enumerate().skip(i + 1) {
            if !visited[j] && are_colinear(seed, other, tol) {
                visited[j] = true;
                members.push(j);
            }
        }

        groups.push(build_group(bend_lines, members, orientation));
    }

    groups
}

fn build_group(bend_lines: &[LineSegment], members: Vec<usize>, orientation: Orientation) -> BendGroup {
    let seed = &bend_lines[members[0]];
    let fixed_coord = orientation.fixed(&seed.start);

    let (coord_min, coord_max) = members
        .iter()
        .flat_map(|&idx| [bend_lines[idx].start, bend_lines[idx].end])
        .map(|p| orientation.varying(&p))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c), hi.max(c))
        });

    BendGroup {
        member_indices: members,
        orientation,
        coord_min,
        coord_max,
        fixed_coord,
    }
}
