//! Extremity filtering and convergent pick directions
//!
//! Only intersections at the two ends of a bend group receive picks. Picks at
//! both ends point toward the middle of the bend.

use crate::types::{BendGroup, Extremity, Point2D, RawIntersection};

/// Intersections kept at each end of a bend group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtremityBuckets {
    pub min_end: Vec<RawIntersection>,
    pub max_end: Vec<RawIntersection>,
}

impl ExtremityBuckets {
    pub fn len(&self) -> usize {
        self.min_end.len() + self.max_end.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Both buckets, minimum end first.
    pub fn iter(&self) -> impl Iterator<Item = (Extremity, &RawIntersection)> {
        self.min_end
            .iter()
            .map(|i| (Extremity::Min, i))
            .chain(self.max_end.iter().map(|i| (Extremity::Max, i)))
    }
}

/// End of `group` that `coord` belongs to, if it is within `tol` of one.
///
/// A coordinate close to both ends (very short groups) goes to the nearer
/// one; ties go to the minimum end.
pub fn classify_extremity(group: &BendGroup, coord: f64, tol: f64) -> Option<Extremity> {
    let to_min = (coord - group.coord_min).abs();
    let to_max = (coord - group.coord_max).abs();

    match (to_min <= tol, to_max <= tol) {
        (true, true) if to_max < to_min => Some(Extremity::Max),
        (true, _) => Some(Extremity::Min),
        (false, true) => Some(Extremity::Max),
        (false, false) => None,
    }
}

/// Splits intersections into end buckets, discarding interior ones.
pub fn filter_extremities(
    group: &BendGroup,
    intersections: Vec<RawIntersection>,
    tol: f64,
) -> ExtremityBuckets {
    let mut buckets = ExtremityBuckets::default();

    for intersection in intersections {
        match classify_extremity(group, intersection.extremity_coord, tol) {
            Some(Extremity::Min) => buckets.min_end.push(intersection),
            Some(Extremity::Max) => buckets.max_end.push(intersection),
            None => tracing::trace!(
                "Interior intersection at {} dropped",
                intersection.point
            ),
        }
    }

    buckets
}

/// Unit vector from `point` toward the group's centroid.
///
/// `None` when the point sits on the centroid itself.
pub fn convergence_direction(group: &BendGroup, point: Point2D) -> Option<Point2D> {
    (group.centroid() - point).normalize()
}
