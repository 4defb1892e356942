//! Contour trimming
//!
//! Collects the picks that touch each contour segment and computes the line
//! pieces that survive once every pick's cut interval is removed.

use std::collections::HashMap;

use tracing::debug;

use crate::types::{
    CutPoint, EntityId, LineInsertion, LineSegment, PickSpec, PicksForContour, Point2D, TrimSpec,
};

/// Picks closer than this are the same pick.
const COINCIDENT_PICK: f64 = 1e-6;

/// Picks keyed by the contour they cut, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ContourPicks {
    entries: Vec<PicksForContour>,
    index: HashMap<EntityId, usize>,
}

impl ContourPicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pick against the contour of its trim.
    ///
    /// A pick coinciding with one already on the same contour (a bend line
    /// drawn twice) is dropped; returns whether the pick was recorded.
    pub fn insert(&mut self, pick: PickSpec, trim: TrimSpec) -> bool {
        let id = trim.contour.id;
        if let Some(entry) = self.get(id) {
            let duplicate = entry.picks.iter().any(|(existing, _)| {
                existing.radius == pick.radius
                    && existing.center.distance_to(&pick.center) < COINCIDENT_PICK
            });
            if duplicate {
                debug!("Duplicate pick at {} on contour {} dropped", pick.center, id);
                return false;
            }
        }

        let slot = match self.index.get(&id) {
            Some(&slot) => slot,
            None => {
                self.entries.push(PicksForContour::new(trim.contour.clone()));
                self.index.insert(id, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot].picks.push((pick, trim));
        true
    }

    pub fn get(&self, id: EntityId) -> Option<&PicksForContour> {
        self.index.get(&id).map(|&slot| &self.entries[slot])
    }

    /// Number of distinct contours touched.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PicksForContour> {
        self.entries.iter()
    }

    /// Total number of picks over all contours.
    pub fn pick_count(&self) -> usize {
        self.entries.iter().map(|e| e.picks.len()).sum()
    }
}

impl Extend<(PickSpec, TrimSpec)> for ContourPicks {
    fn extend<I: IntoIterator<Item = (PickSpec, TrimSpec)>>(&mut self, iter: I) {
        for (pick, trim) in iter {
            self.insert(pick, trim);
        }
    }
}

/// Line pieces left of `contour` after removing every cut interval.
///
/// Each trim removes the stretch between its two cut points. Overlapping or
/// repeated intervals are merged first, so every stretch inside any pick is
/// removed exactly once. Pieces shorter than `min_length` are dropped.
pub fn trim_segment(contour: &LineSegment, trims: &[&TrimSpec], min_length: f64) -> Vec<LineInsertion> {
    let mut intervals: Vec<(CutPoint, CutPoint)> = trims
        .iter()
        .map(|t| if t.cut1.t <= t.cut2.t { (t.cut1, t.cut2) } else { (t.cut2, t.cut1) })
        .collect();
    intervals.sort_by(|a, b| a.0.t.total_cmp(&b.0.t));

    let mut merged: Vec<(CutPoint, CutPoint)> = Vec::with_capacity(intervals.len());
    for (lo, hi) in intervals {
        match merged.last_mut() {
            Some(last) if lo.t <= last.1.t => {
                if hi.t > last.1.t {
                    last.1 = hi;
                }
            }
            _ => merged.push((lo, hi)),
        }
    }

    let mut pieces = Vec::new();
    let mut emit = |start: Point2D, end: Point2D| {
        if start.distance_to(&end) > min_length {
            pieces.push(LineInsertion {
                start,
                end,
                layer: contour.layer.clone(),
                source: contour.id,
            });
        }
    };

    let mut current = contour.start;
    for (lo, hi) in merged {
        emit(current, lo.point);
        current = hi.point;
    }
    emit(current, contour.end);

    pieces
}

/// Replacement lines for every contour in `picks`.
pub fn replacement_lines(picks: &ContourPicks, min_length: f64) -> Vec<LineInsertion> {
    picks
        .iter()
        .flat_map(|entry| {
            let trims: Vec<&TrimSpec> = entry.picks.iter().map(|(_, trim)| trim).collect();
            trim_segment(&entry.contour, &trims, min_length)
        })
        .collect()
}
