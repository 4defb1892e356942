use std::collections::BTreeSet;

use proptest::prelude::*;

use bendpick_core::geometry::{intersect_lines, normalize_angle};
use bendpick_core::grouping::group_colinear;
use bendpick_core::{run, EntityId, LineSegment, PickConfig, Point2D};

fn coord() -> impl Strategy<Value = f64> {
    -100.0..100.0f64
}

fn point() -> impl Strategy<Value = Point2D> {
    (coord(), coord()).prop_map(|(x, y)| Point2D::new(x, y))
}

fn near_endpoint(p: Point2D, ends: [Point2D; 4]) -> bool {
    ends.iter().any(|e| e.distance_to(&p) < 1e-6)
}

/// Axis-aligned bend segment on one of a few shared lines.
fn axis_bend() -> impl Strategy<Value = (bool, u8, f64, f64)> {
    (any::<bool>(), 0u8..4, 0.0..50.0f64, 1.0..50.0f64)
}

fn partition(lines: &[LineSegment]) -> BTreeSet<BTreeSet<u64>> {
    group_colinear(lines, 0.01)
        .into_iter()
        .map(|g| g.member_indices.iter().map(|&i| lines[i].id.0).collect())
        .collect()
}

proptest! {
    #[test]
    fn segment_intersection_is_symmetric(a in point(), b in point(), c in point(), d in point()) {
        let denom = (a.x - b.x) * (c.y - d.y) - (a.y - b.y) * (c.x - d.x);
        prop_assume!(denom.abs() > 1.0);

        let ab = intersect_lines(a, b, c, d).map(|(p, _)| p);
        let cd = intersect_lines(c, d, a, b).map(|(p, _)| p);
        match (ab, cd) {
            (Some(p), Some(q)) => prop_assert!(p.distance_to(&q) < 1e-6),
            (None, None) => {}
            // Only a touch at a segment end may fall on either side of the bounds
            (Some(p), None) | (None, Some(p)) => prop_assert!(near_endpoint(p, [a, b, c, d])),
        }
    }

    #[test]
    fn grouping_ignores_input_order(specs in prop::collection::vec(axis_bend(), 1..12)) {
        let lines: Vec<LineSegment> = specs
            .iter()
            .enumerate()
            .map(|(i, &(horizontal, line, from, len))| {
                let fixed = f64::from(line) * 10.0;
                let (start, end) = if horizontal {
                    (Point2D::new(from, fixed), Point2D::new(from + len, fixed))
                } else {
                    (Point2D::new(fixed, from), Point2D::new(fixed, from + len))
                };
                LineSegment::new(start, end, "DOBRA", EntityId(i as u64))
            })
            .collect();

        let forward = partition(&lines);
        prop_assert_eq!(&forward, &partition(&lines));

        let mut reversed = lines.clone();
        reversed.reverse();
        prop_assert_eq!(forward, partition(&reversed));
    }

    #[test]
    fn bend_across_rectangle_gets_inward_picks(
        x0 in -50.0..50.0f64,
        y0 in -50.0..50.0f64,
        width in 10.0..200.0f64,
        height in 20.0..200.0f64,
        at in 0.2..0.8f64,
        pieces in 1usize..5,
    ) {
        let (x1, y1) = (x0 + width, y0 + height);
        let contours = vec![
            LineSegment::new(Point2D::new(x0, y0), Point2D::new(x1, y0), "0", EntityId(100)),
            LineSegment::new(Point2D::new(x1, y0), Point2D::new(x1, y1), "0", EntityId(101)),
            LineSegment::new(Point2D::new(x1, y1), Point2D::new(x0, y1), "0", EntityId(102)),
            LineSegment::new(Point2D::new(x0, y1), Point2D::new(x0, y0), "0", EntityId(103)),
        ];

        // Horizontal bend drawn dashed: every other slice of the full width
        let y = y0 + height * at;
        let step = width / (2 * pieces - 1) as f64;
        let bends: Vec<LineSegment> = (0..pieces)
            .map(|k| {
                let from = x0 + step * (2 * k) as f64;
                let to = if k + 1 == pieces { x1 } else { from + step };
                LineSegment::new(Point2D::new(from, y), Point2D::new(to, y), "DOBRA", EntityId(k as u64))
            })
            .collect();

        let plan = run(&bends, &contours, &PickConfig::default()).unwrap();
        prop_assert_eq!(plan.summary.groups, 1);
        prop_assert_eq!(plan.summary.picks_added, 2);
        prop_assert_eq!(plan.deletions.len(), 2);

        let centroid = Point2D::new((x0 + x1) / 2.0, y);
        for arc in &plan.arcs {
            prop_assert!(arc.span() >= 1.0);
            prop_assert!((arc.center.x - x0).abs() < 0.5 || (arc.center.x - x1).abs() < 0.5);

            let sweep = normalize_angle(arc.end_angle - arc.start_angle);
            let mid = (arc.start_angle + sweep / 2.0).to_radians();
            let facing = Point2D::new(mid.cos(), mid.sin());
            prop_assert!(facing.dot(&(centroid - arc.center)) > 0.0);
        }

        // Surviving pieces plus the removed chords rebuild each trimmed edge
        for contour in contours.iter().filter(|c| plan.deletions.contains(&c.id)) {
            let kept: f64 = plan
                .lines
                .iter()
                .filter(|l| l.source == contour.id)
                .map(|l| l.start.distance_to(&l.end))
                .sum();
            prop_assert!((kept + 0.8 - contour.length()).abs() < 1e-6);
        }
    }
}
