use bendpick_core::geometry::normalize_angle;
use bendpick_core::grouping::group_colinear;
use bendpick_core::intersections::collect_intersections;
use bendpick_core::pick::build_pick;
use bendpick_core::{
    run, EntityId, IntersectionKind, LineSegment, PickConfig, PickRejection, PickSpec, Point2D,
};

fn seg(x1: f64, y1: f64, x2: f64, y2: f64, layer: &str, id: u64) -> LineSegment {
    LineSegment::new(Point2D::new(x1, y1), Point2D::new(x2, y2), layer, EntityId(id))
}

/// 100 x 50 rectangle, counter-clockwise from the origin.
fn rectangle() -> Vec<LineSegment> {
    vec![
        seg(0.0, 0.0, 100.0, 0.0, "0", 100),
        seg(100.0, 0.0, 100.0, 50.0, "0", 101),
        seg(100.0, 50.0, 0.0, 50.0, "0", 102),
        seg(0.0, 50.0, 0.0, 0.0, "0", 103),
    ]
}

/// Direction of the middle of the counter-clockwise sweep of `arc`.
fn arc_mid_direction(arc: &PickSpec) -> Point2D {
    let sweep = normalize_angle(arc.end_angle - arc.start_angle);
    let mid = (arc.start_angle + sweep / 2.0).to_radians();
    Point2D::new(mid.cos(), mid.sin())
}

#[test]
fn test_split_bend_gets_picks_only_at_ends() {
    // Dashed bend across the rectangle at mid height
    let bends = vec![
        seg(0.0, 25.0, 40.0, 25.0, "DOBRA", 1),
        seg(60.0, 25.0, 100.0, 25.0, "DOBRA", 2),
    ];
    let plan = run(&bends, &rectangle(), &PickConfig::default()).unwrap();

    assert_eq!(plan.summary.groups, 1);
    assert_eq!(plan.summary.picks_added, 2);
    assert_eq!(plan.summary.trims_applied, 2);
    assert_eq!(plan.arcs.len(), 2);

    let left = &plan.arcs[0];
    let right = &plan.arcs[1];
    assert!((left.center.x - 0.0).abs() < 1e-9);
    assert!((right.center.x - 100.0).abs() < 1e-9);

    let centroid = Point2D::new(50.0, 25.0);
    for arc in &plan.arcs {
        assert!(arc.span() > 1.0);
        assert_eq!(arc.radius, 0.4);
        let inward = centroid - arc.center;
        assert!(arc_mid_direction(arc).dot(&inward) > 0.0, "arc {:?} faces outward", arc);
    }

    // The left and right edges are each split around their pick
    assert_eq!(plan.deletions, vec![EntityId(103), EntityId(101)]);
    assert_eq!(plan.lines.len(), 4);
    for id in [EntityId(101), EntityId(103)] {
        assert_eq!(plan.lines.iter().filter(|l| l.source == id).count(), 2);
    }
}

#[test]
fn test_trim_covers_original_extent() {
    let bends = vec![seg(0.0, 25.0, 100.0, 25.0, "DOBRA", 1)];
    let contours = rectangle();
    let plan = run(&bends, &contours, &PickConfig::default()).unwrap();

    for contour in contours.iter().filter(|c| plan.deletions.contains(&c.id)) {
        let kept: f64 = plan
            .lines
            .iter()
            .filter(|l| l.source == contour.id)
            .map(|l| l.start.distance_to(&l.end))
            .sum();
        // One pick per edge removes a chord of one diameter
        let removed = 2.0 * 0.4;
        assert!((kept + removed - contour.length()).abs() < 1e-9);

        let pieces: Vec<_> = plan.lines.iter().filter(|l| l.source == contour.id).collect();
        assert_eq!(pieces.first().unwrap().start, contour.start);
        assert_eq!(pieces.last().unwrap().end, contour.end);
    }
}

#[test]
fn test_bend_on_contour_edge_drops_degenerate_pick() {
    // Bend drawn on top of the bottom edge: the edge itself meets the bend at
    // both ends, and the pick at its start collapses to a zero-width arc
    let bends = vec![
        seg(0.0, 0.0, 40.0, 0.0, "DOBRA", 1),
        seg(60.0, 0.0, 100.0, 0.0, "DOBRA", 2),
    ];
    let plan = run(&bends, &rectangle(), &PickConfig::default()).unwrap();

    assert_eq!(plan.summary.extremity_intersections, 4);
    assert_eq!(plan.summary.picks_rejected, 1);
    assert_eq!(plan.summary.picks_added, 3);
    for arc in &plan.arcs {
        assert!(arc.span() >= 1.0);
        assert!(arc.center.x.abs() < 1e-9 || (arc.center.x - 100.0).abs() < 1e-9);
    }
}

#[test]
fn test_fillet_endpoint_gives_synthetic_intersection() {
    let bends = vec![seg(0.0, 0.0, 100.0, 0.0, "DOBRA", 1)];
    let contours = vec![seg(10.0, 2.5, 10.0, 20.0, "0", 5)];
    let groups = group_colinear(&bends, 0.01);

    let found = collect_intersections(&groups[0], &bends, &contours, 3.0);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, IntersectionKind::Proximity);
    assert_eq!(found[0].point, Point2D::new(10.0, 0.0));
    assert_eq!(found[0].extremity_coord, 10.0);
    assert_eq!(found[0].contour.id, EntityId(5));
}

#[test]
fn test_near_tangent_candidate_adds_no_pick() {
    let radius = 0.4;
    let offset = radius * 0.15f64.to_radians().cos();
    let contour = seg(-5.0, offset, 5.0, offset, "0", 8);

    let result = build_pick(Point2D::new(0.0, 0.0), radius, Point2D::new(0.0, 1.0), &contour, 1.0);
    assert!(matches!(result, Err(PickRejection::DegenerateSpan(span)) if span < 1.0));
}

#[test]
fn test_two_bends_share_a_contour() {
    // Two separate bends cross the same long bottom edge; both picks land on it
    let bends = vec![
        seg(20.0, 0.0, 20.0, 50.0, "DOBRA", 1),
        seg(80.0, 0.0, 80.0, 50.0, "DOBRA", 2),
    ];
    let plan = run(&bends, &rectangle(), &PickConfig::default()).unwrap();

    assert_eq!(plan.summary.groups, 2);
    assert_eq!(plan.summary.picks_added, 4);
    // Bottom and top edges, each cut twice
    assert_eq!(plan.summary.trims_applied, 2);
    assert_eq!(plan.lines.iter().filter(|l| l.source == EntityId(100)).count(), 3);
    assert_eq!(plan.lines.iter().filter(|l| l.source == EntityId(102)).count(), 3);
}

#[test]
fn test_diagonal_bend_gets_picks_at_both_ends() {
    let bends = vec![seg(0.0, 10.0, 100.0, 40.0, "DOBRA", 1)];
    let plan = run(&bends, &rectangle(), &PickConfig::default()).unwrap();

    assert_eq!(plan.summary.groups, 1);
    assert_eq!(plan.summary.picks_added, 2);
    assert_eq!(plan.summary.trims_applied, 2);
    assert_eq!(plan.deletions, vec![EntityId(103), EntityId(101)]);

    assert!(plan.arcs[0].center.distance_to(&Point2D::new(0.0, 10.0)) < 1e-9);
    assert!(plan.arcs[1].center.distance_to(&Point2D::new(100.0, 40.0)) < 1e-9);
    for arc in &plan.arcs {
        assert!((arc.span() - 180.0).abs() < 1e-9);
    }
    assert_eq!(plan.lines.len(), 4);
}

#[test]
fn test_close_parallel_bends_share_one_notch() {
    // The two picks on each vertical edge overlap
    let bends = vec![
        seg(0.0, 25.0, 100.0, 25.0, "DOBRA", 1),
        seg(0.0, 25.5, 100.0, 25.5, "DOBRA", 2),
    ];
    let plan = run(&bends, &rectangle(), &PickConfig::default()).unwrap();

    assert_eq!(plan.summary.groups, 2);
    assert_eq!(plan.summary.picks_added, 4);
    assert_eq!(plan.summary.trims_applied, 2);

    let left: Vec<_> = plan.lines.iter().filter(|l| l.source == EntityId(103)).collect();
    assert_eq!(left.len(), 2);
    assert!((left[0].end.y - 25.9).abs() < 1e-9);
    assert!((left[1].start.y - 24.6).abs() < 1e-9);

    let kept: f64 = left.iter().map(|l| l.start.distance_to(&l.end)).sum();
    assert!((kept - 48.7).abs() < 1e-9);
}

#[test]
fn test_bend_drawn_twice_cuts_once() {
    let bends = vec![
        seg(0.0, 25.0, 100.0, 25.0, "DOBRA", 1),
        seg(0.0, 25.0, 100.0, 25.0, "DOBRA", 2),
    ];
    let contours = rectangle();
    let plan = run(&bends, &contours, &PickConfig::default()).unwrap();

    assert_eq!(plan.summary.groups, 1);
    assert_eq!(plan.summary.picks_added, 2);
    assert_eq!(plan.arcs.len(), 2);
    assert_eq!(plan.lines.len(), 4);

    for contour in contours.iter().filter(|c| plan.deletions.contains(&c.id)) {
        let kept: f64 = plan
            .lines
            .iter()
            .filter(|l| l.source == contour.id)
            .map(|l| l.start.distance_to(&l.end))
            .sum();
        assert!((kept + 0.8 - contour.length()).abs() < 1e-9);
    }
}

#[test]
fn test_near_tangent_contour_rejected_in_run() {
    // A short edge passing just inside the pick circle at the bend start, and
    // a regular edge crossing the bend end
    let offset = 0.4 * 0.15f64.to_radians().cos();
    let bends = vec![seg(0.0, 0.0, 100.0, 0.0, "DOBRA", 1)];
    let contours = vec![
        seg(-2.0, offset, 2.0, offset, "0", 7),
        seg(100.0, -10.0, 100.0, 10.0, "0", 8),
    ];
    let plan = run(&bends, &contours, &PickConfig::default()).unwrap();

    assert_eq!(plan.summary.extremity_intersections, 2);
    assert_eq!(plan.summary.picks_rejected, 1);
    assert_eq!(plan.summary.picks_added, 1);
    assert_eq!(plan.summary.trims_applied, 1);
    assert_eq!(plan.deletions, vec![EntityId(8)]);
    assert!(plan.arcs[0].center.distance_to(&Point2D::new(100.0, 0.0)) < 1e-9);
}

#[test]
fn test_larger_pick_size() {
    let bends = vec![seg(0.0, 25.0, 100.0, 25.0, "DOBRA", 1)];
    let plan = run(&bends, &rectangle(), &PickConfig::from_pick_size(2.0)).unwrap();
    assert_eq!(plan.summary.picks_added, 2);
    assert!(plan.arcs.iter().all(|a| a.radius == 1.0));
}
