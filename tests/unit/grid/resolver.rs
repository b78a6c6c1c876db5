use super::*;
use crate::foundation::core::Size;
use crate::grid::geometry::{GridSpec, SizingPolicy, compute_grid};

fn grid_400x240() -> GridGeometry {
    compute_grid(
        Size::new(400.0, 240.0),
        &GridSpec::new(80.0, SizingPolicy::Fit),
    )
    .unwrap()
}

#[test]
fn scenario_local_85_10_is_index_1() {
    let g = grid_400x240();
    let bounds = Rect::new(0.0, 0.0, 400.0, 240.0);
    for policy in [BoundaryPolicy::Clamp, BoundaryPolicy::Reject] {
        assert_eq!(resolve_cell(Point::new(85.0, 10.0), bounds, &g, policy), Some(1));
    }
}

#[test]
fn container_offset_is_subtracted() {
    let g = grid_400x240();
    let bounds = Rect::new(100.0, 50.0, 500.0, 290.0);
    let idx = resolve_cell(Point::new(185.0, 140.0), bounds, &g, BoundaryPolicy::Reject);
    assert_eq!(idx, Some(6));
}

#[test]
fn inside_points_always_resolve_in_range() {
    let g = grid_400x240();
    let bounds = Rect::new(10.0, 20.0, 410.0, 260.0);
    let mut y = 20.0;
    while y < 260.0 {
        let mut x = 10.0;
        while x < 410.0 {
            for policy in [BoundaryPolicy::Clamp, BoundaryPolicy::Reject] {
                let idx = resolve_cell(Point::new(x, y), bounds, &g, policy).unwrap();
                assert!(idx < g.total_cells());
            }
            x += 7.3;
        }
        y += 11.1;
    }
}

#[test]
fn outside_points_resolve_to_none() {
    let g = grid_400x240();
    let bounds = Rect::new(0.0, 0.0, 400.0, 240.0);
    for p in [
        Point::new(-0.1, 10.0),
        Point::new(10.0, -3.0),
        Point::new(400.5, 10.0),
        Point::new(10.0, 241.0),
        Point::new(f64::NAN, 1.0),
    ] {
        for policy in [BoundaryPolicy::Clamp, BoundaryPolicy::Reject] {
            assert_eq!(resolve_cell(p, bounds, &g, policy), None, "{p:?} {policy:?}");
        }
    }
}

#[test]
fn far_edge_differs_between_policies() {
    let g = grid_400x240();
    let bounds = Rect::new(0.0, 0.0, 400.0, 240.0);
    let edge = Point::new(400.0, 240.0);
    assert_eq!(resolve_cell(edge, bounds, &g, BoundaryPolicy::Clamp), Some(14));
    assert_eq!(resolve_cell(edge, bounds, &g, BoundaryPolicy::Reject), None);
}

#[test]
fn fixed_grid_remainder_strip() {
    let g = compute_grid(
        Size::new(130.0, 90.0),
        &GridSpec::new(40.0, SizingPolicy::Fixed),
    )
    .unwrap();
    let bounds = Rect::new(0.0, 0.0, 130.0, 90.0);
    let strip = Point::new(125.0, 10.0);
    assert_eq!(resolve_cell(strip, bounds, &g, BoundaryPolicy::Clamp), Some(2));
    assert_eq!(resolve_cell(strip, bounds, &g, BoundaryPolicy::Reject), None);
}
