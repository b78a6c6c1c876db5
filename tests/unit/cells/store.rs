use super::*;

fn follow_store(total: usize) -> CellStore {
    let mut s = CellStore::new(HighlightTargets::default(), HoverResponse::Follow);
    s.allocate(total);
    s
}

#[test]
fn allocate_replaces_collection() {
    let mut s = follow_store(15);
    s.hover(Some(10));
    s.tick(&Smoothing::default(), 16.0);
    s.allocate(2);
    assert_eq!(s.len(), 2);
    assert_eq!(s.hovered(), None);
    assert!(s.get(10).is_none());
    assert!(s.is_idle());
}

#[test]
fn set_target_highlight_flips_targets() {
    let mut s = follow_store(4);
    assert!(s.set_target(1, true));
    let c = s.get(1).unwrap();
    assert_eq!(c.target_opacity, 1.0);
    assert_eq!(c.target_scale, 1.05);
    assert!(c.animating);

    s.tick(&Smoothing::default(), 16.0);
    assert!((s.get(1).unwrap().opacity - 0.15).abs() < 1e-12);
    s.tick(&Smoothing::default(), 16.0);
    assert!((s.get(1).unwrap().opacity - 0.2775).abs() < 1e-12);

    assert!(!s.set_target(9, true));
}

#[test]
fn at_most_one_cell_targets_highlight() {
    let mut s = follow_store(15);
    for idx in [Some(0), Some(3), Some(3), None, Some(14), Some(99), Some(7)] {
        s.hover(idx);
        assert!(s.highlighted_count() <= 1);
        s.tick(&Smoothing::default(), 16.0);
    }
    assert_eq!(s.hovered(), Some(7));
    assert_eq!(s.highlighted_count(), 1);
}

#[test]
fn hover_reports_changes_only() {
    let mut s = follow_store(3);
    assert!(s.hover(Some(1)));
    assert!(!s.hover(Some(1)));
    assert!(s.hover(Some(42)));
    assert_eq!(s.hovered(), None);
    assert!(!s.hover(None));
}

#[test]
fn ticks_converge_after_input_stops() {
    let mut s = follow_store(15);
    s.hover(Some(4));
    s.hover(Some(5));
    let smoothing = Smoothing::default();
    let mut remaining = usize::MAX;
    for _ in 0..200 {
        remaining = s.tick(&smoothing, 16.0);
        if remaining == 0 {
            break;
        }
    }
    assert_eq!(remaining, 0);
    assert!(s.is_idle());
    assert_eq!(s.get(4).unwrap().opacity, 0.0);
    assert_eq!(s.get(5).unwrap().opacity, 1.0);
}

#[test]
fn trail_flashes_then_fades() {
    let mut s = CellStore::new(HighlightTargets::default(), HoverResponse::trail());
    s.allocate(4);
    s.hover(Some(2));
    let c = *s.get(2).unwrap();
    assert_eq!(c.opacity, 1.0);
    assert_eq!(c.target_opacity, 0.0);
    assert!(c.is_fading());

    for _ in 0..200 {
        s.tick(&Smoothing::default(), 16.0);
    }
    assert!(s.is_idle());
    assert_eq!(s.get(2).unwrap().opacity, 0.0);
}
