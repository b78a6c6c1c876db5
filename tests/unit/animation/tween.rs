use super::*;

#[test]
fn linear_tween_reaches_target_after_duration() {
    let mut t = Tween::new(0.0, 10.0, 100.0, Ease::Linear);
    assert_eq!(t.advance(50.0), 5.0);
    assert!(!t.is_done());
    assert_eq!(t.advance(80.0), 10.0);
    assert!(t.is_done());
}

#[test]
fn zero_duration_is_instant() {
    let t = Tween::new(1.0, 0.0, 0.0, Ease::OutCubic);
    assert!(t.is_done());
    assert_eq!(t.value(), 0.0);

    let t = Tween::new(1.0, 0.0, f64::NAN, Ease::OutCubic);
    assert_eq!(t.value(), 0.0);
}

#[test]
fn retarget_starts_from_current_value() {
    let mut t = Tween::new(0.0, 1.0, 100.0, Ease::Linear);
    t.advance(25.0);
    t.retarget(0.0, 50.0, Ease::Linear);
    assert_eq!(t.value(), 0.25);
    assert_eq!(t.target(), 0.0);
    assert_eq!(t.advance(25.0), 0.125);
}

#[test]
fn negative_or_nan_dt_is_ignored() {
    let mut t = Tween::new(0.0, 1.0, 100.0, Ease::Linear);
    t.advance(-10.0);
    t.advance(f64::NAN);
    assert_eq!(t.value(), 0.0);
}
