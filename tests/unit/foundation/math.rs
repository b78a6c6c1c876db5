use super::*;

#[test]
fn approach_matches_manual_lerp_steps() {
    let first = approach(0.0, 1.0, 0.15);
    assert!((first - 0.15).abs() < 1e-12);
    let second = approach(first, 1.0, 0.15);
    assert!((second - 0.2775).abs() < 1e-12);
    assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
}

#[test]
fn floor_div_handles_degenerate_divisors() {
    assert_eq!(floor_div(400.0, 80.0), 5.0);
    assert_eq!(floor_div(79.9, 80.0), 0.0);
    assert_eq!(floor_div(10.0, 0.0), 0.0);
    assert!(near(0.995, 1.0, 0.01));
    assert!(!near(0.98, 1.0, 0.01));
}
