use super::*;

#[test]
fn follow_step_is_exponential_and_snaps() {
    let targets = HighlightTargets::default();
    let s = Smoothing::default();
    let mut cell = CellState::at_rest(targets.rest);
    cell.set_target(targets.active);

    assert!(cell.step(&s, 16.0));
    assert!((cell.opacity - 0.15).abs() < 1e-12);
    assert!(cell.step(&s, 16.0));
    assert!((cell.opacity - 0.2775).abs() < 1e-12);

    let mut ticks = 2;
    while cell.step(&s, 16.0) {
        ticks += 1;
        assert!(ticks < 100, "did not converge");
    }
    assert_eq!(cell.current(), targets.active);
    assert!(!cell.animating);
}

#[test]
fn idle_cell_does_not_move() {
    let mut cell = CellState::at_rest(CellValues::REST);
    assert!(!cell.step(&Smoothing::default(), 16.0));
    assert_eq!(cell.current(), CellValues::REST);
}

#[test]
fn fade_runs_for_its_duration() {
    let active = HighlightTargets::default().active;
    let mut cell = CellState::at_rest(CellValues::REST);
    cell.start_fade(active, CellValues::REST, 100.0, Ease::Linear);
    assert_eq!(cell.current(), active);
    assert_eq!(cell.target(), CellValues::REST);

    assert!(cell.step(&Smoothing::default(), 50.0));
    assert!((cell.opacity - 0.5).abs() < 1e-12);
    assert!(!cell.step(&Smoothing::default(), 50.0));
    assert_eq!(cell.current(), CellValues::REST);
    assert!(!cell.is_fading());
}

#[test]
fn release_shortens_a_running_fade() {
    let active = HighlightTargets::default().active;
    let mut cell = CellState::at_rest(CellValues::REST);
    cell.start_fade(active, CellValues::REST, 1000.0, Ease::Linear);
    cell.step(&Smoothing::default(), 500.0);
    cell.release(CellValues::REST, 100.0, Ease::Linear);
    assert!((cell.opacity - 0.5).abs() < 1e-12);
    assert!(!cell.step(&Smoothing::default(), 100.0));
    assert_eq!(cell.opacity, 0.0);
}

#[test]
fn value_validation() {
    assert!(CellValues::REST.validate().is_ok());
    let bad = CellValues {
        opacity: 1.5,
        ..CellValues::REST
    };
    assert!(bad.validate().is_err());
    assert!(
        HoverResponse::Trail {
            fade_ms: -1.0,
            release_ms: 0.0,
            ease: Ease::Linear
        }
        .validate()
        .is_err()
    );
    assert!(HoverResponse::trail().validate().is_ok());
}
