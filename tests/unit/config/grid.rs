use super::*;

#[test]
fn presets_validate() {
    for cfg in [
        GridConfig::viewport_background(),
        GridConfig::decorative_block(),
        GridConfig::trail_background(),
    ] {
        cfg.validate().unwrap();
    }
}

#[test]
fn presets_pick_their_boundary_policy() {
    assert_eq!(GridConfig::viewport_background().boundary, BoundaryPolicy::Reject);
    assert_eq!(GridConfig::decorative_block().boundary, BoundaryPolicy::Clamp);
}

#[test]
fn trail_background_mounts_later_than_the_others() {
    assert_eq!(GridConfig::trail_background().lifecycle.mount_delay_ms, 300.0);
    assert_eq!(GridConfig::viewport_background().lifecycle.mount_delay_ms, 100.0);
}

#[test]
fn viewport_background_resolves_all_layers() {
    let style = GridConfig::viewport_background().style.resolve();
    assert_eq!(style.grid_line, Some(Rgba::from_rgba8(28, 28, 28, 1.0)));
    assert_eq!(style.highlight, Some(Rgba::from_rgba8(255, 117, 27, 1.0)));
    assert_eq!(style.accent_border, None);
    assert_eq!(style.highlight_outline.map(|o| o.alpha_factor), Some(0.6));
}

#[test]
fn unparseable_color_disables_its_layer() {
    let cfg = StyleConfig {
        highlight: Some("orange-ish".to_owned()),
        ..StyleConfig::default()
    };
    let style = cfg.resolve();
    assert_eq!(style.highlight, None);
    assert!(style.grid_line.is_some());
}

#[test]
fn minimal_json_fills_defaults() {
    let json = r#"{ "grid": { "cell_size": 40 }, "boundary": "clamp" }"#;
    let cfg = GridConfig::from_reader(json.as_bytes()).unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.grid.policy, SizingPolicy::Fit);
    assert_eq!(cfg.grid.min_ready_px, 10.0);
    assert_eq!(cfg.boundary, BoundaryPolicy::Clamp);
    assert_eq!(cfg.smoothing, Smoothing::default());
    assert_eq!(cfg.lifecycle.mount_delay_ms, 100.0);
    assert_eq!(cfg.lifecycle.retry.max_attempts, 50);
    assert_eq!(cfg.response, HoverResponse::Follow);
}

#[test]
fn trail_response_parses_from_json() {
    let json = r#"{
        "grid": { "cell_size": 80 },
        "response": { "kind": "trail", "fade_ms": 2500, "release_ms": 1200, "ease": "power2.out" }
    }"#;
    let cfg = GridConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.response, HoverResponse::trail());
}

#[test]
fn unknown_fields_are_rejected() {
    let json = r#"{ "grid": { "cell_size": 40 }, "colour": "red" }"#;
    let err = GridConfig::from_reader(json.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("parse grid config JSON"));
}

#[test]
fn validate_catches_bad_numbers() {
    let mut cfg = GridConfig::viewport_background();
    cfg.style.highlight_opacity = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = GridConfig::viewport_background();
    cfg.smoothing.lerp_factor = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = GridConfig::decorative_block();
    cfg.lifecycle.resize_debounce_ms = f64::NAN;
    assert!(cfg.validate().is_err());
}

#[test]
fn config_round_trips_through_json() {
    let cfg = GridConfig::decorative_block();
    let json = serde_json::to_string(&cfg).unwrap();
    let back = GridConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, cfg);
}
