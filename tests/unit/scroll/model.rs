use super::*;
use crate::{foundation::core::Rect, runtime::sim::SimHost};

fn layout() -> SimHost {
    let mut host = SimHost::new(Size::new(1280.0, 800.0));
    host.set_element("cards", Rect::new(0.0, 1000.0, 1280.0, 3000.0));
    host.set_element("cards-frame", Rect::new(0.0, 1000.0, 1280.0, 1800.0));
    host
}

#[test]
fn viewport_units_resolve_to_px() {
    let l = layout();
    assert_eq!(ValueDef::from("30vw").resolve(&l).unwrap(), PropValue::px(384.0));
    assert_eq!(ValueDef::from("100vh").resolve(&l).unwrap(), PropValue::px(800.0));
    assert_eq!(ValueDef::from("-40%").resolve(&l).unwrap(), PropValue::percent(-40.0));
    assert_eq!(ValueDef::from("12px").resolve(&l).unwrap(), PropValue::px(12.0));
    assert_eq!(ValueDef::from("1.5").resolve(&l).unwrap(), PropValue::number(1.5));
    assert_eq!(ValueDef::from(2.0).resolve(&l).unwrap(), PropValue::number(2.0));
}

#[test]
fn unknown_units_and_garbage_are_rejected() {
    let l = layout();
    assert!(ValueDef::from("10em").resolve(&l).is_err());
    assert!(ValueDef::from("wide").resolve(&l).is_err());
    assert!(ValueDef::Number(f64::INFINITY).resolve(&l).is_err());
}

#[test]
fn overflow_measures_content_past_frame() {
    let l = layout();
    let mut o = OverflowDef {
        content: "cards".to_owned(),
        frame: "cards-frame".to_owned(),
        negate: false,
    };
    assert_eq!(o.resolve(&l).unwrap(), 1200.0);
    o.negate = true;
    assert_eq!(
        ValueDef::Overflow { overflow: o.clone() }.resolve(&l).unwrap(),
        PropValue::px(-1200.0)
    );
    o.content = "missing".to_owned();
    assert!(o.resolve(&l).is_err());
}

#[test]
fn common_unit_adopts_and_rejects() {
    let px = PropValue::px(10.0);
    let pct = PropValue::percent(40.0);
    assert_eq!(PropValue::common_unit(PropValue::number(0.0), px).unwrap(), Unit::Px);
    assert_eq!(PropValue::common_unit(pct, PropValue::number(5.0)).unwrap(), Unit::Percent);
    assert_eq!(PropValue::common_unit(PropValue::px(0.0), pct).unwrap(), Unit::Percent);
    assert!(PropValue::common_unit(px, pct).is_err());
}

#[test]
fn prop_value_displays_with_unit() {
    assert_eq!(PropValue::px(384.0).to_string(), "384px");
    assert_eq!(PropValue::percent(40.0).to_string(), "40%");
    assert_eq!(PropValue::number(0.5).to_string(), "0.5");
}

#[test]
fn definition_parses_from_json() {
    let json = r#"{
        "name": "demo",
        "trigger": { "element": "hero", "start": "top top", "end": "+=800", "pin": true },
        "playback": { "scrub": 1 },
        "timeline": {
            "set": [ { "target": "box", "props": { "width": "10vw" } } ],
            "steps": [
                { "target": "box", "props": { "width": "50vw" }, "duration": 2, "ease": "power2.out" },
                { "target": "box", "props": { "opacity": 0 }, "position": "<0.5" },
                { "target": "box", "props": { "height": { "overflow": { "content": "a", "frame": "b" } } }, "position": 3 }
            ]
        }
    }"#;
    let def = ChoreographyDef::from_reader(json.as_bytes()).unwrap();
    def.validate().unwrap();
    assert_eq!(def.playback, PlaybackDef::Scrub(ScrubDef::Lagged(1.0)));
    assert_eq!(def.timeline.steps[0].ease, Ease::OutCubic);
    assert_eq!(def.timeline.steps[1].duration, 0.5);
    assert_eq!(def.timeline.steps[1].ease, Ease::OutQuad);
    assert_eq!(def.timeline.steps[2].position, Some(PositionDef::At(3.0)));
    assert!(matches!(
        def.timeline.steps[2].props["height"],
        ValueDef::Overflow { .. }
    ));
}

#[test]
fn validate_rejects_bad_definitions() {
    let base = ChoreographyDef::text_highlight("mark");
    base.validate().unwrap();

    let mut d = base.clone();
    d.trigger.start = "top".to_owned();
    assert!(d.validate().is_err());

    let mut d = base.clone();
    d.playback = PlaybackDef::ToggleActions("play sideways none reverse".to_owned());
    assert!(d.validate().is_err());

    let mut d = base.clone();
    d.playback = PlaybackDef::Scrub(ScrubDef::Immediate(false));
    assert!(d.validate().is_err());

    let mut d = base.clone();
    d.timeline.steps[0].props.clear();
    assert!(d.validate().is_err());

    let mut d = base.clone();
    d.timeline.steps[0].position = Some(PositionDef::Relative("^2".to_owned()));
    assert!(d.validate().is_err());

    let mut d = base;
    d.name = " ".to_owned();
    assert!(d.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ChoreographyDef::from_reader("{ \"name\": 3 }".as_bytes()).unwrap_err();
    assert!(matches!(err, GridFxError::Serde(_)));
}
