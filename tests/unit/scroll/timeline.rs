use super::*;
use crate::{
    foundation::core::Size,
    runtime::sim::SimHost,
    scroll::model::{ChoreographyDef, SetDef, StepDef, ValueDef},
};

fn layout() -> SimHost {
    SimHost::new(Size::new(1280.0, 800.0))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn positions_parse() {
    assert_eq!(Position::parse("<").unwrap(), Position::PrevStart(0.0));
    assert_eq!(Position::parse("<0.5").unwrap(), Position::PrevStart(0.5));
    assert_eq!(Position::parse(">").unwrap(), Position::PrevEnd(0.0));
    assert_eq!(Position::parse(">1").unwrap(), Position::PrevEnd(1.0));
    assert_eq!(Position::parse("+=2").unwrap(), Position::End(2.0));
    assert_eq!(Position::parse("-=0.25").unwrap(), Position::End(-0.25));
    assert_eq!(Position::parse("3").unwrap(), Position::At(3.0));
    assert!(Position::parse("").is_err());
    assert!(Position::parse("<x").is_err());
}

#[test]
fn positions_resolve_against_previous_step() {
    let prev = Some((2.0, 5.0));
    assert_eq!(Position::End(0.0).resolve(8.0, prev), 8.0);
    assert_eq!(Position::End(-10.0).resolve(8.0, prev), 0.0);
    assert_eq!(Position::PrevStart(0.5).resolve(8.0, prev), 2.5);
    assert_eq!(Position::PrevEnd(1.0).resolve(8.0, prev), 6.0);
    assert_eq!(Position::At(1.0).resolve(8.0, prev), 1.0);
    assert_eq!(Position::PrevStart(0.0).resolve(8.0, None), 0.0);
}

#[test]
fn benefits_phases_start_in_declaration_order() {
    let t = Timeline::build(&ChoreographyDef::benefits_showcase().timeline, &layout()).unwrap();
    let starts: Vec<(&str, f64)> = t
        .phases()
        .iter()
        .map(|p| (p.label.as_str(), p.start))
        .collect();
    assert_eq!(
        starts,
        vec![
            ("lift", 0.0),
            ("expand-30", 2.0),
            ("expand-60", 36.0),
            ("expand-100", 48.0),
            ("stretch", 88.0),
        ]
    );
    assert_eq!(t.duration(), 93.0);
    assert_eq!(t.phase_at(40.0), Some("expand-60"));
    assert_eq!(t.phase_at(93.0), Some("stretch"));
}

#[test]
fn benefits_values_chain_between_steps() {
    let t = Timeline::build(&ChoreographyDef::benefits_showcase().timeline, &layout()).unwrap();
    let width = |time| t.value("mockup", "width", time).unwrap().value;
    assert!(close(width(0.0), 256.0));
    assert!(close(width(36.0), 384.0));
    assert!(close(width(48.0), 768.0));
    assert!(close(width(93.0), 1280.0));

    let font = |time| t.value("benefits-title", "fontSize", time).unwrap();
    assert_eq!(font(36.0), PropValue::px(30.0));
    assert_eq!(font(48.0), PropValue::px(40.0));

    let y = |time| t.value("benefits-content", "y", time).unwrap();
    assert_eq!(y(2.0), PropValue::percent(40.0));
    assert!(close(y(1.0).value, 20.0));
    assert_eq!(y(44.5), PropValue::percent(0.0));

    let radius = t.value("benefits-content", "borderTopLeftRadius", 45.5).unwrap();
    assert_eq!(radius, PropValue::px(0.0));
}

#[test]
fn sample_groups_by_target() {
    let t = Timeline::build(&ChoreographyDef::benefits_showcase().timeline, &layout()).unwrap();
    let all = t.sample_progress(1.0);
    assert_eq!(all["mockup-img"]["scaleX"], PropValue::number(1.5));
    assert_eq!(all["mockup"]["width"], PropValue::px(1280.0));
    assert_eq!(all.len(), 4);
    assert_eq!(t.sample_progress(2.0), all);
}

#[test]
fn eased_segments_follow_their_curve() {
    let def = TimelineDef {
        set: vec![],
        steps: vec![StepDef::new("a", 1.0, Ease::OutCubic).prop("x", "100px")],
    };
    let t = Timeline::build(&def, &layout()).unwrap();
    let v = t.value("a", "x", 0.5).unwrap();
    assert!(close(v.value, 87.5));
    assert_eq!(v.unit, Unit::Px);
}

#[test]
fn unset_properties_start_from_neutral_values() {
    let def = TimelineDef {
        set: vec![],
        steps: vec![
            StepDef::new("a", 1.0, Ease::Linear).prop("opacity", 0.0),
            StepDef::new("a", 1.0, Ease::Linear).prop("x", "10px"),
        ],
    };
    let t = Timeline::build(&def, &layout()).unwrap();
    assert_eq!(t.value("a", "opacity", 0.0), Some(PropValue::number(1.0)));
    assert_eq!(t.value("a", "x", 0.0), Some(PropValue::px(0.0)));
    assert_eq!(t.value("a", "x", 1.5), Some(PropValue::px(5.0)));
}

#[test]
fn zero_duration_steps_jump() {
    let def = TimelineDef {
        set: vec![],
        steps: vec![
            StepDef::new("a", 1.0, Ease::Linear).prop("x", 1.0),
            StepDef::new("a", 0.0, Ease::Linear).prop("x", 5.0),
        ],
    };
    let t = Timeline::build(&def, &layout()).unwrap();
    assert_eq!(t.duration(), 1.0);
    assert_eq!(t.value("a", "x", 0.999).map(|v| v.value < 1.0), Some(true));
    assert_eq!(t.value("a", "x", 1.0), Some(PropValue::number(5.0)));
}

#[test]
fn mixing_px_and_percent_fails_to_build() {
    let def = TimelineDef {
        set: vec![SetDef {
            target: "a".to_owned(),
            props: [("width".to_owned(), ValueDef::from("10%"))].into_iter().collect(),
        }],
        steps: vec![StepDef::new("a", 1.0, Ease::Linear).prop("width", "30vw")],
    };
    let err = Timeline::build(&def, &layout()).unwrap_err();
    assert!(err.to_string().contains("a.width"));
}

#[test]
fn relative_offsets_extend_the_timeline() {
    let def = TimelineDef {
        set: vec![],
        steps: vec![
            StepDef::new("a", 1.0, Ease::Linear).prop("x", 1.0),
            StepDef::new("b", 1.0, Ease::Linear).prop("x", 1.0).at("+=1"),
            StepDef::new("c", 1.0, Ease::Linear).prop("x", 1.0).at("-=0.5"),
        ],
    };
    let t = Timeline::build(&def, &layout()).unwrap();
    let starts: Vec<f64> = t.tracks().iter().map(|tr| tr.segments[0].start).collect();
    assert_eq!(starts, vec![0.0, 2.0, 2.5]);
    assert_eq!(t.duration(), 3.5);
}
