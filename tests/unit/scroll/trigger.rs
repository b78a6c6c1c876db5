use super::*;
use crate::{
    foundation::core::{Rect, Size},
    runtime::sim::SimHost,
    scroll::model::OverflowDef,
};

fn layout() -> SimHost {
    let mut host = SimHost::new(Size::new(1280.0, 800.0));
    host.set_element("section", Rect::new(0.0, 1000.0, 1280.0, 1800.0));
    host.set_element("content", Rect::new(0.0, 1000.0, 1280.0, 2400.0));
    host
}

fn trigger(start: &str, end: &str) -> TriggerDef {
    TriggerDef {
        element: "section".to_owned(),
        start: start.to_owned(),
        end: EndDef::Point(end.to_owned()),
        pin: true,
        pin_class: None,
    }
}

#[test]
fn trigger_points_parse() {
    assert_eq!(
        TriggerPoint::parse("top 80%").unwrap(),
        TriggerPoint::Edges {
            element: Anchor::Top,
            viewport: Anchor::Percent(80.0)
        }
    );
    assert_eq!(
        TriggerPoint::parse("center 100px").unwrap(),
        TriggerPoint::Edges {
            element: Anchor::Center,
            viewport: Anchor::Px(100.0)
        }
    );
    assert_eq!(
        TriggerPoint::parse("+=1500vh").unwrap(),
        TriggerPoint::Relative(Distance::Viewport(1500.0))
    );
    assert_eq!(
        TriggerPoint::parse("+=640").unwrap(),
        TriggerPoint::Relative(Distance::Px(640.0))
    );
    assert!(TriggerPoint::parse("top").is_err());
    assert!(TriggerPoint::parse("top top top").is_err());
    assert!(TriggerPoint::parse("+=-5").is_err());
    assert!(TriggerPoint::parse("middle top").is_err());
}

#[test]
fn regions_measure_from_layout() {
    let l = layout();
    let r = ScrollRegion::measure(&trigger("top top", "bottom top"), &l).unwrap();
    assert_eq!((r.start, r.end), (1000.0, 1800.0));

    let r = ScrollRegion::measure(&trigger("bottom bottom", "+=1500vh"), &l).unwrap();
    assert_eq!((r.start, r.end), (1000.0, 1000.0 + 12_000.0));

    let r = ScrollRegion::measure(&trigger("top 80%", "bottom 20%"), &l).unwrap();
    assert_eq!((r.start, r.end), (360.0, 1640.0));
}

#[test]
fn overflow_end_is_relative_to_start() {
    let def = TriggerDef {
        end: EndDef::Overflow {
            overflow: OverflowDef {
                content: "content".to_owned(),
                frame: "section".to_owned(),
                negate: false,
            },
        },
        ..trigger("top top", "+=0")
    };
    let r = ScrollRegion::measure(&def, &layout()).unwrap();
    assert_eq!((r.start, r.end), (1000.0, 1600.0));
}

#[test]
fn relative_start_and_missing_elements_fail() {
    let l = layout();
    assert!(ScrollRegion::measure(&trigger("+=10", "+=10"), &l).is_err());
    let mut def = trigger("top top", "+=10");
    def.element = "nowhere".to_owned();
    assert!(ScrollRegion::measure(&def, &l).is_err());
}

#[test]
fn end_above_start_collapses_to_empty_region() {
    let r = ScrollRegion::measure(&trigger("bottom top", "top top"), &layout()).unwrap();
    assert!(r.is_empty());
    assert_eq!(r.progress(1799.0), 0.0);
    assert_eq!(r.progress(1800.0), 1.0);
}

#[test]
fn progress_is_clamped() {
    let r = ScrollRegion {
        start: 100.0,
        end: 300.0,
    };
    assert_eq!(r.progress(0.0), 0.0);
    assert_eq!(r.progress(150.0), 0.25);
    assert_eq!(r.progress(1_000.0), 1.0);
    assert_eq!(r.zone(99.0), Zone::Before);
    assert_eq!(r.zone(300.0), Zone::Inside);
    assert_eq!(r.zone(301.0), Zone::After);
}

#[test]
fn pin_state_reports_every_crossing_in_order() {
    let mut p = PinState::default();
    assert!(p.update(Zone::Before).is_empty());
    assert_eq!(p.update(Zone::Inside).as_slice(), &[PinEvent::Enter]);
    assert!(p.is_active());
    assert!(p.update(Zone::Inside).is_empty());
    assert_eq!(p.update(Zone::After).as_slice(), &[PinEvent::Leave]);
    assert!(!p.is_active());
    assert_eq!(p.update(Zone::Inside).as_slice(), &[PinEvent::EnterBack]);
    assert_eq!(p.update(Zone::Before).as_slice(), &[PinEvent::LeaveBack]);
    assert_eq!(
        p.update(Zone::After).as_slice(),
        &[PinEvent::Enter, PinEvent::Leave]
    );
    assert_eq!(
        p.update(Zone::Before).as_slice(),
        &[PinEvent::EnterBack, PinEvent::LeaveBack]
    );
}

#[test]
fn only_entering_crossings_leave_the_pin_active() {
    assert!(PinEvent::Enter.enters());
    assert!(PinEvent::EnterBack.enters());
    assert!(!PinEvent::Leave.enters());
    assert!(!PinEvent::LeaveBack.enters());
}
