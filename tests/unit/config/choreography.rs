use crate::{
    foundation::core::{Rect, Size},
    runtime::sim::SimHost,
    scroll::{
        choreography::{Choreography, Playback},
        model::{ChoreographyDef, PropValue},
        timeline::Timeline,
        trigger::ScrollRegion,
    },
};

fn page() -> SimHost {
    let mut host = SimHost::new(Size::new(1280.0, 800.0));
    host.set_element("benefits", Rect::new(0.0, 900.0, 1280.0, 1700.0));
    host.set_element("cards-frame", Rect::new(0.0, 500.0, 1280.0, 1300.0));
    host.set_element("cards", Rect::new(0.0, 500.0, 1280.0, 2500.0));
    host.set_element("hl-1", Rect::new(0.0, 2000.0, 600.0, 2100.0));
    host
}

#[test]
fn presets_validate_and_survive_json() {
    for def in [
        ChoreographyDef::benefits_showcase(),
        ChoreographyDef::cards_scroller(),
        ChoreographyDef::text_highlight("hl-1"),
    ] {
        def.validate().unwrap();
        let json = serde_json::to_vec(&def).unwrap();
        assert_eq!(ChoreographyDef::from_reader(json.as_slice()).unwrap(), def);
    }
}

#[test]
fn benefits_showcase_phases_line_up() {
    let def = ChoreographyDef::benefits_showcase();
    let timeline = Timeline::build(&def.timeline, &page()).unwrap();
    assert_eq!(timeline.duration(), 93.0);

    let starts: Vec<(&str, f64)> = timeline
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
    assert_eq!(
        timeline.value("mockup", "width", 93.0),
        Some(PropValue::px(1280.0))
    );
    assert_eq!(
        timeline.value("benefits-title", "fontSize", 0.0),
        Some(PropValue::px(20.0))
    );
}

#[test]
fn benefits_showcase_pins_for_fifteen_viewports() {
    let mut c = Choreography::new(ChoreographyDef::benefits_showcase()).unwrap();
    assert_eq!(c.playback(), Playback::ScrubLagged { seconds: 1.0 });
    c.refresh(&page()).unwrap();
    assert_eq!(
        c.region(),
        Some(ScrollRegion {
            start: 900.0,
            end: 900.0 + 15.0 * 800.0
        })
    );
}

#[test]
fn cards_scroller_moves_by_the_overflow() {
    let mut c = Choreography::new(ChoreographyDef::cards_scroller()).unwrap();
    c.refresh(&page()).unwrap();
    assert_eq!(c.region(), Some(ScrollRegion { start: 500.0, end: 1700.0 }));

    c.on_scroll(1100.0);
    assert_eq!(c.values()["cards"]["y"], PropValue::px(-600.0));
    c.on_scroll(1700.0);
    assert_eq!(c.values()["cards"]["y"], PropValue::px(-1200.0));
}

#[test]
fn text_highlight_plays_inside_its_window() {
    let mut c = Choreography::new(ChoreographyDef::text_highlight("hl-1")).unwrap();
    c.refresh(&page()).unwrap();
    assert_eq!(c.region(), Some(ScrollRegion { start: 1360.0, end: 1940.0 }));
    assert!((c.timeline().unwrap().duration() - 1.3).abs() < 1e-9);

    c.on_scroll(1400.0);
    assert!(c.is_moving());
    while c.tick(100.0) {}
    assert!((c.playhead() - 1.3).abs() < 1e-9);
    let values = c.values();
    assert_eq!(values["hl-1/selectors"]["width"], PropValue::percent(104.0));
    assert_eq!(values["hl-1/right"]["opacity"], PropValue::number(1.0));
}

#[test]
fn text_highlight_delay_and_width_shift_the_marker() {
    let def = ChoreographyDef::text_highlight_with("hl-1", 0.5, 90.0);
    def.validate().unwrap();
    let mut c = Choreography::new(def).unwrap();
    c.refresh(&page()).unwrap();
    assert!((c.timeline().unwrap().duration() - 1.8).abs() < 1e-9);

    c.on_scroll(1400.0);
    c.tick(400.0);
    let early = c.values();
    assert_eq!(early["hl-1/selectors"]["width"], PropValue::percent(0.0));
    assert_eq!(early["hl-1/right"]["opacity"], PropValue::number(0.0));

    while c.tick(100.0) {}
    assert_eq!(c.values()["hl-1/selectors"]["width"], PropValue::percent(90.0));
}
