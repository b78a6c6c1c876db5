//! The landing page's scroll choreographies as ready-made definitions.

use crate::{
    animation::ease::Ease,
    scroll::model::{
        ChoreographyDef, EndDef, OverflowDef, PlaybackDef, PositionDef, PropsDef, ScrubDef,
        SetDef, StepDef, TimelineDef, TriggerDef, ValueDef,
    },
};

fn set(target: &str, props: &[(&str, ValueDef)]) -> SetDef {
    SetDef {
        target: target.to_owned(),
        props: props
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect::<PropsDef>(),
    }
}

impl ChoreographyDef {
    /// Pinned benefits section: the phone mockup grows to full width while the heading scales
    /// up, over a long lagged scrub.
    pub fn benefits_showcase() -> Self {
        let content = "benefits-content";
        let title = "benefits-title";
        let mockup = "mockup";

        Self {
            name: "benefits-showcase".to_owned(),
            trigger: TriggerDef {
                element: "benefits".to_owned(),
                start: "bottom bottom".to_owned(),
                end: EndDef::Point("+=1500vh".to_owned()),
                pin: true,
                pin_class: Some("pinning-active".to_owned()),
            },
            playback: PlaybackDef::Scrub(ScrubDef::Lagged(1.0)),
            timeline: TimelineDef {
                set: vec![
                    set(
                        content,
                        &[
                            ("y", "0%".into()),
                            ("borderTopLeftRadius", "40px".into()),
                            ("borderTopRightRadius", "40px".into()),
                        ],
                    ),
                    set(
                        mockup,
                        &[
                            ("width", "20vw".into()),
                            ("height", "60vh".into()),
                            ("borderRadius", "40px".into()),
                        ],
                    ),
                    set(
                        title,
                        &[
                            ("opacity", 0.0.into()),
                            ("y", "40px".into()),
                            ("fontSize", "20px".into()),
                        ],
                    ),
                    set("mockup-img", &[("scaleX", 1.0.into())]),
                ],
                steps: vec![
                    StepDef::new(content, 2.0, Ease::Linear)
                        .prop("y", "40%")
                        .labeled("lift"),
                    StepDef::new(mockup, 34.0, Ease::OutCubic)
                        .prop("width", "30vw")
                        .prop("height", "100vh")
                        .prop("borderRadius", 0.0)
                        .labeled("expand-30"),
                    StepDef::new(title, 34.0, Ease::OutCubic)
                        .prop("opacity", 0.3)
                        .prop("y", 0.0)
                        .prop("fontSize", "30px")
                        .at("<"),
                    StepDef::new(mockup, 12.0, Ease::OutCubic)
                        .prop("width", "60vw")
                        .labeled("expand-60"),
                    StepDef::new(title, 12.0, Ease::OutCubic)
                        .prop("fontSize", "40px")
                        .prop("opacity", 0.7)
                        .at("<"),
                    StepDef::new(content, 8.0, Ease::OutCubic)
                        .prop("y", "0%")
                        .at("<0.5"),
                    StepDef::new(content, 1.0, Ease::OutCubic)
                        .prop("borderTopRightRadius", 0.0)
                        .prop("borderTopLeftRadius", 0.0)
                        .at(">"),
                    StepDef::new(mockup, 40.0, Ease::OutCubic)
                        .prop("width", "100vw")
                        .labeled("expand-100"),
                    StepDef::new(title, 40.0, Ease::OutCubic)
                        .prop("fontSize", "100px")
                        .prop("opacity", 1.0)
                        .at("<"),
                    StepDef::new("mockup-img", 5.0, Ease::OutCubic)
                        .prop("scaleX", 1.5)
                        .labeled("stretch"),
                ],
            },
        }
    }

    /// Pinned cards frame whose inner column scrolls up by exactly its overflow.
    pub fn cards_scroller() -> Self {
        let overflow = OverflowDef {
            content: "cards".to_owned(),
            frame: "cards-frame".to_owned(),
            negate: false,
        };
        Self {
            name: "cards-scroller".to_owned(),
            trigger: TriggerDef {
                element: "cards-frame".to_owned(),
                start: "top top".to_owned(),
                end: EndDef::Overflow {
                    overflow: overflow.clone(),
                },
                pin: true,
                pin_class: None,
            },
            playback: PlaybackDef::Scrub(ScrubDef::Immediate(true)),
            timeline: TimelineDef {
                set: vec![set("cards", &[("y", "0px".into())])],
                steps: vec![StepDef::new("cards", 1.0, Ease::Linear).prop(
                    "y",
                    ValueDef::Overflow {
                        overflow: OverflowDef {
                            negate: true,
                            ..overflow
                        },
                    },
                )],
            },
        }
    }

    /// Marker highlight behind a phrase: plays when `element` scrolls into view and reverses
    /// when scrolled back above it. Starts right away and grows the marker to 104%.
    pub fn text_highlight(element: &str) -> Self {
        Self::text_highlight_with(element, 0.0, 104.0)
    }

    /// [`ChoreographyDef::text_highlight`] with the marker held back by `delay` seconds and
    /// grown to `width_percent` of the phrase.
    pub fn text_highlight_with(element: &str, delay: f64, width_percent: f64) -> Self {
        let selectors = format!("{element}/selectors");
        let right = format!("{element}/right");
        Self {
            name: format!("text-highlight:{element}"),
            trigger: TriggerDef {
                element: element.to_owned(),
                start: "top 80%".to_owned(),
                end: EndDef::Point("bottom 20%".to_owned()),
                pin: false,
                pin_class: None,
            },
            playback: PlaybackDef::ToggleActions("play none none reverse".to_owned()),
            timeline: TimelineDef {
                set: vec![
                    set(&selectors, &[("width", "0%".into()), ("opacity", 1.0.into())]),
                    set(&right, &[("scale", 0.0.into()), ("opacity", 0.0.into())]),
                ],
                steps: vec![
                    StepDef {
                        position: Some(PositionDef::At(delay)),
                        ..StepDef::new(&right, 0.2, Ease::OutExpo)
                            .prop("scale", 1.0)
                            .prop("opacity", 1.0)
                    },
                    StepDef {
                        position: Some(PositionDef::At(delay + 0.1)),
                        ..StepDef::new(&selectors, 1.2, Ease::OutCubic)
                            .prop("width", format!("{width_percent}%"))
                    },
                ],
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/choreography.rs"]
mod tests;
