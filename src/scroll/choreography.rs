use tracing::{debug, warn};

use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::error::{GridFxError, GridFxResult},
    runtime::host::LayoutQuery,
    scroll::{
        model::{ChoreographyDef, PlaybackDef, ScrubDef},
        timeline::{TargetValues, Timeline},
        trigger::{PinEvent, PinEvents, PinState, ScrollRegion},
    },
};

/// What a toggle-mode choreography does at a region crossing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Reverse,
    Restart,
    Reset,
    Complete,
    Pause,
    #[default]
    None,
}

impl ToggleAction {
    fn parse(s: &str) -> GridFxResult<Self> {
        Ok(match s {
            "play" => Self::Play,
            "reverse" => Self::Reverse,
            "restart" => Self::Restart,
            "reset" => Self::Reset,
            "complete" => Self::Complete,
            "pause" => Self::Pause,
            "none" => Self::None,
            other => {
                return Err(GridFxError::validation(format!(
                    "unknown toggle action '{other}'"
                )));
            }
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToggleActions {
    pub enter: ToggleAction,
    pub leave: ToggleAction,
    pub enter_back: ToggleAction,
    pub leave_back: ToggleAction,
}

impl ToggleActions {
    /// Parse four space-separated actions: enter, leave, enter-back, leave-back.
    pub fn parse(s: &str) -> GridFxResult<Self> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let [enter, leave, enter_back, leave_back] = parts.as_slice() else {
            return Err(GridFxError::validation(format!(
                "toggle actions '{s}' must name exactly four actions"
            )));
        };
        Ok(Self {
            enter: ToggleAction::parse(enter)?,
            leave: ToggleAction::parse(leave)?,
            enter_back: ToggleAction::parse(enter_back)?,
            leave_back: ToggleAction::parse(leave_back)?,
        })
    }

    pub fn for_event(&self, event: PinEvent) -> ToggleAction {
        match event {
            PinEvent::Enter => self.enter,
            PinEvent::Leave => self.leave,
            PinEvent::EnterBack => self.enter_back,
            PinEvent::LeaveBack => self.leave_back,
        }
    }
}

/// How the playhead follows the scroll position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Playback {
    /// Playhead equals scroll progress.
    ScrubImmediate,
    /// Playhead catches up with scroll progress over `seconds`.
    ScrubLagged { seconds: f64 },
    /// Region crossings start, reverse or jump a time-based playhead.
    Toggle(ToggleActions),
}

/// Ease of the catch-up tween of a lagged scrub.
pub const LAG_EASE: Ease = Ease::OutQuart;

impl Playback {
    pub fn from_def(def: &PlaybackDef) -> GridFxResult<Self> {
        match def {
            PlaybackDef::Scrub(ScrubDef::Immediate(true)) => Ok(Self::ScrubImmediate),
            PlaybackDef::Scrub(ScrubDef::Immediate(false)) => Err(GridFxError::validation(
                "scrub: false is not a scrub; use toggle_actions",
            )),
            PlaybackDef::Scrub(ScrubDef::Lagged(s)) if s.is_finite() && *s > 0.0 => {
                Ok(Self::ScrubLagged { seconds: *s })
            }
            PlaybackDef::Scrub(ScrubDef::Lagged(s)) if *s == 0.0 => Ok(Self::ScrubImmediate),
            PlaybackDef::Scrub(ScrubDef::Lagged(s)) => Err(GridFxError::validation(format!(
                "scrub lag must be finite and >= 0, got {s}"
            ))),
            PlaybackDef::ToggleActions(s) => ToggleActions::parse(s).map(Self::Toggle),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    Still,
    Chasing(Tween<f64>),
    /// Time-based playback; `direction` is `1.0` forward or `-1.0` in reverse.
    Playing { direction: f64 },
}

/// One scroll-driven timeline bound to one trigger region.
#[derive(Clone, Debug)]
pub struct Choreography {
    def: ChoreographyDef,
    playback: Playback,
    resolved: Option<(ScrollRegion, Timeline)>,
    pin: PinState,
    progress: f64,
    playhead: f64,
    motion: Motion,
    killed: bool,
}

impl Choreography {
    pub fn new(def: ChoreographyDef) -> GridFxResult<Self> {
        def.validate()?;
        let playback = Playback::from_def(&def.playback)?;
        Ok(Self {
            def,
            playback,
            resolved: None,
            pin: PinState::default(),
            progress: 0.0,
            playhead: 0.0,
            motion: Motion::Still,
            killed: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn def(&self) -> &ChoreographyDef {
        &self.def
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn region(&self) -> Option<ScrollRegion> {
        self.resolved.as_ref().map(|(r, _)| *r)
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.resolved.as_ref().map(|(_, t)| t)
    }

    /// Scroll progress through the region, `0..=1`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Timeline time currently rendered.
    pub fn playhead(&self) -> f64 {
        self.playhead
    }

    pub fn pin_active(&self) -> bool {
        self.pin.is_active()
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }

    /// Whether the playhead still moves without further scrolling.
    pub fn is_moving(&self) -> bool {
        !self.killed && self.motion != Motion::Still
    }

    /// Current property values; empty until the first successful refresh.
    pub fn values(&self) -> TargetValues {
        self.timeline()
            .map(|t| t.sample(self.playhead))
            .unwrap_or_default()
    }

    /// Label of the phase the playhead is in.
    pub fn phase(&self) -> Option<&str> {
        self.timeline()?.phase_at(self.playhead)
    }

    /// Re-measure the region and re-resolve the timeline against current layout, then re-sync
    /// to the current scroll position without restarting.
    #[tracing::instrument(level = "debug", skip(self, layout), fields(name = %self.def.name))]
    pub fn refresh(&mut self, layout: &(impl LayoutQuery + ?Sized)) -> GridFxResult<PinEvents> {
        if self.killed {
            return Ok(PinEvents::new());
        }
        let region = ScrollRegion::measure(&self.def.trigger, layout)?;
        let timeline = Timeline::build(&self.def.timeline, layout)?;
        debug!(
            start = region.start,
            end = region.end,
            duration = timeline.duration(),
            "choreography resolved"
        );

        let old_duration = self.timeline().map_or(0.0, Timeline::duration);
        let new_duration = timeline.duration();
        self.resolved = Some((region, timeline));

        match self.playback {
            Playback::ScrubImmediate | Playback::ScrubLagged { .. } => {
                self.motion = Motion::Still;
            }
            Playback::Toggle(_) => {
                if old_duration > 0.0 {
                    self.playhead = self.playhead / old_duration * new_duration;
                }
                self.playhead = self.playhead.clamp(0.0, new_duration);
            }
        }
        let events = self.sync(layout.scroll_y(), true);
        Ok(events)
    }

    /// Dispatch a new scroll position. Returns the region crossings it caused.
    pub fn on_scroll(&mut self, scroll_y: f64) -> PinEvents {
        if self.killed || self.resolved.is_none() {
            return PinEvents::new();
        }
        self.sync(scroll_y, false)
    }

    /// Advance time-based motion. Returns whether the playhead is still moving.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        if self.killed {
            return false;
        }
        let duration = self.timeline().map_or(0.0, Timeline::duration);
        match &mut self.motion {
            Motion::Still => {}
            Motion::Chasing(tween) => {
                self.playhead = tween.advance(dt_ms);
                if tween.is_done() {
                    self.motion = Motion::Still;
                }
            }
            Motion::Playing { direction } => {
                let dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
                let next = self.playhead + *direction * dt / 1000.0;
                self.playhead = next.clamp(0.0, duration);
                if next <= 0.0 || next >= duration {
                    self.motion = Motion::Still;
                }
            }
        }
        self.is_moving()
    }

    /// Stop for good. Later scroll, tick and refresh calls do nothing.
    pub fn kill(&mut self) {
        self.killed = true;
        self.motion = Motion::Still;
    }

    fn sync(&mut self, scroll_y: f64, snap: bool) -> PinEvents {
        let Some((region, timeline)) = self.resolved.as_ref() else {
            return PinEvents::new();
        };
        let duration = timeline.duration();
        self.progress = region.progress(scroll_y);
        let events = self.pin.update(region.zone(scroll_y));
        let target = self.progress * duration;

        match self.playback {
            Playback::ScrubImmediate => self.playhead = target,
            Playback::ScrubLagged { .. } if snap => {
                self.playhead = target;
                self.motion = Motion::Still;
            }
            Playback::ScrubLagged { seconds } => {
                let ms = seconds * 1000.0;
                match &mut self.motion {
                    Motion::Chasing(tween) => tween.retarget(target, ms, LAG_EASE),
                    _ => self.motion = Motion::Chasing(Tween::new(self.playhead, target, ms, LAG_EASE)),
                }
            }
            Playback::Toggle(actions) => {
                for &event in &events {
                    self.apply(actions.for_event(event), duration);
                }
            }
        }
        if !events.is_empty() {
            debug!(name = %self.def.name, ?events, active = self.pin.is_active(), "pin crossed");
        }
        events
    }

    fn apply(&mut self, action: ToggleAction, duration: f64) {
        match action {
            ToggleAction::Play => self.motion = Motion::Playing { direction: 1.0 },
            ToggleAction::Reverse => self.motion = Motion::Playing { direction: -1.0 },
            ToggleAction::Restart => {
                self.playhead = 0.0;
                self.motion = Motion::Playing { direction: 1.0 };
            }
            ToggleAction::Reset => {
                self.playhead = 0.0;
                self.motion = Motion::Still;
            }
            ToggleAction::Complete => {
                self.playhead = duration;
                self.motion = Motion::Still;
            }
            ToggleAction::Pause => self.motion = Motion::Still,
            ToggleAction::None => {}
        }
        // already at the end it is heading to
        if let Motion::Playing { direction } = self.motion
            && ((direction > 0.0 && self.playhead >= duration)
                || (direction < 0.0 && self.playhead <= 0.0))
        {
            self.motion = Motion::Still;
        }
    }
}

/// Log and swallow a refresh failure; the choreography stays unresolved until the next one.
pub(crate) fn refresh_or_warn(
    choreography: &mut Choreography,
    layout: &(impl LayoutQuery + ?Sized),
) -> PinEvents {
    match choreography.refresh(layout) {
        Ok(events) => events,
        Err(e) => {
            warn!(name = %choreography.name(), error = %e, "choreography refresh failed");
            PinEvents::new()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/choreography.rs"]
mod tests;
