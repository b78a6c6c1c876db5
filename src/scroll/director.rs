use smallvec::SmallVec;
use tracing::debug;

use crate::{
    foundation::{core::Millis, error::GridFxResult},
    render::surface::DrawSurface,
    runtime::{
        host::{FrameHandle, ListenerId, ListenerKind, ScrollHost},
        sim::{SimClient, SimHost},
    },
    scroll::{
        choreography::{Choreography, refresh_or_warn},
        model::ChoreographyDef,
        trigger::{PinEvent, PinEvents},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChoreographyId(pub usize);

/// A region crossing reported by one choreography.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinTransition {
    pub id: ChoreographyId,
    pub event: PinEvent,
    /// Pin state after the crossing.
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DirectorState {
    Idle,
    Mounted,
    TornDown,
}

/// Owns every scroll choreography of a page together with the listeners and frame loop
/// that drive them.
#[derive(Debug)]
pub struct ScrollDirector {
    entries: Vec<Choreography>,
    state: DirectorState,
    scroll_listener: Option<ListenerId>,
    resize_listener: Option<ListenerId>,
    frame: Option<FrameHandle>,
    last_frame_at: Option<Millis>,
    transitions: Vec<PinTransition>,
}

impl Default for ScrollDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollDirector {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            state: DirectorState::Idle,
            scroll_listener: None,
            resize_listener: None,
            frame: None,
            last_frame_at: None,
            transitions: Vec::new(),
        }
    }

    /// Add a choreography. Once mounted it is resolved and synced right away.
    pub fn register<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        def: ChoreographyDef,
    ) -> GridFxResult<ChoreographyId> {
        let mut choreography = Choreography::new(def)?;
        let id = ChoreographyId(self.entries.len());
        match self.state {
            DirectorState::Mounted => {
                let events = refresh_or_warn(&mut choreography, &*host);
                self.entries.push(choreography);
                self.record(id, events);
                self.ensure_frame(host);
            }
            DirectorState::TornDown => {
                choreography.kill();
                self.entries.push(choreography);
            }
            DirectorState::Idle => self.entries.push(choreography),
        }
        debug!(id = id.0, "choreography registered");
        Ok(id)
    }

    pub fn get(&self, id: ChoreographyId) -> Option<&Choreography> {
        self.entries.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChoreographyId, &Choreography)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, c)| (ChoreographyId(i), c))
    }

    /// Drain the pin transitions reported since the last call.
    pub fn take_transitions(&mut self) -> Vec<PinTransition> {
        std::mem::take(&mut self.transitions)
    }

    /// Attach the scroll and resize listeners and resolve every choreography.
    pub fn mount<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if self.state != DirectorState::Idle {
            return;
        }
        self.state = DirectorState::Mounted;
        self.scroll_listener = Some(host.add_listener(ListenerKind::Scroll));
        self.resize_listener = Some(host.add_listener(ListenerKind::Resize));
        self.refresh_all(host);
        debug!(choreographies = self.entries.len(), "scroll director mounted");
    }

    pub fn on_scroll<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if self.scroll_listener.is_none() {
            return;
        }
        let y = host.scroll_y();
        for i in 0..self.entries.len() {
            let events = self.entries[i].on_scroll(y);
            self.record(ChoreographyId(i), events);
        }
        self.ensure_frame(host);
    }

    /// Re-measure every region against current layout.
    pub fn on_resize<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if self.resize_listener.is_none() {
            return;
        }
        self.refresh_all(host);
    }

    pub fn on_frame<H: ScrollHost + ?Sized>(&mut self, host: &mut H, handle: FrameHandle, now: Millis) {
        if self.frame != Some(handle) {
            return;
        }
        self.frame = None;
        let dt_ms = self.last_frame_at.map_or(0.0, |prev| now.since(prev));
        self.last_frame_at = Some(now);

        let mut moving = false;
        for c in &mut self.entries {
            moving |= c.tick(dt_ms);
        }
        if moving {
            self.frame = Some(host.request_frame());
        } else {
            self.last_frame_at = None;
        }
    }

    /// Kill every choreography and release listeners and the pending frame. Idempotent.
    pub fn teardown<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if self.state == DirectorState::TornDown {
            return;
        }
        for c in &mut self.entries {
            c.kill();
        }
        if let Some(id) = self.scroll_listener.take() {
            host.remove_listener(id);
        }
        if let Some(id) = self.resize_listener.take() {
            host.remove_listener(id);
        }
        if let Some(frame) = self.frame.take() {
            host.cancel_frame(frame);
        }
        self.state = DirectorState::TornDown;
        debug!("scroll director torn down");
    }

    #[tracing::instrument(level = "debug", skip_all, fields(choreographies = self.entries.len()))]
    fn refresh_all<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        for i in 0..self.entries.len() {
            let events = refresh_or_warn(&mut self.entries[i], &*host);
            self.record(ChoreographyId(i), events);
        }
        self.ensure_frame(host);
    }

    fn record(&mut self, id: ChoreographyId, events: PinEvents) {
        if id.0 >= self.entries.len() {
            return;
        }
        let batch: SmallVec<[PinTransition; 2]> = events
            .into_iter()
            .map(|event| PinTransition {
                id,
                event,
                active: event.enters(),
            })
            .collect();
        self.transitions.extend(batch);
    }

    fn ensure_frame<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if self.frame.is_none() && self.entries.iter().any(Choreography::is_moving) {
            self.frame = Some(host.request_frame());
        }
    }
}

impl<S: DrawSurface + 'static> SimClient<S> for ScrollDirector {
    fn on_frame(&mut self, host: &mut SimHost<S>, handle: FrameHandle, now: Millis) {
        ScrollDirector::on_frame(self, host, handle, now);
    }

    fn on_resize(&mut self, host: &mut SimHost<S>) {
        ScrollDirector::on_resize(self, host);
    }

    fn on_scroll(&mut self, host: &mut SimHost<S>) {
        ScrollDirector::on_scroll(self, host);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/director.rs"]
mod tests;
