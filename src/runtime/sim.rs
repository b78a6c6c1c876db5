//! Deterministic in-process host: virtual clock, timers, frame queue and listener registry.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{
    foundation::core::{Millis, Point, Rect, Size},
    render::{recording::RecordingSurface, surface::DrawSurface},
    runtime::{
        controller::GridController,
        host::{
            EventRegistry, FrameHandle, FrameScheduler, HostView, LayoutQuery, ListenerId,
            ListenerKind, TimerId, TimerQueue,
        },
    },
};

/// Receiver of the callbacks a [`SimHost`] delivers.
pub trait SimClient<S: DrawSurface + 'static> {
    fn on_timer(&mut self, _host: &mut SimHost<S>, _id: TimerId) {}

    fn on_frame(&mut self, _host: &mut SimHost<S>, _handle: FrameHandle, _now: Millis) {}

    fn on_pointer_move(&mut self, _host: &mut SimHost<S>, _pointer: Point) {}

    fn on_resize(&mut self, _host: &mut SimHost<S>) {}

    fn on_scroll(&mut self, _host: &mut SimHost<S>) {}
}

impl<S: DrawSurface + 'static> SimClient<S> for GridController {
    fn on_timer(&mut self, host: &mut SimHost<S>, id: TimerId) {
        GridController::on_timer(self, host, id);
    }

    fn on_frame(&mut self, host: &mut SimHost<S>, handle: FrameHandle, now: Millis) {
        GridController::on_frame(self, host, handle, now);
    }

    fn on_pointer_move(&mut self, host: &mut SimHost<S>, pointer: Point) {
        GridController::on_pointer_move(self, host, pointer);
    }

    fn on_resize(&mut self, host: &mut SimHost<S>) {
        GridController::on_resize(self, host);
    }
}

#[derive(Debug)]
struct SimContainer<S> {
    bounds: Option<Rect>,
    surface: Option<S>,
}

/// Simulated host with a 16ms frame cadence.
///
/// Events are delivered to a client only while a listener of that kind is registered, and
/// frames and timers only while their handles are still live.
#[derive(Debug)]
pub struct SimHost<S: DrawSurface + 'static = RecordingSurface> {
    now: Millis,
    frame_interval_ms: f64,
    next_tick: f64,
    next_id: u64,
    timers: BTreeMap<TimerId, f64>,
    frames: BTreeSet<FrameHandle>,
    listeners: BTreeMap<ListenerId, ListenerKind>,
    containers: HashMap<String, SimContainer<S>>,
    frames_delivered: u64,
    scroll_y: f64,
    viewport: Size,
    elements: HashMap<String, Rect>,
}

impl<S: DrawSurface + 'static> Default for SimHost<S> {
    fn default() -> Self {
        Self::new(Size::new(1280.0, 800.0))
    }
}

impl<S: DrawSurface + 'static> SimHost<S> {
    pub fn new(viewport: Size) -> Self {
        let frame_interval_ms = 16.0;
        Self {
            now: Millis(0.0),
            frame_interval_ms,
            next_tick: frame_interval_ms,
            next_id: 0,
            timers: BTreeMap::new(),
            frames: BTreeSet::new(),
            listeners: BTreeMap::new(),
            containers: HashMap::new(),
            frames_delivered: 0,
            scroll_y: 0.0,
            viewport,
            elements: HashMap::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn frame_interval_ms(&self) -> f64 {
        self.frame_interval_ms
    }

    /// Add or replace a container. `bounds: None` models an element that is not laid out.
    pub fn insert_container(&mut self, name: impl Into<String>, bounds: Option<Rect>, surface: S) {
        self.containers.insert(
            name.into(),
            SimContainer {
                bounds,
                surface: Some(surface),
            },
        );
    }

    pub fn surface_ref(&self, name: &str) -> Option<&S> {
        self.containers.get(name)?.surface.as_ref()
    }

    /// Detach a container's surface, as if its canvas element were removed.
    pub fn take_surface(&mut self, name: &str) -> Option<S> {
        self.containers.get_mut(name)?.surface.take()
    }

    pub fn restore_surface(&mut self, name: &str, surface: S) {
        if let Some(c) = self.containers.get_mut(name) {
            c.surface = Some(surface);
        }
    }

    /// Change a container's box without notifying anyone.
    pub fn set_container_bounds(&mut self, name: &str, bounds: Option<Rect>) {
        if let Some(c) = self.containers.get_mut(name) {
            c.bounds = bounds;
        }
    }

    pub fn set_element(&mut self, id: impl Into<String>, rect: Rect) {
        self.elements.insert(id.into(), rect);
    }

    pub fn live_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn frames_delivered(&self) -> u64 {
        self.frames_delivered
    }

    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.listeners.values().filter(|&&k| k == kind).count()
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Nothing scheduled and nothing listening.
    pub fn is_quiet(&self) -> bool {
        self.timers.is_empty() && self.frames.is_empty() && self.listeners.is_empty()
    }

    /// Run the virtual clock forward, delivering due timers and frames in time order.
    pub fn run_for<C: SimClient<S> + ?Sized>(&mut self, client: &mut C, ms: f64) {
        let end = self.now.0 + ms.max(0.0);
        loop {
            let next_timer = self.next_timer();
            let timer_first = next_timer.is_some_and(|(_, due)| due <= self.next_tick);
            let t = match next_timer {
                Some((_, due)) if timer_first => due,
                _ => self.next_tick,
            };
            if t > end {
                self.now = Millis(end);
                break;
            }
            self.now = Millis(self.now.0.max(t));

            match next_timer {
                Some((id, _)) if timer_first => {
                    self.timers.remove(&id);
                    client.on_timer(self, id);
                }
                _ => {
                    self.next_tick += self.frame_interval_ms;
                    self.deliver_frames(client);
                }
            }
        }
    }

    /// Run until `frames` frame ticks have elapsed.
    pub fn run_frames<C: SimClient<S> + ?Sized>(&mut self, client: &mut C, frames: u32) {
        if frames == 0 {
            return;
        }
        let extra = self.frame_interval_ms * f64::from(frames - 1);
        self.run_for(client, self.next_tick - self.now.0 + extra);
    }

    pub fn move_pointer<C: SimClient<S> + ?Sized>(&mut self, client: &mut C, pointer: Point) {
        if self.listener_count(ListenerKind::PointerMove) > 0 {
            client.on_pointer_move(self, pointer);
        }
    }

    /// Change the viewport and a container's box, then deliver one resize event.
    pub fn resize<C: SimClient<S> + ?Sized>(
        &mut self,
        client: &mut C,
        viewport: Size,
        container: Option<(&str, Rect)>,
    ) {
        self.viewport = viewport;
        if let Some((name, bounds)) = container {
            self.set_container_bounds(name, Some(bounds));
        }
        if self.listener_count(ListenerKind::Resize) > 0 {
            client.on_resize(self);
        }
    }

    pub fn scroll_to<C: SimClient<S> + ?Sized>(&mut self, client: &mut C, y: f64) {
        self.scroll_y = y.max(0.0);
        if self.listener_count(ListenerKind::Scroll) > 0 {
            client.on_scroll(self);
        }
    }

    fn next_timer(&self) -> Option<(TimerId, f64)> {
        self.timers
            .iter()
            .map(|(&id, &due)| (id, due))
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
    }

    fn deliver_frames<C: SimClient<S> + ?Sized>(&mut self, client: &mut C) {
        let batch = std::mem::take(&mut self.frames);
        for handle in batch {
            self.frames_delivered += 1;
            client.on_frame(self, handle, self.now);
        }
    }

    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl<S: DrawSurface + 'static> FrameScheduler for SimHost<S> {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.alloc_id());
        self.frames.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.remove(&handle);
    }
}

impl<S: DrawSurface + 'static> TimerQueue for SimHost<S> {
    fn set_timer(&mut self, delay_ms: f64) -> TimerId {
        let id = TimerId(self.alloc_id());
        let delay = if delay_ms.is_finite() { delay_ms.max(0.0) } else { 0.0 };
        self.timers.insert(id, self.now.0 + delay);
        id
    }

    fn clear_timer(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}

impl<S: DrawSurface + 'static> EventRegistry for SimHost<S> {
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.alloc_id());
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

impl<S: DrawSurface + 'static> HostView for SimHost<S> {
    fn container_box(&self, container: &str) -> Option<Rect> {
        self.containers.get(container)?.bounds
    }

    fn surface(&mut self, container: &str) -> Option<&mut dyn DrawSurface> {
        let surface = self.containers.get_mut(container)?.surface.as_mut()?;
        Some(surface as &mut dyn DrawSurface)
    }
}

impl<S: DrawSurface + 'static> LayoutQuery for SimHost<S> {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn element_box(&self, id: &str) -> Option<Rect> {
        self.elements.get(id).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/sim.rs"]
mod tests;
