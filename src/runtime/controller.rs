use tracing::{debug, warn};

use crate::{
    config::grid::{GridConfig, LifecycleConfig},
    foundation::{
        core::{Canvas, Millis, Point},
        error::GridFxResult,
    },
    runtime::{
        debounce::Debouncer,
        host::{FrameHandle, Host, ListenerId, ListenerKind, TimerId},
        instance::GridInstance,
        retry::Readiness,
    },
};

/// Lifecycle phase of a [`GridController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, not mounted.
    Idle,
    /// Waiting for the mount delay or for the container to become measurable.
    Pending,
    /// Frame loop running.
    Running,
    /// Frame loop stopped because the drawing surface went away. Listeners stay attached.
    Halted,
    /// Setup gave up after the last permitted retry.
    Abandoned,
    TornDown,
}

/// Owns the frame loop, listeners and timers of one grid instance.
///
/// The controller never holds on to its host. Every entry point takes `&mut` host access and
/// is a no-op after [`GridController::teardown`].
#[derive(Debug)]
pub struct GridController {
    container: String,
    lifecycle: LifecycleConfig,
    instance: GridInstance,
    phase: Phase,
    readiness: Readiness,
    setup_timer: Option<TimerId>,
    frame: Option<FrameHandle>,
    last_frame_at: Option<Millis>,
    pointer_listener: Option<ListenerId>,
    resize_listener: Option<ListenerId>,
    resize: Debouncer,
}

impl GridController {
    pub fn new(container: impl Into<String>, config: GridConfig) -> GridFxResult<Self> {
        config.validate()?;
        Ok(Self {
            container: container.into(),
            lifecycle: config.lifecycle,
            instance: GridInstance::new(&config),
            phase: Phase::Idle,
            readiness: Readiness::default(),
            setup_timer: None,
            frame: None,
            last_frame_at: None,
            pointer_listener: None,
            resize_listener: None,
            resize: Debouncer::new(config.lifecycle.resize_debounce_ms),
        })
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn instance(&self) -> &GridInstance {
        &self.instance
    }

    /// Begin setup after the configured mount delay. Only valid from [`Phase::Idle`].
    pub fn mount<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.phase != Phase::Idle {
            debug!(container = %self.container, phase = ?self.phase, "mount ignored");
            return;
        }
        self.phase = Phase::Pending;
        self.setup_timer = Some(host.set_timer(self.lifecycle.mount_delay_ms));
        debug!(container = %self.container, delay_ms = self.lifecycle.mount_delay_ms, "mount scheduled");
    }

    /// Timer callback: mount delay, setup retry or resize debounce.
    pub fn on_timer<H: Host + ?Sized>(&mut self, host: &mut H, id: TimerId) {
        if self.phase == Phase::TornDown {
            return;
        }
        if self.setup_timer == Some(id) {
            self.setup_timer = None;
            self.try_setup(host);
        } else if self.resize.fire(id) {
            self.relayout(host);
        }
    }

    /// Viewport resize callback. Recomputation runs once the debounce period is quiet.
    pub fn on_resize<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.resize_listener.is_none() {
            return;
        }
        self.resize.trigger(host);
    }

    /// Document pointer-move callback, viewport coordinates.
    pub fn on_pointer_move<H: Host + ?Sized>(&mut self, host: &mut H, pointer: Point) {
        if self.pointer_listener.is_none() {
            return;
        }
        let Some(bounds) = host.container_box(&self.container) else {
            return;
        };
        self.instance.pointer_moved(pointer, bounds);
    }

    /// Frame callback. Handles the controller no longer owns are ignored.
    pub fn on_frame<H: Host + ?Sized>(&mut self, host: &mut H, handle: FrameHandle, now: Millis) {
        if self.frame != Some(handle) {
            return;
        }
        self.frame = None;
        let dt_ms = self.last_frame_at.map_or(0.0, |prev| now.since(prev));
        self.last_frame_at = Some(now);

        let Some(surface) = host.surface(&self.container) else {
            debug!(container = %self.container, "surface unavailable; frame loop halted");
            self.phase = Phase::Halted;
            self.last_frame_at = None;
            return;
        };
        self.instance.frame(surface, dt_ms);
        self.frame = Some(host.request_frame());
    }

    /// Cancel the pending frame, remove both listeners and clear every timer. Idempotent.
    pub fn teardown<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.phase == Phase::TornDown {
            return;
        }
        if let Some(frame) = self.frame.take() {
            host.cancel_frame(frame);
        }
        if let Some(id) = self.pointer_listener.take() {
            host.remove_listener(id);
        }
        if let Some(id) = self.resize_listener.take() {
            host.remove_listener(id);
        }
        if let Some(id) = self.setup_timer.take() {
            host.clear_timer(id);
        }
        self.resize.cancel(host);
        self.instance.discard();
        self.phase = Phase::TornDown;
        debug!(container = %self.container, "torn down");
    }

    #[tracing::instrument(level = "debug", skip(self, host), fields(container = %self.container))]
    fn try_setup<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.phase != Phase::Pending {
            return;
        }
        if self.resize_listener.is_none() {
            self.resize_listener = Some(host.add_listener(ListenerKind::Resize));
        }

        let ready = self.measure_and_layout(host);
        match self.readiness.record(ready, &self.lifecycle.retry) {
            Some(delay_ms) => {
                debug!(delay_ms, readiness = ?self.readiness, "container not ready; retrying");
                self.setup_timer = Some(host.set_timer(delay_ms));
            }
            None if ready => {
                self.pointer_listener = Some(host.add_listener(ListenerKind::PointerMove));
                self.start_loop(host);
                debug!("setup complete");
            }
            None => {
                warn!(readiness = ?self.readiness, "container never became ready; grid abandoned");
                if let Some(id) = self.resize_listener.take() {
                    host.remove_listener(id);
                }
                self.resize.cancel(host);
                self.phase = Phase::Abandoned;
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self, host), fields(container = %self.container))]
    fn relayout<H: Host + ?Sized>(&mut self, host: &mut H) {
        if !matches!(self.phase, Phase::Running | Phase::Halted) {
            return;
        }
        if !self.measure_and_layout(host) {
            debug!("resize measurement not ready; keeping previous grid");
            return;
        }
        if self.phase == Phase::Halted {
            self.start_loop(host);
        }
    }

    /// Measure the container, recompute the grid and match the surface to it.
    ///
    /// Returns `false` when the container is unmeasured, too small, or has no surface.
    fn measure_and_layout<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(bounds) = host.container_box(&self.container) else {
            return false;
        };
        if host.surface(&self.container).is_none() {
            return false;
        }
        match self.instance.relayout(bounds.size()) {
            Ok(geometry) => {
                if let Some(surface) = host.surface(&self.container) {
                    surface.resize(Canvas::for_box(bounds.size()));
                }
                debug!(
                    columns = geometry.columns,
                    rows = geometry.rows,
                    "grid computed"
                );
                true
            }
            Err(e) => {
                debug!(error = %e, "grid not computed");
                false
            }
        }
    }

    fn start_loop<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.phase = Phase::Running;
        self.last_frame_at = None;
        if self.frame.is_none() {
            self.frame = Some(host.request_frame());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/controller.rs"]
mod tests;
