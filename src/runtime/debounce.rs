use crate::runtime::host::{TimerId, TimerQueue};

/// Trailing-edge debounce over a host timer.
#[derive(Clone, Debug, PartialEq)]
pub struct Debouncer {
    quiet_ms: f64,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms,
            pending: None,
        }
    }

    pub fn quiet_ms(&self) -> f64 {
        self.quiet_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Restart the quiet period, dropping any timer already pending.
    pub fn trigger(&mut self, timers: &mut (impl TimerQueue + ?Sized)) {
        self.cancel(timers);
        self.pending = Some(timers.set_timer(self.quiet_ms));
    }

    /// Returns `true` when `id` is the pending timer; it is consumed.
    pub fn fire(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self, timers: &mut (impl TimerQueue + ?Sized)) {
        if let Some(id) = self.pending.take() {
            timers.clear_timer(id);
        }
    }
}
