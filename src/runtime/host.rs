//! Capabilities the embedding environment provides.
//!
//! The host owns the event loop. It calls controller entry points with `&mut` access to itself,
//! and delivers frame, timer and listener callbacks only for handles that are still registered.

use crate::{
    foundation::core::{Rect, Size},
    render::surface::DrawSurface,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Event stream a listener subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Document-scoped pointer movement in viewport coordinates.
    PointerMove,
    /// Viewport resize.
    Resize,
    /// Document scroll.
    Scroll,
}

pub trait FrameScheduler {
    /// Request one callback on the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

pub trait TimerQueue {
    /// Schedule a one-shot timer.
    fn set_timer(&mut self, delay_ms: f64) -> TimerId;

    fn clear_timer(&mut self, id: TimerId);
}

pub trait EventRegistry {
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId);
}

/// Measurement and drawing surface of named containers.
pub trait HostView {
    /// Bounding box of `container` in viewport pixels. `None` when it is not mounted.
    fn container_box(&self, container: &str) -> Option<Rect>;

    fn surface(&mut self, container: &str) -> Option<&mut dyn DrawSurface>;
}

/// Document layout consumed by scroll choreography.
pub trait LayoutQuery {
    fn scroll_y(&self) -> f64;

    fn viewport(&self) -> Size;

    /// Box of element `id` in document coordinates (not offset by scroll).
    fn element_box(&self, id: &str) -> Option<Rect>;
}

/// Everything a grid controller needs from its host.
pub trait Host: FrameScheduler + TimerQueue + EventRegistry + HostView {}

impl<T: FrameScheduler + TimerQueue + EventRegistry + HostView + ?Sized> Host for T {}

/// Everything the scroll director needs from its host.
pub trait ScrollHost: FrameScheduler + EventRegistry + LayoutQuery {}

impl<T: FrameScheduler + EventRegistry + LayoutQuery + ?Sized> ScrollHost for T {}
