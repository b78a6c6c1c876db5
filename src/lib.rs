//! gridfx drives two kinds of page motion without owning the page.
//!
//! - A hover-reactive grid: a container is tiled into square cells, the cell under the pointer
//!   lights up and every cell eases toward its target on each frame. [`GridController`] runs
//!   the mount, retry, resize and teardown lifecycle against a [`Host`].
//! - Scroll choreography: [`ChoreographyDef`] timelines bound to trigger regions, scrubbed by
//!   scroll progress or played by region crossings. [`ScrollDirector`] owns them against a
//!   [`ScrollHost`].
//!
//! The embedding environment implements the host traits. [`SimHost`] is a deterministic
//! in-memory host with a virtual clock, used by the tests, the CLI and the demos.
#![forbid(unsafe_code)]

mod animation;
mod cells;
mod config;
mod foundation;
mod grid;
mod render;
mod runtime;
mod scroll;

pub use crate::foundation::color::Rgba;
pub use crate::foundation::core::{Canvas, Millis, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{GridFxError, GridFxResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::smoothing::Smoothing;
pub use crate::animation::tween::{Lerp, Tween};

pub use crate::cells::state::{CellState, CellValues, HighlightTargets, HoverResponse};
pub use crate::cells::store::CellStore;
pub use crate::grid::geometry::{
    GridGeometry, GridSpec, MAX_CELLS, MIN_CELL_SIZE, SizingPolicy, compute_grid,
};
pub use crate::grid::resolver::{BoundaryPolicy, resolve_cell};

pub use crate::render::painter::{GridStyle, HighlightOutline, paint_grid};
pub use crate::render::raster::{FrameRGBA, RasterSurface};
pub use crate::render::recording::{DrawCmd, RecordingSurface};
pub use crate::render::surface::DrawSurface;

pub use crate::config::grid::{GridConfig, LifecycleConfig, Placement, StyleConfig};

pub use crate::runtime::controller::{GridController, Phase};
pub use crate::runtime::host::{
    EventRegistry, FrameHandle, FrameScheduler, Host, HostView, LayoutQuery, ListenerId,
    ListenerKind, ScrollHost, TimerId, TimerQueue,
};
pub use crate::runtime::instance::GridInstance;
pub use crate::runtime::retry::{Backoff, Readiness, RetryPolicy};
pub use crate::runtime::sim::{SimClient, SimHost};

pub use crate::scroll::choreography::{Choreography, Playback, ToggleAction, ToggleActions};
pub use crate::scroll::director::{ChoreographyId, PinTransition, ScrollDirector};
pub use crate::scroll::model::{
    ChoreographyDef, EndDef, OverflowDef, PlaybackDef, PositionDef, PropValue, PropsDef,
    ScrubDef, SetDef, StepDef, TimelineDef, TriggerDef, Unit, ValueDef,
};
pub use crate::scroll::timeline::{Phase as TimelinePhase, TargetValues, Timeline};
pub use crate::scroll::trigger::{PinEvent, PinEvents, ScrollRegion, TriggerPoint, Zone};
