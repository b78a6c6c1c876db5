use smallvec::SmallVec;

use crate::{
    foundation::error::{GridFxError, GridFxResult},
    runtime::host::LayoutQuery,
    scroll::model::{EndDef, TriggerDef},
};

/// Position along an element or the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    Top,
    Center,
    Bottom,
    Px(f64),
    /// Percentage of the length, from the top.
    Percent(f64),
}

impl Anchor {
    fn parse(s: &str) -> GridFxResult<Self> {
        let s = s.trim();
        match s {
            "top" => return Ok(Self::Top),
            "center" => return Ok(Self::Center),
            "bottom" => return Ok(Self::Bottom),
            _ => {}
        }
        let (num, ctor): (&str, fn(f64) -> Self) = if let Some(n) = s.strip_suffix('%') {
            (n, Self::Percent)
        } else if let Some(n) = s.strip_suffix("px") {
            (n, Self::Px)
        } else {
            (s, Self::Px)
        };
        num.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(ctor)
            .ok_or_else(|| GridFxError::validation(format!("invalid trigger anchor '{s}'")))
    }

    /// Offset from the top of something `length` pixels tall.
    pub fn offset(self, length: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => length / 2.0,
            Self::Bottom => length,
            Self::Px(v) => v,
            Self::Percent(p) => length * p / 100.0,
        }
    }
}

/// Distance past the region start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distance {
    Px(f64),
    /// Percentage of the viewport height (`vh` and `%` are equivalent here).
    Viewport(f64),
}

/// A parsed trigger point string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerPoint {
    /// `"<element anchor> <viewport anchor>"`: reached when the two line up.
    Edges { element: Anchor, viewport: Anchor },
    /// `"+=N"`, `"+=Npx"`, `"+=Nvh"`, `"+=N%"`; only meaningful as an end.
    Relative(Distance),
}

impl TriggerPoint {
    pub fn parse(s: &str) -> GridFxResult<Self> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix("+=") {
            let rest = rest.trim();
            let (num, ctor): (&str, fn(f64) -> Distance) = if let Some(n) = rest.strip_suffix("vh")
            {
                (n, Distance::Viewport)
            } else if let Some(n) = rest.strip_suffix('%') {
                (n, Distance::Viewport)
            } else if let Some(n) = rest.strip_suffix("px") {
                (n, Distance::Px)
            } else {
                (rest, Distance::Px)
            };
            return num
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| Self::Relative(ctor(v)))
                .ok_or_else(|| GridFxError::validation(format!("invalid trigger distance '{s}'")));
        }

        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(e), Some(v), None) => Ok(Self::Edges {
                element: Anchor::parse(e)?,
                viewport: Anchor::parse(v)?,
            }),
            _ => Err(GridFxError::validation(format!(
                "trigger point '{s}' must be '<element> <viewport>' or '+=<distance>'"
            ))),
        }
    }
}

/// Scroll positions (document pixels) where a trigger region starts and ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRegion {
    pub start: f64,
    pub end: f64,
}

impl ScrollRegion {
    /// Compute the region from current layout.
    #[tracing::instrument(level = "debug", skip(layout), fields(element = %def.element))]
    pub fn measure(def: &TriggerDef, layout: &(impl LayoutQuery + ?Sized)) -> GridFxResult<Self> {
        let element = layout.element_box(&def.element).ok_or_else(|| {
            GridFxError::timeline(format!("trigger element '{}' is not laid out", def.element))
        })?;
        let vh = layout.viewport().height;

        let at_edges = |element_anchor: Anchor, viewport_anchor: Anchor| {
            element.y0 + element_anchor.offset(element.height()) - viewport_anchor.offset(vh)
        };

        let start = match TriggerPoint::parse(&def.start)? {
            TriggerPoint::Edges { element, viewport } => at_edges(element, viewport),
            TriggerPoint::Relative(_) => {
                return Err(GridFxError::validation(format!(
                    "trigger start '{}' cannot be relative",
                    def.start
                )));
            }
        };

        let end = match &def.end {
            EndDef::Point(s) => match TriggerPoint::parse(s)? {
                TriggerPoint::Edges { element, viewport } => at_edges(element, viewport),
                TriggerPoint::Relative(Distance::Px(d)) => start + d,
                TriggerPoint::Relative(Distance::Viewport(p)) => start + vh * p / 100.0,
            },
            EndDef::Overflow { overflow } => start + overflow.resolve(layout)?.max(0.0),
        };

        Ok(Self {
            start,
            end: end.max(start),
        })
    }

    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }

    /// Progress in `[0, 1]`. A zero-length region jumps from 0 to 1 at its start.
    pub fn progress(&self, scroll_y: f64) -> f64 {
        if self.is_empty() {
            return if scroll_y >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start) / self.len()).clamp(0.0, 1.0)
    }

    pub fn zone(&self, scroll_y: f64) -> Zone {
        if scroll_y < self.start {
            Zone::Before
        } else if scroll_y > self.end {
            Zone::After
        } else {
            Zone::Inside
        }
    }
}

/// Scroll position relative to a region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Zone {
    #[default]
    Before,
    Inside,
    After,
}

/// A crossing of a region boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinEvent {
    /// Crossed the start scrolling down.
    Enter,
    /// Crossed the end scrolling down.
    Leave,
    /// Crossed the end scrolling up.
    EnterBack,
    /// Crossed the start scrolling up.
    LeaveBack,
}

impl PinEvent {
    /// Whether the scroll position is inside the region right after this crossing.
    pub fn enters(self) -> bool {
        matches!(self, Self::Enter | Self::EnterBack)
    }
}

pub type PinEvents = SmallVec<[PinEvent; 2]>;

/// Tracks which side of a region the scroll position is on and reports crossings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinState {
    zone: Zone,
}

impl PinState {
    pub fn is_active(&self) -> bool {
        self.zone == Zone::Inside
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Move to `zone`, returning the boundary crossings in the order they happened.
    pub fn update(&mut self, zone: Zone) -> PinEvents {
        use PinEvent::*;
        use Zone::*;

        let events: &[PinEvent] = match (self.zone, zone) {
            (Before, Inside) => &[Enter],
            (Before, After) => &[Enter, Leave],
            (Inside, After) => &[Leave],
            (After, Inside) => &[EnterBack],
            (After, Before) => &[EnterBack, LeaveBack],
            (Inside, Before) => &[LeaveBack],
            _ => &[],
        };
        self.zone = zone;
        events.iter().copied().collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/trigger.rs"]
mod tests;
