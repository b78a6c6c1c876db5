use crate::{
    animation::{
        ease::Ease,
        smoothing::Smoothing,
        tween::{Lerp, Tween},
    },
    foundation::error::{GridFxError, GridFxResult},
};

/// The three animated channels of a cell.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CellValues {
    pub opacity: f64,
    pub scale: f64,
    pub border_opacity: f64,
}

impl CellValues {
    pub const REST: CellValues = CellValues {
        opacity: 0.0,
        scale: 1.0,
        border_opacity: 1.0,
    };

    pub fn validate(&self) -> GridFxResult<()> {
        let unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !unit(self.opacity) || !unit(self.border_opacity) {
            return Err(GridFxError::validation(
                "cell opacity and border_opacity must be within [0, 1]",
            ));
        }
        if !(self.scale.is_finite() && self.scale >= 0.0) {
            return Err(GridFxError::validation("cell scale must be finite and >= 0"));
        }
        Ok(())
    }
}

impl Lerp for CellValues {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
            scale: f64::lerp(&a.scale, &b.scale, t),
            border_opacity: f64::lerp(&a.border_opacity, &b.border_opacity, t),
        }
    }
}

/// Values a cell rests at and the values it is driven to while hovered.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HighlightTargets {
    pub rest: CellValues,
    pub active: CellValues,
}

impl Default for HighlightTargets {
    fn default() -> Self {
        Self {
            rest: CellValues::REST,
            active: CellValues {
                opacity: 1.0,
                scale: 1.05,
                border_opacity: 1.0,
            },
        }
    }
}

impl HighlightTargets {
    pub fn validate(&self) -> GridFxResult<()> {
        self.rest.validate()?;
        self.active.validate()
    }
}

/// How a cell reacts to the pointer entering and leaving it.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HoverResponse {
    /// Ease toward the active values while hovered and back to rest afterwards.
    #[default]
    Follow,
    /// Flash to the active values on enter, then fade to rest over `fade_ms`; leaving
    /// re-targets a running fade to finish within `release_ms`.
    Trail {
        fade_ms: f64,
        release_ms: f64,
        ease: Ease,
    },
}

impl HoverResponse {
    pub fn trail() -> Self {
        Self::Trail {
            fade_ms: 2500.0,
            release_ms: 1200.0,
            ease: Ease::OutCubic,
        }
    }

    pub fn validate(&self) -> GridFxResult<()> {
        if let Self::Trail {
            fade_ms,
            release_ms,
            ..
        } = *self
        {
            let ok = |v: f64| v.is_finite() && v >= 0.0;
            if !ok(fade_ms) || !ok(release_ms) {
                return Err(GridFxError::validation(
                    "trail fade_ms and release_ms must be finite and >= 0",
                ));
            }
        }
        Ok(())
    }
}

/// Animation record for one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellState {
    pub opacity: f64,
    pub target_opacity: f64,
    pub scale: f64,
    pub target_scale: f64,
    pub border_opacity: f64,
    pub target_border_opacity: f64,
    pub animating: bool,
    fade: Option<Tween<CellValues>>,
}

impl CellState {
    pub fn at_rest(rest: CellValues) -> Self {
        Self {
            opacity: rest.opacity,
            target_opacity: rest.opacity,
            scale: rest.scale,
            target_scale: rest.scale,
            border_opacity: rest.border_opacity,
            target_border_opacity: rest.border_opacity,
            animating: false,
            fade: None,
        }
    }

    pub fn current(&self) -> CellValues {
        CellValues {
            opacity: self.opacity,
            scale: self.scale,
            border_opacity: self.border_opacity,
        }
    }

    pub fn target(&self) -> CellValues {
        CellValues {
            opacity: self.target_opacity,
            scale: self.target_scale,
            border_opacity: self.target_border_opacity,
        }
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub(crate) fn set_target(&mut self, v: CellValues) {
        self.target_opacity = v.opacity;
        self.target_scale = v.scale;
        self.target_border_opacity = v.border_opacity;
        self.fade = None;
        self.animating = true;
    }

    /// Snap to `from` and fade toward `to` over a fixed duration.
    pub(crate) fn start_fade(&mut self, from: CellValues, to: CellValues, ms: f64, ease: Ease) {
        self.set_current(from);
        self.set_target(to);
        self.fade = Some(Tween::new(from, to, ms, ease));
    }

    /// Re-target a running fade; cells that are not fading start one from where they are.
    pub(crate) fn release(&mut self, to: CellValues, ms: f64, ease: Ease) {
        let mut fade = self
            .fade
            .unwrap_or_else(|| Tween::new(self.current(), to, ms, ease));
        fade.retarget(to, ms, ease);
        self.set_target(to);
        self.fade = Some(fade);
    }

    fn set_current(&mut self, v: CellValues) {
        self.opacity = v.opacity;
        self.scale = v.scale;
        self.border_opacity = v.border_opacity;
    }

    /// Advance one frame. Returns whether the cell is still animating afterwards.
    pub(crate) fn step(&mut self, smoothing: &Smoothing, dt_ms: f64) -> bool {
        if !self.animating {
            return false;
        }

        if let Some(fade) = self.fade.as_mut() {
            let v = fade.advance(dt_ms);
            let done = fade.is_done();
            self.set_current(v);
            if done {
                self.set_current(self.target());
                self.fade = None;
                self.animating = false;
            }
            return self.animating;
        }

        self.opacity = smoothing.step(self.opacity, self.target_opacity);
        self.scale = smoothing.step(self.scale, self.target_scale);
        self.border_opacity = smoothing.step(self.border_opacity, self.target_border_opacity);

        if smoothing.settled(self.opacity, self.target_opacity)
            && smoothing.settled(self.scale, self.target_scale)
            && smoothing.settled(self.border_opacity, self.target_border_opacity)
        {
            self.set_current(self.target());
            self.animating = false;
        }
        self.animating
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cells/state.rs"]
mod tests;
