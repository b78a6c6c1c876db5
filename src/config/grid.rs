use std::{fs::File, io::BufReader, path::Path};

use crate::{
    animation::smoothing::Smoothing,
    cells::state::{CellValues, HighlightTargets, HoverResponse},
    foundation::{
        color::Rgba,
        error::{GridFxError, GridFxResult},
    },
    grid::{
        geometry::{GridSpec, SizingPolicy},
        resolver::BoundaryPolicy,
    },
    render::painter::{GridStyle, HighlightOutline},
    runtime::retry::RetryPolicy,
};

/// Construction-time configuration of one grid instance. Immutable for the instance lifetime.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    pub grid: GridSpec,
    #[serde(default)]
    pub boundary: BoundaryPolicy,
    #[serde(default)]
    pub targets: HighlightTargets,
    #[serde(default)]
    pub response: HoverResponse,
    #[serde(default)]
    pub smoothing: Smoothing,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub placement: Placement,
}

/// Colors as written in configuration. Resolved once by [`StyleConfig::resolve`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub grid_line: Option<String>,
    pub grid_line_width: f64,
    pub accent_border: Option<String>,
    pub accent_border_width: f64,
    pub highlight: Option<String>,
    pub highlight_opacity: f64,
    pub highlight_outline: Option<HighlightOutline>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            grid_line: Some("rgba(28, 28, 28, 1)".to_owned()),
            grid_line_width: 0.5,
            accent_border: None,
            accent_border_width: 0.2,
            highlight: Some("#ff751b".to_owned()),
            highlight_opacity: 1.0,
            highlight_outline: None,
        }
    }
}

impl StyleConfig {
    /// Parse every color. An unparseable color disables the layer that uses it.
    pub fn resolve(&self) -> GridStyle {
        GridStyle {
            grid_line: resolve_color("grid_line", self.grid_line.as_deref()),
            grid_line_width: self.grid_line_width,
            accent_border: resolve_color("accent_border", self.accent_border.as_deref()),
            accent_border_width: self.accent_border_width,
            highlight: resolve_color("highlight", self.highlight.as_deref()),
            highlight_opacity: self.highlight_opacity,
            highlight_outline: self.highlight_outline,
        }
    }

    fn validate(&self) -> GridFxResult<()> {
        let width = |v: f64| v.is_finite() && v >= 0.0;
        if !width(self.grid_line_width) || !width(self.accent_border_width) {
            return Err(GridFxError::validation(
                "style line widths must be finite and >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.highlight_opacity) {
            return Err(GridFxError::validation(
                "style highlight_opacity must be within [0, 1]",
            ));
        }
        if let Some(o) = self.highlight_outline
            && (!(0.0..=1.0).contains(&o.alpha_factor) || !width(o.width))
        {
            return Err(GridFxError::validation(
                "highlight_outline needs alpha_factor in [0, 1] and a finite width",
            ));
        }
        Ok(())
    }
}

fn resolve_color(layer: &str, value: Option<&str>) -> Option<Rgba> {
    let value = value?;
    match Rgba::parse(value) {
        Ok(c) => Some(c),
        Err(e) => {
            tracing::warn!(layer, value, error = %e, "unparseable color; layer disabled");
            None
        }
    }
}

/// Timing of setup, retry and resize handling.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifecycleConfig {
    pub mount_delay_ms: f64,
    pub resize_debounce_ms: f64,
    pub retry: RetryPolicy,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            mount_delay_ms: 100.0,
            resize_debounce_ms: 250.0,
            retry: RetryPolicy::default(),
        }
    }
}

impl LifecycleConfig {
    fn validate(&self) -> GridFxResult<()> {
        let delay = |v: f64| v.is_finite() && v >= 0.0;
        if !delay(self.mount_delay_ms) || !delay(self.resize_debounce_ms) {
            return Err(GridFxError::validation(
                "lifecycle delays must be finite and >= 0",
            ));
        }
        self.retry.validate()
    }
}

/// Where the embedding page places the grid container. Carried as CSS-like data only.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Placement {
    pub top: Option<String>,
    pub left: Option<String>,
    pub right: Option<String>,
    pub bottom: Option<String>,
    pub width: String,
    pub height: String,
    pub z_index: i32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            top: Some("0".to_owned()),
            left: Some("0".to_owned()),
            right: None,
            bottom: None,
            width: "100%".to_owned(),
            height: "100%".to_owned(),
            z_index: 1,
        }
    }
}

impl GridConfig {
    /// Full-viewport canvas background: 80px fit grid, dark lines, outlined orange highlight.
    pub fn viewport_background() -> Self {
        Self {
            grid: GridSpec::new(80.0, SizingPolicy::Fit),
            boundary: BoundaryPolicy::Reject,
            targets: HighlightTargets::default(),
            response: HoverResponse::Follow,
            smoothing: Smoothing::default(),
            style: StyleConfig {
                highlight_outline: Some(HighlightOutline {
                    alpha_factor: 0.6,
                    width: 1.0,
                }),
                ..StyleConfig::default()
            },
            lifecycle: LifecycleConfig::default(),
            placement: Placement::default(),
        }
    }

    /// Small fixed-size block decoration whose accent border fades out under the pointer.
    pub fn decorative_block() -> Self {
        Self {
            grid: GridSpec::new(40.0, SizingPolicy::Fixed),
            boundary: BoundaryPolicy::Clamp,
            targets: HighlightTargets {
                rest: CellValues::REST,
                active: CellValues {
                    opacity: 1.0,
                    scale: 1.1,
                    border_opacity: 0.0,
                },
            },
            response: HoverResponse::Follow,
            smoothing: Smoothing::default(),
            style: StyleConfig {
                grid_line: Some("rgba(60, 60, 60, 0.4)".to_owned()),
                highlight_opacity: 0.5,
                ..StyleConfig::default()
            },
            lifecycle: LifecycleConfig {
                resize_debounce_ms: 200.0,
                ..LifecycleConfig::default()
            },
            placement: Placement {
                top: Some("10%".to_owned()),
                left: None,
                ..Placement::default()
            },
        }
    }

    /// Grid of cells that flash on enter and fade out over 2.5s.
    pub fn trail_background() -> Self {
        Self {
            grid: GridSpec {
                min_ready_px: 100.0,
                ..GridSpec::new(80.0, SizingPolicy::Fit)
            },
            boundary: BoundaryPolicy::Reject,
            targets: HighlightTargets::default(),
            response: HoverResponse::trail(),
            smoothing: Smoothing::default(),
            style: StyleConfig {
                highlight: Some("rgba(255, 140, 0, 1)".to_owned()),
                ..StyleConfig::default()
            },
            lifecycle: LifecycleConfig {
                mount_delay_ms: 300.0,
                ..LifecycleConfig::default()
            },
            placement: Placement {
                z_index: 0,
                ..Placement::default()
            },
        }
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> GridFxResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| GridFxError::serde(format!("parse grid config JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> GridFxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GridFxError::validation(format!("open grid config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> GridFxResult<()> {
        self.grid.validate()?;
        self.smoothing.validate()?;
        self.targets.validate()?;
        self.response.validate()?;
        self.style.validate()?;
        self.lifecycle.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/grid.rs"]
mod tests;
