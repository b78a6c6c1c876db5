//! JSON-facing definitions of scroll choreographies and the values they animate.

use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use crate::{
    animation::ease::Ease,
    foundation::{
        core::Size,
        error::{GridFxError, GridFxResult},
    },
    runtime::host::LayoutQuery,
};

/// Unit of a resolved property value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Px,
    Percent,
    #[default]
    None,
}

/// A property value after viewport and layout units have been resolved.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropValue {
    pub value: f64,
    pub unit: Unit,
}

impl PropValue {
    pub const fn px(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Px,
        }
    }

    pub const fn percent(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Percent,
        }
    }

    pub const fn number(value: f64) -> Self {
        Self {
            value,
            unit: Unit::None,
        }
    }

    /// Unit shared by a transition from `from` to `to`.
    ///
    /// Unitless values (and zero) adopt the other side's unit; `px` against `%` is an error.
    pub fn common_unit(from: PropValue, to: PropValue) -> GridFxResult<Unit> {
        match (from.unit, to.unit) {
            (a, b) if a == b => Ok(a),
            (Unit::None, u) | (u, Unit::None) => Ok(u),
            (_, u) if from.value == 0.0 => Ok(u),
            (u, _) if to.value == 0.0 => Ok(u),
            (a, b) => Err(GridFxError::timeline(format!(
                "cannot interpolate between {a:?} and {b:?}"
            ))),
        }
    }
}

impl std::fmt::Display for PropValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unit {
            Unit::Px => write!(f, "{}px", self.value),
            Unit::Percent => write!(f, "{}%", self.value),
            Unit::None => write!(f, "{}", self.value),
        }
    }
}

/// Layout-derived distance: how far `content` overflows `frame` vertically.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverflowDef {
    pub content: String,
    pub frame: String,
    #[serde(default)]
    pub negate: bool,
}

impl OverflowDef {
    pub fn resolve(&self, layout: &(impl LayoutQuery + ?Sized)) -> GridFxResult<f64> {
        let height = |id: &str| {
            layout
                .element_box(id)
                .map(|r| r.height())
                .ok_or_else(|| GridFxError::timeline(format!("element '{id}' is not laid out")))
        };
        let d = height(&self.content)? - height(&self.frame)?;
        Ok(if self.negate { -d } else { d })
    }
}

/// A property value as written: a number, a unit string (`"30vw"`, `"40%"`, `"100px"`) or a
/// layout overflow.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ValueDef {
    Number(f64),
    Text(String),
    Overflow { overflow: OverflowDef },
}

impl From<f64> for ValueDef {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for ValueDef {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for ValueDef {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl ValueDef {
    /// Resolve against the current viewport and layout. `vw`/`vh` become `px`.
    pub fn resolve(&self, layout: &(impl LayoutQuery + ?Sized)) -> GridFxResult<PropValue> {
        match self {
            Self::Number(v) => finite(*v).map(PropValue::number),
            Self::Overflow { overflow } => overflow.resolve(layout).map(PropValue::px),
            Self::Text(s) => parse_unit_value(s, layout.viewport()),
        }
    }
}

fn finite(v: f64) -> GridFxResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GridFxError::validation("property values must be finite"))
    }
}

fn parse_unit_value(s: &str, viewport: Size) -> GridFxResult<PropValue> {
    let s = s.trim();
    let split = s
        .find(|c: char| c.is_ascii_alphabetic() || c == '%')
        .unwrap_or(s.len());
    let (num, unit) = s.split_at(split);
    let value: f64 = num
        .trim()
        .parse()
        .map_err(|_| GridFxError::validation(format!("invalid property value '{s}'")))?;
    let value = finite(value)?;

    match unit.trim().to_ascii_lowercase().as_str() {
        "" => Ok(PropValue::number(value)),
        "px" => Ok(PropValue::px(value)),
        "%" => Ok(PropValue::percent(value)),
        "vw" => Ok(PropValue::px(value * viewport.width / 100.0)),
        "vh" => Ok(PropValue::px(value * viewport.height / 100.0)),
        other => Err(GridFxError::validation(format!(
            "unsupported unit '{other}' in '{s}'"
        ))),
    }
}

/// Properties of one target, keyed by property name.
pub type PropsDef = BTreeMap<String, ValueDef>;

/// Immediate initial values applied before any step runs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetDef {
    pub target: String,
    pub props: PropsDef,
}

/// Where a step starts on its timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PositionDef {
    /// Absolute time.
    At(f64),
    /// `"<"`, `"<N"`, `">"`, `">N"`, `"+=N"`, `"-=N"` or a bare number.
    Relative(String),
}

fn default_step_duration() -> f64 {
    0.5
}

/// One transition step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepDef {
    #[serde(default)]
    pub label: Option<String>,
    pub target: String,
    pub props: PropsDef,
    #[serde(default = "default_step_duration")]
    pub duration: f64,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub position: Option<PositionDef>,
}

impl StepDef {
    pub fn new(target: impl Into<String>, duration: f64, ease: Ease) -> Self {
        Self {
            label: None,
            target: target.into(),
            props: PropsDef::new(),
            duration,
            ease,
            position: None,
        }
    }

    pub fn prop(mut self, name: &str, value: impl Into<ValueDef>) -> Self {
        self.props.insert(name.to_owned(), value.into());
        self
    }

    pub fn at(mut self, position: &str) -> Self {
        self.position = Some(PositionDef::Relative(position.to_owned()));
        self
    }

    pub fn labeled(mut self, label: &str) -> Self {
        self.label = Some(label.to_owned());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimelineDef {
    pub set: Vec<SetDef>,
    pub steps: Vec<StepDef>,
}

/// End of a trigger region: a trigger point string or a layout overflow distance past the start.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum EndDef {
    Point(String),
    Overflow { overflow: OverflowDef },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerDef {
    /// Element whose box anchors the region.
    pub element: String,
    pub start: String,
    pub end: EndDef,
    #[serde(default)]
    pub pin: bool,
    /// Presentation class the embedding page toggles while the pin is active.
    #[serde(default)]
    pub pin_class: Option<String>,
}

/// How scroll position drives the playhead.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackDef {
    /// `true` follows progress directly; a number of seconds lags behind it.
    Scrub(ScrubDef),
    /// Four actions for enter, leave, enter-back and leave-back, e.g. `"play none none reverse"`.
    ToggleActions(String),
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ScrubDef {
    Immediate(bool),
    Lagged(f64),
}

/// A complete scroll choreography: trigger region, playback mode and timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChoreographyDef {
    pub name: String,
    pub trigger: TriggerDef,
    pub playback: PlaybackDef,
    pub timeline: TimelineDef,
}

impl ChoreographyDef {
    pub fn from_reader<R: std::io::Read>(r: R) -> GridFxResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| GridFxError::serde(format!("parse choreography JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> GridFxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GridFxError::validation(format!("open choreography '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check everything that can be checked without layout.
    pub fn validate(&self) -> GridFxResult<()> {
        if self.name.trim().is_empty() {
            return Err(GridFxError::validation("choreography name must be non-empty"));
        }
        crate::scroll::trigger::TriggerPoint::parse(&self.trigger.start)?;
        if let EndDef::Point(end) = &self.trigger.end {
            crate::scroll::trigger::TriggerPoint::parse(end)?;
        }
        crate::scroll::choreography::Playback::from_def(&self.playback)?;
        for step in &self.timeline.steps {
            if !(step.duration.is_finite() && step.duration >= 0.0) {
                return Err(GridFxError::validation(format!(
                    "step on '{}' needs a finite duration >= 0",
                    step.target
                )));
            }
            if step.props.is_empty() {
                return Err(GridFxError::validation(format!(
                    "step on '{}' animates no properties",
                    step.target
                )));
            }
            if let Some(pos) = &step.position {
                crate::scroll::timeline::Position::from_def(pos)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/model.rs"]
mod tests;
