use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    foundation::{
        error::{GridFxError, GridFxResult},
        math::lerp,
    },
    runtime::host::LayoutQuery,
    scroll::model::{PositionDef, PropValue, TimelineDef, Unit},
};

/// Sampled values, keyed by target then property.
pub type TargetValues = BTreeMap<String, BTreeMap<String, PropValue>>;

/// Placement of a step relative to the steps declared before it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// At the current end of the timeline, plus an offset.
    End(f64),
    /// Relative to the previous step's start.
    PrevStart(f64),
    /// Relative to the previous step's end.
    PrevEnd(f64),
    At(f64),
}

impl Default for Position {
    fn default() -> Self {
        Self::End(0.0)
    }
}

impl Position {
    pub fn parse(s: &str) -> GridFxResult<Self> {
        let s = s.trim();
        let offset = |rest: &str| -> GridFxResult<f64> {
            let rest = rest.trim();
            if rest.is_empty() {
                return Ok(0.0);
            }
            rest.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| GridFxError::timeline(format!("invalid timeline position '{s}'")))
        };

        if let Some(rest) = s.strip_prefix("+=") {
            Ok(Self::End(offset(rest)?))
        } else if let Some(rest) = s.strip_prefix("-=") {
            Ok(Self::End(-offset(rest)?))
        } else if let Some(rest) = s.strip_prefix('<') {
            Ok(Self::PrevStart(offset(rest)?))
        } else if let Some(rest) = s.strip_prefix('>') {
            Ok(Self::PrevEnd(offset(rest)?))
        } else if s.is_empty() {
            Err(GridFxError::timeline("empty timeline position"))
        } else {
            Ok(Self::At(offset(s)?))
        }
    }

    pub fn from_def(def: &PositionDef) -> GridFxResult<Self> {
        match def {
            PositionDef::At(t) if t.is_finite() => Ok(Self::At(*t)),
            PositionDef::At(_) => Err(GridFxError::timeline("timeline position must be finite")),
            PositionDef::Relative(s) => Self::parse(s),
        }
    }

    /// Absolute start time given the timeline end and the previous step's span.
    pub fn resolve(self, end: f64, prev: Option<(f64, f64)>) -> f64 {
        let (prev_start, prev_end) = prev.unwrap_or((0.0, 0.0));
        let t = match self {
            Self::End(o) => end + o,
            Self::PrevStart(o) => prev_start + o,
            Self::PrevEnd(o) => prev_end + o,
            Self::At(t) => t,
        };
        t.max(0.0)
    }
}

/// One property transition within a track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
    pub from: PropValue,
    pub to: PropValue,
}

impl Segment {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    pub fn sample(&self, time: f64) -> PropValue {
        let p = if self.duration <= 0.0 {
            if time >= self.start { 1.0 } else { 0.0 }
        } else {
            ((time - self.start) / self.duration).clamp(0.0, 1.0)
        };
        PropValue {
            value: lerp(self.from.value, self.to.value, self.ease.apply(p)),
            unit: self.to.unit,
        }
    }
}

/// Every transition of one (target, property) pair, in start order.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub target: String,
    pub prop: String,
    pub base: PropValue,
    pub segments: Vec<Segment>,
}

impl Track {
    pub fn sample(&self, time: f64) -> PropValue {
        self.segments
            .iter()
            .rev()
            .find(|s| time >= s.start)
            .map_or(self.base, |s| s.sample(time))
    }
}

/// A labeled span of the timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Phase {
    pub label: String,
    pub start: f64,
    pub end: f64,
}

/// An ordered list of eased property transitions evaluated against one scalar time.
///
/// Start times are resolved once, in declaration order. Overlaps come from explicit positions,
/// never from concurrency.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    tracks: Vec<Track>,
    phases: Vec<Phase>,
    duration: f64,
}

impl Timeline {
    /// Resolve a definition against the current layout.
    #[tracing::instrument(level = "debug", skip_all, fields(steps = def.steps.len()))]
    pub fn build(def: &TimelineDef, layout: &(impl LayoutQuery + ?Sized)) -> GridFxResult<Self> {
        let mut tracks: Vec<Track> = Vec::new();
        let mut index: BTreeMap<(String, String), usize> = BTreeMap::new();

        for set in &def.set {
            for (prop, value) in &set.props {
                let value = value.resolve(layout)?;
                let key = (set.target.clone(), prop.clone());
                match index.get(&key) {
                    Some(&i) => tracks[i].base = value,
                    None => {
                        index.insert(key, tracks.len());
                        tracks.push(Track {
                            target: set.target.clone(),
                            prop: prop.clone(),
                            base: value,
                            segments: Vec::new(),
                        });
                    }
                }
            }
        }

        let mut end = 0.0_f64;
        let mut prev: Option<(f64, f64)> = None;
        let mut phases = Vec::new();

        for step in &def.steps {
            let position = match &step.position {
                Some(p) => Position::from_def(p)?,
                None => Position::default(),
            };
            let start = position.resolve(end, prev);
            let duration = step.duration.max(0.0);

            for (prop, value) in &step.props {
                let to = value.resolve(layout)?;
                let key = (step.target.clone(), prop.clone());
                let i = *index.entry(key).or_insert_with(|| {
                    tracks.push(Track {
                        target: step.target.clone(),
                        prop: prop.clone(),
                        base: implicit_base(prop, to),
                        segments: Vec::new(),
                    });
                    tracks.len() - 1
                });
                let track = &mut tracks[i];
                let from = track.segments.last().map_or(track.base, |s| s.to);
                let unit = PropValue::common_unit(from, to).map_err(|e| {
                    GridFxError::timeline(format!("{}.{prop}: {e}", step.target))
                })?;
                track.segments.push(Segment {
                    start,
                    duration,
                    ease: step.ease,
                    from: PropValue { unit, ..from },
                    to: PropValue { unit, ..to },
                });
                if track.base.unit == Unit::None {
                    track.base.unit = unit;
                }
            }

            if let Some(label) = &step.label {
                phases.push(Phase {
                    label: label.clone(),
                    start,
                    end: start + duration,
                });
            }
            prev = Some((start, start + duration));
            end = end.max(start + duration);
        }

        for track in &mut tracks {
            track.segments.sort_by(|a, b| a.start.total_cmp(&b.start));
        }

        Ok(Self {
            tracks,
            phases,
            duration: end,
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// The labeled phase that most recently started at `time`.
    pub fn phase_at(&self, time: f64) -> Option<&str> {
        self.phases
            .iter()
            .filter(|p| time >= p.start)
            .max_by(|a, b| a.start.total_cmp(&b.start))
            .map(|p| p.label.as_str())
    }

    pub fn sample(&self, time: f64) -> TargetValues {
        let mut out = TargetValues::new();
        for track in &self.tracks {
            out.entry(track.target.clone())
                .or_default()
                .insert(track.prop.clone(), track.sample(time));
        }
        out
    }

    /// Sample at a fraction of the total duration.
    pub fn sample_progress(&self, progress: f64) -> TargetValues {
        self.sample(progress.clamp(0.0, 1.0) * self.duration)
    }

    pub fn value(&self, target: &str, prop: &str, time: f64) -> Option<PropValue> {
        self.tracks
            .iter()
            .find(|t| t.target == target && t.prop == prop)
            .map(|t| t.sample(time))
    }
}

/// Starting value of a property no `set` mentioned.
fn implicit_base(prop: &str, to: PropValue) -> PropValue {
    let neutral = match prop {
        "opacity" | "scale" | "scaleX" | "scaleY" => 1.0,
        _ => 0.0,
    };
    PropValue {
        value: neutral,
        unit: to.unit,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/timeline.rs"]
mod tests;
