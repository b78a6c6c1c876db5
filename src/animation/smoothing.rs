use crate::foundation::{
    error::{GridFxError, GridFxResult},
    math::{approach, near},
};

/// Exponential smoothing toward a target, applied once per frame tick.
///
/// This is not a fixed-duration tween: each tick closes `lerp_factor` of the remaining gap,
/// and a value within `epsilon` of its target is snapped onto it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Smoothing {
    pub lerp_factor: f64,
    pub epsilon: f64,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self {
            lerp_factor: 0.15,
            epsilon: 0.01,
        }
    }
}

impl Smoothing {
    pub fn new(lerp_factor: f64, epsilon: f64) -> GridFxResult<Self> {
        let s = Self {
            lerp_factor,
            epsilon,
        };
        s.validate()?;
        Ok(s)
    }

    pub fn validate(&self) -> GridFxResult<()> {
        if !(self.lerp_factor > 0.0 && self.lerp_factor <= 1.0) {
            return Err(GridFxError::validation(
                "smoothing lerp_factor must be in (0, 1]",
            ));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(GridFxError::validation(
                "smoothing epsilon must be finite and > 0",
            ));
        }
        Ok(())
    }

    pub fn step(&self, current: f64, target: f64) -> f64 {
        approach(current, target, self.lerp_factor)
    }

    pub fn settled(&self, current: f64, target: f64) -> bool {
        near(current, target, self.epsilon)
    }

    /// Upper bound on ticks needed to settle a gap of `distance` (ignoring the final snap).
    pub fn ticks_to_settle(&self, distance: f64) -> u32 {
        let distance = distance.abs();
        if distance < self.epsilon || self.lerp_factor >= 1.0 {
            return 1;
        }
        let keep = 1.0 - self.lerp_factor;
        let n = (self.epsilon / distance).ln() / keep.ln();
        n.ceil().max(1.0) as u32
    }
}
