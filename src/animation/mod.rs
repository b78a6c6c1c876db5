//! Easing curves and the two interpolation rules used by the core: per-tick exponential
//! smoothing and fixed-duration tweens.

pub(crate) mod ease;
pub(crate) mod smoothing;
pub(crate) mod tween;
