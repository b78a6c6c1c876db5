use crate::animation::ease::Ease;

/// Values that can be linearly interpolated.
pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// A fixed-duration eased transition from one value to another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    elapsed_ms: f64,
    duration_ms: f64,
    ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Copy,
{
    pub fn new(from: T, to: T, duration_ms: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            elapsed_ms: 0.0,
            duration_ms: sanitize_duration(duration_ms),
            ease,
        }
    }

    pub fn value(&self) -> T {
        T::lerp(&self.from, &self.to, self.ease.apply(self.progress()))
    }

    pub fn target(&self) -> T {
        self.to
    }

    /// Linear (un-eased) completion in `0..=1`; zero-length tweens are always complete.
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_done(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn advance(&mut self, dt_ms: f64) -> T {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        }
        self.value()
    }

    /// Restart toward a new target from wherever the tween currently is.
    pub fn retarget(&mut self, to: T, duration_ms: f64, ease: Ease) {
        *self = Self::new(self.value(), to, duration_ms, ease);
    }
}

fn sanitize_duration(ms: f64) -> f64 {
    if ms.is_finite() { ms.max(0.0) } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
