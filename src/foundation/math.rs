/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// One step of exponential smoothing: move `current` a fraction `factor` of the way to `target`.
pub fn approach(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

pub(crate) fn near(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// `x / y` floored, treating non-finite results as zero.
pub(crate) fn floor_div(x: f64, y: f64) -> f64 {
    let q = (x / y).floor();
    if q.is_finite() { q } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
