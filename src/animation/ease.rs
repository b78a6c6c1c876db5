use crate::foundation::error::{GridFxError, GridFxResult};

/// Easing curves, named after the identifiers the page's timelines use
/// (`none`, `power1`..`power4`, `expo`, each with `.in` / `.out` / `.inOut`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InExpo,
    OutExpo,
    InOutExpo,
}

impl Ease {
    pub const ALL: [Ease; 16] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::InQuint,
        Ease::OutQuint,
        Ease::InOutQuint,
        Ease::InExpo,
        Ease::OutExpo,
        Ease::InOutExpo,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => power_in(t, 2),
            Self::OutQuad => power_out(t, 2),
            Self::InOutQuad => power_in_out(t, 2),
            Self::InCubic => power_in(t, 3),
            Self::OutCubic => power_out(t, 3),
            Self::InOutCubic => power_in_out(t, 3),
            Self::InQuart => power_in(t, 4),
            Self::OutQuart => power_out(t, 4),
            Self::InOutQuart => power_in_out(t, 4),
            Self::InQuint => power_in(t, 5),
            Self::OutQuint => power_out(t, 5),
            Self::InOutQuint => power_in_out(t, 5),
            Self::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Self::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::InOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }

    /// Parse an easing identifier. A bare `powerN` / `expo` means the `.out` flavor.
    pub fn parse(name: &str) -> GridFxResult<Self> {
        let name = name.trim();
        let (family, flavor) = match name.split_once('.') {
            Some((f, v)) => (f, v),
            None => (name, "out"),
        };
        let family = family.to_ascii_lowercase();
        let flavor = flavor.to_ascii_lowercase();

        if matches!(family.as_str(), "none" | "linear" | "power0") {
            return Ok(Self::Linear);
        }

        let triple = match family.as_str() {
            "power1" | "quad" => [Self::InQuad, Self::OutQuad, Self::InOutQuad],
            "power2" | "cubic" => [Self::InCubic, Self::OutCubic, Self::InOutCubic],
            "power3" | "quart" => [Self::InQuart, Self::OutQuart, Self::InOutQuart],
            "power4" | "quint" | "strong" => [Self::InQuint, Self::OutQuint, Self::InOutQuint],
            "expo" => [Self::InExpo, Self::OutExpo, Self::InOutExpo],
            _ => return Err(GridFxError::animation(format!("unknown ease '{name}'"))),
        };
        match flavor.as_str() {
            "in" => Ok(triple[0]),
            "out" => Ok(triple[1]),
            "inout" => Ok(triple[2]),
            _ => Err(GridFxError::animation(format!(
                "unknown ease flavor '{flavor}' in '{name}'"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "none",
            Self::InQuad => "power1.in",
            Self::OutQuad => "power1.out",
            Self::InOutQuad => "power1.inOut",
            Self::InCubic => "power2.in",
            Self::OutCubic => "power2.out",
            Self::InOutCubic => "power2.inOut",
            Self::InQuart => "power3.in",
            Self::OutQuart => "power3.out",
            Self::InOutQuart => "power3.inOut",
            Self::InQuint => "power4.in",
            Self::OutQuint => "power4.out",
            Self::InOutQuint => "power4.inOut",
            Self::InExpo => "expo.in",
            Self::OutExpo => "expo.out",
            Self::InOutExpo => "expo.inOut",
        }
    }
}

impl Default for Ease {
    /// Tweens without an explicit ease use `power1.out`.
    fn default() -> Self {
        Self::OutQuad
    }
}

impl TryFrom<String> for Ease {
    type Error = GridFxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.name().to_owned()
    }
}

fn power_in(t: f64, p: i32) -> f64 {
    t.powi(p)
}

fn power_out(t: f64, p: i32) -> f64 {
    1.0 - (1.0 - t).powi(p)
}

fn power_in_out(t: f64, p: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(p - 1) * t.powi(p)
    } else {
        1.0 - ((-2.0 * t + 2.0).powi(p) / 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
