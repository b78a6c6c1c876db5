use std::str::FromStr;

use crate::foundation::error::{GridFxError, GridFxResult};

/// Straight-alpha color with normalized `0..=1` channels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            a,
        )
    }

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
    pub fn parse(s: &str) -> GridFxResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).map_err(|e| GridFxError::validation(format!("color '{s}': {e}")));
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(args)
                .map_err(|e| GridFxError::validation(format!("color '{s}': {e}")));
        }
        Err(GridFxError::validation(format!(
            "color '{s}': expected #hex, rgb(...) or rgba(...)"
        )))
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Multiply the alpha channel, the way highlight layers fade with cell opacity.
    pub fn fade(self, factor: f64) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Mix toward white by `amount` (0 keeps the color, 1 yields white).
    pub fn lighten(self, amount: f64) -> Self {
        let t = amount.clamp(0.0, 1.0);
        Self {
            r: self.r + (1.0 - self.r) * t,
            g: self.g + (1.0 - self.g) * t,
            b: self.b + (1.0 - self.b) * t,
            a: self.a,
        }
    }

    pub fn is_invisible(self) -> bool {
        self.a <= 0.0
    }

    /// Straight (non-premultiplied) RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }
}

impl FromStr for Rgba {
    type Err = GridFxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_hex(s: &str) -> Result<Rgba, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }
    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }

    let (r, g, b, a) = match s.len() {
        3 => {
            let expand = |i: usize| hex_byte(&s[i..i + 1].repeat(2));
            (expand(0)?, expand(1)?, expand(2)?, 255)
        }
        6 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => return Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA".to_owned()),
    };
    Ok(Rgba::from_rgba8(r, g, b, f64::from(a) / 255.0))
}

fn parse_functional(args: &str) -> Result<Rgba, String> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(format!("expected 3 or 4 components, got {}", parts.len()));
    }
    let mut rgb = [0.0f64; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        let v: f64 = part
            .parse()
            .map_err(|_| format!("invalid channel \"{part}\""))?;
        if !v.is_finite() {
            return Err(format!("invalid channel \"{part}\""));
        }
        *slot = v.clamp(0.0, 255.0) / 255.0;
    }
    let a = match parts.get(3) {
        None => 1.0,
        Some(part) => {
            let v: f64 = part
                .parse()
                .map_err(|_| format!("invalid alpha \"{part}\""))?;
            if !v.is_finite() {
                return Err(format!("invalid alpha \"{part}\""));
            }
            v.clamp(0.0, 1.0)
        }
    };
    Ok(Rgba::new(rgb[0], rgb[1], rgb[2], a))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
