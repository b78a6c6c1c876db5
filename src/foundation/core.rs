use crate::foundation::error::{GridFxError, GridFxResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Integer pixel dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> GridFxResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridFxError::validation("Canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Backing-store size for a measured box: the canvas resolution follows the CSS box,
    /// rounded down, never smaller than one pixel.
    pub fn for_box(size: Size) -> Self {
        fn dim(v: f64) -> u32 {
            if v.is_finite() {
                v.floor().clamp(1.0, f64::from(u16::MAX)) as u32
            } else {
                1
            }
        }
        Self {
            width: dim(size.width),
            height: dim(size.height),
        }
    }

    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn rect(self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size())
    }
}

/// Monotonic host timestamp in milliseconds (the value a frame callback receives).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Millis(pub f64);

impl Millis {
    pub fn since(self, earlier: Millis) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    pub fn offset(self, ms: f64) -> Millis {
        Millis(self.0 + ms)
    }
}
