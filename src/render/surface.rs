use crate::foundation::{
    color::Rgba,
    core::{Canvas, Rect},
};

/// Immediate-mode 2D drawing surface consumed by the painter.
///
/// Coordinates are surface-local pixels. Colors are straight alpha and blend over whatever is
/// already drawn. Stroke and fill state persist until changed.
pub trait DrawSurface {
    fn canvas(&self) -> Canvas;

    /// Match the backing store to a new container size. Contents are discarded.
    fn resize(&mut self, canvas: Canvas);

    fn clear(&mut self, rect: Rect);

    fn set_stroke(&mut self, color: Rgba, width: f64);

    fn stroke_rect(&mut self, rect: Rect);

    fn set_fill(&mut self, color: Rgba);

    fn fill_rect(&mut self, rect: Rect);

    /// Marks the end of one painted frame.
    fn present(&mut self) {}
}
