use std::path::Path;

use crate::{
    foundation::{
        color::Rgba,
        core::{Canvas, Rect},
        error::{GridFxError, GridFxResult},
    },
    render::surface::DrawSurface,
};

/// Pixels of one presented frame, RGBA8 row-major.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Convert to straight alpha in place.
    pub fn unpremultiply(&mut self) {
        if !self.premultiplied {
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = px[3];
            if a == 0 || a == 255 {
                continue;
            }
            let a32 = u32::from(a);
            let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a32 / 2) / a32).min(255) as u8 };
            px[0] = un(px[0]);
            px[1] = un(px[1]);
            px[2] = un(px[2]);
        }
        self.premultiplied = false;
    }

    pub fn save_png(&self, path: &Path) -> GridFxResult<()> {
        let mut straight = self.clone();
        straight.unpremultiply();
        image::save_buffer_with_format(
            path,
            &straight.data,
            straight.width,
            straight.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| GridFxError::Other(anyhow::anyhow!("write png '{}': {e}", path.display())))
    }
}

/// CPU raster [`DrawSurface`] backed by `vello_cpu`.
///
/// Draw calls are recorded into a render context and rasterized into the pixmap on
/// [`DrawSurface::present`]. `clear` always clears the whole surface to the background.
pub struct RasterSurface {
    canvas: Canvas,
    background: [u8; 4],
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    stroke: (Rgba, f64),
    fill: Rgba,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("canvas", &self.canvas)
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

impl RasterSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self::with_background(canvas, Rgba::TRANSPARENT)
    }

    /// Dimensions above `u16::MAX` are clamped; [`DrawSurface::canvas`] reports the clamped size.
    pub fn with_background(canvas: Canvas, background: Rgba) -> Self {
        let (canvas, w, h) = backing(canvas);
        let [r, g, b, a] = background.to_rgba8();
        let mut surface = Self {
            canvas,
            background: premul_rgba8(r, g, b, a),
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            stroke: (Rgba::TRANSPARENT, 1.0),
            fill: Rgba::TRANSPARENT,
        };
        surface.clear_pixmap();
        surface
    }

    /// Copy of the last presented frame (premultiplied).
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn clear_pixmap(&mut self) {
        let bg = self.background;
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&bg);
        }
    }

    fn set_paint(&mut self, color: Rgba) {
        let [r, g, b, a] = color.to_rgba8();
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    }
}

impl DrawSurface for RasterSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn resize(&mut self, canvas: Canvas) {
        let (canvas, w, h) = backing(canvas);
        self.canvas = canvas;
        self.ctx = vello_cpu::RenderContext::new(w, h);
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        self.clear_pixmap();
    }

    fn clear(&mut self, _rect: Rect) {
        self.ctx.reset();
    }

    fn set_stroke(&mut self, color: Rgba, width: f64) {
        self.stroke = (color, width);
    }

    fn stroke_rect(&mut self, rect: Rect) {
        let (color, width) = self.stroke;
        if color.is_invisible() || width <= 0.0 {
            return;
        }
        self.set_paint(color);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_rect(&rect_to_cpu(rect));
    }

    fn set_fill(&mut self, color: Rgba) {
        self.fill = color;
    }

    fn fill_rect(&mut self, rect: Rect) {
        if self.fill.is_invisible() {
            return;
        }
        self.set_paint(self.fill);
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    fn present(&mut self) {
        self.clear_pixmap();
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }
}

/// Pixmap dimensions are u16; the stored canvas must match what the pixmap holds.
fn backing(canvas: Canvas) -> (Canvas, u16, u16) {
    let w = u16::try_from(canvas.width).unwrap_or(u16::MAX);
    let h = u16::try_from(canvas.height).unwrap_or(u16::MAX);
    let clamped = Canvas {
        width: u32::from(w),
        height: u32::from(h),
    };
    (clamped, w, h)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let af = (a as u16) + 1;
    let premul = |c: u8| -> u8 { (((c as u16) * af) >> 8) as u8 };
    [premul(r), premul(g), premul(b), a]
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
