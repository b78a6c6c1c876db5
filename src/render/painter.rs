use crate::{
    cells::state::CellState,
    foundation::{
        color::Rgba,
        core::{Point, Rect, Size},
    },
    grid::geometry::GridGeometry,
    render::surface::DrawSurface,
};

/// Channels below this are treated as invisible and not drawn.
pub const VISIBLE_EPSILON: f64 = 0.01;

/// Outline drawn around the highlight rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HighlightOutline {
    /// Outline alpha relative to the cell's current opacity.
    pub alpha_factor: f64,
    pub width: f64,
}

/// Resolved paint style. A `None` color means that layer is skipped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridStyle {
    pub grid_line: Option<Rgba>,
    pub grid_line_width: f64,
    /// Per-cell border that fades with the cell's border opacity.
    pub accent_border: Option<Rgba>,
    pub accent_border_width: f64,
    pub highlight: Option<Rgba>,
    /// Multiplier applied to the highlight fill on top of the cell opacity.
    pub highlight_opacity: f64,
    pub highlight_outline: Option<HighlightOutline>,
}

/// Clear the surface and draw every cell of the grid, then present.
///
/// All cells must already be advanced for this frame; this pass only reads them.
pub fn paint_grid(
    surface: &mut dyn DrawSurface,
    geometry: &GridGeometry,
    cells: &[CellState],
    style: &GridStyle,
) {
    surface.clear(surface.canvas().rect());

    for (index, rect) in geometry.cells() {
        let Some(cell) = cells.get(index) else {
            continue;
        };

        if let Some(line) = style.grid_line {
            surface.set_stroke(line, style.grid_line_width);
            surface.stroke_rect(rect);
        }

        if let Some(accent) = style.accent_border
            && cell.border_opacity > VISIBLE_EPSILON
        {
            surface.set_stroke(accent.fade(cell.border_opacity), style.accent_border_width);
            surface.stroke_rect(rect);
        }

        if cell.opacity > VISIBLE_EPSILON
            && let Some(highlight) = style.highlight
        {
            let scaled = scale_about_center(rect, cell.scale);
            surface.set_fill(highlight.fade(cell.opacity * style.highlight_opacity));
            surface.fill_rect(scaled);

            if let Some(outline) = style.highlight_outline {
                surface.set_stroke(
                    highlight.fade(cell.opacity * outline.alpha_factor),
                    outline.width,
                );
                surface.stroke_rect(scaled);
            }
        }
    }

    surface.present();
}

/// Scale `rect` by `scale` about its own center.
pub fn scale_about_center(rect: Rect, scale: f64) -> Rect {
    let center: Point = rect.center();
    let size = Size::new(rect.width() * scale, rect.height() * scale);
    Rect::from_center_size(center, size)
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
