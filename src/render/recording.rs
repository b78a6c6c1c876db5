use crate::{
    foundation::{
        color::Rgba,
        core::{Canvas, Rect},
    },
    render::surface::DrawSurface,
};

/// One call made against a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Resize(Canvas),
    Clear(Rect),
    SetStroke { color: Rgba, width: f64 },
    StrokeRect(Rect),
    SetFill(Rgba),
    FillRect(Rect),
    Present,
}

/// A surface that records draw calls instead of rasterizing them.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    commands: Vec<DrawCmd>,
    frames: usize,
}

impl RecordingSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            commands: Vec::new(),
            frames: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }

    /// Number of presented frames so far.
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Commands of the most recently presented frame (from its clear up to its present).
    pub fn last_frame(&self) -> &[DrawCmd] {
        let end = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCmd::Present)
            .map_or(0, |i| i + 1);
        let start = self.commands[..end]
            .iter()
            .rposition(|c| matches!(c, DrawCmd::Clear(_)))
            .unwrap_or(end);
        &self.commands[start..end]
    }

    pub fn fill_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::FillRect(r) => Some(*r),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn resize(&mut self, canvas: Canvas) {
        self.canvas = canvas;
        self.commands.push(DrawCmd::Resize(canvas));
    }

    fn clear(&mut self, rect: Rect) {
        self.commands.push(DrawCmd::Clear(rect));
    }

    fn set_stroke(&mut self, color: Rgba, width: f64) {
        self.commands.push(DrawCmd::SetStroke { color, width });
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCmd::StrokeRect(rect));
    }

    fn set_fill(&mut self, color: Rgba) {
        self.commands.push(DrawCmd::SetFill(color));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCmd::FillRect(rect));
    }

    fn present(&mut self) {
        self.frames += 1;
        self.commands.push(DrawCmd::Present);
    }
}
