use crate::error::ToolkitResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless slider usage.
///
/// It still validates frame content so tests catch invalid geometry
/// before a real backend is involved.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_rect_count: usize,
    pub last_tick_count: usize,
    pub last_label_count: usize,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ToolkitResult<()> {
        frame.validate()?;
        self.last_rect_count = frame.rects.len();
        self.last_tick_count = frame.ticks.len();
        self.last_label_count = frame.labels.len();
        self.frames_rendered += 1;
        Ok(())
    }
}
