use crate::core::Viewport;
use crate::error::{ToolkitError, ToolkitResult};
use crate::render::{LabelPrimitive, RectPrimitive, TickStroke};

/// Backend-agnostic scene for one slider draw pass.
///
/// Backends paint rects (track, selection bar, thumbs) first, then tick
/// strokes, then labels. Ticks are kept in step order, so their x positions
/// never decrease.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub rects: Vec<RectPrimitive>,
    pub ticks: Vec<TickStroke>,
    pub labels: Vec<LabelPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            rects: Vec::new(),
            ticks: Vec::new(),
            labels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_tick(mut self, tick: TickStroke) -> Self {
        self.ticks.push(tick);
        self
    }

    /// Adds a label; empty text (a formatter that hides a time) is skipped.
    #[must_use]
    pub fn with_label(mut self, label: LabelPrimitive) -> Self {
        if !label.text.is_empty() {
            self.labels.push(label);
        }
        self
    }

    pub fn validate(&self) -> ToolkitResult<()> {
        if !self.viewport.is_valid() {
            return Err(ToolkitError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for rect in &self.rects {
            rect.validate()?;
        }
        for tick in &self.ticks {
            tick.validate()?;
        }
        if let Some(pair) = self.ticks.windows(2).find(|pair| pair[1].x < pair[0].x) {
            return Err(ToolkitError::InvalidData(format!(
                "tick at x={} is drawn after tick at x={}",
                pair[1].x, pair[0].x
            )));
        }
        for label in &self.labels {
            label.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty() && self.ticks.is_empty() && self.labels.is_empty()
    }

    #[must_use]
    pub fn label_texts(&self) -> Vec<&str> {
        self.labels.iter().map(|label| label.text.as_str()).collect()
    }
}
