mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LabelAlign, LabelPrimitive, RectPrimitive, TickStroke};

use crate::error::ToolkitResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from stepping and playback logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ToolkitResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer, PangoLabelMeasurer};
