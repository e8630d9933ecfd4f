use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::api::LabelMeasurer;
use crate::error::{ToolkitError, ToolkitResult};
use crate::render::{Color, RectPrimitive, RenderFrame, Renderer};

const FONT_FAMILY: &str = "Sans";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub ticks_drawn: usize,
    pub labels_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ToolkitResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ToolkitResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ToolkitError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ToolkitResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ToolkitResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            append_rect_path(context, *rect);
            apply_color(context, rect.fill_color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            stats.rects_drawn += 1;
        }

        for tick in &frame.ticks {
            apply_color(context, tick.color);
            context.set_line_width(tick.stroke_width);
            context.move_to(tick.x, tick.top);
            context.line_to(tick.x, tick.bottom);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke tick", err))?;
            stats.ticks_drawn += 1;
        }

        for label in &frame.labels {
            let layout = pangocairo::functions::create_layout(context);
            layout.set_font_description(Some(&font_description(label.font_size_px)));
            layout.set_text(&label.text);

            let (label_width, _label_height) = layout.pixel_size();
            apply_color(context, label.color);
            context.move_to(label.left_for_width(f64::from(label_width)), label.top);
            pangocairo::functions::show_layout(context, &layout);
            stats.labels_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ToolkitResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ToolkitResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Label measurer backed by Pango text shaping.
///
/// Widths match what `CairoRenderer` draws for the same text and size.
#[derive(Debug)]
pub struct PangoLabelMeasurer {
    context: Context,
}

impl PangoLabelMeasurer {
    pub fn new() -> ToolkitResult<Self> {
        let surface = ImageSurface::create(Format::ARgb32, 1, 1)
            .map_err(|err| map_backend_error("failed to create measuring surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create measuring context", err))?;
        Ok(Self { context })
    }
}

impl LabelMeasurer for PangoLabelMeasurer {
    fn measure_width_px(&self, text: &str, font_size_px: f64) -> f64 {
        let layout = pangocairo::functions::create_layout(&self.context);
        layout.set_font_description(Some(&font_description(font_size_px)));
        layout.set_text(text);
        let (width, _height) = layout.pixel_size();
        f64::from(width)
    }
}

fn font_description(font_size_px: f64) -> FontDescription {
    FontDescription::from_string(&format!("{FONT_FAMILY} {font_size_px}"))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ToolkitError {
    ToolkitError::InvalidData(format!("{prefix}: {err}"))
}
