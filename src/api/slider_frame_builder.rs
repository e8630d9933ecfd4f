use tracing::trace;

use crate::error::ToolkitResult;
use crate::render::{
    Color, LabelAlign, LabelPrimitive, RectPrimitive, RenderFrame, Renderer, TickStroke,
};

use super::{LabelMode, TickLayout, TickLayoutOptions, TimeSlider, layout_tick_marks};

/// Colors and sizes for one slider draw pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderStyle {
    pub track_color: Color,
    pub selection_color: Color,
    pub minor_tick_color: Color,
    pub major_tick_color: Color,
    pub thumb_color: Color,
    pub pinned_thumb_color: Color,
    pub label_color: Color,
    pub track_thickness_px: f64,
    pub tick_stroke_width_px: f64,
    pub minor_tick_height_px: f64,
    pub major_tick_height_px: f64,
    pub thumb_size_px: f64,
    pub label_gap_px: f64,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            track_color: Color::rgb(0.78, 0.80, 0.83),
            selection_color: Color::rgb(0.16, 0.45, 0.82),
            minor_tick_color: Color::rgba(0.35, 0.38, 0.42, 0.6),
            major_tick_color: Color::rgb(0.20, 0.22, 0.25),
            thumb_color: Color::rgb(0.16, 0.45, 0.82),
            pinned_thumb_color: Color::rgb(0.45, 0.47, 0.50),
            label_color: Color::rgb(0.10, 0.10, 0.10),
            track_thickness_px: 4.0,
            tick_stroke_width_px: 1.0,
            minor_tick_height_px: 4.0,
            major_tick_height_px: 8.0,
            thumb_size_px: 14.0,
            label_gap_px: 2.0,
        }
    }
}

impl<R: Renderer> TimeSlider<R> {
    #[must_use]
    pub fn style(&self) -> SliderStyle {
        self.style
    }

    pub fn set_style(&mut self, style: SliderStyle) {
        self.style = style;
    }

    /// Tick layout for the current steps and track width.
    ///
    /// Majors are only searched for when labels sit under ticks.
    #[must_use]
    pub fn tick_layout(&self) -> TickLayout {
        let options = TickLayoutOptions {
            min_tick_spacing_px: self.config.min_tick_spacing_px,
            label_padding_px: self.config.label_padding_px,
            label_font_size_px: self.config.label_font_size_px,
            select_major_ticks: self.config.label_mode == LabelMode::Ticks,
        };
        layout_tick_marks(
            self.time_steps(),
            self.config.track_width_px(),
            options,
            self.measurer.as_ref(),
            |time| self.format_time_label(time),
        )
    }

    /// Builds the backend-agnostic scene: track, selection bar, ticks,
    /// thumbs, and labels. An unconfigured slider yields an empty frame.
    pub fn build_render_frame(&self) -> ToolkitResult<RenderFrame> {
        let viewport = self.config.viewport;
        let mut frame = RenderFrame::new(viewport);
        let (Some(scale), Some((start_x, end_x))) = (self.track_scale(), self.thumb_offsets())
        else {
            return Ok(frame);
        };

        let style = self.style;
        let inset = self.config.track_inset_px;
        let font_size = self.config.label_font_size_px;
        let track_y = f64::from(viewport.height) * 0.5;
        let track_left = inset;
        let track_right = inset + scale.track_width_px();
        let half_thickness = style.track_thickness_px / 2.0;

        frame = frame.with_rect(RectPrimitive::new(
            track_left,
            track_y - half_thickness,
            scale.track_width_px(),
            style.track_thickness_px,
            style.track_color,
        ));
        if self.range_enabled {
            frame = frame.with_rect(RectPrimitive::new(
                start_x,
                track_y - half_thickness,
                (end_x - start_x).max(0.0),
                style.track_thickness_px,
                style.selection_color,
            ));
        }

        let layout = self.tick_layout();
        let tick_top = track_y + style.thumb_size_px / 2.0 + style.label_gap_px;
        let tick_label_y = tick_top + style.major_tick_height_px + style.label_gap_px;
        for tick in &layout.ticks {
            let x = inset + tick.offset_px;
            let (height, color) = if tick.is_major || tick.is_endpoint {
                (style.major_tick_height_px, style.major_tick_color)
            } else {
                (style.minor_tick_height_px, style.minor_tick_color)
            };
            frame = frame.with_tick(TickStroke::new(
                x,
                tick_top,
                tick_top + height,
                style.tick_stroke_width_px,
                color,
            ));
            let covered_by_extent_label =
                tick.is_endpoint && self.config.full_extent_labels_visible;
            if tick.is_major && !covered_by_extent_label {
                frame = frame.with_label(LabelPrimitive::new(
                    self.format_time_label(tick.time),
                    x,
                    tick_label_y,
                    font_size,
                    style.label_color,
                    LabelAlign::Center,
                ));
            }
        }

        if self.config.full_extent_labels_visible {
            let full_extent = scale.extent();
            frame = frame
                .with_label(LabelPrimitive::new(
                    self.format_time_label(full_extent.start()),
                    track_left,
                    tick_label_y,
                    font_size,
                    style.label_color,
                    LabelAlign::Start,
                ))
                .with_label(LabelPrimitive::new(
                    self.format_time_label(full_extent.end()),
                    track_right,
                    tick_label_y,
                    font_size,
                    style.label_color,
                    LabelAlign::End,
                ));
        }

        let thumb_top = track_y - style.thumb_size_px / 2.0;
        let thumbs = if self.range_enabled {
            vec![(start_x, self.start_pinned), (end_x, self.end_pinned)]
        } else {
            vec![(start_x, self.start_pinned)]
        };
        for (x, pinned) in &thumbs {
            let color = if *pinned {
                style.pinned_thumb_color
            } else {
                style.thumb_color
            };
            frame = frame.with_rect(
                RectPrimitive::centered_square(*x, track_y, style.thumb_size_px, color)
                    .with_corner_radius(style.thumb_size_px / 2.0),
            );
        }

        let thumb_label_extent = self
            .current_extent()
            .filter(|_| self.config.label_mode == LabelMode::Thumbs);
        if let Some(extent) = thumb_label_extent {
            let label_y = (thumb_top - style.label_gap_px - font_size).max(0.0);
            frame = frame.with_label(LabelPrimitive::new(
                self.format_time_label(extent.start()),
                start_x,
                label_y,
                font_size,
                style.label_color,
                LabelAlign::Center,
            ));
            if self.range_enabled && !extent.is_moment() {
                frame = frame.with_label(LabelPrimitive::new(
                    self.format_time_label(extent.end()),
                    end_x,
                    label_y,
                    font_size,
                    style.label_color,
                    LabelAlign::Center,
                ));
            }
        }

        trace!(
            rects = frame.rects.len(),
            ticks = frame.ticks.len(),
            labels = frame.labels.len(),
            "built time slider frame"
        );
        frame.validate()?;
        Ok(frame)
    }

    /// Builds the current frame and hands it to the renderer.
    pub fn render(&mut self) -> ToolkitResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }
}

#[cfg(feature = "cairo-backend")]
impl<R: Renderer + crate::render::CairoContextRenderer> TimeSlider<R> {
    /// Draws the current frame into an external Cairo context, for example
    /// inside a GTK draw callback.
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ToolkitResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }
}
