use crate::error::{ToolkitError, ToolkitResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Same color with a different opacity, e.g. for dimmed minor ticks.
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> ToolkitResult<()> {
        let channels = [self.red, self.green, self.blue, self.alpha];
        if channels
            .iter()
            .any(|value| !value.is_finite() || !(0.0..=1.0).contains(value))
        {
            return Err(ToolkitError::InvalidData(format!(
                "color channels must be finite and in [0, 1], got {channels:?}"
            )));
        }
        Ok(())
    }
}

/// Vertical tick stroke under the slider track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStroke {
    pub x: f64,
    pub top: f64,
    pub bottom: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl TickStroke {
    #[must_use]
    pub const fn new(x: f64, top: f64, bottom: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x,
            top,
            bottom,
            stroke_width,
            color,
        }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.bottom - self.top
    }

    pub fn validate(self) -> ToolkitResult<()> {
        ensure_finite("tick", &[self.x, self.top, self.bottom])?;
        if self.bottom < self.top {
            return Err(ToolkitError::InvalidData(format!(
                "tick at x={} ends above its top",
                self.x
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ToolkitError::InvalidData(
                "tick stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Filled rectangle, used for the track, the selected range bar and the thumbs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub fill_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            corner_radius: 0.0,
            fill_color,
        }
    }

    /// Square centered on `(center_x, center_y)`, as drawn for thumbs.
    #[must_use]
    pub const fn centered_square(center_x: f64, center_y: f64, size: f64, fill_color: Color) -> Self {
        Self::new(
            center_x - size / 2.0,
            center_y - size / 2.0,
            size,
            size,
            fill_color,
        )
    }

    #[must_use]
    pub const fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn validate(self) -> ToolkitResult<()> {
        ensure_finite("rect", &[self.x, self.y, self.width, self.height, self.corner_radius])?;
        if self.width < 0.0 || self.height < 0.0 || self.corner_radius < 0.0 {
            return Err(ToolkitError::InvalidData(
                "rect size and corner radius must be >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Where a label sits relative to its anchor x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAlign {
    /// Label starts at the anchor (left full-extent label).
    Start,
    /// Label is centered on the anchor (ticks and thumbs).
    Center,
    /// Label ends at the anchor (right full-extent label).
    End,
}

/// Time label in pixel space; `top` is the upper edge of the text box.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPrimitive {
    pub text: String,
    pub anchor_x: f64,
    pub top: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub align: LabelAlign,
}

impl LabelPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        anchor_x: f64,
        top: f64,
        font_size_px: f64,
        color: Color,
        align: LabelAlign,
    ) -> Self {
        Self {
            text: text.into(),
            anchor_x,
            top,
            font_size_px,
            color,
            align,
        }
    }

    /// Left edge of the label once it is `width_px` wide.
    #[must_use]
    pub fn left_for_width(&self, width_px: f64) -> f64 {
        match self.align {
            LabelAlign::Start => self.anchor_x,
            LabelAlign::Center => self.anchor_x - width_px / 2.0,
            LabelAlign::End => self.anchor_x - width_px,
        }
    }

    pub fn validate(&self) -> ToolkitResult<()> {
        if self.text.is_empty() {
            return Err(ToolkitError::InvalidData(
                "label text must not be empty".to_owned(),
            ));
        }
        ensure_finite("label", &[self.anchor_x, self.top])?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ToolkitError::InvalidData(format!(
                "label `{}` needs a finite font size > 0",
                self.text
            )));
        }
        self.color.validate()
    }
}

fn ensure_finite(kind: &str, values: &[f64]) -> ToolkitResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        return Ok(());
    }
    Err(ToolkitError::InvalidData(format!(
        "{kind} geometry must be finite, got {values:?}"
    )))
}
