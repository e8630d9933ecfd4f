/// Measures rendered label width for tick collision checks.
///
/// Implementations must be deterministic: the major-tick search picks the
/// first non-colliding candidate, so different widths pick different ticks.
pub trait LabelMeasurer {
    fn measure_width_px(&self, text: &str, font_size_px: f64) -> f64;
}

/// Backend-independent width estimate from per-glyph advance ratios.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedLabelMeasurer;

impl LabelMeasurer for EstimatedLabelMeasurer {
    fn measure_width_px(&self, text: &str, font_size_px: f64) -> f64 {
        estimate_label_text_width_px(text, font_size_px)
    }
}

/// Every glyph advances by the same width, regardless of font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidthLabelMeasurer {
    pub char_width_px: f64,
}

impl FixedWidthLabelMeasurer {
    #[must_use]
    pub const fn new(char_width_px: f64) -> Self {
        Self { char_width_px }
    }
}

impl LabelMeasurer for FixedWidthLabelMeasurer {
    fn measure_width_px(&self, text: &str, _font_size_px: f64) -> f64 {
        text.chars().count() as f64 * self.char_width_px
    }
}

pub(super) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    if text.is_empty() || !font_size_px.is_finite() || font_size_px <= 0.0 {
        return 0.0;
    }
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' => 0.34,
            '-' | '+' | '/' => 0.42,
            ' ' => 0.33,
            'M' | 'W' | 'm' | 'w' => 0.86,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}
