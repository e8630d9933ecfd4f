use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ToolkitError, ToolkitResult};

/// Which labels the slider renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    None,
    /// Labels follow the current-extent thumbs.
    #[default]
    Thumbs,
    /// Labels sit under an evenly spaced subset of major ticks.
    Ticks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackDirection {
    #[default]
    Forward,
    Backward,
}

impl PlaybackDirection {
    #[must_use]
    pub const fn step_sign(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// What playback does when the selection cannot advance any further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackLoopMode {
    /// Stop playback.
    None,
    /// Wrap the moving thumb(s) back to the opposite end and keep the direction.
    #[default]
    Repeat,
    /// Flip the direction and keep playing.
    Reverse,
}

/// Public slider bootstrap configuration.
///
/// Serializable so host applications can persist slider setup alongside
/// their map documents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSliderConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub label_mode: LabelMode,
    #[serde(default = "default_full_extent_labels_visible")]
    pub full_extent_labels_visible: bool,
    #[serde(default)]
    pub playback_direction: PlaybackDirection,
    #[serde(default)]
    pub loop_mode: PlaybackLoopMode,
    #[serde(default = "default_playback_interval_seconds")]
    pub playback_interval_seconds: f64,
    #[serde(default = "default_min_tick_spacing_px")]
    pub min_tick_spacing_px: f64,
    #[serde(default = "default_label_padding_px")]
    pub label_padding_px: f64,
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
    #[serde(default = "default_track_inset_px")]
    pub track_inset_px: f64,
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default = "default_time_step_count")]
    pub default_time_step_count: usize,
}

impl TimeSliderConfig {
    /// Creates a config with default style and playback settings.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            label_mode: LabelMode::default(),
            full_extent_labels_visible: default_full_extent_labels_visible(),
            playback_direction: PlaybackDirection::default(),
            loop_mode: PlaybackLoopMode::default(),
            playback_interval_seconds: default_playback_interval_seconds(),
            min_tick_spacing_px: default_min_tick_spacing_px(),
            label_padding_px: default_label_padding_px(),
            label_font_size_px: default_label_font_size_px(),
            track_inset_px: default_track_inset_px(),
            utc_offset_minutes: 0,
            default_time_step_count: default_time_step_count(),
        }
    }

    #[must_use]
    pub fn with_label_mode(mut self, mode: LabelMode) -> Self {
        self.label_mode = mode;
        self
    }

    #[must_use]
    pub fn with_full_extent_labels_visible(mut self, visible: bool) -> Self {
        self.full_extent_labels_visible = visible;
        self
    }

    #[must_use]
    pub fn with_playback_direction(mut self, direction: PlaybackDirection) -> Self {
        self.playback_direction = direction;
        self
    }

    #[must_use]
    pub fn with_loop_mode(mut self, mode: PlaybackLoopMode) -> Self {
        self.loop_mode = mode;
        self
    }

    /// Sets the delay between two playback steps.
    #[must_use]
    pub fn with_playback_interval_seconds(mut self, seconds: f64) -> Self {
        self.playback_interval_seconds = seconds;
        self
    }

    /// Sets the minimum horizontal gap required to draw one tick per step.
    #[must_use]
    pub fn with_min_tick_spacing_px(mut self, spacing_px: f64) -> Self {
        self.min_tick_spacing_px = spacing_px;
        self
    }

    #[must_use]
    pub fn with_label_padding_px(mut self, padding_px: f64) -> Self {
        self.label_padding_px = padding_px;
        self
    }

    #[must_use]
    pub fn with_label_font_size_px(mut self, font_size_px: f64) -> Self {
        self.label_font_size_px = font_size_px;
        self
    }

    /// Sets the horizontal space kept free on both sides of the track.
    #[must_use]
    pub fn with_track_inset_px(mut self, inset_px: f64) -> Self {
        self.track_inset_px = inset_px;
        self
    }

    /// Sets the fixed UTC offset used by built-in label formatting.
    #[must_use]
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// Sets the step count used when time-aware layers carry no interval.
    #[must_use]
    pub fn with_default_time_step_count(mut self, count: usize) -> Self {
        self.default_time_step_count = count;
        self
    }

    /// Usable track width after removing the insets.
    #[must_use]
    pub fn track_width_px(self) -> f64 {
        (f64::from(self.viewport.width) - 2.0 * self.track_inset_px).max(0.0)
    }

    #[must_use]
    pub fn playback_interval(self) -> Duration {
        Duration::from_secs_f64(self.playback_interval_seconds)
    }

    pub fn validate(self) -> ToolkitResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ToolkitError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.playback_interval_seconds.is_finite() || self.playback_interval_seconds <= 0.0 {
            return Err(ToolkitError::InvalidData(
                "playback interval must be finite and > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("min tick spacing", self.min_tick_spacing_px),
            ("label padding", self.label_padding_px),
            ("track inset", self.track_inset_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ToolkitError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.label_font_size_px.is_finite() || self.label_font_size_px <= 0.0 {
            return Err(ToolkitError::InvalidData(
                "label font size must be finite and > 0".to_owned(),
            ));
        }
        if self.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(ToolkitError::InvalidData(
                "utc offset must be within +-24h".to_owned(),
            ));
        }
        if self.default_time_step_count < 2 {
            return Err(ToolkitError::TooFewTimeSteps {
                requested: self.default_time_step_count,
            });
        }
        Ok(self)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ToolkitResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ToolkitError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ToolkitResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ToolkitError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_full_extent_labels_visible() -> bool {
    true
}

fn default_playback_interval_seconds() -> f64 {
    1.0
}

fn default_min_tick_spacing_px() -> f64 {
    10.0
}

fn default_label_padding_px() -> f64 {
    6.0
}

fn default_label_font_size_px() -> f64 {
    12.0
}

fn default_track_inset_px() -> f64 {
    16.0
}

fn default_time_step_count() -> usize {
    10
}
