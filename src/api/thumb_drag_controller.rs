use chrono::{DateTime, Utc};
use tracing::trace;

use crate::core::{TimeUnit, TrackScale};
use crate::error::{ToolkitError, ToolkitResult};
use crate::interaction::{Thumb, nearest_thumb};
use crate::render::Renderer;

use super::label_format::{
    fixed_offset_from_minutes, format_time_label, label_unit, resolve_time_label_pattern,
};
use super::{StepSelection, TimeSlider};

impl<R: Renderer> TimeSlider<R> {
    /// Track mapping in widget coordinates minus the left inset.
    #[must_use]
    pub fn track_scale(&self) -> Option<TrackScale> {
        let timeline = self.timeline.as_ref()?;
        Some(TrackScale::new(
            timeline.full_extent(),
            self.config.track_width_px(),
        ))
    }

    /// Widget x coordinates of the start and end thumbs.
    #[must_use]
    pub fn thumb_offsets(&self) -> Option<(f64, f64)> {
        let scale = self.track_scale()?;
        let extent = self.current_extent()?;
        let inset = self.config.track_inset_px;
        Some((
            inset + scale.time_to_pixel(extent.start()),
            inset + scale.time_to_pixel(extent.end()),
        ))
    }

    /// Grabs the unpinned thumb nearest to widget x `x`.
    pub fn begin_thumb_drag(&mut self, x: f64) -> Option<Thumb> {
        let (start_x, end_x) = self.thumb_offsets()?;
        let thumb = if self.range_enabled {
            nearest_thumb(x, start_x, end_x, !self.start_pinned, !self.end_pinned)
        } else {
            nearest_thumb(x, start_x, end_x, !self.start_pinned, false)
        }?;
        trace!(?thumb, x, "thumb drag started");
        self.interaction.on_drag_start(thumb, x);
        Some(thumb)
    }

    /// Moves the dragged thumb to the step nearest widget x `x`.
    ///
    /// A thumb never crosses the other one. Returns whether the current
    /// extent changed; moves without an active drag do nothing.
    pub fn drag_thumb_to(&mut self, x: f64) -> ToolkitResult<bool> {
        let Some(thumb) = self.interaction.dragging_thumb() else {
            return Ok(false);
        };
        let timeline = self.timeline.as_ref().ok_or(ToolkitError::NotConfigured)?;
        let scale = TrackScale::new(timeline.full_extent(), self.config.track_width_px());
        let index = timeline.snap_index(scale.pixel_to_time(x - self.config.track_inset_px));
        self.interaction.on_drag_move(x);

        let StepSelection { start, end } = self.selection;
        let selection = match (thumb, self.range_enabled) {
            (_, false) => StepSelection::new(index, index),
            (Thumb::Start, true) => StepSelection::new(index.min(end), end),
            (Thumb::End, true) => StepSelection::new(start, index.max(start)),
        };
        Ok(self.apply_selection(selection))
    }

    pub fn end_thumb_drag(&mut self) {
        self.interaction.on_drag_end();
    }

    /// Label text for `time`: the custom formatter when installed,
    /// otherwise a pattern chosen from the interval unit and full span.
    #[must_use]
    pub fn format_time_label(&self, time: DateTime<Utc>) -> String {
        if let Some(formatter) = &self.label_formatter {
            return formatter(time);
        }
        let (unit, span_millis) = self
            .timeline
            .as_ref()
            .map(|timeline| {
                (
                    label_unit(timeline.interval()),
                    timeline.full_extent().span_millis(),
                )
            })
            .unwrap_or((TimeUnit::Days, 0));
        format_time_label(
            time,
            resolve_time_label_pattern(unit, span_millis),
            fixed_offset_from_minutes(self.config.utc_offset_minutes),
        )
    }
}
