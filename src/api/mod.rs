use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{TimeExtent, TimeStepInterval, Timeline};
use crate::extensions::{SliderEvent, SliderObserver};
use crate::interaction::InteractionState;
use crate::render::Renderer;

mod label_format;
mod label_measure;
mod observer_registry;
mod playback;
mod slider_config;
mod slider_frame_builder;
mod slider_init;
mod step_controller;
mod thumb_drag_controller;
mod tick_layout;
mod time_awareness;

pub use label_format::LabelFormatterFn;
pub use label_measure::{EstimatedLabelMeasurer, FixedWidthLabelMeasurer, LabelMeasurer};
pub use playback::{PlaybackState, TimerOutcome};
pub use slider_config::{LabelMode, PlaybackDirection, PlaybackLoopMode, TimeSliderConfig};
pub use slider_frame_builder::SliderStyle;
pub use step_controller::StepOutcome;
pub use tick_layout::{
    MajorTickIndices, MajorTickSelection, TickLayout, TickLayoutOptions, TickMark,
    layout_tick_marks, minor_ticks_fit, select_major_ticks, symmetric_first_major_index,
    tick_offsets,
};
pub use time_awareness::{
    LayerTimeInfo, LoadTicket, TimeAwareLayer, TimeAwareness, fetch_time_awareness,
    merge_time_awareness,
};

/// Capacity of the pending event queue; older events are dropped first.
pub const MAX_PENDING_EVENTS: usize = 1_024;

/// Current selection expressed as positions in the time-step sequence.
///
/// `start <= end` always holds; with range mode disabled `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct StepSelection {
    pub start: usize,
    pub end: usize,
}

impl StepSelection {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of steps spanned; an inverted pair counts as zero.
    #[must_use]
    pub const fn width(self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// Time slider state: step sequence, current selection, pins, and playback.
///
/// All mutation happens through `&mut self` on the owning (UI) thread.
/// Every mutating call finishes updating derived state before it emits
/// events to observers and to the pending event queue.
pub struct TimeSlider<R: Renderer> {
    renderer: R,
    config: TimeSliderConfig,
    style: SliderStyle,
    measurer: Box<dyn LabelMeasurer>,
    label_formatter: Option<LabelFormatterFn>,
    timeline: Option<Timeline>,
    selection: StepSelection,
    range_enabled: bool,
    start_pinned: bool,
    end_pinned: bool,
    playback: PlaybackState,
    direction: PlaybackDirection,
    interaction: InteractionState,
    load_generation: u64,
    pending_load: Option<LoadTicket>,
    observers: Vec<Box<dyn SliderObserver>>,
    pending_events: VecDeque<SliderEvent>,
    dropped_events: u64,
}

impl<R: Renderer> TimeSlider<R> {
    #[must_use]
    pub fn config(&self) -> TimeSliderConfig {
        self.config
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.timeline.is_some()
    }

    #[must_use]
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    #[must_use]
    pub fn full_extent(&self) -> Option<TimeExtent> {
        self.timeline.as_ref().map(Timeline::full_extent)
    }

    #[must_use]
    pub fn time_step_interval(&self) -> Option<TimeStepInterval> {
        self.timeline.as_ref().map(Timeline::interval)
    }

    #[must_use]
    pub fn time_steps(&self) -> &[DateTime<Utc>] {
        self.timeline.as_ref().map_or(&[], Timeline::steps)
    }

    #[must_use]
    pub fn selection(&self) -> StepSelection {
        self.selection
    }

    /// Current extent snapped to the step sequence, `None` until configured.
    #[must_use]
    pub fn current_extent(&self) -> Option<TimeExtent> {
        let timeline = self.timeline.as_ref()?;
        let start = timeline.step(self.selection.start)?;
        let end = timeline.step(self.selection.end)?;
        TimeExtent::new(start, end).ok()
    }

    #[must_use]
    pub fn is_range_enabled(&self) -> bool {
        self.range_enabled
    }

    #[must_use]
    pub fn is_start_pinned(&self) -> bool {
        self.start_pinned
    }

    #[must_use]
    pub fn is_end_pinned(&self) -> bool {
        self.end_pinned
    }

    #[must_use]
    pub fn playback_state(&self) -> PlaybackState {
        self.playback
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playback == PlaybackState::Playing
    }

    #[must_use]
    pub fn playback_direction(&self) -> PlaybackDirection {
        self.direction
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    /// Drains events emitted since the previous call, oldest first.
    ///
    /// At most [`MAX_PENDING_EVENTS`] are kept; hosts that only listen
    /// through observers never need to call this.
    pub fn take_events(&mut self) -> Vec<SliderEvent> {
        self.pending_events.drain(..).collect()
    }

    /// Events discarded because the queue was full, since construction.
    #[must_use]
    pub fn dropped_event_count(&self) -> u64 {
        self.dropped_events
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::StepSelection;

    #[test]
    fn inverted_selection_has_zero_width() {
        assert_eq!(StepSelection::new(2, 5).width(), 3);
        assert_eq!(StepSelection::new(5, 2).width(), 0);
    }
}
