use std::collections::VecDeque;

use tracing::debug;

use crate::core::{TimeExtent, TimeStepInterval, Timeline, Viewport};
use crate::error::ToolkitResult;
use crate::extensions::SliderEvent;
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::{
    EstimatedLabelMeasurer, LabelFormatterFn, LabelMeasurer, PlaybackState, SliderStyle,
    StepSelection, TimeSlider, TimeSliderConfig,
};

impl<R: Renderer> TimeSlider<R> {
    /// Creates an unconfigured slider.
    ///
    /// No steps, ticks, or playback exist until one of the `configure*`
    /// calls or a time-awareness load succeeds.
    pub fn new(renderer: R, config: TimeSliderConfig) -> ToolkitResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            renderer,
            config,
            style: SliderStyle::default(),
            measurer: Box::new(EstimatedLabelMeasurer),
            label_formatter: None,
            timeline: None,
            selection: StepSelection::default(),
            range_enabled: true,
            start_pinned: false,
            end_pinned: false,
            playback: PlaybackState::Idle,
            direction: config.playback_direction,
            interaction: InteractionState::default(),
            load_generation: 0,
            pending_load: None,
            observers: Vec::new(),
            pending_events: VecDeque::new(),
            dropped_events: 0,
        })
    }

    /// Configures the slider from a full extent and a calendar interval.
    ///
    /// On error the previous configuration stays untouched.
    pub fn configure(
        &mut self,
        full_extent: TimeExtent,
        interval: TimeStepInterval,
    ) -> ToolkitResult<()> {
        let timeline = Timeline::from_interval(full_extent, interval)?;
        self.install_timeline(timeline);
        Ok(())
    }

    /// Configures the slider by splitting the full extent into `count` steps.
    pub fn configure_with_step_count(
        &mut self,
        full_extent: TimeExtent,
        count: usize,
    ) -> ToolkitResult<()> {
        let timeline = Timeline::from_step_count(full_extent, count)?;
        self.install_timeline(timeline);
        Ok(())
    }

    /// Replaces style/playback configuration without touching the timeline.
    pub fn set_config(&mut self, config: TimeSliderConfig) -> ToolkitResult<()> {
        let config = config.validate()?;
        if config.playback_direction != self.config.playback_direction {
            self.direction = config.playback_direction;
        }
        self.config = config;
        Ok(())
    }

    /// Resizes the widget area; the track width follows on the next layout.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ToolkitResult<()> {
        self.set_config(TimeSliderConfig {
            viewport,
            ..self.config
        })
    }

    pub fn set_label_measurer(&mut self, measurer: Box<dyn LabelMeasurer>) {
        self.measurer = measurer;
    }

    /// Installs a custom label formatter; `None` restores built-in patterns.
    pub fn set_label_formatter(&mut self, formatter: Option<LabelFormatterFn>) {
        self.label_formatter = formatter;
    }

    /// Swaps in a new timeline and re-derives the selection.
    ///
    /// A previous current extent is snapped onto the new steps; a first
    /// configuration selects the first step (and the second one in range mode).
    pub(super) fn install_timeline(&mut self, timeline: Timeline) {
        if self.is_playing() {
            self.stop_playback("timeline replaced");
        }

        let previous_extent = self.current_extent();
        let last_index = timeline.last_index();
        let mut selection = match previous_extent {
            Some(extent) => StepSelection::new(
                timeline.snap_index(extent.start()),
                timeline.snap_index(extent.end()),
            ),
            None => StepSelection::new(0, 1.min(last_index)),
        };
        if !self.range_enabled {
            selection.end = selection.start;
        }

        debug!(
            step_count = timeline.len(),
            interval = %timeline.interval(),
            start_index = selection.start,
            end_index = selection.end,
            "install time slider timeline"
        );

        let step_count = timeline.len();
        self.timeline = Some(timeline);
        self.selection = selection;
        self.emit(SliderEvent::Configured { step_count });
        if previous_extent != self.current_extent() {
            self.emit_current_extent_changed();
        }
    }
}
