use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ToolkitError, ToolkitResult};
use crate::extensions::SliderEvent;
use crate::render::Renderer;

use super::{PlaybackDirection, PlaybackLoopMode, StepOutcome, StepSelection, TimeSlider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

/// What a single playback timer tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerOutcome {
    /// Playback is not running; the tick was ignored.
    Idle,
    /// The map view was still rendering; no step was taken.
    Skipped,
    /// The selection advanced one step.
    Stepped,
    /// The selection hit a boundary and wrapped to the opposite end.
    Wrapped,
    /// The selection hit a boundary, direction flipped, and it stepped back.
    Reversed,
    /// Playback stopped on this tick.
    Stopped,
}

impl<R: Renderer> TimeSlider<R> {
    /// Starts playback. Returns `false` when already playing.
    pub fn play(&mut self) -> ToolkitResult<bool> {
        if self.timeline.is_none() {
            return Err(ToolkitError::NotConfigured);
        }
        if self.is_playing() {
            return Ok(false);
        }
        self.playback = PlaybackState::Playing;
        debug!(direction = ?self.direction, loop_mode = ?self.config.loop_mode, "time slider playback started");
        self.emit_playback_state_changed();
        Ok(true)
    }

    /// Pauses playback. Returns `false` when already idle.
    pub fn pause(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.stop_playback("paused");
        true
    }

    /// Flips between playing and paused; returns the new state.
    pub fn toggle_playback(&mut self) -> ToolkitResult<PlaybackState> {
        if self.is_playing() {
            self.pause();
        } else {
            self.play()?;
        }
        Ok(self.playback)
    }

    pub fn set_playback_direction(&mut self, direction: PlaybackDirection) {
        if self.direction == direction {
            return;
        }
        self.direction = direction;
        self.emit_playback_state_changed();
    }

    pub fn set_loop_mode(&mut self, mode: PlaybackLoopMode) {
        self.config.loop_mode = mode;
    }

    #[must_use]
    pub fn loop_mode(&self) -> PlaybackLoopMode {
        self.config.loop_mode
    }

    #[must_use]
    pub fn playback_interval(&self) -> Duration {
        self.config.playback_interval()
    }

    /// Advances playback by one tick.
    ///
    /// Ticks arriving while the map view reports `render_in_progress` are
    /// absorbed so playback never outruns rendering.
    pub fn on_playback_timer(&mut self, render_in_progress: bool) -> ToolkitResult<TimerOutcome> {
        if !self.is_playing() {
            return Ok(TimerOutcome::Idle);
        }
        if render_in_progress {
            trace!("playback tick skipped: render in progress");
            return Ok(TimerOutcome::Skipped);
        }

        let direction = self.direction;
        match self.apply_step(direction.step_sign())? {
            StepOutcome::Moved { .. } => Ok(TimerOutcome::Stepped),
            StepOutcome::Rejected => {
                self.stop_playback("both thumbs pinned");
                Ok(TimerOutcome::Stopped)
            }
            StepOutcome::AtBoundary => self.on_playback_boundary(direction),
        }
    }

    fn on_playback_boundary(&mut self, direction: PlaybackDirection) -> ToolkitResult<TimerOutcome> {
        match self.config.loop_mode {
            PlaybackLoopMode::None => {
                self.stop_playback("reached end of time extent");
                Ok(TimerOutcome::Stopped)
            }
            PlaybackLoopMode::Repeat => {
                if self.wrap_selection(direction)? {
                    Ok(TimerOutcome::Wrapped)
                } else {
                    self.stop_playback("wrap would not move the selection");
                    Ok(TimerOutcome::Stopped)
                }
            }
            PlaybackLoopMode::Reverse => {
                let reversed = direction.reversed();
                self.direction = reversed;
                self.emit_playback_state_changed();
                match self.apply_step(reversed.step_sign())? {
                    StepOutcome::Moved { .. } => Ok(TimerOutcome::Reversed),
                    StepOutcome::AtBoundary | StepOutcome::Rejected => {
                        self.stop_playback("no room to move in either direction");
                        Ok(TimerOutcome::Stopped)
                    }
                }
            }
        }
    }

    /// Moves the unpinned thumb(s) back to the end playback started from.
    ///
    /// Returns `false` when the wrapped selection equals the current one.
    pub(super) fn wrap_selection(&mut self, direction: PlaybackDirection) -> ToolkitResult<bool> {
        let last = self.last_step_index()?;
        let StepSelection { start, end } = self.selection;
        let width = self.selection.width();
        let wrapped = match (direction, self.range_enabled) {
            (PlaybackDirection::Forward, false) => StepSelection::new(0, 0),
            (PlaybackDirection::Backward, false) => StepSelection::new(last, last),
            (PlaybackDirection::Forward, true) => match (self.start_pinned, self.end_pinned) {
                (true, true) => return Ok(false),
                (false, false) => StepSelection::new(0, width),
                (false, true) => StepSelection::new(0, end),
                (true, false) => StepSelection::new(start, start),
            },
            (PlaybackDirection::Backward, true) => match (self.start_pinned, self.end_pinned) {
                (true, true) => return Ok(false),
                (false, false) => StepSelection::new(last.saturating_sub(width), last),
                (false, true) => StepSelection::new(end, end),
                (true, false) => StepSelection::new(start, last),
            },
        };
        if wrapped == self.selection {
            return Ok(false);
        }
        trace!(
            from_start = start,
            from_end = end,
            to_start = wrapped.start,
            to_end = wrapped.end,
            "playback wrap"
        );
        Ok(self.apply_selection(wrapped))
    }

    pub(super) fn stop_playback(&mut self, reason: &str) {
        if !self.is_playing() {
            return;
        }
        self.playback = PlaybackState::Idle;
        debug!(reason, "time slider playback stopped");
        self.emit_playback_state_changed();
    }

    fn emit_playback_state_changed(&mut self) {
        self.emit(SliderEvent::PlaybackStateChanged {
            state: self.playback,
            direction: self.direction,
        });
    }
}
