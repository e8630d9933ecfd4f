use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::TimeExtent;
use crate::error::{ToolkitError, ToolkitResult};
use crate::extensions::SliderEvent;
use crate::render::Renderer;

use super::{StepSelection, TimeSlider};

/// Result of a step request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The selection moved by `applied` steps (possibly fewer than requested).
    Moved { applied: i64 },
    /// No feasible movement remains in the requested direction.
    AtBoundary,
    /// Every thumb that could move is pinned.
    Rejected,
}

/// Largest backward and forward moves the unpinned thumb(s) can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FeasibleMoves {
    pub(super) backward: i64,
    pub(super) forward: i64,
}

impl<R: Renderer> TimeSlider<R> {
    /// Moves the unpinned thumb(s) by `delta` steps.
    ///
    /// The delta is clamped so no thumb leaves `[0, last]`, a pinned start
    /// bounds the end from below, and a pinned end bounds the start from
    /// above. Rejected requests stop playback.
    pub fn step_by(&mut self, delta: i64) -> ToolkitResult<StepOutcome> {
        let outcome = self.apply_step(delta)?;
        if outcome == StepOutcome::Rejected && self.is_playing() {
            self.stop_playback("both thumbs pinned");
        }
        Ok(outcome)
    }

    pub fn step_forward(&mut self, steps: usize) -> ToolkitResult<StepOutcome> {
        self.step_by(i64::try_from(steps).unwrap_or(i64::MAX))
    }

    pub fn step_backward(&mut self, steps: usize) -> ToolkitResult<StepOutcome> {
        self.step_by(i64::try_from(steps).map_or(i64::MIN, |steps| -steps))
    }

    /// Selects `extent`, clamped to the full extent and snapped to steps.
    ///
    /// Pins do not apply to programmatic selection. With range mode
    /// disabled only the start is used.
    pub fn set_current_extent(&mut self, extent: TimeExtent) -> ToolkitResult<bool> {
        let timeline = self.timeline.as_ref().ok_or(ToolkitError::NotConfigured)?;
        let start = timeline.snap_index(extent.start());
        let end = if self.range_enabled {
            timeline.snap_index(extent.end())
        } else {
            start
        };
        Ok(self.apply_selection(StepSelection::new(start, end)))
    }

    /// Selects steps by index; indices are clamped to the sequence.
    pub fn set_selection(&mut self, selection: StepSelection) -> ToolkitResult<bool> {
        let last = self.last_step_index()?;
        let start = selection.start.min(last);
        let end = if self.range_enabled {
            selection.end.clamp(start, last)
        } else {
            start
        };
        Ok(self.apply_selection(StepSelection::new(start, end)))
    }

    /// Enables or disables range selection.
    ///
    /// Disabling collapses the end onto the start; enabling widens the
    /// selection to the next step when one exists.
    pub fn set_range_enabled(&mut self, enabled: bool) {
        if self.range_enabled == enabled {
            return;
        }
        self.range_enabled = enabled;
        let Some(last) = self.timeline.as_ref().map(|timeline| timeline.last_index()) else {
            return;
        };
        let start = self.selection.start;
        let end = if enabled { (start + 1).min(last) } else { start };
        self.apply_selection(StepSelection::new(start, end));
    }

    pub fn set_start_pinned(&mut self, pinned: bool) {
        self.set_pins(pinned, self.end_pinned);
    }

    pub fn set_end_pinned(&mut self, pinned: bool) {
        self.set_pins(self.start_pinned, pinned);
    }

    fn set_pins(&mut self, start_pinned: bool, end_pinned: bool) {
        if self.start_pinned == start_pinned && self.end_pinned == end_pinned {
            return;
        }
        self.start_pinned = start_pinned;
        self.end_pinned = end_pinned;
        debug!(start_pinned, end_pinned, "time slider pins changed");
        self.emit(SliderEvent::PinsChanged {
            start_pinned,
            end_pinned,
        });
    }

    pub(super) fn last_step_index(&self) -> ToolkitResult<usize> {
        self.timeline
            .as_ref()
            .map(|timeline| timeline.last_index())
            .ok_or(ToolkitError::NotConfigured)
    }

    /// Feasible moves for the current pins, `None` when nothing may move.
    ///
    /// With range mode disabled the single thumb follows the start pin.
    pub(super) fn feasible_moves(&self, last: usize) -> Option<FeasibleMoves> {
        let StepSelection { start, end } = self.selection;
        let (backward, forward) = if !self.range_enabled {
            if self.start_pinned {
                return None;
            }
            (start, last - start)
        } else {
            match (self.start_pinned, self.end_pinned) {
                (true, true) => return None,
                (false, false) => (start, last - end),
                (true, false) => (end - start, last - end),
                (false, true) => (start, end - start),
            }
        };
        Some(FeasibleMoves {
            backward: i64::try_from(backward).unwrap_or(i64::MAX),
            forward: i64::try_from(forward).unwrap_or(i64::MAX),
        })
    }

    pub(super) fn apply_step(&mut self, delta: i64) -> ToolkitResult<StepOutcome> {
        let last = self.last_step_index()?;
        let Some(moves) = self.feasible_moves(last) else {
            trace!(delta, "step rejected: thumbs pinned");
            return Ok(StepOutcome::Rejected);
        };
        if delta == 0 {
            return Ok(StepOutcome::Moved { applied: 0 });
        }

        let applied = delta.clamp(-moves.backward, moves.forward);
        if applied == 0 {
            trace!(delta, "step blocked at boundary");
            return Ok(StepOutcome::AtBoundary);
        }

        let shift = |index: usize| -> usize {
            let shifted = i64::try_from(index).unwrap_or(i64::MAX).saturating_add(applied);
            usize::try_from(shifted.clamp(0, last as i64)).unwrap_or(0)
        };
        let StepSelection { start, end } = self.selection;
        let new_start = if self.range_enabled && self.start_pinned {
            start
        } else {
            shift(start)
        };
        let new_end = if !self.range_enabled {
            new_start
        } else if self.end_pinned {
            end
        } else {
            shift(end)
        };

        trace!(delta, applied, new_start, new_end, "apply step");
        self.apply_selection(StepSelection::new(new_start, new_end));
        Ok(StepOutcome::Moved { applied })
    }

    /// Stores `selection` and emits one change event when the selected
    /// instants differ from the previous ones. Returns whether they did.
    pub(super) fn apply_selection(&mut self, selection: StepSelection) -> bool {
        let previous = self.current_extent();
        self.selection = selection;
        let changed = previous != self.current_extent();
        if changed {
            self.emit_current_extent_changed();
        }
        changed
    }
}
