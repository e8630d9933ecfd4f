use chrono::{DateTime, Utc};

use crate::core::{
    TimeExtent, TimeStepInterval, compute_time_steps, compute_time_steps_by_count,
    interval_for_step_count, nearest_step_index,
};
use crate::error::ToolkitResult;

/// Full extent, interval, and the derived step sequence.
///
/// Built once per configuration; the step sequence is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    full_extent: TimeExtent,
    interval: TimeStepInterval,
    steps: Vec<DateTime<Utc>>,
}

impl Timeline {
    pub fn from_interval(full_extent: TimeExtent, interval: TimeStepInterval) -> ToolkitResult<Self> {
        let steps = compute_time_steps(full_extent, interval)?;
        Ok(Self {
            full_extent,
            interval,
            steps,
        })
    }

    pub fn from_step_count(full_extent: TimeExtent, count: usize) -> ToolkitResult<Self> {
        let steps = compute_time_steps_by_count(full_extent, count)?;
        let interval = interval_for_step_count(full_extent, count)?;
        Ok(Self {
            full_extent,
            interval,
            steps,
        })
    }

    #[must_use]
    pub fn full_extent(&self) -> TimeExtent {
        self.full_extent
    }

    #[must_use]
    pub fn interval(&self) -> TimeStepInterval {
        self.interval
    }

    #[must_use]
    pub fn steps(&self) -> &[DateTime<Utc>] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the last step; sequences always hold at least two steps.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<DateTime<Utc>> {
        self.steps.get(index).copied()
    }

    /// Nearest step to `instant` after clamping it into the full extent.
    #[must_use]
    pub fn snap_index(&self, instant: DateTime<Utc>) -> usize {
        nearest_step_index(&self.steps, self.full_extent.clamp(instant)).unwrap_or(0)
    }
}
