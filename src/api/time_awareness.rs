use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{TimeExtent, TimeStepInterval, Timeline};
use crate::error::{ToolkitError, ToolkitResult};
use crate::render::Renderer;

use super::TimeSlider;

/// Time metadata reported by one operational layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct LayerTimeInfo {
    pub is_time_aware: bool,
    pub full_extent_start: Option<DateTime<Utc>>,
    pub full_extent_end: Option<DateTime<Utc>>,
    pub time_interval: Option<TimeStepInterval>,
    #[serde(default)]
    pub supports_range_filtering: bool,
}

impl LayerTimeInfo {
    /// Time-aware layer covering `extent`.
    #[must_use]
    pub fn time_aware(extent: TimeExtent) -> Self {
        Self {
            is_time_aware: true,
            full_extent_start: Some(extent.start()),
            full_extent_end: Some(extent.end()),
            time_interval: None,
            supports_range_filtering: false,
        }
    }

    #[must_use]
    pub fn with_time_interval(mut self, interval: TimeStepInterval) -> Self {
        self.time_interval = Some(interval);
        self
    }

    #[must_use]
    pub fn with_range_filtering(mut self, supported: bool) -> Self {
        self.supports_range_filtering = supported;
        self
    }

    fn extent(self) -> ToolkitResult<TimeExtent> {
        match (self.full_extent_start, self.full_extent_end) {
            (Some(start), Some(end)) => TimeExtent::new(start, end),
            _ => Err(ToolkitError::MissingExtentBounds),
        }
    }
}

/// A map or scene layer that may carry time information.
///
/// Loading happens in the host's engine; implementations return whatever
/// the engine reported, or `LayerLoad` when the layer failed to load.
pub trait TimeAwareLayer {
    fn name(&self) -> &str;
    fn load_time_info(&self) -> ToolkitResult<LayerTimeInfo>;
}

/// Merged time properties of a set of layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeAwareness {
    pub full_extent: TimeExtent,
    /// Coarsest layer interval; `None` means steps are derived from the
    /// configured default step count.
    pub time_interval: Option<TimeStepInterval>,
    pub supports_range_filtering: bool,
}

impl TimeAwareness {
    /// Builds the step sequence for these time properties.
    pub fn timeline(&self, default_step_count: usize) -> ToolkitResult<Timeline> {
        match self.time_interval {
            Some(interval) => Timeline::from_interval(self.full_extent, interval),
            None => Timeline::from_step_count(self.full_extent, default_step_count),
        }
    }
}

/// Merges per-layer time info.
///
/// Non-time-aware layers are ignored. The full extent is the union of all
/// layer extents, the interval is the largest one reported, and range
/// filtering is enabled when any layer supports it.
pub fn merge_time_awareness(infos: &[LayerTimeInfo]) -> ToolkitResult<TimeAwareness> {
    let mut merged: Option<TimeAwareness> = None;
    for info in infos.iter().filter(|info| info.is_time_aware) {
        let extent = info.extent()?;
        if let Some(interval) = info.time_interval {
            interval.validate()?;
        }
        merged = Some(match merged {
            None => TimeAwareness {
                full_extent: extent,
                time_interval: info.time_interval,
                supports_range_filtering: info.supports_range_filtering,
            },
            Some(current) => TimeAwareness {
                full_extent: current.full_extent.union(extent),
                time_interval: coarser_interval(current.time_interval, info.time_interval),
                supports_range_filtering: current.supports_range_filtering
                    || info.supports_range_filtering,
            },
        });
    }
    merged.ok_or(ToolkitError::NoTimeAwareLayers)
}

fn coarser_interval(
    left: Option<TimeStepInterval>,
    right: Option<TimeStepInterval>,
) -> Option<TimeStepInterval> {
    match (left, right) {
        (Some(left), Some(right)) => {
            if right.nominal_millis() > left.nominal_millis() {
                Some(right)
            } else {
                Some(left)
            }
        }
        (left, None) => left,
        (None, right) => right,
    }
}

/// Loads time info from every layer, then merges it.
///
/// The first failing layer aborts the whole fetch.
pub fn fetch_time_awareness(layers: &[&dyn TimeAwareLayer]) -> ToolkitResult<TimeAwareness> {
    let mut infos = Vec::with_capacity(layers.len());
    for layer in layers {
        let info = layer.load_time_info().map_err(|err| match err {
            ToolkitError::LayerLoad { .. } => err,
            other => ToolkitError::LayerLoad {
                layer: layer.name().to_owned(),
                reason: other.to_string(),
            },
        })?;
        infos.push(info);
    }
    merge_time_awareness(&infos)
}

/// Identifies one outstanding asynchronous time-awareness load.
///
/// Only the most recently issued ticket is accepted on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

impl<R: Renderer> TimeSlider<R> {
    /// Starts a new load; any previously issued ticket becomes stale.
    pub fn begin_time_awareness_load(&mut self) -> LoadTicket {
        self.load_generation = self.load_generation.wrapping_add(1);
        let ticket = LoadTicket(self.load_generation);
        self.pending_load = Some(ticket);
        debug!(generation = ticket.0, "time awareness load started");
        ticket
    }

    /// Drops the pending load so its completion is ignored.
    pub fn cancel_time_awareness_load(&mut self) -> bool {
        self.pending_load.take().is_some()
    }

    #[must_use]
    pub fn has_pending_time_awareness_load(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Delivers the result of an asynchronous load.
    ///
    /// Returns `Ok(false)` for stale or cancelled tickets without touching
    /// state. Errors leave the slider unchanged and clear the pending load.
    pub fn complete_time_awareness_load(
        &mut self,
        ticket: LoadTicket,
        result: ToolkitResult<TimeAwareness>,
    ) -> ToolkitResult<bool> {
        if self.pending_load != Some(ticket) {
            debug!(generation = ticket.0, "ignoring stale time awareness load");
            return Ok(false);
        }
        self.pending_load = None;
        match result {
            Ok(awareness) => {
                self.apply_time_awareness(awareness)?;
                Ok(true)
            }
            Err(err) => {
                warn!(error = %err, "time awareness load failed");
                Err(err)
            }
        }
    }

    /// Configures steps, full extent, and range mode from merged time info.
    pub fn apply_time_awareness(&mut self, awareness: TimeAwareness) -> ToolkitResult<()> {
        let timeline = awareness.timeline(self.config.default_time_step_count)?;
        self.range_enabled = awareness.supports_range_filtering;
        self.install_timeline(timeline);
        Ok(())
    }

    /// Synchronous convenience: fetch, merge, and apply in one call.
    pub fn initialize_from_layers(&mut self, layers: &[&dyn TimeAwareLayer]) -> ToolkitResult<()> {
        let awareness = fetch_time_awareness(layers)?;
        self.apply_time_awareness(awareness)
    }
}
