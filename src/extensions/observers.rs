use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{PlaybackDirection, PlaybackState};
use crate::core::TimeExtent;

/// Read-only state snapshot passed to observers with every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderContext {
    pub full_extent: Option<TimeExtent>,
    pub current_extent: Option<TimeExtent>,
    pub step_count: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub is_range_enabled: bool,
    pub playback_state: PlaybackState,
}

/// Event stream emitted by the slider.
///
/// Each mutating call recomputes derived state first and then emits at most
/// one event per kind, so observers never see intermediate states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SliderEvent {
    Configured {
        step_count: usize,
    },
    CurrentExtentChanged {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    PlaybackStateChanged {
        state: PlaybackState,
        direction: PlaybackDirection,
    },
    PinsChanged {
        start_pinned: bool,
        end_pinned: bool,
    },
}

/// Hook interface for consumers of slider events, for example forwarding
/// the current extent to the map view's time filter.
///
/// Observers read state through `SliderContext` and cannot mutate the
/// slider from inside the callback.
pub trait SliderObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: SliderEvent, context: SliderContext);
}
