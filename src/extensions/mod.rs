//! Observer hooks for hosts that react to slider state changes.
//!
//! Observers stay outside the stepping/playback paths; they only receive
//! events after a mutation has completed.

mod observers;

pub use observers::{SliderContext, SliderEvent, SliderObserver};
