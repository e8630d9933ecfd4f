//! map-toolkit-rs: state components for map-centric applications.
//!
//! The crate owns the logic that does not depend on a map engine: the
//! time slider (time-step generation, tick layout, pinned-thumb stepping,
//! looping playback) and a persistent registry of long-running engine jobs.
//! Rendering goes through backend-agnostic frames; an optional Cairo/GTK4
//! layer hosts the slider in desktop applications.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod jobs;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{TimeSlider, TimeSliderConfig};
pub use error::{ToolkitError, ToolkitResult};
