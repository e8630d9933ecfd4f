pub mod primitives;
pub mod time_steps;
pub mod time_unit;
pub mod timeline;
pub mod track_scale;
pub mod types;

pub use time_steps::{
    MAX_TIME_STEPS, compute_time_steps, compute_time_steps_by_count, interval_for_step_count,
    nearest_step_index,
};
pub use time_unit::{TimeStepInterval, TimeUnit};
pub use timeline::Timeline;
pub use track_scale::TrackScale;
pub use types::{TimeExtent, Viewport};
