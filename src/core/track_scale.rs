use chrono::{DateTime, Utc};

use crate::core::primitives::{add_millis, fraction_of_span};
use crate::core::TimeExtent;

/// Linear mapping between the full time extent and the horizontal track.
///
/// Degenerate inputs (zero-length extent, zero or non-finite width) never
/// divide: they map every instant to pixel `0.0` and every pixel to the
/// extent start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackScale {
    extent: TimeExtent,
    track_width_px: f64,
}

impl TrackScale {
    #[must_use]
    pub fn new(extent: TimeExtent, track_width_px: f64) -> Self {
        let track_width_px = if track_width_px.is_finite() && track_width_px > 0.0 {
            track_width_px
        } else {
            0.0
        };
        Self {
            extent,
            track_width_px,
        }
    }

    #[must_use]
    pub fn extent(self) -> TimeExtent {
        self.extent
    }

    #[must_use]
    pub fn track_width_px(self) -> f64 {
        self.track_width_px
    }

    #[must_use]
    pub fn time_to_pixel(self, time: DateTime<Utc>) -> f64 {
        if self.track_width_px <= 0.0 {
            return 0.0;
        }
        let fraction = fraction_of_span(time, self.extent.start(), self.extent.end());
        (fraction * self.track_width_px).clamp(0.0, self.track_width_px)
    }

    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> DateTime<Utc> {
        if self.track_width_px <= 0.0 || !pixel.is_finite() {
            return self.extent.start();
        }
        let fraction = (pixel / self.track_width_px).clamp(0.0, 1.0);
        let offset = (self.extent.span_millis() as f64 * fraction).round() as i64;
        add_millis(self.extent.start(), offset)
            .map_or(self.extent.start(), |time| self.extent.clamp(time))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::TrackScale;
    use crate::core::TimeExtent;

    #[test]
    fn zero_span_maps_to_origin() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let scale = TrackScale::new(TimeExtent::moment(instant), 400.0);
        assert_eq!(scale.time_to_pixel(instant), 0.0);
    }

    #[test]
    fn zero_width_maps_to_origin() {
        let extent = TimeExtent::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let scale = TrackScale::new(extent, 0.0);
        assert_eq!(scale.time_to_pixel(extent.end()), 0.0);
        assert_eq!(scale.pixel_to_time(120.0), extent.start());
    }

    #[test]
    fn pixel_round_trip_hits_midpoint() {
        let extent = TimeExtent::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let scale = TrackScale::new(extent, 200.0);
        assert_eq!(
            scale.pixel_to_time(100.0),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );
    }
}
