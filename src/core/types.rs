use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::millis_between;
use crate::error::{ToolkitError, ToolkitResult};

/// Pixel size of the slider track surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Ordered pair of instants defining a temporal window.
///
/// `start == end` describes a single moment rather than a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeExtent {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeExtent {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ToolkitResult<Self> {
        if end < start {
            return Err(ToolkitError::InvalidData(format!(
                "time extent end ({end}) must not precede start ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn moment(instant: DateTime<Utc>) -> Self {
        Self {
            start: instant,
            end: instant,
        }
    }

    #[must_use]
    pub fn start(self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn is_moment(self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn span_millis(self) -> i64 {
        millis_between(self.start, self.end)
    }

    #[must_use]
    pub fn contains(self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Smallest extent covering both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Clamps `instant` into `[start, end]`.
    #[must_use]
    pub fn clamp(self, instant: DateTime<Utc>) -> DateTime<Utc> {
        instant.clamp(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::TimeExtent;

    #[test]
    fn rejects_reversed_bounds() {
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(TimeExtent::new(start, end).is_err());
    }

    #[test]
    fn union_covers_both_extents() {
        let a = TimeExtent::new(
            Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let b = TimeExtent::moment(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let merged = a.union(b);
        assert_eq!(merged.start(), b.start());
        assert_eq!(merged.end(), a.end());
    }
}
