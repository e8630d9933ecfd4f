use std::fmt;

use chrono::{DateTime, Months, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ToolkitError, ToolkitResult};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Calendar unit of a time-step interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    Centuries,
}

impl TimeUnit {
    /// Next finer unit and the factor converting one `self` into it.
    ///
    /// Months convert to 30 days; this is only used to make fractional
    /// month counts integral, never for whole-month stepping.
    #[must_use]
    pub const fn finer(self) -> Option<(Self, f64)> {
        match self {
            Self::Milliseconds => None,
            Self::Seconds => Some((Self::Milliseconds, 1_000.0)),
            Self::Minutes => Some((Self::Seconds, 60.0)),
            Self::Hours => Some((Self::Minutes, 60.0)),
            Self::Days => Some((Self::Hours, 24.0)),
            Self::Weeks => Some((Self::Days, 7.0)),
            Self::Months => Some((Self::Days, 30.0)),
            Self::Years => Some((Self::Months, 12.0)),
            Self::Decades => Some((Self::Years, 10.0)),
            Self::Centuries => Some((Self::Decades, 10.0)),
        }
    }

    /// Nominal length in milliseconds, used to compare intervals of
    /// different units. Calendar stepping never uses this value.
    #[must_use]
    pub fn nominal_millis(self) -> f64 {
        match self {
            Self::Milliseconds => 1.0,
            Self::Seconds => 1_000.0,
            Self::Minutes => 60_000.0,
            Self::Hours => 3_600_000.0,
            Self::Days => MILLIS_PER_DAY,
            Self::Weeks => 7.0 * MILLIS_PER_DAY,
            Self::Months => 30.436_875 * MILLIS_PER_DAY,
            Self::Years => 365.242_5 * MILLIS_PER_DAY,
            Self::Decades => 3_652.425 * MILLIS_PER_DAY,
            Self::Centuries => 36_524.25 * MILLIS_PER_DAY,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Milliseconds => "milliseconds",
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
            Self::Decades => "decades",
            Self::Centuries => "centuries",
        }
    }
}

/// Positive duration paired with a calendar unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeStepInterval {
    pub duration: f64,
    pub unit: TimeUnit,
}

impl TimeStepInterval {
    pub fn new(duration: f64, unit: TimeUnit) -> ToolkitResult<Self> {
        let interval = Self { duration, unit };
        interval.validate()?;
        Ok(interval)
    }

    pub fn validate(self) -> ToolkitResult<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(ToolkitError::InvalidData(
                "time step interval duration must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn nominal_millis(self) -> f64 {
        self.duration * self.unit.nominal_millis()
    }

    /// Normalizes the interval to an integral count of one unit.
    ///
    /// Fractional durations are pushed down to finer units until they become
    /// whole (`1.5 days` -> `36 hours`). Milliseconds are rounded, minimum 1.
    #[must_use]
    pub fn calendar_components(self) -> (i64, TimeUnit) {
        let mut value = self.duration;
        let mut unit = self.unit;
        loop {
            let rounded = value.round();
            if rounded >= 1.0 && (value - rounded).abs() <= 1e-9 * value.abs().max(1.0) {
                return (rounded as i64, unit);
            }
            match unit.finer() {
                Some((finer, factor)) => {
                    value *= factor;
                    unit = finer;
                }
                None => return ((value.round() as i64).max(1), unit),
            }
        }
    }

    /// Calendar-aware `time + self`.
    ///
    /// Month based units clamp to the end of shorter months
    /// (Jan 31 + 1 month = Feb 28/29). Returns `None` on overflow.
    #[must_use]
    pub fn add_to(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let (count, unit) = self.calendar_components();
        let months_per_unit: i64 = match unit {
            TimeUnit::Months => 1,
            TimeUnit::Years => 12,
            TimeUnit::Decades => 120,
            TimeUnit::Centuries => 1_200,
            _ => 0,
        };
        if months_per_unit > 0 {
            let months = u32::try_from(count.checked_mul(months_per_unit)?).ok()?;
            return time.checked_add_months(Months::new(months));
        }

        let delta = match unit {
            TimeUnit::Milliseconds => TimeDelta::try_milliseconds(count),
            TimeUnit::Seconds => TimeDelta::try_seconds(count),
            TimeUnit::Minutes => TimeDelta::try_minutes(count),
            TimeUnit::Hours => TimeDelta::try_hours(count),
            TimeUnit::Days => TimeDelta::try_days(count),
            TimeUnit::Weeks => TimeDelta::try_weeks(count),
            TimeUnit::Months | TimeUnit::Years | TimeUnit::Decades | TimeUnit::Centuries => None,
        }?;
        time.checked_add_signed(delta)
    }
}

impl fmt::Display for TimeStepInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.duration, self.unit.label())
    }
}
