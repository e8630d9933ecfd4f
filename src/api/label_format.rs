use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::core::{TimeStepInterval, TimeUnit};

pub type LabelFormatterFn = Arc<dyn Fn(DateTime<Utc>) -> String + Send + Sync + 'static>;

const MILLIS_PER_DAY: i64 = 86_400_000;
const MILLIS_PER_YEAR: i64 = 366 * MILLIS_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum TimeLabelPattern {
    Year,
    YearMonth,
    MonthDay,
    Date,
    DateMinute,
    DateSecond,
    TimeMinute,
    TimeSecond,
    TimeMillis,
}

impl TimeLabelPattern {
    const fn format_str(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::YearMonth => "%b %Y",
            Self::MonthDay => "%b %d",
            Self::Date => "%Y-%m-%d",
            Self::DateMinute => "%Y-%m-%d %H:%M",
            Self::DateSecond => "%Y-%m-%d %H:%M:%S",
            Self::TimeMinute => "%H:%M",
            Self::TimeSecond => "%H:%M:%S",
            Self::TimeMillis => "%H:%M:%S%.3f",
        }
    }
}

/// Picks the coarsest pattern that still distinguishes neighbouring steps.
pub(super) fn resolve_time_label_pattern(unit: TimeUnit, span_millis: i64) -> TimeLabelPattern {
    let span_millis = span_millis.max(0);
    match unit {
        TimeUnit::Centuries | TimeUnit::Decades | TimeUnit::Years => TimeLabelPattern::Year,
        TimeUnit::Months => TimeLabelPattern::YearMonth,
        TimeUnit::Weeks | TimeUnit::Days => {
            if span_millis <= MILLIS_PER_YEAR {
                TimeLabelPattern::MonthDay
            } else {
                TimeLabelPattern::Date
            }
        }
        TimeUnit::Hours | TimeUnit::Minutes => {
            if span_millis <= MILLIS_PER_DAY {
                TimeLabelPattern::TimeMinute
            } else {
                TimeLabelPattern::DateMinute
            }
        }
        TimeUnit::Seconds => {
            if span_millis <= MILLIS_PER_DAY {
                TimeLabelPattern::TimeSecond
            } else {
                TimeLabelPattern::DateSecond
            }
        }
        TimeUnit::Milliseconds => TimeLabelPattern::TimeMillis,
    }
}

const UNITS_COARSEST_FIRST: [TimeUnit; 10] = [
    TimeUnit::Centuries,
    TimeUnit::Decades,
    TimeUnit::Years,
    TimeUnit::Months,
    TimeUnit::Weeks,
    TimeUnit::Days,
    TimeUnit::Hours,
    TimeUnit::Minutes,
    TimeUnit::Seconds,
    TimeUnit::Milliseconds,
];

/// Coarsest unit not longer than `interval`.
///
/// Step-count intervals are expressed in milliseconds; labelling them by
/// their nominal length keeps a year split into ten steps readable.
pub(super) fn label_unit(interval: TimeStepInterval) -> TimeUnit {
    let interval_millis = interval.nominal_millis() * (1.0 + 1e-9);
    UNITS_COARSEST_FIRST
        .into_iter()
        .find(|unit| unit.nominal_millis() <= interval_millis)
        .unwrap_or(TimeUnit::Milliseconds)
}

/// Fixed offset for `minutes`; out-of-range values fall back to UTC.
pub(super) fn fixed_offset_from_minutes(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

pub(super) fn format_time_label(
    time: DateTime<Utc>,
    pattern: TimeLabelPattern,
    offset: FixedOffset,
) -> String {
    time.with_timezone(&offset)
        .format(pattern.format_str())
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{
        TimeLabelPattern, fixed_offset_from_minutes, format_time_label, label_unit,
        resolve_time_label_pattern,
    };
    use crate::core::{TimeStepInterval, TimeUnit};

    #[test]
    fn millisecond_intervals_label_by_nominal_length() {
        let three_days = TimeStepInterval::new(3.0 * 86_400_000.0, TimeUnit::Milliseconds).unwrap();
        assert_eq!(label_unit(three_days), TimeUnit::Days);
        let month = TimeStepInterval::new(1.0, TimeUnit::Months).unwrap();
        assert_eq!(label_unit(month), TimeUnit::Months);
        let tiny = TimeStepInterval::new(0.25, TimeUnit::Milliseconds).unwrap();
        assert_eq!(label_unit(tiny), TimeUnit::Milliseconds);
    }

    #[test]
    fn day_steps_within_a_year_use_month_day() {
        let pattern = resolve_time_label_pattern(TimeUnit::Days, 9 * 86_400_000);
        assert_eq!(pattern, TimeLabelPattern::MonthDay);
        let label = format_time_label(
            Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
            pattern,
            fixed_offset_from_minutes(0),
        );
        assert_eq!(label, "Jan 05");
    }

    #[test]
    fn offset_shifts_rendered_hour() {
        let label = format_time_label(
            Utc.with_ymd_and_hms(2024, 1, 5, 23, 30, 0).unwrap(),
            TimeLabelPattern::TimeMinute,
            fixed_offset_from_minutes(60),
        );
        assert_eq!(label, "00:30");
    }
}
