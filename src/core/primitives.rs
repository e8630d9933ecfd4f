use chrono::{DateTime, TimeDelta, Utc};

/// Signed millisecond distance from `from` to `to`, saturating on overflow.
#[must_use]
pub fn millis_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    to.timestamp_millis().saturating_sub(from.timestamp_millis())
}

/// Adds a signed millisecond offset, returning `None` past chrono's range.
#[must_use]
pub fn add_millis(time: DateTime<Utc>, millis: i64) -> Option<DateTime<Utc>> {
    time.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}

/// Fraction of `time` along `[start, end]`.
///
/// Zero-length ranges map every instant to `0.0`.
#[must_use]
pub fn fraction_of_span(time: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let span = millis_between(start, end);
    if span == 0 {
        return 0.0;
    }
    millis_between(start, time) as f64 / span as f64
}
