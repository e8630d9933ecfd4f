use chrono::{DateTime, Utc};
use tracing::trace;

use crate::core::primitives::{add_millis, millis_between};
use crate::core::{TimeExtent, TimeStepInterval, TimeUnit};
use crate::error::{ToolkitError, ToolkitResult};

/// Upper bound for generated step sequences.
pub const MAX_TIME_STEPS: usize = 100_000;

/// Discretizes `extent` into calendar steps of `interval`.
///
/// The first element is always `extent.start()` and the last is always
/// `extent.end()`. A candidate step whose half-interval neighbourhood
/// reaches the end is replaced by the end itself, so the sequence never
/// carries a sliver step right before the end.
///
/// A zero-length extent yields `[start, end]`.
pub fn compute_time_steps(
    extent: TimeExtent,
    interval: TimeStepInterval,
) -> ToolkitResult<Vec<DateTime<Utc>>> {
    interval.validate()?;

    let start = extent.start();
    let end = extent.end();
    if extent.is_moment() {
        return Ok(vec![start, end]);
    }

    let mut steps = vec![start];
    let mut current = start;
    loop {
        let Some(candidate) = interval.add_to(current).filter(|next| *next > current) else {
            steps.push(end);
            break;
        };
        let reaches_end = match interval.add_to(candidate) {
            Some(after) => {
                let half = millis_between(candidate, after) / 2;
                add_millis(candidate, half).is_none_or(|midpoint| midpoint >= end)
            }
            None => true,
        };
        if reaches_end {
            steps.push(end);
            break;
        }

        steps.push(candidate);
        if steps.len() >= MAX_TIME_STEPS {
            return Err(ToolkitError::InvalidData(format!(
                "time step interval {interval} produces more than {MAX_TIME_STEPS} steps"
            )));
        }
        current = candidate;
    }

    trace!(count = steps.len(), %interval, "computed time steps");
    Ok(steps)
}

/// Splits `extent` into `count` evenly spaced instants (millisecond precision).
///
/// A zero-length extent yields `[start, end]` whatever `count` is, matching
/// [`compute_time_steps`].
pub fn compute_time_steps_by_count(
    extent: TimeExtent,
    count: usize,
) -> ToolkitResult<Vec<DateTime<Utc>>> {
    if count < 2 {
        return Err(ToolkitError::TooFewTimeSteps { requested: count });
    }
    if count > MAX_TIME_STEPS {
        return Err(ToolkitError::InvalidData(format!(
            "time step count must be <= {MAX_TIME_STEPS}"
        )));
    }

    let start = extent.start();
    if extent.is_moment() {
        return Ok(vec![start, extent.end()]);
    }
    let span = extent.span_millis();
    let segments = (count - 1) as i128;
    let mut steps = Vec::with_capacity(count);
    for index in 0..count {
        if index == count - 1 {
            steps.push(extent.end());
            continue;
        }
        let offset = (i128::from(span) * index as i128 / segments) as i64;
        let step = add_millis(start, offset).ok_or_else(|| {
            ToolkitError::InvalidData("time step falls outside representable range".to_owned())
        })?;
        steps.push(step);
    }
    Ok(steps)
}

/// Millisecond interval equivalent to splitting `extent` into `count` steps.
///
/// A zero-length extent only ever has two steps, so it maps to the smallest
/// representable interval (1 ms).
pub fn interval_for_step_count(
    extent: TimeExtent,
    count: usize,
) -> ToolkitResult<TimeStepInterval> {
    if count < 2 {
        return Err(ToolkitError::TooFewTimeSteps { requested: count });
    }
    if extent.is_moment() {
        return TimeStepInterval::new(1.0, TimeUnit::Milliseconds);
    }
    let millis = (extent.span_millis() as f64 / (count - 1) as f64).max(1.0);
    TimeStepInterval::new(millis, TimeUnit::Milliseconds)
}

/// Index of the step nearest to `instant`; ties resolve to the earlier step.
///
/// Returns `None` for an empty sequence.
#[must_use]
pub fn nearest_step_index(steps: &[DateTime<Utc>], instant: DateTime<Utc>) -> Option<usize> {
    if steps.is_empty() {
        return None;
    }
    let upper = steps.partition_point(|step| *step < instant);
    if upper == 0 {
        return Some(0);
    }
    if upper >= steps.len() {
        return Some(steps.len() - 1);
    }

    let before = upper - 1;
    let distance_before = millis_between(steps[before], instant);
    let distance_after = millis_between(instant, steps[upper]);
    if distance_after < distance_before {
        Some(upper)
    } else {
        Some(before)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{compute_time_steps, nearest_step_index};
    use crate::core::{TimeExtent, TimeStepInterval, TimeUnit};

    #[test]
    fn trailing_sliver_is_merged_into_end() {
        let extent = TimeExtent::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 3, 6, 0, 0).unwrap(),
        )
        .unwrap();
        let interval = TimeStepInterval::new(1.0, TimeUnit::Days).unwrap();
        let steps = compute_time_steps(extent, interval).unwrap();
        assert_eq!(
            steps,
            vec![
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 3, 6, 0, 0).unwrap(),
            ]
        );
    }

    #[test]
    fn nearest_index_prefers_earlier_step_on_tie() {
        let steps = vec![
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap(),
        ];
        let midpoint = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(nearest_step_index(&steps, midpoint), Some(0));
        assert_eq!(nearest_step_index(&[], midpoint), None);
    }
}
