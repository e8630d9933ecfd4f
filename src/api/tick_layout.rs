use chrono::{DateTime, Utc};
use smallvec::SmallVec;

use crate::core::{TimeExtent, TrackScale};

use super::LabelMeasurer;

pub type MajorTickIndices = SmallVec<[usize; 16]>;

/// One tick on the slider track for the current layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    /// Index into the time-step sequence.
    pub index: usize,
    /// Offset from the left edge of the track.
    pub offset_px: f64,
    pub time: DateTime<Utc>,
    /// Major ticks carry a label in `LabelMode::Ticks`.
    pub is_major: bool,
    /// First and last ticks are always drawn at full weight.
    pub is_endpoint: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickLayout {
    pub ticks: Vec<TickMark>,
    /// `false` when the track is too narrow for one tick per step and only
    /// the endpoints are drawn.
    pub minor_ticks_visible: bool,
    /// Spacing between major ticks, `None` for the single centered fallback
    /// or when no majors were requested.
    pub major_interval: Option<usize>,
    pub first_major_index: Option<usize>,
}

impl TickLayout {
    #[must_use]
    pub fn major_indices(&self) -> MajorTickIndices {
        self.ticks
            .iter()
            .filter(|tick| tick.is_major)
            .map(|tick| tick.index)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickLayoutOptions {
    pub min_tick_spacing_px: f64,
    pub label_padding_px: f64,
    pub label_font_size_px: f64,
    pub select_major_ticks: bool,
}

/// Result of the major tick search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MajorTickSelection {
    pub interval: Option<usize>,
    pub first_index: usize,
}

impl MajorTickSelection {
    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        match self.interval {
            Some(interval) => index >= self.first_index && (index - self.first_index) % interval == 0,
            None => index == self.first_index,
        }
    }
}

/// Lays out tick marks for `steps` on a track `track_width_px` wide.
///
/// `label_text` is only called for steps whose labels are measured, which
/// happens when major selection is requested and minor ticks fit.
pub fn layout_tick_marks(
    steps: &[DateTime<Utc>],
    track_width_px: f64,
    options: TickLayoutOptions,
    measurer: &dyn LabelMeasurer,
    label_text: impl Fn(DateTime<Utc>) -> String,
) -> TickLayout {
    let Some((&first, &last)) = steps.first().zip(steps.last()) else {
        return TickLayout::default();
    };
    let last_index = steps.len() - 1;
    let offsets = tick_offsets(steps, track_width_px);

    if !minor_ticks_fit(steps.len(), track_width_px, options.min_tick_spacing_px) {
        let mut ticks = vec![TickMark {
            index: 0,
            offset_px: offsets[0],
            time: first,
            is_major: false,
            is_endpoint: true,
        }];
        if last_index > 0 {
            ticks.push(TickMark {
                index: last_index,
                offset_px: offsets[last_index],
                time: last,
                is_major: false,
                is_endpoint: true,
            });
        }
        return TickLayout {
            ticks,
            minor_ticks_visible: false,
            major_interval: None,
            first_major_index: None,
        };
    }

    let selection = if options.select_major_ticks {
        let label_widths: Vec<f64> = steps
            .iter()
            .map(|step| measurer.measure_width_px(&label_text(*step), options.label_font_size_px))
            .collect();
        Some(select_major_ticks(
            &offsets,
            &label_widths,
            options.label_padding_px,
        ))
    } else {
        None
    };

    let ticks = steps
        .iter()
        .enumerate()
        .map(|(index, time)| TickMark {
            index,
            offset_px: offsets[index],
            time: *time,
            is_major: selection.is_some_and(|selection| selection.contains(index)),
            is_endpoint: index == 0 || index == last_index,
        })
        .collect();

    TickLayout {
        ticks,
        minor_ticks_visible: true,
        major_interval: selection.and_then(|selection| selection.interval),
        first_major_index: selection.map(|selection| selection.first_index),
    }
}

/// Horizontal offset of every step, proportional to its time within the
/// sequence span. A zero span or unusable width maps everything to `0.0`.
#[must_use]
pub fn tick_offsets(steps: &[DateTime<Utc>], track_width_px: f64) -> Vec<f64> {
    let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
        return Vec::new();
    };
    let Ok(extent) = TimeExtent::new(*first, *last) else {
        return vec![0.0; steps.len()];
    };
    let scale = TrackScale::new(extent, track_width_px);
    steps.iter().map(|step| scale.time_to_pixel(*step)).collect()
}

/// `true` when one tick per step keeps at least `min_spacing_px` between ticks.
#[must_use]
pub fn minor_ticks_fit(step_count: usize, track_width_px: f64, min_spacing_px: f64) -> bool {
    if step_count <= 2 {
        return true;
    }
    if !track_width_px.is_finite() || track_width_px <= 0.0 {
        return false;
    }
    track_width_px / (step_count - 1) as f64 >= min_spacing_px
}

/// First major index for `interval` when the leftover minor ticks split
/// evenly between both ends of the sequence.
#[must_use]
pub fn symmetric_first_major_index(tick_count: usize, interval: usize) -> Option<usize> {
    if tick_count == 0 || interval == 0 {
        return None;
    }
    let leftover = (tick_count - 1) % interval;
    (leftover % 2 == 0).then_some(leftover / 2)
}

/// Searches the smallest symmetric major interval whose labels do not overlap.
///
/// Candidates run from 2 to `ceil(count / 2)` in ascending order and the first
/// fitting one wins. Labels are centered on their ticks and must keep
/// `padding_px` between neighbours. Without a fitting candidate one major
/// tick is placed at the center (lower middle for even counts).
#[must_use]
pub fn select_major_ticks(
    offsets: &[f64],
    label_widths: &[f64],
    padding_px: f64,
) -> MajorTickSelection {
    let count = offsets.len().min(label_widths.len());
    let center = MajorTickSelection {
        interval: None,
        first_index: count.saturating_sub(1) / 2,
    };
    if count < 2 {
        return center;
    }

    let max_interval = count.div_ceil(2);
    for interval in 2..=max_interval {
        let Some(first_index) = symmetric_first_major_index(count, interval) else {
            continue;
        };
        let last_major = count - 1 - first_index;
        let collides = (first_index..last_major)
            .step_by(interval)
            .any(|left| {
                let right = left + interval;
                labels_overlap(
                    offsets[left],
                    label_widths[left],
                    offsets[right],
                    label_widths[right],
                    padding_px,
                )
            });
        if !collides {
            return MajorTickSelection {
                interval: Some(interval),
                first_index,
            };
        }
    }

    center
}

fn labels_overlap(
    left_center: f64,
    left_width: f64,
    right_center: f64,
    right_width: f64,
    padding_px: f64,
) -> bool {
    left_center + left_width / 2.0 + padding_px > right_center - right_width / 2.0
}
