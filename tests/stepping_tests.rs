use chrono::{DateTime, TimeZone, Utc};
use map_toolkit::ToolkitError;
use map_toolkit::api::{StepOutcome, StepSelection, TimeSlider, TimeSliderConfig};
use map_toolkit::core::{TimeExtent, TimeStepInterval, TimeUnit, Viewport};
use map_toolkit::extensions::SliderEvent;
use map_toolkit::interaction::Thumb;
use map_toolkit::render::NullRenderer;

fn jan(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
}

/// Ten daily steps, Jan 1 ..= Jan 10; 40 px per step on a 360 px track.
fn ten_day_slider() -> TimeSlider<NullRenderer> {
    let config = TimeSliderConfig::new(Viewport::new(392, 80)).with_track_inset_px(16.0);
    let mut slider = TimeSlider::new(NullRenderer::default(), config).expect("slider init");
    slider
        .configure(
            TimeExtent::new(jan(1), jan(10)).expect("extent"),
            TimeStepInterval::new(1.0, TimeUnit::Days).expect("interval"),
        )
        .expect("configure");
    slider.take_events();
    slider
}

#[test]
fn first_configuration_selects_first_two_steps() {
    let config = TimeSliderConfig::new(Viewport::new(392, 80));
    let mut slider = TimeSlider::new(NullRenderer::default(), config).expect("slider init");
    assert!(!slider.is_configured());
    assert_eq!(slider.current_extent(), None);

    slider
        .configure(
            TimeExtent::new(jan(1), jan(10)).expect("extent"),
            TimeStepInterval::new(1.0, TimeUnit::Days).expect("interval"),
        )
        .expect("configure");

    assert_eq!(slider.time_steps().len(), 10);
    assert_eq!(slider.selection(), StepSelection::new(0, 1));
    assert_eq!(
        slider.take_events(),
        vec![
            SliderEvent::Configured { step_count: 10 },
            SliderEvent::CurrentExtentChanged {
                start: jan(1),
                end: jan(2),
            },
        ]
    );
}

#[test]
fn unconfigured_slider_rejects_stepping() {
    let config = TimeSliderConfig::new(Viewport::new(392, 80));
    let mut slider = TimeSlider::new(NullRenderer::default(), config).expect("slider init");
    let err = slider.step_forward(1).expect_err("no steps yet");
    assert!(matches!(err, ToolkitError::NotConfigured));
}

#[test]
fn stepping_moves_window_and_clamps_at_last_step() {
    let mut slider = ten_day_slider();

    assert_eq!(
        slider.step_forward(1).expect("step"),
        StepOutcome::Moved { applied: 1 }
    );
    assert_eq!(slider.selection(), StepSelection::new(1, 2));
    assert_eq!(
        slider.take_events(),
        vec![SliderEvent::CurrentExtentChanged {
            start: jan(2),
            end: jan(3),
        }]
    );

    assert_eq!(
        slider.step_forward(100).expect("step"),
        StepOutcome::Moved { applied: 7 }
    );
    assert_eq!(slider.selection(), StepSelection::new(8, 9));

    assert_eq!(slider.step_forward(1).expect("step"), StepOutcome::AtBoundary);
    assert_eq!(slider.selection(), StepSelection::new(8, 9));

    assert_eq!(
        slider.step_backward(3).expect("step"),
        StepOutcome::Moved { applied: -3 }
    );
    assert_eq!(slider.selection(), StepSelection::new(5, 6));
}

#[test]
fn pinned_start_only_moves_end() {
    let mut slider = ten_day_slider();
    slider
        .set_selection(StepSelection::new(2, 5))
        .expect("selection");
    slider.set_start_pinned(true);

    assert_eq!(
        slider.step_forward(2).expect("step"),
        StepOutcome::Moved { applied: 2 }
    );
    assert_eq!(slider.selection(), StepSelection::new(2, 7));

    assert_eq!(
        slider.step_backward(10).expect("step"),
        StepOutcome::Moved { applied: -5 }
    );
    assert_eq!(slider.selection(), StepSelection::new(2, 2));
    assert_eq!(slider.step_backward(1).expect("step"), StepOutcome::AtBoundary);
}

#[test]
fn pinned_end_only_moves_start() {
    let mut slider = ten_day_slider();
    slider
        .set_selection(StepSelection::new(2, 5))
        .expect("selection");
    slider.set_end_pinned(true);

    assert_eq!(
        slider.step_forward(10).expect("step"),
        StepOutcome::Moved { applied: 3 }
    );
    assert_eq!(slider.selection(), StepSelection::new(5, 5));

    assert_eq!(
        slider.step_backward(10).expect("step"),
        StepOutcome::Moved { applied: -5 }
    );
    assert_eq!(slider.selection(), StepSelection::new(0, 5));
}

#[test]
fn both_pins_reject_every_step() {
    let mut slider = ten_day_slider();
    slider
        .set_selection(StepSelection::new(3, 6))
        .expect("selection");
    slider.set_start_pinned(true);
    slider.set_end_pinned(true);
    slider.take_events();

    for delta in [-5, -1, 1, 4] {
        assert_eq!(slider.step_by(delta).expect("step"), StepOutcome::Rejected);
    }
    assert_eq!(slider.selection(), StepSelection::new(3, 6));
    assert!(slider.take_events().is_empty());
}

#[test]
fn zero_delta_reports_no_movement_without_events() {
    let mut slider = ten_day_slider();
    assert_eq!(
        slider.step_by(0).expect("step"),
        StepOutcome::Moved { applied: 0 }
    );
    assert!(slider.take_events().is_empty());
}

#[test]
fn single_thumb_mode_moves_one_index() {
    let mut slider = ten_day_slider();
    slider.set_range_enabled(false);
    assert_eq!(slider.selection(), StepSelection::new(0, 0));

    slider.step_forward(3).expect("step");
    assert_eq!(slider.selection(), StepSelection::new(3, 3));
    assert!(slider.current_extent().expect("extent").is_moment());

    slider.set_end_pinned(true);
    assert_eq!(
        slider.step_forward(1).expect("step"),
        StepOutcome::Moved { applied: 1 }
    );

    slider.set_start_pinned(true);
    assert_eq!(slider.step_forward(1).expect("step"), StepOutcome::Rejected);
    assert_eq!(slider.selection(), StepSelection::new(4, 4));
}

#[test]
fn programmatic_extent_snaps_clamps_and_ignores_pins() {
    let mut slider = ten_day_slider();
    slider.set_start_pinned(true);
    slider.set_end_pinned(true);
    slider.take_events();

    let requested = TimeExtent::new(
        Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 4, 13, 0, 0).unwrap(),
    )
    .expect("extent");
    assert!(slider.set_current_extent(requested).expect("set extent"));

    assert_eq!(slider.selection(), StepSelection::new(0, 4));
    assert_eq!(
        slider.take_events(),
        vec![SliderEvent::CurrentExtentChanged {
            start: jan(1),
            end: jan(5),
        }]
    );

    assert!(!slider.set_current_extent(requested).expect("same extent"));
    assert!(slider.take_events().is_empty());
}

#[test]
fn reconfiguring_snaps_previous_selection() {
    let mut slider = ten_day_slider();
    slider
        .set_selection(StepSelection::new(4, 6))
        .expect("selection");

    slider
        .configure(
            TimeExtent::new(jan(1), jan(10)).expect("extent"),
            TimeStepInterval::new(2.0, TimeUnit::Days).expect("interval"),
        )
        .expect("reconfigure");

    // Steps are now Jan 1, 3, 5, 7, 10; Jan 5 and Jan 7 survive exactly.
    assert_eq!(slider.time_steps().len(), 5);
    assert_eq!(slider.selection(), StepSelection::new(2, 3));
}

#[test]
fn dragging_thumbs_snaps_and_never_crosses() {
    let mut slider = ten_day_slider();
    let (start_x, end_x) = slider.thumb_offsets().expect("offsets");
    assert!((start_x - 16.0).abs() < 1e-9);
    assert!((end_x - 56.0).abs() < 1e-9);

    assert_eq!(slider.begin_thumb_drag(60.0), Some(Thumb::End));
    assert!(slider.drag_thumb_to(16.0 + 40.0 * 4.0 + 5.0).expect("drag"));
    assert_eq!(slider.selection(), StepSelection::new(0, 4));
    slider.end_thumb_drag();

    assert_eq!(slider.begin_thumb_drag(10.0), Some(Thumb::Start));
    slider.drag_thumb_to(16.0 + 40.0 * 7.0).expect("drag");
    assert_eq!(slider.selection(), StepSelection::new(4, 4));
    slider.end_thumb_drag();

    assert!(!slider.drag_thumb_to(200.0).expect("no active drag"));
}

#[test]
fn pinned_thumbs_cannot_be_grabbed() {
    let mut slider = ten_day_slider();
    slider.set_end_pinned(true);
    assert_eq!(slider.begin_thumb_drag(56.0), Some(Thumb::Start));
    slider.end_thumb_drag();

    slider.set_start_pinned(true);
    assert_eq!(slider.begin_thumb_drag(56.0), None);
}

#[test]
fn pin_changes_emit_one_event_each() {
    let mut slider = ten_day_slider();
    slider.set_start_pinned(true);
    slider.set_start_pinned(true);
    slider.set_end_pinned(true);

    assert_eq!(
        slider.take_events(),
        vec![
            SliderEvent::PinsChanged {
                start_pinned: true,
                end_pinned: false,
            },
            SliderEvent::PinsChanged {
                start_pinned: true,
                end_pinned: true,
            },
        ]
    );
}
