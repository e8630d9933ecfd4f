use chrono::{DateTime, TimeZone, Utc};
use map_toolkit::{ToolkitError, ToolkitResult};
use map_toolkit::api::{
    LayerTimeInfo, StepSelection, TimeAwareLayer, TimeSlider, TimeSliderConfig,
    fetch_time_awareness, merge_time_awareness,
};
use map_toolkit::core::{TimeExtent, TimeStepInterval, TimeUnit, Viewport};
use map_toolkit::render::NullRenderer;

fn ymd(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn extent(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeExtent {
    TimeExtent::new(start, end).expect("extent")
}

fn slider() -> TimeSlider<NullRenderer> {
    let config = TimeSliderConfig::new(Viewport::new(640, 80)).with_default_time_step_count(5);
    TimeSlider::new(NullRenderer::default(), config).expect("slider init")
}

struct StaticLayer {
    name: &'static str,
    info: Option<LayerTimeInfo>,
}

impl TimeAwareLayer for StaticLayer {
    fn name(&self) -> &str {
        self.name
    }

    fn load_time_info(&self) -> ToolkitResult<LayerTimeInfo> {
        self.info
            .ok_or_else(|| ToolkitError::InvalidData("service unavailable".to_owned()))
    }
}

#[test]
fn merge_unions_extents_and_keeps_coarsest_interval() {
    let daily = TimeStepInterval::new(1.0, TimeUnit::Days).expect("interval");
    let weekly = TimeStepInterval::new(1.0, TimeUnit::Weeks).expect("interval");
    let infos = [
        LayerTimeInfo::time_aware(extent(ymd(2024, 3, 1), ymd(2024, 6, 1))).with_time_interval(daily),
        LayerTimeInfo::default(),
        LayerTimeInfo::time_aware(extent(ymd(2024, 1, 1), ymd(2024, 4, 1)))
            .with_time_interval(weekly)
            .with_range_filtering(true),
    ];

    let merged = merge_time_awareness(&infos).expect("merge");
    assert_eq!(merged.full_extent, extent(ymd(2024, 1, 1), ymd(2024, 6, 1)));
    assert_eq!(merged.time_interval, Some(weekly));
    assert!(merged.supports_range_filtering);
}

#[test]
fn merge_without_time_aware_layers_fails() {
    let err = merge_time_awareness(&[LayerTimeInfo::default()]).expect_err("nothing time aware");
    assert!(matches!(err, ToolkitError::NoTimeAwareLayers));
    assert!(err.is_configuration_error());
}

#[test]
fn merge_with_missing_bound_fails() {
    let info = LayerTimeInfo {
        is_time_aware: true,
        full_extent_start: Some(ymd(2024, 1, 1)),
        full_extent_end: None,
        time_interval: None,
        supports_range_filtering: false,
    };
    let err = merge_time_awareness(&[info]).expect_err("missing end");
    assert!(matches!(err, ToolkitError::MissingExtentBounds));
}

#[test]
fn layers_without_interval_use_default_step_count() {
    let mut slider = slider();
    let layer = StaticLayer {
        name: "sea-ice",
        info: Some(LayerTimeInfo::time_aware(extent(ymd(2024, 1, 1), ymd(2024, 1, 5)))),
    };

    slider.initialize_from_layers(&[&layer]).expect("initialize");

    assert_eq!(slider.time_steps().len(), 5);
    assert!(!slider.is_range_enabled());
    assert_eq!(slider.selection(), StepSelection::new(0, 0));
}

#[test]
fn moment_layer_without_interval_yields_two_steps() {
    let mut slider = slider();
    let layer = StaticLayer {
        name: "earthquake",
        info: Some(LayerTimeInfo::time_aware(TimeExtent::moment(ymd(2024, 3, 11)))),
    };

    slider.initialize_from_layers(&[&layer]).expect("initialize");

    assert_eq!(slider.time_steps(), &[ymd(2024, 3, 11), ymd(2024, 3, 11)]);
    assert_eq!(slider.selection(), StepSelection::new(0, 0));
}

#[test]
fn failing_layer_reports_load_error_and_keeps_state() {
    let mut slider = slider();
    let good = StaticLayer {
        name: "hurricanes",
        info: Some(LayerTimeInfo::time_aware(extent(ymd(2024, 1, 1), ymd(2024, 1, 5)))),
    };
    let broken = StaticLayer {
        name: "precipitation",
        info: None,
    };

    let err = slider
        .initialize_from_layers(&[&good, &broken])
        .expect_err("broken layer");
    match err {
        ToolkitError::LayerLoad { layer, .. } => assert_eq!(layer, "precipitation"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!slider.is_configured());

    let err = fetch_time_awareness(&[&broken]).expect_err("broken layer");
    assert!(err.is_load_error());
}

#[test]
fn stale_and_cancelled_tickets_are_ignored() {
    let mut slider = slider();
    let awareness = merge_time_awareness(&[LayerTimeInfo::time_aware(extent(
        ymd(2024, 1, 1),
        ymd(2024, 1, 10),
    ))
    .with_range_filtering(true)])
    .expect("merge");

    let first = slider.begin_time_awareness_load();
    let second = slider.begin_time_awareness_load();
    assert_ne!(first, second);

    assert!(!slider
        .complete_time_awareness_load(first, Ok(awareness))
        .expect("stale"));
    assert!(!slider.is_configured());

    assert!(slider
        .complete_time_awareness_load(second, Ok(awareness))
        .expect("current"));
    assert!(slider.is_configured());
    assert!(slider.is_range_enabled());
    assert_eq!(slider.selection(), StepSelection::new(0, 1));

    let third = slider.begin_time_awareness_load();
    assert!(slider.cancel_time_awareness_load());
    assert!(!slider
        .complete_time_awareness_load(third, Err(ToolkitError::NoTimeAwareLayers))
        .expect("cancelled"));
}

#[test]
fn failed_load_leaves_previous_configuration() {
    let mut slider = slider();
    slider
        .configure_with_step_count(extent(ymd(2024, 1, 1), ymd(2024, 1, 10)), 10)
        .expect("configure");
    let before = slider.selection();

    let ticket = slider.begin_time_awareness_load();
    let err = slider
        .complete_time_awareness_load(ticket, Err(ToolkitError::MissingExtentBounds))
        .expect_err("load failure");
    assert!(matches!(err, ToolkitError::MissingExtentBounds));
    assert_eq!(slider.time_steps().len(), 10);
    assert_eq!(slider.selection(), before);
    assert!(!slider.has_pending_time_awareness_load());
}
