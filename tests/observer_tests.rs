use std::cell::RefCell;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use map_toolkit::ToolkitError;
use map_toolkit::api::{
    MAX_PENDING_EVENTS, PlaybackLoopMode, PlaybackState, TimeSlider, TimeSliderConfig, TimerOutcome,
};
use map_toolkit::core::{TimeExtent, Viewport};
use map_toolkit::extensions::{SliderContext, SliderEvent, SliderObserver};
use map_toolkit::render::NullRenderer;

type Log = Rc<RefCell<Vec<(SliderEvent, SliderContext)>>>;

struct RecordingObserver {
    id: String,
    log: Log,
}

impl RecordingObserver {
    fn new(id: impl Into<String>, log: Log) -> Self {
        Self { id: id.into(), log }
    }
}

impl SliderObserver for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: SliderEvent, context: SliderContext) {
        self.log.borrow_mut().push((event, context));
    }
}

fn slider() -> TimeSlider<NullRenderer> {
    TimeSlider::new(
        NullRenderer::default(),
        TimeSliderConfig::new(Viewport::new(640, 80)),
    )
    .expect("slider init")
}

fn extent() -> TimeExtent {
    TimeExtent::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
    )
    .expect("extent")
}

#[test]
fn observer_ids_must_be_unique_and_non_empty() {
    let log = Log::default();
    let mut slider = slider();

    slider
        .register_observer(Box::new(RecordingObserver::new("time-filter", Rc::clone(&log))))
        .expect("register");
    let duplicate = slider
        .register_observer(Box::new(RecordingObserver::new("time-filter", Rc::clone(&log))))
        .expect_err("duplicate id");
    assert!(matches!(duplicate, ToolkitError::InvalidData(_)));
    let empty = slider
        .register_observer(Box::new(RecordingObserver::new("", Rc::clone(&log))))
        .expect_err("empty id");
    assert!(matches!(empty, ToolkitError::InvalidData(_)));

    assert_eq!(slider.observer_count(), 1);
    assert!(slider.has_observer("time-filter"));
    assert!(slider.unregister_observer("time-filter"));
    assert!(!slider.unregister_observer("time-filter"));
}

#[test]
fn observers_see_settled_state_with_each_event() {
    let log = Log::default();
    let mut slider = slider();
    slider
        .register_observer(Box::new(RecordingObserver::new("recorder", Rc::clone(&log))))
        .expect("register");

    slider.configure_with_step_count(extent(), 10).expect("configure");
    slider.step_forward(2).expect("step");
    slider.play().expect("play");

    let log = log.borrow();
    let kinds: Vec<&str> = log
        .iter()
        .map(|(event, _)| match event {
            SliderEvent::Configured { .. } => "configured",
            SliderEvent::CurrentExtentChanged { .. } => "extent",
            SliderEvent::PlaybackStateChanged { .. } => "playback",
            SliderEvent::PinsChanged { .. } => "pins",
        })
        .collect();
    assert_eq!(kinds, vec!["configured", "extent", "extent", "playback"]);

    let (_, configured_context) = log[0];
    assert_eq!(configured_context.step_count, 10);
    assert_eq!(configured_context.start_index, 0);
    assert_eq!(configured_context.end_index, 1);

    let (event, context) = log[2];
    assert_eq!(context.start_index, 2);
    assert_eq!(context.end_index, 3);
    match event {
        SliderEvent::CurrentExtentChanged { start, end } => {
            let current = context.current_extent.expect("current extent");
            assert_eq!(start, current.start());
            assert_eq!(end, current.end());
        }
        other => panic!("unexpected event: {other:?}"),
    }

    let (_, playback_context) = log[3];
    assert_eq!(playback_context.playback_state, PlaybackState::Playing);
}

#[test]
fn queued_events_match_observer_stream() {
    let log = Log::default();
    let mut slider = slider();
    slider
        .register_observer(Box::new(RecordingObserver::new("recorder", Rc::clone(&log))))
        .expect("register");

    slider.configure_with_step_count(extent(), 4).expect("configure");
    slider.set_start_pinned(true);

    let queued = slider.take_events();
    let observed: Vec<SliderEvent> = log.borrow().iter().map(|(event, _)| *event).collect();
    assert_eq!(queued, observed);
    assert!(slider.take_events().is_empty());
}

#[test]
fn long_playback_keeps_event_queue_bounded() {
    let log = Log::default();
    let mut slider = TimeSlider::new(
        NullRenderer::default(),
        TimeSliderConfig::new(Viewport::new(640, 80)).with_loop_mode(PlaybackLoopMode::Repeat),
    )
    .expect("slider init");
    slider.configure_with_step_count(extent(), 10).expect("configure");
    slider.take_events();
    slider
        .register_observer(Box::new(RecordingObserver::new("recorder", Rc::clone(&log))))
        .expect("register");

    slider.play().expect("play");
    let ticks = 5_000;
    for _ in 0..ticks {
        let outcome = slider.on_playback_timer(false).expect("tick");
        assert!(matches!(outcome, TimerOutcome::Stepped | TimerOutcome::Wrapped));
    }

    // play() plus one extent change per tick
    let emitted = ticks + 1;
    assert_eq!(log.borrow().len(), emitted);
    assert_eq!(
        slider.dropped_event_count(),
        (emitted - MAX_PENDING_EVENTS) as u64
    );

    let queued = slider.take_events();
    assert_eq!(queued.len(), MAX_PENDING_EVENTS);
    assert_eq!(queued.last(), log.borrow().last().map(|(event, _)| event));
    assert!(slider.take_events().is_empty());
}
