use chrono::{TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use map_toolkit::api::{
    EstimatedLabelMeasurer, LabelMode, TickLayoutOptions, TimeSlider, TimeSliderConfig,
    layout_tick_marks,
};
use map_toolkit::core::{TimeExtent, TimeStepInterval, TimeUnit, Viewport, compute_time_steps};
use map_toolkit::render::NullRenderer;
use std::hint::black_box;

fn hourly_year() -> (TimeExtent, TimeStepInterval) {
    let extent = TimeExtent::new(
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    )
    .expect("valid extent");
    let interval = TimeStepInterval::new(1.0, TimeUnit::Hours).expect("valid interval");
    (extent, interval)
}

fn bench_hourly_steps_one_year(c: &mut Criterion) {
    let (extent, interval) = hourly_year();

    c.bench_function("hourly_steps_one_year", |b| {
        b.iter(|| {
            let _ = compute_time_steps(black_box(extent), black_box(interval))
                .expect("steps should compute");
        })
    });
}

fn bench_monthly_steps_century(c: &mut Criterion) {
    let extent = TimeExtent::new(
        Utc.with_ymd_and_hms(1924, 1, 31, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
    )
    .expect("valid extent");
    let interval = TimeStepInterval::new(1.0, TimeUnit::Months).expect("valid interval");

    c.bench_function("monthly_steps_century", |b| {
        b.iter(|| {
            let _ = compute_time_steps(black_box(extent), black_box(interval))
                .expect("steps should compute");
        })
    });
}

fn bench_tick_layout_365_daily(c: &mut Criterion) {
    let extent = TimeExtent::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap(),
    )
    .expect("valid extent");
    let interval = TimeStepInterval::new(1.0, TimeUnit::Days).expect("valid interval");
    let steps = compute_time_steps(extent, interval).expect("steps should compute");
    let options = TickLayoutOptions {
        min_tick_spacing_px: 4.0,
        label_padding_px: 6.0,
        label_font_size_px: 12.0,
        select_major_ticks: true,
    };

    c.bench_function("tick_layout_365_daily", |b| {
        b.iter(|| {
            let _ = layout_tick_marks(
                black_box(&steps),
                black_box(1_800.0),
                options,
                &EstimatedLabelMeasurer,
                |time| time.format("%b %d").to_string(),
            );
        })
    });
}

fn bench_slider_frame_hourly_week(c: &mut Criterion) {
    let config = TimeSliderConfig::new(Viewport::new(1_280, 96)).with_label_mode(LabelMode::Ticks);
    let mut slider = TimeSlider::new(NullRenderer::default(), config).expect("slider init");
    let extent = TimeExtent::new(
        Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap(),
    )
    .expect("valid extent");
    slider
        .configure(
            extent,
            TimeStepInterval::new(1.0, TimeUnit::Hours).expect("valid interval"),
        )
        .expect("configure");

    c.bench_function("slider_frame_hourly_week", |b| {
        b.iter(|| {
            let _ = black_box(&slider)
                .build_render_frame()
                .expect("frame should build");
        })
    });
}

criterion_group!(
    benches,
    bench_hourly_steps_one_year,
    bench_monthly_steps_century,
    bench_tick_layout_365_daily,
    bench_slider_frame_hourly_week
);
criterion_main!(benches);
