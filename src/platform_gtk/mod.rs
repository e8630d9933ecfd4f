//! GTK4 host for the time slider: a `DrawingArea`, thumb drag gestures,
//! and a glib timer that drives playback.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use tracing::{trace, warn};

use crate::api::{PlaybackState, StepOutcome, TimeSlider, TimerOutcome};
use crate::core::Viewport;
use crate::error::ToolkitResult;
use crate::render::CairoRenderer;

pub type SharedTimeSlider = Rc<RefCell<TimeSlider<CairoRenderer>>>;

type RenderBusyCheck = Rc<dyn Fn() -> bool>;

pub struct GtkTimeSliderAdapter {
    slider: SharedTimeSlider,
    drawing_area: gtk::DrawingArea,
    playback_source: Rc<RefCell<Option<glib::SourceId>>>,
    render_in_progress: Rc<RefCell<RenderBusyCheck>>,
}

impl GtkTimeSliderAdapter {
    #[must_use]
    pub fn new(slider: TimeSlider<CairoRenderer>) -> Self {
        let viewport = slider.config().viewport;
        let slider = Rc::new(RefCell::new(slider));
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(i32::try_from(viewport.width).unwrap_or(i32::MAX));
        drawing_area.set_content_height(i32::try_from(viewport.height).unwrap_or(i32::MAX));

        let adapter = Self {
            slider,
            drawing_area,
            playback_source: Rc::new(RefCell::new(None)),
            render_in_progress: Rc::new(RefCell::new(Rc::new(|| false))),
        };
        adapter.attach_draw_func();
        adapter.attach_resize_handler();
        adapter.attach_thumb_drag();
        adapter
    }

    #[must_use]
    pub fn slider(&self) -> SharedTimeSlider {
        Rc::clone(&self.slider)
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    /// Installs the map view's "still drawing" check consulted on every
    /// playback tick.
    pub fn set_render_in_progress_check(&self, busy_check: impl Fn() -> bool + 'static) {
        *self.render_in_progress.borrow_mut() = Rc::new(busy_check);
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.playback_source.borrow().is_some()
    }

    /// Starts playback and its glib timer.
    pub fn play(&self) -> ToolkitResult<()> {
        let interval = {
            let mut slider = self.slider.borrow_mut();
            slider.play()?;
            slider.playback_interval()
        };
        if self.playback_source.borrow().is_some() {
            return Ok(());
        }

        let slider = Rc::downgrade(&self.slider);
        let source_slot = Rc::downgrade(&self.playback_source);
        let busy_check = Rc::clone(&self.render_in_progress);
        let drawing_area = self.drawing_area.downgrade();
        let source_id = glib::timeout_add_local(interval, move || {
            let outcome = on_timer_tick(&slider, &busy_check);
            if let Some(area) = drawing_area.upgrade() {
                area.queue_draw();
            }
            match outcome {
                Some(
                    TimerOutcome::Stepped
                    | TimerOutcome::Wrapped
                    | TimerOutcome::Reversed
                    | TimerOutcome::Skipped,
                ) => glib::ControlFlow::Continue,
                _ => {
                    // Returning `Break` removes the source; only forget its id.
                    if let Some(slot) = source_slot.upgrade() {
                        slot.borrow_mut().take();
                    }
                    glib::ControlFlow::Break
                }
            }
        });
        *self.playback_source.borrow_mut() = Some(source_id);
        Ok(())
    }

    /// Pauses playback and removes the timer source.
    pub fn pause(&self) {
        self.slider.borrow_mut().pause();
        self.remove_timer();
        self.drawing_area.queue_draw();
    }

    pub fn toggle_playback(&self) -> ToolkitResult<PlaybackState> {
        if self.slider.borrow().is_playing() {
            self.pause();
        } else {
            self.play()?;
        }
        Ok(self.slider.borrow().playback_state())
    }

    pub fn step_forward(&self) -> ToolkitResult<StepOutcome> {
        let outcome = self.slider.borrow_mut().step_forward(1)?;
        self.sync_timer_with_playback();
        self.drawing_area.queue_draw();
        Ok(outcome)
    }

    pub fn step_backward(&self) -> ToolkitResult<StepOutcome> {
        let outcome = self.slider.borrow_mut().step_backward(1)?;
        self.sync_timer_with_playback();
        self.drawing_area.queue_draw();
        Ok(outcome)
    }

    fn sync_timer_with_playback(&self) {
        if !self.slider.borrow().is_playing() {
            self.remove_timer();
        }
    }

    fn remove_timer(&self) {
        if let Some(source_id) = self.playback_source.borrow_mut().take() {
            source_id.remove();
        }
    }

    fn attach_draw_func(&self) {
        let slider = Rc::downgrade(&self.slider);
        self.drawing_area.set_draw_func(move |_, context, _, _| {
            let Some(slider) = slider.upgrade() else {
                return;
            };
            let Ok(mut slider) = slider.try_borrow_mut() else {
                return;
            };
            if let Err(err) = slider.render_on_cairo_context(context) {
                warn!(error = %err, "time slider draw failed");
            }
        });
    }

    fn attach_resize_handler(&self) {
        let slider = Rc::downgrade(&self.slider);
        self.drawing_area.connect_resize(move |area, width, height| {
            let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
                return;
            };
            let Some(slider) = slider.upgrade() else {
                return;
            };
            if let Ok(mut slider) = slider.try_borrow_mut() {
                if let Err(err) = slider.set_viewport(Viewport::new(width, height)) {
                    trace!(error = %err, "ignoring unusable slider size");
                }
            }
            area.queue_draw();
        });
    }

    fn attach_thumb_drag(&self) {
        let drag = gtk::GestureDrag::new();
        {
            let slider = Rc::downgrade(&self.slider);
            drag.connect_drag_begin(move |_, start_x, _| {
                let Some(slider) = slider.upgrade() else {
                    return;
                };
                if let Ok(mut slider) = slider.try_borrow_mut() {
                    slider.begin_thumb_drag(start_x);
                }
            });
        }
        {
            let slider = Rc::downgrade(&self.slider);
            drag.connect_drag_update(move |gesture, offset_x, _| {
                let Some((start_x, _)) = gesture.start_point() else {
                    return;
                };
                let Some(slider) = slider.upgrade() else {
                    return;
                };
                let Ok(mut slider) = slider.try_borrow_mut() else {
                    return;
                };
                match slider.drag_thumb_to(start_x + offset_x) {
                    Ok(true) => {
                        if let Some(area) = gesture.widget() {
                            area.queue_draw();
                        }
                    }
                    Ok(false) => {}
                    Err(err) => trace!(error = %err, "thumb drag ignored"),
                }
            });
        }
        {
            let slider = Rc::downgrade(&self.slider);
            drag.connect_drag_end(move |_, _, _| {
                let Some(slider) = slider.upgrade() else {
                    return;
                };
                if let Ok(mut slider) = slider.try_borrow_mut() {
                    slider.end_thumb_drag();
                }
            });
        }
        self.drawing_area.add_controller(drag);
    }
}

impl Drop for GtkTimeSliderAdapter {
    fn drop(&mut self) {
        self.remove_timer();
    }
}

/// Runs one playback tick; `None` once the slider is gone or the tick failed.
fn on_timer_tick(
    slider: &Weak<RefCell<TimeSlider<CairoRenderer>>>,
    busy_check: &Rc<RefCell<RenderBusyCheck>>,
) -> Option<TimerOutcome> {
    let slider = slider.upgrade()?;
    let render_in_progress = (busy_check.borrow())();
    let Ok(mut slider) = slider.try_borrow_mut() else {
        return Some(TimerOutcome::Skipped);
    };
    match slider.on_playback_timer(render_in_progress) {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            warn!(error = %err, "playback tick failed");
            slider.pause();
            None
        }
    }
}
