use tracing::{trace, warn};

use crate::error::{ToolkitError, ToolkitResult};
use crate::extensions::{SliderContext, SliderEvent, SliderObserver};
use crate::render::Renderer;

use super::{MAX_PENDING_EVENTS, TimeSlider};

impl<R: Renderer> TimeSlider<R> {
    /// Registers an observer. Ids must be non-empty and unique.
    pub fn register_observer(&mut self, observer: Box<dyn SliderObserver>) -> ToolkitResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(ToolkitError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(&observer_id) {
            return Err(ToolkitError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        match self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            Some(position) => {
                self.observers.remove(position);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers.iter().any(|entry| entry.id() == observer_id)
    }

    /// Snapshot handed to observers alongside each event.
    #[must_use]
    pub fn context(&self) -> SliderContext {
        SliderContext {
            full_extent: self.full_extent(),
            current_extent: self.current_extent(),
            step_count: self.time_steps().len(),
            start_index: self.selection.start,
            end_index: self.selection.end,
            is_range_enabled: self.range_enabled,
            playback_state: self.playback,
        }
    }

    pub(super) fn emit(&mut self, event: SliderEvent) {
        trace!(?event, observers = self.observers.len(), "emit slider event");
        let context = self.context();
        for observer in &mut self.observers {
            observer.on_event(event, context);
        }
        if self.pending_events.len() >= MAX_PENDING_EVENTS {
            self.pending_events.pop_front();
            self.dropped_events += 1;
            if self.dropped_events == 1 {
                warn!(
                    capacity = MAX_PENDING_EVENTS,
                    "slider event queue full; dropping oldest events until drained"
                );
            }
        }
        self.pending_events.push_back(event);
    }

    pub(super) fn emit_current_extent_changed(&mut self) {
        if let Some(extent) = self.current_extent() {
            self.emit(SliderEvent::CurrentExtentChanged {
                start: extent.start(),
                end: extent.end(),
            });
        }
    }
}
