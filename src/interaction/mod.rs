use serde::{Deserialize, Serialize};

/// One of the two current-extent thumbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Thumb {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    DraggingThumb(Thumb),
}

/// Pointer state for thumb dragging.
///
/// Only tracks which thumb is grabbed; the slider decides where it lands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    last_pointer_x: Option<f64>,
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn dragging_thumb(self) -> Option<Thumb> {
        match self.mode {
            InteractionMode::DraggingThumb(thumb) => Some(thumb),
            InteractionMode::Idle => None,
        }
    }

    #[must_use]
    pub fn last_pointer_x(self) -> Option<f64> {
        self.last_pointer_x
    }

    pub fn on_drag_start(&mut self, thumb: Thumb, x: f64) {
        self.mode = InteractionMode::DraggingThumb(thumb);
        self.last_pointer_x = Some(x);
    }

    pub fn on_drag_move(&mut self, x: f64) {
        if self.dragging_thumb().is_some() {
            self.last_pointer_x = Some(x);
        }
    }

    pub fn on_drag_end(&mut self) {
        self.mode = InteractionMode::Idle;
        self.last_pointer_x = None;
    }
}

/// Picks the thumb closest to `x` among the grabbable ones.
///
/// When both thumbs sit on the same pixel the direction of approach
/// decides: a pointer right of them grabs the end thumb.
#[must_use]
pub fn nearest_thumb(
    x: f64,
    start_x: f64,
    end_x: f64,
    start_grabbable: bool,
    end_grabbable: bool,
) -> Option<Thumb> {
    match (start_grabbable, end_grabbable) {
        (false, false) => None,
        (true, false) => Some(Thumb::Start),
        (false, true) => Some(Thumb::End),
        (true, true) => {
            let start_distance = (x - start_x).abs();
            let end_distance = (x - end_x).abs();
            if start_distance < end_distance || (start_distance == end_distance && x < end_x) {
                Some(Thumb::Start)
            } else {
                Some(Thumb::End)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionMode, InteractionState, Thumb, nearest_thumb};

    #[test]
    fn drag_lifecycle_tracks_thumb() {
        let mut state = InteractionState::default();
        state.on_drag_start(Thumb::End, 40.0);
        state.on_drag_move(55.0);
        assert_eq!(state.mode(), InteractionMode::DraggingThumb(Thumb::End));
        assert_eq!(state.last_pointer_x(), Some(55.0));
        state.on_drag_end();
        assert_eq!(state.dragging_thumb(), None);
    }

    #[test]
    fn overlapping_thumbs_resolve_by_pointer_side() {
        assert_eq!(nearest_thumb(90.0, 100.0, 100.0, true, true), Some(Thumb::Start));
        assert_eq!(nearest_thumb(110.0, 100.0, 100.0, true, true), Some(Thumb::End));
        assert_eq!(nearest_thumb(110.0, 100.0, 100.0, true, false), Some(Thumb::Start));
    }
}
