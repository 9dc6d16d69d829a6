//! Touch screen event handling.

use super::{HandledTouch, InputEvent, TouchEvent};

/// Trait for touch screen input event handling.
///
/// Implemented by hosts that own a gesture controller together with the collaborators it
/// queries.
pub trait TouchInput {
    /// Handle touch start event.
    fn on_touch_start(&mut self, evt: &TouchEvent) -> HandledTouch;

    /// Handle touch move event.
    fn on_touch_move(&mut self, evt: &TouchEvent) -> HandledTouch;

    /// Handle touch end event.
    fn on_touch_end(&mut self, evt: &TouchEvent) -> HandledTouch;

    /// Handle touch cancel event.
    ///
    /// The platform took the touch away, so this behaves like a release that never navigates.
    fn on_touch_cancel(&mut self, evt: &TouchEvent) -> HandledTouch;

    fn process_input_event(&mut self, event: &InputEvent) -> HandledTouch {
        match event {
            InputEvent::TouchStart(evt) => self.on_touch_start(evt),
            InputEvent::TouchMove(evt) => self.on_touch_move(evt),
            InputEvent::TouchEnd(evt) => self.on_touch_end(evt),
            InputEvent::TouchCancel(evt) => self.on_touch_cancel(evt),
        }
    }
}
