//! User interaction with the map.
//!
//! Interaction handling is done in several steps:
//! 1. UI toolkit event is converted to a common [`RawUserEvent`] by the widget showing the map.
//! 2. `RawUserEvent` is given to the [`EventProcessor`], which keeps track of the pointer and
//!    buttons state and converts it into [`UserEvent`]s such as clicks and drags.
//! 3. `EventProcessor` gives the events to its [`UserEventHandler`]s, e.g. [`MapController`]
//!    pans and zooms the map, and returns them to the caller.

use ecoleta_types::cartesian::{Point2d, Vector2d};
use maybe_sync::{MaybeSend, MaybeSync};

use crate::map::Map;

mod event_processor;
mod map_controller;

pub use event_processor::EventProcessor;
pub use map_controller::{MapController, MapControllerConfiguration};

/// User input handler.
pub trait UserEventHandler: MaybeSend + MaybeSync {
    /// Handle the event.
    fn handle(&self, event: &UserEvent, map: &mut Map) -> EventPropagation;
}

impl<T: for<'a> Fn(&'a UserEvent, &'a mut Map) -> EventPropagation> UserEventHandler for T
where
    T: MaybeSync + MaybeSend,
{
    fn handle(&self, event: &UserEvent, map: &mut Map) -> EventPropagation {
        self(event, map)
    }
}

/// Whether an event should be given to the next handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPropagation {
    /// Give the event to the next handler.
    Propagate,
    /// Do not give the event to other handlers.
    Stop,
}

/// Raw pointer event in screen pixel coordinates of the map widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawUserEvent {
    /// A mouse button was pressed.
    ButtonPressed(MouseButton),
    /// A mouse button was released.
    ButtonReleased(MouseButton),
    /// Mouse pointer was moved to the given screen pixel position.
    PointerMoved(Point2d),
    /// Scroll by the given number of lines, positive values scroll up.
    Scroll(f64),
}

/// Interaction event, combining a raw event with the input state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserEvent {
    /// A mouse button was pressed.
    ButtonPressed(MouseButton, MouseEvent),
    /// A mouse button was released.
    ButtonReleased(MouseButton, MouseEvent),
    /// A mouse button was pressed and released shortly after, without moving the pointer.
    Click(MouseButton, MouseEvent),
    /// Mouse pointer moved.
    PointerMoved(MouseEvent),
    /// The pointer moved far enough with a button pressed for the gesture to be a drag.
    DragStarted(MouseButton, MouseEvent),
    /// Pointer moved by the given number of pixels while dragging.
    Drag(MouseButton, Vector2d, MouseEvent),
    /// The button that started the drag was released.
    DragEnded(MouseButton, MouseEvent),
    /// Scroll by the given number of lines, positive values scroll up.
    Scroll(f64, MouseEvent),
}

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left (primary) button.
    Left,
    /// Middle button.
    Middle,
    /// Right (secondary) button.
    Right,
    /// Any other button.
    Other,
}

/// Pointer state attached to a [`UserEvent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// Pointer position in screen pixels.
    pub screen_pointer_position: Point2d,
    /// Buttons pressed at the time of the event.
    pub buttons: MouseButtonsState,
}

/// Which mouse buttons are currently pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseButtonsState {
    /// Left button.
    pub left: bool,
    /// Middle button.
    pub middle: bool,
    /// Right button.
    pub right: bool,
}

impl MouseButtonsState {
    pub(crate) fn set_pressed(&mut self, button: MouseButton) {
        self.set(button, true);
    }

    pub(crate) fn set_released(&mut self, button: MouseButton) {
        self.set(button, false);
    }

    pub(crate) fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Other => false,
        }
    }

    fn set(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Middle => self.middle = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Other => {}
        }
    }

    /// The pressed button, if exactly one is pressed.
    pub fn single_pressed(&self) -> Option<MouseButton> {
        match (self.left, self.middle, self.right) {
            (true, false, false) => Some(MouseButton::Left),
            (false, true, false) => Some(MouseButton::Middle),
            (false, false, true) => Some(MouseButton::Right),
            _ => None,
        }
    }
}
