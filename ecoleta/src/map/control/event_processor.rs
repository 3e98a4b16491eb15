use ecoleta_types::cartesian::{CartesianPoint2d, Point2d};

use crate::map::control::{
    EventPropagation, MouseButton, MouseButtonsState, MouseEvent, RawUserEvent, UserEvent,
    UserEventHandler,
};
use crate::map::Map;

const DRAG_THRESHOLD: f64 = 3.0;

/// Converts [`RawUserEvent`]s into [`UserEvent`]s and gives them to the handlers.
///
/// Releasing a pressed button produces a [`UserEvent::Click`] unless the pointer moved far enough
/// to start a drag. How long the button was held does not matter.
pub struct EventProcessor {
    handlers: Vec<Box<dyn UserEventHandler>>,
    pointer_position: Point2d,
    pointer_pressed_position: Point2d,
    buttons_state: MouseButtonsState,
    dragging: Option<MouseButton>,
}

impl Default for EventProcessor {
    fn default() -> Self {
        Self {
            handlers: vec![],
            pointer_position: Default::default(),
            pointer_pressed_position: Default::default(),
            buttons_state: Default::default(),
            dragging: None,
        }
    }
}

impl EventProcessor {
    /// Adds a handler. Handlers are called in the order they were added.
    pub fn add_handler(&mut self, handler: impl UserEventHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Returns true while a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Processes the event, lets the handlers act on the map, and returns the produced events.
    pub fn handle(&mut self, event: RawUserEvent, map: &mut Map) -> Vec<UserEvent> {
        let events = self.process(event);

        for user_event in &events {
            for handler in &self.handlers {
                if handler.handle(user_event, map) == EventPropagation::Stop {
                    break;
                }
            }
        }

        events
    }

    pub(crate) fn process(&mut self, event: RawUserEvent) -> Vec<UserEvent> {
        match event {
            RawUserEvent::ButtonPressed(button) => {
                self.buttons_state.set_pressed(button);
                self.pointer_pressed_position = self.pointer_position;

                vec![UserEvent::ButtonPressed(button, self.mouse_event())]
            }
            RawUserEvent::ButtonReleased(button) => {
                let was_pressed = self.buttons_state.is_pressed(button);
                self.buttons_state.set_released(button);
                let mut events = vec![UserEvent::ButtonReleased(button, self.mouse_event())];

                if self.dragging == Some(button) {
                    self.dragging = None;
                    events.push(UserEvent::DragEnded(button, self.mouse_event()));
                } else if self.dragging.is_none() && was_pressed {
                    events.push(UserEvent::Click(button, self.mouse_event()));
                }

                events
            }
            RawUserEvent::PointerMoved(position) => {
                let prev_position = self.pointer_position;
                self.pointer_position = position;

                let mut events = vec![UserEvent::PointerMoved(self.mouse_event())];
                if let Some(button) = self.buttons_state.single_pressed() {
                    if self.dragging.is_none()
                        && position.taxicab_distance(&self.pointer_pressed_position)
                            > DRAG_THRESHOLD
                    {
                        self.dragging = Some(button);
                        events.push(UserEvent::DragStarted(
                            button,
                            MouseEvent {
                                screen_pointer_position: self.pointer_pressed_position,
                                buttons: self.buttons_state,
                            },
                        ));
                        events.push(UserEvent::Drag(
                            button,
                            position - self.pointer_pressed_position,
                            self.mouse_event(),
                        ));
                    } else if self.dragging == Some(button) {
                        events.push(UserEvent::Drag(
                            button,
                            position - prev_position,
                            self.mouse_event(),
                        ));
                    }
                }

                events
            }
            RawUserEvent::Scroll(delta) => vec![UserEvent::Scroll(delta, self.mouse_event())],
        }
    }

    fn mouse_event(&self) -> MouseEvent {
        MouseEvent {
            screen_pointer_position: self.pointer_position,
            buttons: self.buttons_state,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use ecoleta_types::cartesian::{Size, Vector2d};
    use ecoleta_types::geo::GeoPoint;

    use super::*;
    use crate::config::Config;
    use crate::location::LocationPicker;
    use crate::map::TileSchema;

    fn has_click(events: &[UserEvent]) -> bool {
        events
            .iter()
            .any(|e| matches!(e, UserEvent::Click(MouseButton::Left, _)))
    }

    #[test]
    fn short_press_is_a_click() {
        let mut processor = EventProcessor::default();

        processor.process(RawUserEvent::PointerMoved(Point2d::new(10.0, 10.0)));
        processor.process(RawUserEvent::ButtonPressed(MouseButton::Left));
        let events = processor.process(RawUserEvent::ButtonReleased(MouseButton::Left));

        let click = events
            .iter()
            .find(|e| matches!(e, UserEvent::Click(..)))
            .expect("click event");
        assert_matches!(
            click,
            UserEvent::Click(MouseButton::Left, MouseEvent { screen_pointer_position, .. })
                if *screen_pointer_position == Point2d::new(10.0, 10.0)
        );
    }

    #[test]
    fn small_jitter_is_still_a_click() {
        let mut processor = EventProcessor::default();

        processor.process(RawUserEvent::ButtonPressed(MouseButton::Left));
        processor.process(RawUserEvent::PointerMoved(Point2d::new(1.0, 1.0)));
        let events = processor.process(RawUserEvent::ButtonReleased(MouseButton::Left));

        assert!(has_click(&events));
        assert!(!processor.is_dragging());
    }

    #[test]
    fn release_without_press_is_not_a_click() {
        let mut processor = EventProcessor::default();
        let events = processor.process(RawUserEvent::ButtonReleased(MouseButton::Left));
        assert!(!has_click(&events));
    }

    #[test]
    fn slow_stationary_press_picks_position() {
        let mut map = Map::from_config(&Config::default(), &TileSchema::web(18)).expect("map");
        map.set_size(Size::new(800.0, 600.0));
        let mut processor = EventProcessor::default();
        let mut picker = LocationPicker::new();

        processor.handle(RawUserEvent::PointerMoved(Point2d::new(400.0, 300.0)), &mut map);
        processor.handle(RawUserEvent::ButtonPressed(MouseButton::Left), &mut map);
        std::thread::sleep(Duration::from_millis(250));
        let events = processor.handle(RawUserEvent::ButtonReleased(MouseButton::Left), &mut map);

        for event in &events {
            if let UserEvent::Click(MouseButton::Left, mouse_event) = event {
                if let Some(position) = map
                    .view()
                    .screen_to_map_geo(mouse_event.screen_pointer_position)
                {
                    picker.click(position);
                }
            }
        }

        let picked = picker.position().expect("position is picked");
        let center = map.view().position().expect("valid center");
        assert_relative_eq!(picked.lat(), center.lat(), epsilon = 1e-9);
        assert_relative_eq!(picked.lon(), center.lon(), epsilon = 1e-9);
    }

    #[test]
    fn moving_pointer_starts_a_drag() {
        let mut processor = EventProcessor::default();

        processor.process(RawUserEvent::ButtonPressed(MouseButton::Left));
        let events = processor.process(RawUserEvent::PointerMoved(Point2d::new(10.0, 0.0)));
        assert_matches!(events[1], UserEvent::DragStarted(MouseButton::Left, _));
        assert_matches!(
            events[2],
            UserEvent::Drag(MouseButton::Left, delta, _) if delta == Vector2d::new(10.0, 0.0)
        );
        assert!(processor.is_dragging());

        let events = processor.process(RawUserEvent::PointerMoved(Point2d::new(15.0, 5.0)));
        assert_matches!(
            events[1],
            UserEvent::Drag(MouseButton::Left, delta, _) if delta == Vector2d::new(5.0, 5.0)
        );

        let events = processor.process(RawUserEvent::ButtonReleased(MouseButton::Left));
        assert_matches!(events[1], UserEvent::DragEnded(MouseButton::Left, _));
        assert!(!has_click(&events));
        assert!(!processor.is_dragging());
    }
}
