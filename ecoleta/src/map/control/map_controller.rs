use std::time::Duration;

use crate::map::control::{EventPropagation, MouseButton, UserEvent, UserEventHandler};
use crate::map::{Map, MapView};

const DEFAULT_ZOOM_DURATION: Duration = Duration::from_millis(50);

/// Configuration of a [`MapController`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct MapControllerConfiguration {
    zoom_duration: Duration,
    zoom_speed: f64,
    min_resolution: f64,
    max_resolution: f64,
}

impl Default for MapControllerConfiguration {
    fn default() -> Self {
        Self {
            zoom_duration: DEFAULT_ZOOM_DURATION,
            zoom_speed: 0.2,
            max_resolution: 156543.03392800014 / 4.0,
            min_resolution: 156543.03392800014 / 2.0f64.powi(19),
        }
    }
}

impl MapControllerConfiguration {
    /// Duration of the zoom animation when mouse wheel is turned.
    pub fn zoom_duration(&self) -> Duration {
        self.zoom_duration
    }

    /// Sets duration of the zoom animation when mouse wheel is turned.
    pub fn with_zoom_duration(mut self, duration: Duration) -> Self {
        self.zoom_duration = duration;
        self
    }

    /// Magnitude of the zoom on every mouse wheel turn.
    ///
    /// For example, the value of `0.2` means that every time the mouse wheel is turned, the map
    /// is zoomed by 0.2 times.
    pub fn zoom_speed(&self) -> f64 {
        self.zoom_speed
    }

    /// Minimum allowed resolution.
    pub fn min_resolution(&self) -> f64 {
        self.min_resolution
    }

    /// Sets minimum allowed resolution.
    pub fn with_min_resolution(mut self, resolution: f64) -> Self {
        self.min_resolution = resolution;
        self
    }

    /// Maximum allowed resolution.
    pub fn max_resolution(&self) -> f64 {
        self.max_resolution
    }
}

/// Event handler of a map, providing panning and zooming.
#[derive(Default, Copy, Clone, PartialEq, Debug)]
pub struct MapController {
    config: MapControllerConfiguration,
}

impl MapController {
    /// Creates a new instance of `MapController` with the given configuration.
    pub fn new(config: MapControllerConfiguration) -> Self {
        Self { config }
    }

    /// Returns the current configuration of the controller.
    pub fn config(&self) -> MapControllerConfiguration {
        self.config
    }

    fn get_zoom(&self, delta: f64) -> f64 {
        (self.config.zoom_speed + 1.0).powf(-delta)
    }

    fn adjust_target_view(&self, target: MapView) -> MapView {
        let resolution = target
            .resolution()
            .clamp(self.config.min_resolution, self.config.max_resolution);
        target.with_resolution(resolution)
    }
}

impl UserEventHandler for MapController {
    fn handle(&self, event: &UserEvent, map: &mut Map) -> EventPropagation {
        match event {
            UserEvent::DragStarted(MouseButton::Left | MouseButton::Other, _) => {
                EventPropagation::Stop
            }
            UserEvent::Drag(MouseButton::Left | MouseButton::Other, delta, _) => {
                let target = map.view().translate_by_pixels(*delta);
                map.set_view(self.adjust_target_view(target));
                EventPropagation::Stop
            }
            UserEvent::Scroll(delta, mouse_event) => {
                let zoom = self.get_zoom(*delta);
                let target = map
                    .target_view()
                    .zoom(zoom, mouse_event.screen_pointer_position);
                map.animate_to(self.adjust_target_view(target), self.config.zoom_duration);
                EventPropagation::Stop
            }
            _ => EventPropagation::Propagate,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ecoleta_types::cartesian::{Point2d, Size, Vector2d};
    use ecoleta_types::latlon;

    use super::*;
    use crate::map::control::{MouseButtonsState, MouseEvent};

    fn map(resolution: f64) -> Map {
        let view = MapView::new(&latlon!(0.0, 0.0), resolution)
            .expect("valid position")
            .with_size(Size::new(200.0, 100.0));
        Map::new(view)
    }

    fn mouse_event(x: f64, y: f64) -> MouseEvent {
        MouseEvent {
            screen_pointer_position: Point2d::new(x, y),
            buttons: MouseButtonsState::default(),
        }
    }

    #[test]
    fn resolution_is_clamped() {
        let controller = MapController::default();
        let view = MapView::new(&latlon!(0.0, 0.0), 1e-6).expect("valid position");
        assert_relative_eq!(
            controller.adjust_target_view(view).resolution(),
            controller.config().min_resolution()
        );

        let view = view.with_resolution(1e9);
        assert_relative_eq!(
            controller.adjust_target_view(view).resolution(),
            controller.config().max_resolution()
        );
    }

    #[test]
    fn drag_pans_map() {
        let controller = MapController::default();
        let mut map = map(10.0);

        let event = UserEvent::Drag(
            MouseButton::Left,
            Vector2d::new(10.0, 0.0),
            mouse_event(110.0, 50.0),
        );
        assert_eq!(controller.handle(&event, &mut map), EventPropagation::Stop);
        assert_relative_eq!(map.view().projected_position().x, -100.0);
    }

    #[test]
    fn scroll_up_zooms_in() {
        let controller = MapController::new(
            MapControllerConfiguration::default().with_zoom_duration(Duration::ZERO),
        );
        let mut map = map(10.0);

        controller.handle(&UserEvent::Scroll(1.0, mouse_event(100.0, 50.0)), &mut map);
        assert_relative_eq!(map.view().resolution(), 10.0 / 1.2);
    }

    #[test]
    fn click_is_propagated() {
        let controller = MapController::default();
        let mut map = map(10.0);

        let event = UserEvent::Click(MouseButton::Left, mouse_event(0.0, 0.0));
        assert_eq!(
            controller.handle(&event, &mut map),
            EventPropagation::Propagate
        );
    }
}
