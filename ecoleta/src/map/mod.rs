//! Model of the interactive map: the current view, fly-to animation, base map tiles and user input
//! handling. Rendering is left to the UI toolkit.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use ecoleta_types::cartesian::Size;
use ecoleta_types::geo::GeoPoint;
use web_time::Instant;

use crate::config::Config;
use crate::error::EcoletaError;
use crate::messenger::Messenger;

mod attribution;
pub mod control;
mod decoded_image;
mod image_provider;
mod tile_schema;
mod view;

pub use attribution::Attribution;
pub use decoded_image::DecodedImage;
pub use image_provider::{load_image, ImageProvider, ImageState, UrlSource};
pub use tile_schema::{TileIndex, TileSchema};
pub use view::MapView;

const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Duration of the animation used to move the map to a located position.
pub const FLY_DURATION: Duration = Duration::from_millis(600);

/// Current view of the map together with the animation state.
pub struct Map {
    view: MapView,
    animation: Option<AnimationParameters>,
    messenger: Option<Arc<dyn Messenger>>,
}

#[derive(Debug)]
struct AnimationParameters {
    start_view: MapView,
    end_view: MapView,
    start_time: Instant,
    duration: Duration,
}

impl std::fmt::Debug for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("view", &self.view)
            .field("animation", &self.animation)
            .finish_non_exhaustive()
    }
}

impl Map {
    /// Creates a new map showing the given view.
    pub fn new(view: MapView) -> Self {
        Self {
            view,
            animation: None,
            messenger: None,
        }
    }

    /// Creates a map with the initial position and z-level from the configuration.
    pub fn from_config(config: &Config, tile_schema: &TileSchema) -> Result<Self, EcoletaError> {
        let resolution = tile_schema
            .resolution(config.initial_z_level)
            .ok_or_else(|| {
                EcoletaError::Config(format!(
                    "z-level {} is not supported by the tile schema",
                    config.initial_z_level
                ))
            })?;

        let view = MapView::new(&config.initial_position, resolution).ok_or_else(|| {
            EcoletaError::Config(format!(
                "initial position {} cannot be shown on the map",
                config.initial_position
            ))
        })?;

        Ok(Self::new(view))
    }

    /// Sets the messenger notified when the view changes.
    pub fn set_messenger(&mut self, messenger: Option<Arc<dyn Messenger>>) {
        self.messenger = messenger;
    }

    /// Current view of the map.
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Changes the view of the map to the given one, cancelling any running animation.
    pub fn set_view(&mut self, view: MapView) {
        self.animation = None;
        self.view = view;
        self.redraw();
    }

    /// Set the size of the viewport in pixels.
    pub fn set_size(&mut self, new_size: Size) {
        self.view = self.view.with_size(new_size);
        if let Some(animation) = &mut self.animation {
            animation.start_view = animation.start_view.with_size(new_size);
            animation.end_view = animation.end_view.with_size(new_size);
        }
    }

    /// Request redraw of the map.
    pub fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw()
        }
    }

    /// Updates the view before rendering if an animation is running. Returns true while the
    /// animation is not finished.
    pub fn animate(&mut self) -> bool {
        let Some(animation) = &self.animation else {
            return false;
        };

        let k = animation.start_time.elapsed().as_secs_f64() / animation.duration.as_secs_f64();

        let running = if k >= 1.0 {
            self.view = animation.end_view;
            self.animation = None;
            false
        } else {
            self.view = animation.start_view.interpolate(&animation.end_view, k);
            true
        };

        self.redraw();
        running
    }

    /// Target view of the current animation, or the current view if nothing is animated.
    pub fn target_view(&self) -> &MapView {
        self.animation
            .as_ref()
            .map(|v| &v.end_view)
            .unwrap_or(&self.view)
    }

    /// Request a gradual change of the map view to the specified view.
    pub fn animate_to(&mut self, target: MapView, duration: Duration) {
        if duration.is_zero() {
            self.set_view(target);
            return;
        }

        self.animation = Some(AnimationParameters {
            start_view: self.view,
            end_view: target,
            start_time: Instant::now() - FRAME_DURATION,
            duration,
        });
        self.redraw();
    }

    /// Moves the map center to the position keeping the current resolution. Returns false if the
    /// position cannot be shown on the map.
    pub fn fly_to(&mut self, position: &impl GeoPoint, duration: Duration) -> bool {
        match self.target_view().with_position(position) {
            Some(target) => {
                self.animate_to(target, duration);
                true
            }
            None => false,
        }
    }
}

/// Formats a tile url template (`{z}`, `{x}`, `{y}` placeholders) for the tile index.
pub fn tile_url(template: &str, index: &TileIndex) -> Result<String, EcoletaError> {
    let vars = HashMap::from([
        ("x".to_string(), index.x.to_string()),
        ("y".to_string(), index.y.to_string()),
        ("z".to_string(), index.z.to_string()),
    ]);

    strfmt::strfmt(template, &vars).map_err(|e| EcoletaError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use ecoleta_types::latlon;

    use super::*;

    fn map() -> Map {
        Map::from_config(&Config::default(), &TileSchema::web(18)).expect("valid config")
    }

    #[test]
    fn initial_view_from_config() {
        let map = map();
        let position = map.view().position().expect("valid position");
        assert_relative_eq!(position.lat(), -28.4899659, epsilon = 1e-9);
        assert_relative_eq!(
            map.view().resolution(),
            TileSchema::web(18).resolution(13).expect("z13")
        );
    }

    #[test]
    fn unsupported_z_level() {
        let config = Config {
            initial_z_level: 25,
            ..Default::default()
        };
        assert_matches!(
            Map::from_config(&config, &TileSchema::web(18)),
            Err(EcoletaError::Config(_))
        );
    }

    #[test]
    fn fly_to_keeps_resolution() {
        let mut map = map();
        map.set_size(Size::new(800.0, 600.0));
        let resolution = map.view().resolution();

        assert!(map.fly_to(&latlon!(-27.5954, -48.548), FLY_DURATION));

        let target = map.target_view();
        assert_eq!(target.resolution(), resolution);
        let target_position = target.position().expect("valid position");
        assert_relative_eq!(target_position.lat(), -27.5954, epsilon = 1e-9);
        assert_relative_eq!(target_position.lon(), -48.548, epsilon = 1e-9);
    }

    #[test]
    fn animation_finishes_at_target() {
        let mut map = map();
        map.fly_to(&latlon!(-27.5954, -48.548), Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));

        assert!(!map.animate());
        let position = map.view().position().expect("valid position");
        assert_relative_eq!(position.lon(), -48.548, epsilon = 1e-9);
        assert!(!map.animate());
    }

    #[test]
    fn format_tile_url() {
        let url = tile_url(
            "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            &TileIndex::new(3025, 4707, 13),
        )
        .expect("valid template");
        assert_eq!(url, "https://tile.openstreetmap.org/13/3025/4707.png");

        assert!(tile_url("https://tiles/{q}.png", &TileIndex::new(0, 0, 0)).is_err());
    }
}
