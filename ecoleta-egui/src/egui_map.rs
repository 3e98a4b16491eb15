use std::sync::Arc;

use ecoleta::config::Config;
use ecoleta::ecoleta_types::cartesian::{Point2d, Size};
use ecoleta::ecoleta_types::geo::GeoPoint2d;
use ecoleta::http::HttpClient;
use ecoleta::location::LocationPicker;
use ecoleta::map::control::{
    EventProcessor, MapController, MapControllerConfiguration, MouseButton, RawUserEvent,
    UserEvent,
};
use ecoleta::map::{tile_url, Attribution, ImageProvider, Map, MapView, TileIndex, TileSchema};
use ecoleta::{EcoletaError, Messenger};
use egui::{Color32, Event, Painter, Sense, Stroke, Ui};
use serde::{Deserialize, Serialize};

use crate::textures::TextureStore;

const TILE_CACHE_CAPACITY: usize = 512;
const TILE_TEXTURE_CAPACITY: usize = 128;
const MARKER_RADIUS: f32 = 8.0;
const MARKER_COLOR: Color32 = Color32::from_rgb(52, 203, 121);

/// Map view saved between runs of the application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredView {
    /// Center of the map.
    pub position: GeoPoint2d,
    /// Resolution of the map.
    pub resolution: f64,
}

impl StoredView {
    /// Stored form of the view, `None` if its center is not a valid geographic point.
    pub fn from_view(view: &MapView) -> Option<Self> {
        Some(Self {
            position: view.position()?,
            resolution: view.resolution(),
        })
    }

    /// Restores the view.
    pub fn to_view(&self) -> Option<MapView> {
        MapView::new(&self.position, self.resolution)
    }
}

/// Widget showing the map and, if a [`LocationPicker`] is given, the picked position.
///
/// Clicks on the map set the position of the picker.
pub struct EguiMap<'a> {
    state: &'a mut EguiMapState,
    picker: Option<&'a mut LocationPicker>,
}

impl<'a> EguiMap<'a> {
    /// Creates a widget for the map state.
    pub fn new(state: &'a mut EguiMapState) -> Self {
        Self {
            state,
            picker: None,
        }
    }

    /// Position picked by clicking the map is written into the `picker`.
    pub fn with_picker(mut self, picker: &'a mut LocationPicker) -> Self {
        self.picker = Some(picker);
        self
    }

    /// Shows the map in all the available space of the `ui`.
    pub fn show_ui(self, ui: &mut Ui) -> egui::Response {
        let MapFrame {
            rect,
            response,
            events,
        } = self.state.render(ui);

        let mut marker = None;
        if let Some(picker) = self.picker {
            for event in &events {
                if let UserEvent::Click(MouseButton::Left, mouse_event) = event {
                    let screen_position = mouse_event.screen_pointer_position;
                    if let Some(position) = self.state.map.view().screen_to_map_geo(screen_position)
                    {
                        picker.click(position);
                    }
                }
            }

            marker = picker.position();
        }

        let painter = ui.painter_at(rect);
        if let Some(position) = marker {
            self.state.paint_marker(&painter, rect, &position);
        }

        self.state.show_attribution(ui, rect);

        response
    }
}

struct MapFrame {
    rect: egui::Rect,
    response: egui::Response,
    events: Vec<UserEvent>,
}

/// State of the map widget kept between frames: the map, its base layer tiles and the input
/// state.
pub struct EguiMapState {
    map: Map,
    tile_schema: TileSchema,
    tiles: ImageProvider<TileIndex>,
    textures: TextureStore<TileIndex>,
    attribution: Attribution,
    event_processor: EventProcessor,
}

impl EguiMapState {
    /// Creates the map for the configuration. The `stored_view`, if any, replaces the initial
    /// view from the configuration.
    pub fn new(
        config: &Config,
        client: HttpClient,
        messenger: Arc<dyn Messenger>,
        stored_view: Option<StoredView>,
    ) -> Result<Self, EcoletaError> {
        let tile_schema = TileSchema::web(config.tiles.max_z);
        let mut map = Map::from_config(config, &tile_schema)?;
        if let Some(view) = stored_view.and_then(|stored| stored.to_view()) {
            map.set_view(view);
        }
        map.set_messenger(Some(messenger.clone()));

        let template = config.tiles.url_template.clone();
        tile_url(&template, &TileIndex::new(0, 0, 0))?;
        let tiles = ImageProvider::new(
            move |index: &TileIndex| tile_url(&template, index).ok(),
            client,
            TILE_CACHE_CAPACITY,
        )
        .with_messenger(messenger);

        let controller_config = MapControllerConfiguration::default()
            .with_min_resolution(tile_schema.min_resolution());

        let mut event_processor = EventProcessor::default();
        event_processor.add_handler(MapController::new(controller_config));

        Ok(Self {
            map,
            tile_schema,
            tiles,
            textures: TextureStore::new(TILE_TEXTURE_CAPACITY),
            attribution: Attribution::new(
                config.tiles.attribution.clone(),
                config.tiles.attribution_url.clone(),
            ),
            event_processor,
        })
    }

    /// The map shown by the widget.
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Mutable access to the map, e.g. to move it to a located position.
    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    /// Current view in the form saved between runs.
    pub fn stored_view(&self) -> Option<StoredView> {
        StoredView::from_view(self.map.target_view())
    }

    fn render(&mut self, ui: &mut Ui) -> MapFrame {
        let available_size = ui.available_size().floor();
        let (rect, response) = ui.allocate_exact_size(available_size, Sense::click_and_drag());

        let map_size = Size::new(rect.width() as f64, rect.height() as f64);
        if self.map.view().size() != map_size {
            log::trace!("Resizing map to size: {map_size:?}");
            self.map.set_size(map_size);
        }

        let mut events = vec![];
        if self.event_processor.is_dragging() || response.contains_pointer() {
            let input_events = ui.input(|input_state| input_state.events.clone());
            for event in &input_events {
                if let Some(raw_event) = convert_event(event, [-rect.left(), -rect.top()]) {
                    events.extend(self.event_processor.handle(raw_event, &mut self.map));
                }
            }
        }

        if self.map.animate() {
            ui.ctx().request_repaint();
        }

        let painter = ui.painter_at(rect);
        self.paint_tiles(ui.ctx(), &painter, rect);

        MapFrame {
            rect,
            response,
            events,
        }
    }

    fn paint_tiles(&mut self, ctx: &egui::Context, painter: &Painter, rect: egui::Rect) {
        self.textures.begin_frame();
        painter.rect_filled(rect, 0.0, Color32::from_gray(230));

        let view = *self.map.view();
        let Some(tiles) = self.tile_schema.iter_tiles(&view) else {
            return;
        };

        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        for index in tiles {
            let (Some(image), Some(bbox)) = (
                self.tiles.get_or_load(&index),
                self.tile_schema.tile_bbox(index),
            ) else {
                continue;
            };

            let top_left = view.map_to_screen(Point2d::new(bbox.x_min(), bbox.y_max()));
            let bottom_right = view.map_to_screen(Point2d::new(bbox.x_max(), bbox.y_min()));
            let tile_rect =
                egui::Rect::from_min_max(to_pos(rect, top_left), to_pos(rect, bottom_right));

            let texture = self.textures.get_or_upload(ctx, &index, &image);
            painter.image(texture.id(), tile_rect, uv, Color32::WHITE);
        }
    }

    fn paint_marker(&self, painter: &Painter, rect: egui::Rect, position: &GeoPoint2d) {
        let Some(point) = self.map.view().map_geo_to_screen(position) else {
            return;
        };

        painter.circle(
            to_pos(rect, point),
            MARKER_RADIUS,
            MARKER_COLOR,
            Stroke::new(2.0, Color32::WHITE),
        );
    }

    fn show_attribution(&self, ui: &mut Ui, rect: egui::Rect) {
        let mut attribution_ui = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(rect.shrink(4.0))
                .layout(egui::Layout::bottom_up(egui::Align::Max)),
        );

        egui::Frame::default()
            .fill(Color32::from_white_alpha(200))
            .inner_margin(4.0)
            .show(&mut attribution_ui, |ui| match self.attribution.url() {
                Some(url) => {
                    ui.hyperlink_to(self.attribution.text(), url);
                }
                None => {
                    ui.label(self.attribution.text());
                }
            });
    }
}

fn to_pos(rect: egui::Rect, point: Point2d) -> egui::Pos2 {
    rect.min + egui::vec2(point.x as f32, point.y as f32)
}

fn convert_event(event: &Event, offset: [f32; 2]) -> Option<RawUserEvent> {
    match event {
        Event::PointerButton {
            button, pressed, ..
        } => {
            let button = match button {
                egui::PointerButton::Primary => MouseButton::Left,
                egui::PointerButton::Secondary => MouseButton::Right,
                egui::PointerButton::Middle => MouseButton::Middle,
                _ => MouseButton::Other,
            };

            Some(match pressed {
                true => RawUserEvent::ButtonPressed(button),
                false => RawUserEvent::ButtonReleased(button),
            })
        }
        Event::PointerMoved(position) => Some(RawUserEvent::PointerMoved(Point2d::new(
            (position.x + offset[0]) as f64,
            (position.y + offset[1]) as f64,
        ))),
        #[cfg(not(target_arch = "wasm32"))]
        Event::MouseWheel { delta, .. } => {
            let zoom = delta[1] as f64;

            if zoom.abs() < 0.0001 {
                return None;
            }

            Some(RawUserEvent::Scroll(zoom))
        }
        #[cfg(target_arch = "wasm32")]
        Event::MouseWheel { delta, unit, .. } => {
            // Browsers report wheel deltas in different units, normalize them to lines.
            let zoom = match unit {
                egui::MouseWheelUnit::Point => delta[1] as f64 / 120.0,
                egui::MouseWheelUnit::Line => delta[1] as f64 / 6.0,
                egui::MouseWheelUnit::Page => delta[1] as f64,
            };

            if zoom.abs() < 0.0001 {
                return None;
            }

            Some(RawUserEvent::Scroll(zoom))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ecoleta::ecoleta_types::geo::GeoPoint;
    use ecoleta::ecoleta_types::latlon;

    use super::*;

    #[test]
    fn stored_view_restores_position_and_resolution() {
        let view = MapView::new(&latlon!(-28.4899659, -49.0312173), 19.1).expect("valid view");
        let stored = StoredView::from_view(&view).expect("valid position");
        let restored = stored.to_view().expect("valid view");

        let position = restored.position().expect("valid position");
        assert_relative_eq!(position.lat(), -28.4899659, epsilon = 1e-9);
        assert_relative_eq!(restored.resolution(), 19.1);
    }

    #[test]
    fn pointer_position_is_relative_to_widget() {
        let event = Event::PointerMoved(egui::pos2(110.0, 60.0));
        assert_eq!(
            convert_event(&event, [-100.0, -50.0]),
            Some(RawUserEvent::PointerMoved(Point2d::new(10.0, 10.0)))
        );
    }

    #[test]
    fn button_events() {
        let event = Event::PointerButton {
            pos: egui::pos2(0.0, 0.0),
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: Default::default(),
        };
        assert_eq!(
            convert_event(&event, [0.0, 0.0]),
            Some(RawUserEvent::ButtonPressed(MouseButton::Left))
        );
        assert_eq!(convert_event(&Event::PointerGone, [0.0, 0.0]), None);
    }
}
