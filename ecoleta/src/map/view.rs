use ecoleta_types::cartesian::{Point2d, Rect, Size, Vector2d};
use ecoleta_types::geo::{GeoPoint, GeoPoint2d, Projection, WebMercator};

/// Part of the map displayed on the screen: the projected point in the center of the viewport, the
/// resolution (map meters per screen pixel) and the viewport size in pixels.
///
/// Screen coordinates have their origin at the top left corner of the viewport with Y growing
/// downwards. Map coordinates are Web Mercator meters with Y growing to the north.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    position: Point2d,
    resolution: f64,
    size: Size,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            position: Point2d::default(),
            resolution: 1.0,
            size: Size::new(0.0, 0.0),
        }
    }
}

impl MapView {
    /// Creates a view centered at the projected position.
    pub fn new_projected(position: Point2d, resolution: f64) -> Self {
        Self {
            position,
            resolution,
            ..Default::default()
        }
    }

    /// Creates a view centered at the geographic position. Returns `None` if the position cannot
    /// be projected.
    pub fn new(position: &impl GeoPoint, resolution: f64) -> Option<Self> {
        Some(Self::new_projected(
            WebMercator::default().project(position)?,
            resolution,
        ))
    }

    /// Geographic position of the center of the view.
    pub fn position(&self) -> Option<GeoPoint2d> {
        WebMercator::default().unproject(&self.position)
    }

    /// Projected position of the center of the view.
    pub fn projected_position(&self) -> Point2d {
        self.position
    }

    /// Returns the same view centered at the given position. The resolution is kept.
    pub fn with_position(&self, position: &impl GeoPoint) -> Option<Self> {
        Some(Self {
            position: WebMercator::default().project(position)?,
            ..*self
        })
    }

    /// Map meters per screen pixel.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Returns the same view with a different resolution.
    pub fn with_resolution(&self, resolution: f64) -> Self {
        Self {
            resolution,
            ..*self
        }
    }

    /// Size of the viewport in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the same view with a different viewport size.
    pub fn with_size(&self, new_size: Size) -> Self {
        Self {
            size: new_size,
            ..*self
        }
    }

    /// Area of the map covered by the viewport. `None` if the viewport has zero size.
    pub fn get_bbox(&self) -> Option<Rect> {
        if self.size.is_zero() {
            return None;
        }

        let top_left = self.screen_to_map(Point2d::new(0.0, 0.0));
        let bottom_right = self.screen_to_map(Point2d::new(self.size.width(), self.size.height()));
        Some(Rect::new(
            top_left.x,
            top_left.y,
            bottom_right.x,
            bottom_right.y,
        ))
    }

    /// Converts a screen pixel position into projected map coordinates.
    pub fn screen_to_map(&self, px_position: Point2d) -> Point2d {
        Point2d::new(
            self.position.x + (px_position.x - self.size.half_width()) * self.resolution,
            self.position.y + (self.size.half_height() - px_position.y) * self.resolution,
        )
    }

    /// Converts projected map coordinates into a screen pixel position.
    pub fn map_to_screen(&self, map_position: Point2d) -> Point2d {
        Point2d::new(
            (map_position.x - self.position.x) / self.resolution + self.size.half_width(),
            self.size.half_height() - (map_position.y - self.position.y) / self.resolution,
        )
    }

    /// Converts a screen pixel position into geographic coordinates.
    pub fn screen_to_map_geo(&self, px_position: Point2d) -> Option<GeoPoint2d> {
        WebMercator::default().unproject(&self.screen_to_map(px_position))
    }

    /// Converts geographic coordinates into a screen pixel position.
    pub fn map_geo_to_screen(&self, position: &impl GeoPoint) -> Option<Point2d> {
        Some(self.map_to_screen(WebMercator::default().project(position)?))
    }

    /// Moves the view so that the map follows the pointer moved by `delta` pixels.
    pub fn translate_by_pixels(&self, delta: Vector2d) -> Self {
        let map_delta = Vector2d::new(delta.dx * self.resolution, -delta.dy * self.resolution);
        Self {
            position: self.position - map_delta,
            ..*self
        }
    }

    /// Multiplies the resolution by `zoom`, keeping the map point under `base_point` (screen
    /// pixels) in place.
    pub fn zoom(&self, zoom: f64, base_point: Point2d) -> Self {
        let base_point = self.screen_to_map(base_point);
        let offset = (self.position - base_point) * zoom;
        Self {
            position: base_point + offset,
            resolution: self.resolution * zoom,
            ..*self
        }
    }

    /// Linear interpolation between two views, `k == 0` gives `self`, `k == 1` gives `other`.
    pub fn interpolate(&self, other: &MapView, k: f64) -> Self {
        Self {
            position: self.position.lerp(&other.position, k),
            resolution: self.resolution + (other.resolution - self.resolution) * k,
            size: other.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ecoleta_types::latlon;

    use super::*;

    fn view() -> MapView {
        MapView::new(&latlon!(-28.4899659, -49.0312173), 19.1)
            .expect("projectable")
            .with_size(Size::new(800.0, 600.0))
    }

    #[test]
    fn center_of_screen_is_view_position() {
        let view = view();
        let center = view
            .screen_to_map_geo(Point2d::new(400.0, 300.0))
            .expect("valid point");
        assert_relative_eq!(center.lat(), -28.4899659, epsilon = 1e-9);
        assert_relative_eq!(center.lon(), -49.0312173, epsilon = 1e-9);
    }

    #[test]
    fn screen_map_round_trip() {
        let view = view();
        let px = Point2d::new(123.0, 456.0);
        let geo = view.screen_to_map_geo(px).expect("valid point");
        let back = view.map_geo_to_screen(&geo).expect("projectable");
        assert_relative_eq!(back.x, px.x, epsilon = 1e-6);
        assert_relative_eq!(back.y, px.y, epsilon = 1e-6);
    }

    #[test]
    fn screen_y_grows_southwards() {
        let view = view();
        let top = view.screen_to_map_geo(Point2d::new(400.0, 0.0)).expect("valid");
        let bottom = view
            .screen_to_map_geo(Point2d::new(400.0, 600.0))
            .expect("valid");
        assert!(top.lat() > bottom.lat());
    }

    #[test]
    fn zoom_keeps_base_point() {
        let view = view();
        let base = Point2d::new(100.0, 500.0);
        let before = view.screen_to_map(base);
        let zoomed = view.zoom(0.5, base);
        let after = zoomed.screen_to_map(base);

        assert_relative_eq!(zoomed.resolution(), view.resolution() * 0.5);
        assert_relative_eq!(before.x, after.x, epsilon = 1e-6);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-6);
    }

    #[test]
    fn translate_follows_pointer() {
        let view = view();
        let grabbed = view.screen_to_map(Point2d::new(400.0, 300.0));
        let moved = view.translate_by_pixels(Vector2d::new(30.0, -20.0));
        let under_pointer = moved.screen_to_map(Point2d::new(430.0, 280.0));

        assert_relative_eq!(grabbed.x, under_pointer.x, epsilon = 1e-6);
        assert_relative_eq!(grabbed.y, under_pointer.y, epsilon = 1e-6);
    }

    #[test]
    fn with_position_keeps_resolution() {
        let view = view();
        let moved = view
            .with_position(&latlon!(-27.59, -48.55))
            .expect("projectable");
        assert_eq!(moved.resolution(), view.resolution());
        assert_eq!(moved.size(), view.size());
    }

    #[test]
    fn zero_sized_view_has_no_bbox() {
        assert!(MapView::default().get_bbox().is_none());
        assert!(view().get_bbox().is_some());
    }
}
