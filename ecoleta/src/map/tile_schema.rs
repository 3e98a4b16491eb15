//! [`TileSchema`] is used by tile layers to calculate [tile indices](TileIndex) needed for a given
//! [`MapView`].

use ecoleta_types::cartesian::{Point2d, Rect};
use ecoleta_types::geo::WebMercator;

use crate::map::view::MapView;

const RESOLUTION_TOLERANCE: f64 = 0.01;

/// Tile index.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct TileIndex {
    /// X index.
    pub x: i32,
    /// Y index.
    pub y: i32,
    /// Z index.
    pub z: u32,
}

impl TileIndex {
    /// Create a new index instance.
    pub fn new(x: i32, y: i32, z: u32) -> Self {
        Self { x, y, z }
    }
}

/// Tile schema specifies how tile indices are calculated based on the map position and resolution.
///
/// Tiles are square, `Y == 0` is the top row. Each z-level halves the resolution of the previous
/// one, so the resolution of a level is derived from the resolution of z-level 0.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSchema {
    origin: Point2d,
    bounds: Rect,
    top_resolution: f64,
    max_z: u32,
    tile_size: u32,
}

impl TileSchema {
    /// Standard Web Mercator schema used by OpenStreetMap and most web tile servers, with z-levels
    /// from `0` to `max_z` and 256px tiles.
    pub fn web(max_z: u32) -> Self {
        const TILE_SIZE: u32 = 256;

        let half_extent = WebMercator::default().half_extent();

        Self {
            origin: Point2d::new(-half_extent, half_extent),
            bounds: Rect::new(-half_extent, -half_extent, half_extent, half_extent),
            top_resolution: 2.0 * half_extent / TILE_SIZE as f64,
            max_z,
            tile_size: TILE_SIZE,
        }
    }

    /// Resolution of the given z-level, if the schema has it.
    pub fn resolution(&self, z: u32) -> Option<f64> {
        (z <= self.max_z).then(|| self.top_resolution / 2f64.powi(z as i32))
    }

    /// Size of a tile side in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Smallest resolution of the schema, i.e. the resolution of the highest z-level.
    pub fn min_resolution(&self) -> f64 {
        self.top_resolution / 2f64.powi(self.max_z as i32)
    }

    /// Z-level to draw at the given resolution: the coarsest level that is still at least as
    /// detailed as the resolution, or the highest level if none is.
    pub fn select_z_level(&self, resolution: f64) -> Option<u32> {
        if !resolution.is_finite() {
            return None;
        }

        let z = (0..=self.max_z)
            .find(|&z| {
                self.resolution(z)
                    .is_some_and(|r| r * (1.0 - RESOLUTION_TOLERANCE) <= resolution)
            })
            .unwrap_or(self.max_z);

        Some(z)
    }

    /// Iterate over tile indices that should be displayed for the given map view.
    pub fn iter_tiles(&self, view: &MapView) -> Option<impl Iterator<Item = TileIndex>> {
        let z = self.select_z_level(view.resolution())?;
        let resolution = self.resolution(z)?;
        let bbox = view.get_bbox()?.intersect(&self.bounds)?;

        let tile_span = resolution * self.tile_size as f64;
        let max_index = (1i64 << z).saturating_sub(1) as f64;
        let index = |v: f64| (v / tile_span).floor().clamp(0.0, max_index) as i32;

        let x_min = index(bbox.x_min() - self.origin.x);
        let x_max = index(bbox.x_max() - self.origin.x);
        let y_min = index(self.origin.y - bbox.y_max());
        let y_max = index(self.origin.y - bbox.y_min());

        Some((y_min..=y_max).flat_map(move |y| {
            (x_min..=x_max).map(move |x| TileIndex::new(x, y, z))
        }))
    }

    /// Area of the map covered by the tile.
    pub fn tile_bbox(&self, index: TileIndex) -> Option<Rect> {
        let tile_span = self.resolution(index.z)? * self.tile_size as f64;
        let x_min = self.origin.x + index.x as f64 * tile_span;
        let y_max = self.origin.y - index.y as f64 * tile_span;

        Some(Rect::new(x_min, y_max - tile_span, x_min + tile_span, y_max))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ecoleta_types::cartesian::Size;
    use ecoleta_types::latlon;

    use super::*;

    #[test]
    fn web_schema_resolutions() {
        let schema = TileSchema::web(18);
        assert_relative_eq!(
            schema.resolution(0).expect("z0 exists"),
            156543.03392804097,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            schema.resolution(13).expect("z13 exists"),
            19.109257071294063,
            epsilon = 1e-9
        );
        assert!(schema.resolution(19).is_none());
    }

    #[test]
    fn select_z_level() {
        let schema = TileSchema::web(18);
        let z13 = schema.resolution(13).expect("z13 exists");

        assert_eq!(schema.select_z_level(z13), Some(13));
        assert_eq!(schema.select_z_level(z13 * 1.5), Some(13));
        assert_eq!(schema.select_z_level(z13 * 2.0), Some(12));
        assert_eq!(schema.select_z_level(1e9), Some(0));
        assert_eq!(schema.select_z_level(0.001), Some(18));
        assert_eq!(schema.select_z_level(f64::NAN), None);
        assert_eq!(schema.select_z_level(f64::INFINITY), None);
    }

    #[test]
    fn min_resolution_is_highest_level() {
        let schema = TileSchema::web(18);
        assert_eq!(Some(schema.min_resolution()), schema.resolution(18));
    }

    #[test]
    fn whole_world_at_z0() {
        let schema = TileSchema::web(18);
        let view = MapView::new(&latlon!(0.0, 0.0), schema.resolution(0).expect("z0"))
            .expect("projectable")
            .with_size(Size::new(256.0, 256.0));

        let tiles: Vec<_> = schema.iter_tiles(&view).expect("tiles").collect();
        assert_eq!(tiles, vec![TileIndex::new(0, 0, 0)]);
    }

    #[test]
    fn tiles_cover_the_view() {
        let schema = TileSchema::web(18);
        let view = MapView::new(
            &latlon!(-28.4899659, -49.0312173),
            schema.resolution(13).expect("z13"),
        )
        .expect("projectable")
        .with_size(Size::new(800.0, 600.0));

        let tiles: Vec<_> = schema.iter_tiles(&view).expect("tiles").collect();
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| t.z == 13));

        let center = view.projected_position();
        assert!(tiles.iter().any(|t| schema
            .tile_bbox(*t)
            .expect("valid tile")
            .contains(&center)));

        // 800x600 view over 256px tiles touches at most 5x4 tiles.
        assert!(tiles.len() <= 20);
    }

    #[test]
    fn tile_bbox_of_first_tile() {
        let schema = TileSchema::web(18);
        let bbox = schema.tile_bbox(TileIndex::new(0, 0, 1)).expect("valid");
        let half = WebMercator::default().half_extent();
        assert_relative_eq!(bbox.x_min(), -half);
        assert_relative_eq!(bbox.y_max(), half);
        assert_relative_eq!(bbox.x_max(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(bbox.y_min(), 0.0, epsilon = 1e-6);
    }
}
