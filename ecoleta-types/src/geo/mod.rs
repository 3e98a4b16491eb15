//! Geographic coordinates and their projection onto the map plane.

mod point;
mod projection;

pub use point::{GeoPoint, GeoPoint2d, NewGeoPoint};
pub use projection::{Projection, WebMercator, WGS84_SEMIMAJOR};
