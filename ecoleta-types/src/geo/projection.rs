use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::cartesian::Point2d;
use crate::geo::{GeoPoint, GeoPoint2d, NewGeoPoint};

/// Semi-major axis of the WGS84 ellipsoid in meters.
pub const WGS84_SEMIMAJOR: f64 = 6_378_137.0;

/// Conversion between geographic coordinates and a projected plane.
pub trait Projection {
    /// Projects a geographic point. Returns `None` if the point cannot be projected.
    fn project(&self, input: &impl GeoPoint) -> Option<Point2d>;
    /// Converts a projected point back into geographic coordinates.
    fn unproject(&self, input: &Point2d) -> Option<GeoPoint2d>;
}

/// Spherical Web Mercator (EPSG:3857), the projection of standard web map tiles.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WebMercator {
    semimajor: f64,
}

impl Default for WebMercator {
    fn default() -> Self {
        Self {
            semimajor: WGS84_SEMIMAJOR,
        }
    }
}

impl WebMercator {
    /// Half of the projected world width in meters.
    pub fn half_extent(&self) -> f64 {
        self.semimajor * std::f64::consts::PI
    }
}

impl Projection for WebMercator {
    fn project(&self, input: &impl GeoPoint) -> Option<Point2d> {
        let x = self.semimajor * input.lon_rad();
        let y = self.semimajor * (FRAC_PI_4 + input.lat_rad() / 2.0).tan().ln();

        if x.is_finite() && y.is_finite() {
            Some(Point2d::new(x, y))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Point2d) -> Option<GeoPoint2d> {
        if !input.is_finite() {
            return None;
        }

        let lat = 2.0 * (input.y / self.semimajor).exp().atan() - FRAC_PI_2;
        let lon = input.x / self.semimajor;

        Some(GeoPoint2d::latlon(lat.to_degrees(), lon.to_degrees()))
    }
}
