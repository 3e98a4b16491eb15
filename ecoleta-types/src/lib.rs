//! Geometric primitives shared by the Ecoleta crates.
//!
//! Two coordinate spaces are used throughout the application:
//!
//! * geographic coordinates ([`geo::GeoPoint2d`]), latitude and longitude in degrees, which is what
//!   the user picks and what is sent to the backend;
//! * cartesian coordinates ([`cartesian::Point2d`]), used both for projected map coordinates
//!   (Web Mercator meters) and for screen pixel positions.
//!
//! [`geo::WebMercator`] converts between the two.

pub mod cartesian;
pub mod error;
pub mod geo;

pub use cartesian::{CartesianPoint2d, Point2d, Rect, Size, Vector2d};
pub use geo::{GeoPoint, GeoPoint2d, NewGeoPoint};
