//! Position picked by the user on the map.

use ecoleta_types::geo::GeoPoint2d;

use crate::error::EcoletaError;
use crate::map::{Map, FLY_DURATION};

/// Keeps the single position of the point being registered.
///
/// The position is set either by clicking the map or, once per picker, by the response of the
/// [platform location service](crate::platform::LocationService). In the latter case the map is
/// also moved to the found position, keeping its zoom level.
#[derive(Debug, Default, Clone)]
pub struct LocationPicker {
    position: Option<GeoPoint2d>,
    locate_requested: bool,
}

impl LocationPicker {
    /// Creates a picker without a position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position, if the user picked one or it was located.
    pub fn position(&self) -> Option<GeoPoint2d> {
        self.position
    }

    /// Sets the position to the clicked coordinate.
    pub fn click(&mut self, position: GeoPoint2d) {
        log::debug!("Position picked on the map: {position}");
        self.position = Some(position);
    }

    /// Returns true the first time it is called. The caller is then expected to request the
    /// location from the platform service and report the outcome with
    /// [`location_found`](Self::location_found) or [`location_failed`](Self::location_failed).
    pub fn begin_locate(&mut self) -> bool {
        !std::mem::replace(&mut self.locate_requested, true)
    }

    /// Sets the position and moves the map to it.
    pub fn location_found(&mut self, position: GeoPoint2d, map: &mut Map) {
        log::debug!("Device located at {position}");
        self.position = Some(position);
        if !map.fly_to(&position, FLY_DURATION) {
            log::warn!("Cannot move the map to the located position {position}");
        }
    }

    /// Location is optional, so the failure is only logged.
    pub fn location_failed(&mut self, error: &EcoletaError) {
        log::debug!("Failed to locate device: {error}");
    }
}
