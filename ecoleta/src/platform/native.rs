//! Location service for desktop platforms.

use async_trait::async_trait;
use ecoleta_types::geo::GeoPoint2d;

use crate::config::Config;
use crate::error::EcoletaError;
use crate::platform::LocationService;

/// Desktop systems have no portable location API, so the position comes from the configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticLocationService {
    location: Option<GeoPoint2d>,
}

impl StaticLocationService {
    /// Creates a service that always reports the given location, or fails if it is `None`.
    pub fn new(location: Option<GeoPoint2d>) -> Self {
        Self { location }
    }

    /// Creates the service from [`Config::location`].
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.location)
    }
}

#[async_trait]
impl LocationService for StaticLocationService {
    async fn locate(&self) -> Result<GeoPoint2d, EcoletaError> {
        self.location.ok_or_else(|| {
            EcoletaError::LocationUnavailable("no location is configured".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use ecoleta_types::latlon;

    use super::*;

    #[test]
    fn configured_location() {
        let service = StaticLocationService::new(Some(latlon!(-28.49, -49.03)));
        let location = tokio_test::block_on(service.locate()).expect("location is configured");
        assert_eq!(location, latlon!(-28.49, -49.03));
    }

    #[test]
    fn missing_location() {
        let service = StaticLocationService::default();
        assert_matches!(
            tokio_test::block_on(service.locate()),
            Err(EcoletaError::LocationUnavailable(_))
        );
    }
}
