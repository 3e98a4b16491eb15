//! Clients of the remote services the registration page talks to.

use async_trait::async_trait;
use maybe_sync::{MaybeSend, MaybeSync};

use crate::config::Config;
use crate::error::EcoletaError;
use crate::http::HttpClient;
use crate::model::{CategoryItem, Locality, NewPoint, Region};

/// Remote operations needed by the registration form.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PointsApi: MaybeSend + MaybeSync {
    /// List of collectible-material categories.
    async fn categories(&self) -> Result<Vec<CategoryItem>, EcoletaError>;
    /// List of regions (states).
    async fn regions(&self) -> Result<Vec<Region>, EcoletaError>;
    /// List of localities of the region with the given code.
    async fn localities(&self, region_code: &str) -> Result<Vec<Locality>, EcoletaError>;
    /// Registers a new drop-off point.
    async fn create_point(&self, point: &NewPoint) -> Result<(), EcoletaError>;
}

/// [`PointsApi`] implementation over HTTP: categories and points go to the Ecoleta backend,
/// regions and localities to the geography API.
#[derive(Debug, Clone)]
pub struct HttpPointsApi {
    client: HttpClient,
    config: Config,
}

impl HttpPointsApi {
    /// Creates a new client for the endpoints in the configuration.
    pub fn new(client: HttpClient, config: Config) -> Self {
        Self { client, config }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PointsApi for HttpPointsApi {
    async fn categories(&self) -> Result<Vec<CategoryItem>, EcoletaError> {
        self.client.get_json(&self.config.items_url()).await
    }

    async fn regions(&self) -> Result<Vec<Region>, EcoletaError> {
        self.client.get_json(&self.config.regions_url()).await
    }

    async fn localities(&self, region_code: &str) -> Result<Vec<Locality>, EcoletaError> {
        self.client
            .get_json(&self.config.localities_url(region_code))
            .await
    }

    async fn create_point(&self, point: &NewPoint) -> Result<(), EcoletaError> {
        self.client.post_json(&self.config.points_url(), point).await
    }
}
