//! Platform specific services and [`PlatformLocationService`] to access them.

use async_trait::async_trait;
use ecoleta_types::geo::GeoPoint2d;
use maybe_sync::{MaybeSend, MaybeSync};

use crate::error::EcoletaError;

/// Provides the current position of the user's device.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait LocationService: MaybeSend + MaybeSync {
    /// Requests the position once.
    async fn locate(&self) -> Result<GeoPoint2d, EcoletaError>;
}

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

/// Default implementation of the [`LocationService`] for the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformLocationService = native::StaticLocationService;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Default implementation of the [`LocationService`] for the current platform.
#[cfg(target_arch = "wasm32")]
pub type PlatformLocationService = web::BrowserLocationService;
