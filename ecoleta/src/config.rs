//! Application configuration.
//!
//! Configuration is assembled from three sources, each overriding the previous one:
//!
//! 1. built-in defaults ([`Config::default`]);
//! 2. a JSON file whose path is given in the `ECOLETA_CONFIG` environment variable (native only);
//! 3. individual environment variables (native only):
//!
//! | Variable                | Field                  |
//! |-------------------------|------------------------|
//! | `ECOLETA_API_URL`       | [`Config::api_url`]    |
//! | `ECOLETA_GEOGRAPHY_URL` | [`Config::geography_url`] |
//! | `ECOLETA_TILE_URL`      | [`TileConfig::url_template`] |
//! | `ECOLETA_LOCATION`      | [`Config::location`], as `"lat,lon"` |
//! | `ECOLETA_TILE_CACHE`    | [`Config::tile_cache`] |
//!
//! In the browser only the defaults are used.

use std::path::PathBuf;

use ecoleta_types::geo::GeoPoint2d;
use ecoleta_types::latlon;
use serde::{Deserialize, Serialize};

use crate::error::EcoletaError;

/// Name of the variable pointing to the JSON configuration file.
pub const CONFIG_FILE_VAR: &str = "ECOLETA_CONFIG";

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_GEOGRAPHY_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";
const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const DEFAULT_Z_LEVEL: u32 = 13;

/// Settings of the base map tile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// Tile url with `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    /// Attribution text displayed over the map.
    pub attribution: String,
    /// Link opened when the attribution is clicked.
    pub attribution_url: Option<String>,
    /// Maximum z-level provided by the tile server.
    pub max_z: u32,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_TILE_URL.to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            attribution_url: Some("http://osm.org/copyright".to_string()),
            max_z: 18,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base url of the Ecoleta backend (`/items`, `/points`).
    pub api_url: String,
    /// Base url of the geography API (`/estados`, `/estados/{uf}/municipios`).
    pub geography_url: String,
    /// Base map tiles.
    pub tiles: TileConfig,
    /// Center of the map when the page is opened.
    pub initial_position: GeoPoint2d,
    /// Zoom level of the map when the page is opened.
    pub initial_z_level: u32,
    /// Position reported by the location service on platforms without one.
    pub location: Option<GeoPoint2d>,
    /// Directory to cache downloaded tiles in. Caching is disabled if not set.
    pub tile_cache: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            geography_url: DEFAULT_GEOGRAPHY_URL.to_string(),
            tiles: TileConfig::default(),
            initial_position: latlon!(-28.4899659, -49.0312173),
            initial_z_level: DEFAULT_Z_LEVEL,
            location: None,
            tile_cache: None,
        }
    }
}

impl Config {
    /// Parses configuration from a JSON document. Missing fields take default values.
    pub fn from_json(json: &str) -> Result<Self, EcoletaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Applies overrides from `ECOLETA_*` variables. Unknown variables are ignored.
    pub fn with_env_overrides(
        mut self,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, EcoletaError> {
        for (key, value) in vars {
            match key.as_str() {
                "ECOLETA_API_URL" => self.api_url = value,
                "ECOLETA_GEOGRAPHY_URL" => self.geography_url = value,
                "ECOLETA_TILE_URL" => self.tiles.url_template = value,
                "ECOLETA_LOCATION" => self.location = Some(value.parse()?),
                "ECOLETA_TILE_CACHE" => self.tile_cache = Some(PathBuf::from(value)),
                _ => {}
            }
        }

        Ok(self)
    }

    /// Loads the configuration from the process environment.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, EcoletaError> {
        let base = match std::env::var(CONFIG_FILE_VAR) {
            Ok(path) => {
                log::info!("Loading configuration from {path}");
                Self::from_json(&std::fs::read_to_string(path)?)?
            }
            Err(_) => Self::default(),
        };

        base.with_env_overrides(std::env::vars())
    }

    /// Returns the default configuration, browsers have no environment to read from.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, EcoletaError> {
        Ok(Self::default())
    }

    /// Url of the category list.
    pub fn items_url(&self) -> String {
        format!("{}/items", self.api_url.trim_end_matches('/'))
    }

    /// Url the new points are posted to.
    pub fn points_url(&self) -> String {
        format!("{}/points", self.api_url.trim_end_matches('/'))
    }

    /// Url of the region list.
    pub fn regions_url(&self) -> String {
        format!("{}/estados", self.geography_url.trim_end_matches('/'))
    }

    /// Url of the list of localities of the given region.
    pub fn localities_url(&self, region_code: &str) -> String {
        format!(
            "{}/estados/{region_code}/municipios",
            self.geography_url.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{"api_url": "https://api.example.org"}"#)
            .expect("valid config");
        assert_eq!(config.api_url, "https://api.example.org");
        assert_eq!(config.geography_url, DEFAULT_GEOGRAPHY_URL);
        assert_eq!(config.initial_z_level, 13);
        assert_eq!(config.tiles, TileConfig::default());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert_matches!(
            Config::from_json("{not json"),
            Err(EcoletaError::Decoding(_))
        );
    }

    #[test]
    fn env_overrides() {
        let config = Config::default()
            .with_env_overrides(vars(&[
                ("ECOLETA_API_URL", "http://10.0.0.2:3333"),
                ("ECOLETA_LOCATION", "-28.49,-49.03"),
                ("ECOLETA_TILE_CACHE", ".tile_cache"),
                ("PATH", "/usr/bin"),
            ]))
            .expect("valid overrides");

        assert_eq!(config.api_url, "http://10.0.0.2:3333");
        assert_eq!(config.location, Some(latlon!(-28.49, -49.03)));
        assert_eq!(config.tile_cache, Some(PathBuf::from(".tile_cache")));
    }

    #[test]
    fn malformed_location_is_rejected() {
        let result =
            Config::default().with_env_overrides(vars(&[("ECOLETA_LOCATION", "somewhere")]));
        assert_matches!(result, Err(EcoletaError::Config(_)));
    }

    #[test]
    fn endpoint_urls() {
        let config = Config {
            api_url: "http://localhost:3333/".to_string(),
            ..Default::default()
        };

        assert_eq!(config.items_url(), "http://localhost:3333/items");
        assert_eq!(config.points_url(), "http://localhost:3333/points");
        assert_eq!(
            config.localities_url("SC"),
            "https://servicodados.ibge.gov.br/api/v1/localidades/estados/SC/municipios"
        );
    }
}
