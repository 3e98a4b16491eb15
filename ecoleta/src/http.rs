//! Thin wrapper over the HTTP client shared by all network requests of the application.

use bytes::Bytes;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[cfg(not(target_arch = "wasm32"))]
use crate::cache::FileCache;
use crate::error::EcoletaError;

/// HTTP client. Cloning is cheap, clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    #[cfg(not(target_arch = "wasm32"))]
    cache: Option<FileCache>,
}

impl HttpClient {
    /// Creates a new client.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Result<Self, EcoletaError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ecoleta/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            cache: None,
        })
    }

    /// Creates a new client.
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Result<Self, EcoletaError> {
        Ok(Self {
            client: reqwest::Client::new(),
        })
    }

    /// Serves [`HttpClient::get_bytes`] from the given disk cache when possible.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_file_cache(mut self, cache: FileCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Loads a JSON document and decodes it.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, EcoletaError> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Sends the body as a JSON document.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<(), EcoletaError> {
        debug!("POST {url}");
        self.client
            .post(url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Loads raw bytes from the url.
    pub async fn get_bytes(&self, url: &str) -> Result<Bytes, EcoletaError> {
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(bytes) = self.cache.as_ref().and_then(|cache| cache.get(url)) {
            debug!("Loaded {url} from cache");
            return Ok(bytes);
        }

        debug!("GET {url}");
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(cache) = &self.cache {
            cache.insert(url, &bytes);
        }

        Ok(bytes)
    }
}
