use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use maybe_sync::{MaybeSend, MaybeSync};
use quick_cache::sync::Cache;

use crate::async_runtime;
use crate::error::EcoletaError;
use crate::http::HttpClient;
use crate::map::decoded_image::DecodedImage;
use crate::messenger::Messenger;

/// Function returning the url of the image with the given key, or `None` if the key has no url.
pub trait UrlSource<Key: ?Sized>: (Fn(&Key) -> Option<String>) + MaybeSend + MaybeSync {}
impl<Key: ?Sized, T: Fn(&Key) -> Option<String>> UrlSource<Key> for T where
    T: MaybeSend + MaybeSync
{
}

/// Load state of an image.
#[derive(Debug, Clone)]
pub enum ImageState {
    /// Request is in flight.
    Loading,
    /// Image is decoded and ready.
    Loaded(Arc<DecodedImage>),
    /// Image could not be loaded or decoded. It is not requested again.
    Failed,
}

/// Loads images by key in the background and keeps them in a bounded in-memory cache.
///
/// Used both for map tiles (keyed by [`TileIndex`](crate::map::TileIndex)) and for category icons
/// (keyed by url).
pub struct ImageProvider<Key> {
    url_source: Box<dyn UrlSource<Key>>,
    client: HttpClient,
    cache: Arc<Cache<Key, ImageState>>,
    messenger: Option<Arc<dyn Messenger>>,
}

impl<Key> ImageProvider<Key>
where
    Key: Eq + Hash + Clone + Debug + MaybeSend + MaybeSync + 'static,
{
    /// Creates a new provider holding at most `capacity` images.
    pub fn new(
        url_source: impl UrlSource<Key> + 'static,
        client: HttpClient,
        capacity: usize,
    ) -> Self {
        Self {
            url_source: Box::new(url_source),
            client,
            cache: Arc::new(Cache::new(capacity)),
            messenger: None,
        }
    }

    /// Sets the messenger notified each time an image finishes loading.
    pub fn with_messenger(mut self, messenger: Arc<dyn Messenger>) -> Self {
        self.messenger = Some(messenger);
        self
    }

    /// State of the image without starting a load.
    pub fn state(&self, key: &Key) -> Option<ImageState> {
        self.cache.get(key)
    }

    /// Returns the image if it is loaded, starting the load if it was never requested.
    pub fn get_or_load(&self, key: &Key) -> Option<Arc<DecodedImage>> {
        match self.cache.get(key) {
            Some(ImageState::Loaded(image)) => Some(image),
            Some(ImageState::Loading | ImageState::Failed) => None,
            None => {
                self.load(key.clone());
                None
            }
        }
    }

    fn load(&self, key: Key) {
        let Some(url) = (self.url_source)(&key) else {
            log::warn!("No url for image {key:?}");
            self.cache.insert(key, ImageState::Failed);
            return;
        };

        self.cache.insert(key.clone(), ImageState::Loading);

        let client = self.client.clone();
        let cache = self.cache.clone();
        let messenger = self.messenger.clone();

        async_runtime::spawn(async move {
            let state = match load_image(&client, &url).await {
                Ok(image) => ImageState::Loaded(Arc::new(image)),
                Err(e) => {
                    log::debug!("Failed to load image {url}: {e}");
                    ImageState::Failed
                }
            };

            cache.insert(key, state);
            if let Some(messenger) = messenger {
                messenger.request_redraw();
            }
        });
    }
}

/// Downloads and decodes one image.
pub async fn load_image(client: &HttpClient, url: &str) -> Result<DecodedImage, EcoletaError> {
    let bytes = client.get_bytes(url).await?;
    DecodedImage::decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_without_url_fails_without_request() {
        let client = HttpClient::new().expect("client");
        let provider = ImageProvider::new(|_: &String| -> Option<String> { None }, client, 16);
        let key = "missing".to_string();

        assert!(provider.get_or_load(&key).is_none());
        assert!(matches!(provider.state(&key), Some(ImageState::Failed)));
    }

    #[test]
    fn unknown_key_has_no_state() {
        let client = HttpClient::new().expect("client");
        let provider = ImageProvider::new(|key: &String| Some(key.clone()), client, 16);
        assert!(provider.state(&"never requested".to_string()).is_none());
    }
}
