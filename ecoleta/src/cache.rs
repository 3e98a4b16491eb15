//! Disk cache for downloaded files, keyed by url.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use log::{debug, warn};

use crate::error::EcoletaError;

/// Stores response bodies as files under a folder, mirroring the url path.
#[derive(Debug, Clone)]
pub struct FileCache {
    folder_path: PathBuf,
}

impl FileCache {
    /// Creates the cache, creating the folder if it does not exist.
    pub fn new(folder_path: impl Into<PathBuf>) -> Result<Self, EcoletaError> {
        let folder_path = folder_path.into();
        std::fs::create_dir_all(&folder_path)?;
        Ok(Self { folder_path })
    }

    /// Returns the cached body of the url, if any.
    pub fn get(&self, url: &str) -> Option<Bytes> {
        let file_path = self.file_path(url)?;
        std::fs::read(file_path).ok().map(Bytes::from)
    }

    /// Stores the body of the url. Failures are logged and otherwise ignored.
    pub fn insert(&self, url: &str, bytes: &Bytes) {
        let Some(file_path) = self.file_path(url) else {
            return;
        };

        let result = match file_path.parent() {
            Some(parent) => std::fs::create_dir_all(parent),
            None => Ok(()),
        }
        .and_then(|_| std::fs::write(&file_path, bytes));

        match result {
            Ok(()) => debug!("Url {url} saved to cache file {file_path:?}"),
            Err(e) => warn!("Failed to save {url} to cache: {e:?}"),
        }
    }

    fn file_path(&self, url: &str) -> Option<PathBuf> {
        let stripped = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .unwrap_or(url);

        // Urls with `..` segments must not escape the cache folder.
        if stripped.split('/').any(|segment| segment == "..") {
            return None;
        }

        Some(self.folder_path.join(Path::new(stripped)))
    }
}
