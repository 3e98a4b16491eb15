//! Error types used by the crate.

use thiserror::Error;

/// Ecoleta error type.
#[derive(Debug, Error)]
pub enum EcoletaError {
    /// Network request could not be completed.
    #[error("request failed: {0}")]
    Http(String),
    /// Server answered with a non-success status code.
    #[error("server responded with status {0}")]
    Status(u16),
    /// Response body could not be decoded.
    #[error("failed to decode data: {0}")]
    Decoding(String),
    /// Image decoding error.
    #[error("image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),
    /// SVG document could not be parsed or rasterized.
    #[error("svg decode error: {0}")]
    SvgDecode(String),
    /// Platform location service could not provide the user's position.
    #[error("location is unavailable: {0}")]
    LocationUnavailable(String),
    /// Configuration value is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Error interacting with WASM runtime.
    #[error("wasm error: {0:?}")]
    Wasm(Option<String>),
    /// Error reading/writing data to the FS.
    #[error("failed to read file")]
    FsIo(#[from] std::io::Error),
}

impl From<reqwest::Error> for EcoletaError {
    fn from(value: reqwest::Error) -> Self {
        match value.status() {
            Some(status) => Self::Status(status.as_u16()),
            None if value.is_decode() => Self::Decoding(value.to_string()),
            None => Self::Http(value.to_string()),
        }
    }
}

impl From<serde_json::Error> for EcoletaError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decoding(value.to_string())
    }
}

impl From<ecoleta_types::error::EcoletaTypesError> for EcoletaError {
    fn from(value: ecoleta_types::error::EcoletaTypesError) -> Self {
        Self::Config(value.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for EcoletaError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        EcoletaError::Wasm(Some(format!("{value:?}")))
    }
}
