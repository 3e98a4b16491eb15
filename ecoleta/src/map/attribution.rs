/// Credit for the data shown on the map, with an optional link to its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribution {
    text: String,
    url: Option<String>,
}

impl Attribution {
    /// Creates a new `Attribution` with the given text and optional URL.
    pub fn new(text: impl Into<String>, url: Option<String>) -> Self {
        Self {
            text: text.into(),
            url,
        }
    }

    /// Attribution text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// URL associated with the attribution, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
