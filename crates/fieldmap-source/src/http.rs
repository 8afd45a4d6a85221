//! HTTP field source.

use fieldmap_layout::FieldDescription;

use crate::{FieldSource, SourceError};

/// Endpoint serving the field description during competitions.
pub const DEFAULT_FIELD_URL: &str = "http://127.0.0.1:3000/field";

/// Fetches the field description with one GET request per fetch.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    /// Source for the description served at `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Source using a preconfigured client (proxy, timeouts, TLS).
    #[must_use]
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_URL)
    }
}

impl FieldSource for HttpSource {
    async fn fetch(&self) -> Result<FieldDescription, SourceError> {
        tracing::info!(url = %self.url, "fetching field description");
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }
        let body = response.bytes().await?;
        tracing::debug!(bytes = body.len(), "field description received");
        Ok(serde_json::from_slice(&body)?)
    }
}
