//! reqwest HTTP fetcher implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::Client;

use bucket_view_storage::{FetchError, FetchedContent, HttpFetcher, StorageError};

use crate::error::CrtError;

/// Default user agent sent with downloads.
pub const DEFAULT_USER_AGENT: &str = concat!("bucket-view/", env!("CARGO_PKG_VERSION"));

/// Settings for [`ReqwestFetcher`].
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Total request timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    /// User agent header value.
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchSettings {
    /// Set the total request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HttpFetcher implementation using reqwest.
///
/// Follows redirects and returns responses of any status; only transport
/// failures are errors.
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Create a fetcher from settings.
    ///
    /// # Errors
    /// Returns `StorageError::InvalidConfig` if the HTTP client cannot be built.
    pub fn new(settings: FetchSettings) -> Result<Self, StorageError> {
        let mut builder = Client::builder().user_agent(settings.user_agent);
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client: Client = builder
            .build()
            .map_err(|e| CrtError::ConfigError(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create a fetcher from an existing client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedContent, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        log::debug!("GET {} returned {}", url, response.status());

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| (name.as_str().to_string(), header_value_to_string(value)))
            .collect();

        let body: Vec<u8> = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body {
                url: url.to_string(),
                message: e.to_string(),
            })?
            .to_vec();

        Ok(FetchedContent::new(body, headers))
    }
}

/// Decode a header value, keeping non-ASCII bytes.
///
/// Values that are valid UTF-8 decode as such; anything else is read as
/// latin-1, so no header is lost.
fn header_value_to_string(value: &HeaderValue) -> String {
    let bytes: &[u8] = value.as_bytes();
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
