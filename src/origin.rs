//! Remote image origin client
//!
//! Abstracts the HTTP origin behind a trait so the cache-fill path can be
//! driven by a scriptable origin in tests.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

use crate::key::ImageKey;

/// Default timeout applied to origin requests, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

// == Origin Error ==
/// Errors raised while fetching an image from the origin.
///
/// The cache-fill path collapses every variant into "entry not found at
/// origin"; the distinction only matters for logging.
#[derive(Debug, Error)]
pub enum OriginError {
    /// Origin answered with a non-success status
    #[error("HTTP {0} from origin")]
    Status(reqwest::StatusCode),

    /// Request never produced a usable response (connect failure,
    /// timeout, body read error)
    #[error("Origin request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for OriginError {
    fn from(err: reqwest::Error) -> Self {
        OriginError::Transport(err.to_string())
    }
}

// == Origin Trait ==
/// Remote source of image entries.
///
/// Uses `BoxFuture` so implementations can be held as `Arc<dyn Origin>`
/// and swapped for mocks in tests.
pub trait Origin: Send + Sync {
    /// Retrieves the image for `key` from the origin.
    fn fetch<'a>(&'a self, key: &'a ImageKey) -> BoxFuture<'a, Result<Vec<u8>, OriginError>>;
}

// == HTTP Origin ==
/// Real origin client backed by reqwest.
pub struct HttpOrigin {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrigin {
    /// Creates a new HttpOrigin with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, OriginError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new HttpOrigin with a custom request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, OriginError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn request_url(&self, key: &ImageKey) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

impl Origin for HttpOrigin {
    fn fetch<'a>(&'a self, key: &'a ImageKey) -> BoxFuture<'a, Result<Vec<u8>, OriginError>> {
        Box::pin(async move {
            let response = self.client.get(self.request_url(key)).send().await?;

            if !response.status().is_success() {
                return Err(OriginError::Status(response.status()));
            }

            Ok(response.bytes().await?.to_vec())
        })
    }
}
