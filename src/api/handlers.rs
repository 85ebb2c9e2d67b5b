//! API Handlers
//!
//! Request handling for the single method-dispatched `/{key}` endpoint.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::cache::ImageCache;
use crate::error::{CacheError, Result};
use crate::key::ImageKey;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-through image cache
    pub cache: ImageCache,
}

impl AppState {
    /// Creates a new AppState over the given cache.
    pub fn new(cache: ImageCache) -> Self {
        Self { cache }
    }
}

/// Handler for every method on `/{key}`.
///
/// The key is validated before method dispatch, so an invalid key returns
/// 400 even for methods the server does not support. The request body is
/// fully buffered by the `Bytes` extractor before any write happens; an
/// upload aborted mid-transfer never reaches the store.
pub async fn request_handler(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
    method: Method,
    body: Bytes,
) -> Result<Response> {
    let key = ImageKey::parse(&raw_key)?;

    if method == Method::GET {
        let bytes = state.cache.fetch(&key).await?;
        Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response())
    } else if method == Method::PUT {
        state.cache.put(&key, &body).await?;
        Ok((StatusCode::CREATED, "Created").into_response())
    } else if method == Method::DELETE {
        state.cache.delete(&key).await?;
        Ok("OK".into_response())
    } else {
        Err(CacheError::UnsupportedMethod(method.to_string()))
    }
}
