//! Error types for the image cache server
//!
//! Provides unified error handling using thiserror.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the image cache server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Requested identifier is not a three-digit key
    #[error("Invalid image key: {0:?}")]
    InvalidKey(String),

    /// Request method is not GET, PUT or DELETE
    #[error("Method not allowed: {0}")]
    UnsupportedMethod(String),

    /// Entry absent locally and the origin could not supply it
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Local storage write failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            CacheError::InvalidKey(_) => (
                StatusCode::BAD_REQUEST,
                "Bad Request - Invalid HTTP status code",
            ),
            CacheError::UnsupportedMethod(_) => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
            }
            CacheError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
            CacheError::Storage(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the image cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
