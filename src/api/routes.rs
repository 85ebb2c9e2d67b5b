//! API Routes
//!
//! Configures the Axum router for the image cache server.

use axum::extract::DefaultBodyLimit;
use axum::http::Uri;
use axum::routing::any;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{request_handler, AppState};
use crate::error::CacheError;

/// Creates the main router.
///
/// A single `/{key}` route accepts every method; the handler validates
/// the key first and dispatches on the method itself, so invalid keys
/// return 400 regardless of method. Paths that are not exactly one
/// segment can never carry a valid key and fall through to a 400 as
/// well.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
///
/// The default request body limit is disabled; PUT payloads are buffered
/// whole, whatever their size.
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/:key", any(request_handler))
        .fallback(reject_handler)
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Rejects paths with no single-segment key.
async fn reject_handler(uri: Uri) -> CacheError {
    CacheError::InvalidKey(uri.path().trim_start_matches('/').to_string())
}
