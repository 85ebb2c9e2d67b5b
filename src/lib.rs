//! Status Cache - A caching proxy for HTTP status code images
//!
//! Serves images keyed by a three-digit status code from a local disk
//! cache, filling missing entries from a remote origin on demand.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod key;
pub mod origin;

pub use api::AppState;
pub use config::Config;
