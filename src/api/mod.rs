//! API Module
//!
//! HTTP handlers and routing for the image cache server.
//!
//! # Surface
//! - `GET /{key}` - Serve an image, filling from the origin on miss
//! - `PUT /{key}` - Store an image from the raw request body
//! - `DELETE /{key}` - Remove a cached image
//!
//! Any other method on a valid key returns 405; an invalid key returns
//! 400 on every method.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
