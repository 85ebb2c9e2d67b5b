//! Configuration Module
//!
//! Handles loading server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Origin queried when an image is absent from the local cache.
pub const DEFAULT_ORIGIN_URL: &str = "https://http.cat";

// == Config Error ==
/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    /// An environment variable is set but cannot be parsed
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

// == Config ==
/// Server configuration parameters.
///
/// Host, port and cache directory are required and have no defaults; the
/// server refuses to start without them.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on
    pub host: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Root directory for cached image files
    pub cache_dir: PathBuf,
    /// Base URL of the remote image origin
    pub origin_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_HOST` - Listen address (required)
    /// - `SERVER_PORT` - Listen port (required)
    /// - `CACHE_DIR` - Cache root directory (required)
    /// - `ORIGIN_URL` - Origin base URL (default: `https://http.cat`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = require("SERVER_HOST")?;
        let port_raw = require("SERVER_PORT")?;
        let port = port_raw
            .parse()
            .map_err(|_| ConfigError::Invalid("SERVER_PORT", port_raw))?;
        let cache_dir = PathBuf::from(require("CACHE_DIR")?);
        let origin_url =
            env::var("ORIGIN_URL").unwrap_or_else(|_| DEFAULT_ORIGIN_URL.to_string());

        Ok(Self {
            host,
            port,
            cache_dir,
            origin_url,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}
