//! Service configuration read from the environment.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use skyroute_lib::resolve_airports_path;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;

/// Top-level service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Port to bind on all interfaces.
    pub port: u16,
    /// Airport dataset; `None` serves the built-in sample network.
    pub airports_path: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            airports_path: None,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// - `SERVICE_PORT`: HTTP port (default: 5000). Unparseable values fall back to the default.
    /// - `SKYROUTE_AIRPORTS`: airport dataset path (optional)
    pub fn from_env() -> Self {
        let port = env::var("SERVICE_PORT")
            .ok()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            airports_path: resolve_airports_path(None),
        }
    }
}
