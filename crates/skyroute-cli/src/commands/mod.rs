// One module per subcommand; main.rs parses arguments and dispatches here.

pub mod airports;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};

use skyroute_lib::{load_airports_or_sample, resolve_airports_path, RouteGraphEngine};

/// Load the configured airport dataset and build an engine over it.
pub fn load_engine(airports_path: Option<&Path>) -> Result<RouteGraphEngine> {
    let source = resolve_airports_path(airports_path)
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "built-in sample network".to_string());

    let airports = load_airports_or_sample(airports_path)
        .with_context(|| format!("failed to load airports from {source}"))?;
    RouteGraphEngine::from_airports(airports)
        .with_context(|| format!("failed to build route graph from {source}"))
}
