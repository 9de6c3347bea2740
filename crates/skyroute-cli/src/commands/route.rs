//! Route command handler for optimizing a flight between two airports.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use skyroute_lib::{RouteMetric, RouteRequest, RouteSummary};

use crate::commands::load_engine;
use crate::output::{render_route, write_json, OutputFormat};
use crate::terminal::ColorPalette;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Origin airport code.
    pub from: String,
    /// Destination airport code.
    pub to: String,
    /// Weight minimized along the path.
    pub metric: RouteMetric,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library request. Codes are trimmed but keep their case.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(self.from.trim(), self.to.trim(), self.metric)
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    args: &RouteCommandArgs,
    airports_path: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let engine = load_engine(airports_path)?;
    let snapshot = engine
        .snapshot()
        .context("route graph was not built")?;

    let request = args.to_request();
    debug!(?request, "planning route");
    let result = snapshot.plan_route(&request).with_context(|| {
        format!(
            "failed to plan route from {} to {}",
            request.origin, request.destination
        )
    })?;
    let summary = RouteSummary::from_result(snapshot.airports(), &result)?;

    match format {
        OutputFormat::Json => write_json(&summary),
        OutputFormat::Text => {
            print!("{}", render_route(&summary, ColorPalette::detect()));
            Ok(())
        }
    }
}
