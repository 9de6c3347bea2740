//! Output formatting for airport listings and route summaries.

use std::fmt::Write as _;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use skyroute_lib::{format_with_separators, Airport, RouteSummary};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Write `value` to stdout as pretty JSON followed by a newline.
pub fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value).context("failed to serialize output")?;
    writeln!(handle).context("failed to write output")?;
    Ok(())
}

/// Tabulate airports in the order given.
pub fn render_airport_table(airports: &[Airport], palette: ColorPalette) -> String {
    let mut buffer = String::new();
    if airports.is_empty() {
        let _ = writeln!(buffer, "No airports loaded.");
        return buffer;
    }

    let _ = writeln!(buffer, "Airports ({}):", airports.len());
    let _ = writeln!(
        buffer,
        "{}{:<6} {:<16} {:<42} {:>6}{}",
        palette.gray, "Code", "City", "Name", "Fee", palette.reset
    );
    for airport in airports {
        let _ = writeln!(
            buffer,
            "{}{:<6}{} {:<16} {:<42} {:>6.0}",
            palette.white_bold,
            airport.code,
            palette.reset,
            airport.city,
            airport.name,
            airport.fee
        );
    }
    buffer
}

/// Render a route summary, highlighting the heading, path and totals.
pub fn render_route(summary: &RouteSummary, palette: ColorPalette) -> String {
    let mut buffer = String::new();
    for line in summary.render_text().lines() {
        let color = if line.starts_with("Route:") {
            palette.white_bold
        } else if line.starts_with("Path:") {
            palette.cyan
        } else if line.starts_with("Total:") {
            palette.green
        } else {
            ""
        };
        if color.is_empty() {
            let _ = writeln!(buffer, "{line}");
        } else {
            let _ = writeln!(buffer, "{color}{line}{}", palette.reset);
        }
    }
    let _ = writeln!(
        buffer,
        "{}{} airports visited, {} mi flown{}",
        palette.gray,
        summary.path.len(),
        format_with_separators(summary.total_distance),
        palette.reset
    );
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::colors;
    use skyroute_lib::{sample_airports, RouteGraphEngine, RouteMetric};

    fn jfk_lax() -> RouteSummary {
        let engine = RouteGraphEngine::from_airports(sample_airports()).expect("build");
        let snapshot = engine.snapshot().expect("built");
        let result = snapshot
            .optimize_route("JFK", "LAX", RouteMetric::Cost)
            .expect("route");
        RouteSummary::from_result(snapshot.airports(), &result).expect("summary")
    }

    #[test]
    fn airport_table_lists_codes_in_order() {
        let table = render_airport_table(&sample_airports(), ColorPalette::plain());
        assert!(table.starts_with("Airports (8):"));
        let jfk = table.find("JFK").expect("JFK listed");
        let den = table.find("DEN").expect("DEN listed");
        assert!(jfk < den);
        assert!(!table.contains('\x1b'));
    }

    #[test]
    fn empty_table_has_message() {
        assert_eq!(
            render_airport_table(&[], ColorPalette::plain()),
            "No airports loaded.\n"
        );
    }

    #[test]
    fn plain_route_has_no_escape_codes() {
        let text = render_route(&jfk_lax(), ColorPalette::plain());
        assert!(text.contains("Path: JFK -> LAX"));
        assert!(text.contains("2 airports visited, 2,470 mi flown"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn colored_route_highlights_totals() {
        let text = render_route(&jfk_lax(), ColorPalette::colored());
        assert!(text.contains(&format!("{}Total:", colors::GREEN)));
    }
}
