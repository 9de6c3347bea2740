//! Airports command handler for listing the loaded network.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use skyroute_lib::Airport;

use crate::commands::load_engine;
use crate::output::{render_airport_table, write_json, OutputFormat};
use crate::terminal::ColorPalette;

#[derive(Serialize)]
struct AirportListing<'a> {
    airports: &'a [Airport],
}

/// Handle the airports subcommand.
pub fn handle_list_airports(airports_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let engine = load_engine(airports_path)?;
    let airports = engine.list_airports();

    match format {
        OutputFormat::Json => write_json(&AirportListing {
            airports: &airports,
        }),
        OutputFormat::Text => {
            print!("{}", render_airport_table(&airports, ColorPalette::detect()));
            Ok(())
        }
    }
}
