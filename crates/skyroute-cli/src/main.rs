use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use skyroute_cli::commands::airports::handle_list_airports;
use skyroute_cli::commands::route::{handle_route_command, RouteCommandArgs};
use skyroute_cli::output::OutputFormat;
use skyroute_lib::RouteMetric;

#[derive(Parser, Debug)]
#[command(author, version, about = "Flight route optimizer over a fixed airport network")]
struct Cli {
    /// Airport dataset (JSON or CSV). Falls back to SKYROUTE_AIRPORTS, then the
    /// built-in sample network.
    #[arg(long, global = true, value_name = "PATH")]
    airports: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the airports in the loaded network.
    Airports,
    /// Find the optimal route between two airport codes.
    Route {
        /// Origin airport code.
        #[arg(long = "from")]
        from: String,
        /// Destination airport code.
        #[arg(long = "to")]
        to: String,
        /// Weight to minimize: cost, distance or time.
        #[arg(long, default_value_t = RouteMetric::Cost)]
        metric: RouteMetric,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let airports = cli.airports.as_deref();

    match cli.command {
        Command::Airports => handle_list_airports(airports, cli.format),
        Command::Route { from, to, metric } => {
            let args = RouteCommandArgs { from, to, metric };
            handle_route_command(&args, airports, cli.format)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
