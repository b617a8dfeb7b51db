//! CLI entry point for the BONGO (Bus On the GO) client.
//!
//! Prints the route/agency tag tables, the stops of a route, or the
//! upcoming arrivals at a stop.

use anyhow::Result;
use bongo::{
    config::Config,
    output::{OutputFormat, render_predictions, render_route_stops, render_tag_tables},
    predictions::{filter_predictions, get_predictions},
    services::BongoClient,
    stops::{get_stops, normalize_stop_id},
    tags::{get_tag_mapping, resolve_route},
};
use clap::{ArgGroup, Parser};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_STOP: &str = "0002";

#[derive(Parser)]
#[command(name = "bongo")]
#[command(about = "Real-time arrivals, stops and tags for BONGO (Bus On the GO)", long_about = None)]
#[command(group(ArgGroup::new("query").args(["stop", "list"])))]
struct Cli {
    /// Print the name->tag mappings for all routes and agencies when set to 1
    #[arg(short, long, value_name = "0|1", value_parser = clap::value_parser!(u8).range(0..=1))]
    tags: Option<u8>,

    /// List the incoming buses for the given stop number [default: 0002]
    #[arg(short, long, value_name = "STOP_ID")]
    stop: Option<String>,

    /// Only keep arrivals whose route tag (e.g. 'courthill') or agency tag
    /// (e.g. 'iowa-city') equals this token
    #[arg(short, long, value_name = "TAG", requires = "stop")]
    filter: Option<String>,

    /// List all of the stops for the given route tag
    #[arg(short, long, value_name = "ROUTE_TAG")]
    list: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, PartialEq, Eq)]
enum Query {
    Tags,
    StopPredictions { stop: String, filter: Option<String> },
    RouteStops { route: String },
}

impl Cli {
    fn query(&self) -> Query {
        if self.tags == Some(1) {
            return Query::Tags;
        }
        match (&self.stop, &self.list) {
            (_, Some(route)) => Query::RouteStops {
                route: route.clone(),
            },
            (stop, None) => Query::StopPredictions {
                stop: stop.clone().unwrap_or_else(|| DEFAULT_STOP.to_string()),
                filter: self.filter.clone(),
            },
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _log_guard = init_logging();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let api = BongoClient::from_config(&config);

    let rendered = match cli.query() {
        Query::Tags => {
            info!("Listing route and agency tags");
            let tags = get_tag_mapping(&api)?;
            render_tag_tables(&tags, cli.format)?
        }
        Query::StopPredictions { stop, filter } => {
            let stop_id = normalize_stop_id(&stop);
            info!(stop_id = %stop_id, filter = ?filter, "Fetching predictions");
            let predictions = get_predictions(&api, &stop_id)?;
            let predictions = filter_predictions(predictions, filter.as_deref().unwrap_or(""));
            render_predictions(&stop_id, &predictions, cli.format)?
        }
        Query::RouteStops { route } => {
            info!(route = %route, "Listing route stops");
            let tags = get_tag_mapping(&api)?;
            let route_info = resolve_route(&tags, &route)?;
            let stops = get_stops(&api, &route_info)?;
            render_route_stops(&route_info, &stops, cli.format)?
        }
    };

    print!("{rendered}");
    Ok(())
}

/// Colored stderr logging, plus a JSON rolling log file when `LOG_FILE_PATH`
/// is set. The returned guard flushes the file writer on drop.
fn init_logging() -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("warn")));

    let (json_layer, guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_dir = Path::new(&log_file_path)
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let log_file_name = Path::new(&log_file_path)
                .file_name()
                .unwrap_or(OsStr::new("bongo.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::try_from_env("RUST_LOG_JSON").unwrap_or_else(|_| EnvFilter::new("debug")),
                );
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}
