use std::process::ExitCode;
use std::sync::Arc;

use ride_planner::cache::{CacheConfig, CachedRouter};
use ride_planner::fare::FareConfig;
use ride_planner::graph::GraphStore;
use ride_planner::report::{Comparison, ShareDecision};
use ride_planner::rideshare::{PoolRequest, RideShareEngine};
use tracing_subscriber::EnvFilter;

/// Edge list used when `RIDE_GRAPH_PATH` is not set.
const DEFAULT_GRAPH_PATH: &str = "cities.txt";

const USAGE: &str = "usage: ride-planner <user1-origin> <user1-destination> <user2-origin> <user2-destination> [--share] [--json]";

struct Args {
    request: PoolRequest,
    decision: ShareDecision,
    json: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> Option<Args> {
    let mut positional = Vec::new();
    let mut decision = ShareDecision::Solo;
    let mut json = false;

    for arg in args {
        match arg.as_str() {
            "--share" => decision = ShareDecision::Share,
            "--json" => json = true,
            flag if flag.starts_with("--") => return None,
            _ => positional.push(arg),
        }
    }

    let [u1_origin, u1_dest, u2_origin, u2_dest]: [String; 4] = positional.try_into().ok()?;
    Some(Args {
        request: PoolRequest::new(u1_origin, u1_dest, u2_origin, u2_dest),
        decision,
        json,
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = parse_args(std::env::args().skip(1)) else {
        eprintln!("{USAGE}");
        return ExitCode::from(1);
    };

    // Fare configuration (optional JSON file)
    let fares = match std::env::var("RIDE_FARE_CONFIG") {
        Ok(path) => match FareConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::from(1);
            }
        },
        Err(_) => FareConfig::default(),
    };
    tracing::info!(
        speed_kmh = fares.average_speed_kmh(),
        price_per_km = fares.price_per_km(),
        share_discount = fares.share_discount(),
        missing_edge = ?fares.missing_edge(),
        "fare config"
    );

    // Load the graph; a missing file leaves it empty and we carry on
    let graph_path =
        std::env::var("RIDE_GRAPH_PATH").unwrap_or_else(|_| DEFAULT_GRAPH_PATH.to_string());
    let mut graph = GraphStore::new();
    match graph.load_from_file(&graph_path) {
        Ok(report) => eprintln!(
            "Loaded {} edges ({} nodes) from {graph_path}, skipped {} lines",
            report.loaded,
            graph.node_count(),
            report.skipped_lines
        ),
        Err(e) => eprintln!("Warning: {e}; continuing with an empty graph"),
    }

    if let Ok(coords_path) = std::env::var("RIDE_COORDS_PATH") {
        if let Err(e) = graph.load_coordinates_from_file(&coords_path) {
            eprintln!("Warning: {e}; searching without coordinates");
        }
    }

    let router = CachedRouter::new(Arc::new(graph), &CacheConfig::default());
    let engine = RideShareEngine::new(&router, &fares);

    let quote = match engine.quote(&args.request) {
        Ok(quote) => quote,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let comparison = Comparison::new(&quote, args.decision);
    if args.json {
        match comparison.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::from(1);
            }
        }
    } else {
        println!("{comparison}");
    }

    ExitCode::SUCCESS
}
