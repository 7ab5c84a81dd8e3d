use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use metro::{Network, Route};
use tracing::error;

const DEFAULT_QUERIES: [(&str, &str); 3] = [("M1", "K4"), ("T1", "T4"), ("T4", "M1")];

#[derive(Parser)]
#[command(name = "metro-router")]
#[command(about = "Fewest-transfers and fastest routes through a metro network", long_about = None)]
struct Cli {
    /// Directory holding stations.csv and connections.csv
    #[arg(short, long, default_value = "data/ankara")]
    data: PathBuf,

    /// Queries as FROM:TO station ids (defaults to a few sample journeys)
    #[arg(value_parser = parse_query)]
    queries: Vec<(String, String)>,
}

fn parse_query(raw: &str) -> Result<(String, String), String> {
    match raw.split_once(':') {
        Some((from, to)) if !from.is_empty() && !to.is_empty() => {
            Ok((from.to_owned(), to.to_owned()))
        }
        _ => Err(format!("expected FROM:TO, got {raw:?}")),
    }
}

fn describe(network: &Network, id: &str) -> String {
    network
        .station(id)
        .map(|station| station.name.clone())
        .unwrap_or_else(|| id.to_owned())
}

fn print_route(label: &str, route: Option<Route<'_>>) {
    match route {
        Some(route) => println!("{label} ({} minutes): {route}", route.total_time),
        None => println!("{label}: no route"),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let network = match Network::from_dir(&cli.data) {
        Ok(network) => network,
        Err(err) => {
            error!(data = %cli.data.display(), "{err}");
            return ExitCode::FAILURE;
        }
    };

    let queries = if cli.queries.is_empty() {
        DEFAULT_QUERIES
            .iter()
            .map(|&(from, to)| (from.to_owned(), to.to_owned()))
            .collect()
    } else {
        cli.queries
    };

    for (idx, (from, to)) in queries.iter().enumerate() {
        println!(
            "\n{}. {} -> {}:",
            idx + 1,
            describe(&network, from),
            describe(&network, to)
        );
        print_route("Fewest transfers", network.fewest_transfers_route(from, to));
        print_route("Fastest", network.fastest_route(from, to));
    }

    ExitCode::SUCCESS
}
