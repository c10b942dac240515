//! route-cli — build, snapshot and query a transit routing engine.
//!
//! ```text
//! route-cli build --catalogue demos/route-cli/data --output /tmp/net.tcrt
//! route-cli route --snapshot /tmp/net.tcrt Biryusinka Universam
//! route-cli route --catalogue demos/route-cli/data Tolstopaltsevo Rasskazovka
//! route-cli stats --catalogue demos/route-cli/data
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).  Logs go to stderr,
//! results to stdout.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use tc_catalogue::{Catalogue, load_catalogue_dir};
use tc_core::{BusId, RoutingSettings, StopId};
use tc_persist::{LoadedNetwork, decode_network, encode_network, load_from_file, save_to_file};
use tc_router::{Journey, RouteItem, TransportRouter};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Fastest bus journeys over a precomputed route table", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Precompute every route and write a network snapshot
    Build {
        /// Directory holding stops.csv, buses.csv and distances.csv
        #[arg(short, long)]
        catalogue: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Snapshot file to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the fastest journey between two stops
    Route {
        /// Build from this catalogue directory
        #[arg(short, long, required_unless_present = "snapshot", conflicts_with = "snapshot")]
        catalogue: Option<PathBuf>,

        /// Load a snapshot written by `build` instead of rebuilding
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        #[command(flatten)]
        settings: SettingsArgs,

        from: String,
        to:   String,
    },

    /// Per-bus statistics and the buses calling at each stop
    Stats {
        #[arg(short, long)]
        catalogue: PathBuf,
    },
}

#[derive(Args)]
struct SettingsArgs {
    /// JSON file with `bus_wait_time` and `bus_velocity` (metres/minute)
    #[arg(long, conflicts_with_all = ["wait", "velocity_kmh"])]
    settings: Option<PathBuf>,

    /// Minutes spent waiting at every boarding
    #[arg(long, default_value_t = 6.0)]
    wait: f64,

    /// Bus speed, km/h
    #[arg(long, default_value_t = 40.0)]
    velocity_kmh: f64,
}

impl SettingsArgs {
    fn resolve(&self) -> Result<RoutingSettings> {
        let settings = match &self.settings {
            Some(path) => {
                let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
                RoutingSettings::from_json_reader(file)
                    .with_context(|| format!("reading settings from {}", path.display()))?
            }
            None => RoutingSettings::from_kmh(self.wait, self.velocity_kmh)?,
        };
        Ok(settings)
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logger();
    match Cli::parse().command {
        Command::Build { catalogue, settings, output } => build(&catalogue, &settings, &output),
        Command::Route { catalogue, snapshot, settings, from, to } => {
            let network = match (catalogue, snapshot) {
                (_, Some(path)) => load(&path)?,
                (Some(dir), None) => build_network(&dir, &settings)?,
                (None, None) => bail!("either --catalogue or --snapshot is required"),
            };
            route(&network, &from, &to)
        }
        Command::Stats { catalogue } => stats(&catalogue),
    }
}

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn build_network(dir: &Path, settings: &SettingsArgs) -> Result<LoadedNetwork> {
    let catalogue =
        load_catalogue_dir(dir).with_context(|| format!("loading catalogue from {}", dir.display()))?;
    let settings = settings.resolve()?;

    let t0 = Instant::now();
    let router = TransportRouter::new(&catalogue, settings).context("building route table")?;
    eprintln!(
        "Route table: {} vertices, {} edges in {:.2?}",
        router.router().vertex_count(),
        router.router().graph().edge_count(),
        t0.elapsed()
    );
    Ok(LoadedNetwork { catalogue, router })
}

fn build(dir: &Path, settings: &SettingsArgs, output: &Path) -> Result<()> {
    let network = build_network(dir, settings)?;
    let bytes = encode_network(&network.catalogue, &network.router)?;
    save_to_file(output, &bytes).with_context(|| format!("writing {}", output.display()))?;
    println!("Wrote {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

fn load(path: &Path) -> Result<LoadedNetwork> {
    let bytes = load_from_file(path).with_context(|| format!("reading {}", path.display()))?;
    decode_network(&bytes).with_context(|| format!("decoding {}", path.display()))
}

fn route(network: &LoadedNetwork, from: &str, to: &str) -> Result<()> {
    match network.router.route_by_name(&network.catalogue, from, to)? {
        Some(journey) => print_journey(&network.catalogue, from, to, &journey),
        None => println!("{from} → {to}: no route"),
    }
    Ok(())
}

fn stats(dir: &Path) -> Result<()> {
    let catalogue =
        load_catalogue_dir(dir).with_context(|| format!("loading catalogue from {}", dir.display()))?;

    println!("{:<8} {:>6} {:>7} {:>10} {:>10}", "bus", "stops", "unique", "length_m", "curvature");
    for (i, bus) in catalogue.buses().iter().enumerate() {
        let Some(stat) = catalogue.bus_stat(BusId(i as u32))? else {
            continue;
        };
        println!(
            "{:<8} {:>6} {:>7} {:>10} {:>10.5}",
            bus.name, stat.stop_count, stat.unique_stop_count, stat.route_length, stat.curvature
        );
    }

    println!();
    for (i, stop) in catalogue.stops().iter().enumerate() {
        let buses = catalogue.buses_through(StopId(i as u32));
        if buses.is_empty() {
            println!("{}: no buses", stop.name);
        } else {
            println!("{}: {}", stop.name, buses.join(" "));
        }
    }
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_journey(catalogue: &Catalogue, from: &str, to: &str, journey: &Journey) {
    println!("{from} → {to}: {:.2} min", journey.total_time);
    for item in journey.items() {
        match item {
            RouteItem::Wait { stop, time } => {
                let name = catalogue.stop(stop).map_or("?", |s| s.name.as_str());
                println!("  wait {time:>6.2} min at {name}");
            }
            RouteItem::Ride { bus, span_count, time } => {
                let name = catalogue.bus(bus).map_or("?", |b| b.name.as_str());
                println!("  ride {time:>6.2} min on bus {name}, {span_count} stop(s)");
            }
        }
    }
}
