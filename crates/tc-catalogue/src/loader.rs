//! CSV catalogue loader.
//!
//! # CSV format
//!
//! Three files, loaded in this order:
//!
//! ```csv
//! # stops.csv
//! name,lat,lon
//! Tolstopaltsevo,55.611087,37.20829
//! Marushkino,55.595884,37.209755
//!
//! # distances.csv   (directional, metres)
//! from,to,metres
//! Tolstopaltsevo,Marushkino,3900
//!
//! # buses.csv       (stop names separated by '>')
//! name,is_roundtrip,stops
//! 750,false,Tolstopaltsevo>Marushkino
//! ```
//!
//! Every stop named in `distances.csv` or `buses.csv` must appear in
//! `stops.csv`.  Distances for adjacent stops are *not* checked here; the
//! graph builder reports gaps when it needs them.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use tc_core::GeoPoint;

use crate::{Catalogue, CatalogueError, CatalogueResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StopRecord {
    name: String,
    lat:  f64,
    lon:  f64,
}

#[derive(Deserialize)]
struct DistanceRecord {
    from:   String,
    to:     String,
    metres: u32,
}

#[derive(Deserialize)]
struct BusRecord {
    name:         String,
    is_roundtrip: bool,
    stops:        String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a catalogue from `stops.csv`, `distances.csv` and `buses.csv` in `dir`.
pub fn load_catalogue_dir(dir: &Path) -> CatalogueResult<Catalogue> {
    let stops     = std::fs::File::open(dir.join("stops.csv"))?;
    let buses     = std::fs::File::open(dir.join("buses.csv"))?;
    let distances = std::fs::File::open(dir.join("distances.csv"))?;
    load_catalogue_reader(stops, buses, distances)
}

/// Like [`load_catalogue_dir`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `&[u8]`) or loading from network streams.
pub fn load_catalogue_reader<S: Read, B: Read, D: Read>(
    stops:     S,
    buses:     B,
    distances: D,
) -> CatalogueResult<Catalogue> {
    let mut catalogue = Catalogue::new();

    for row in csv_reader(stops).deserialize::<StopRecord>() {
        let row = row.map_err(|e| CatalogueError::Parse(e.to_string()))?;
        catalogue.add_stop(row.name, GeoPoint::new(row.lat, row.lon))?;
    }

    for row in csv_reader(distances).deserialize::<DistanceRecord>() {
        let row = row.map_err(|e| CatalogueError::Parse(e.to_string()))?;
        let from = resolve(&catalogue, &row.from)?;
        let to = resolve(&catalogue, &row.to)?;
        catalogue.set_distance(from, to, row.metres)?;
    }

    for row in csv_reader(buses).deserialize::<BusRecord>() {
        let row = row.map_err(|e| CatalogueError::Parse(e.to_string()))?;
        let names: Vec<&str> = row
            .stops
            .split('>')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        catalogue.add_bus(row.name, &names, row.is_roundtrip)?;
    }

    info!(
        stops = catalogue.stop_count(),
        buses = catalogue.bus_count(),
        "catalogue loaded"
    );
    Ok(catalogue)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader)
}

fn resolve(catalogue: &Catalogue, name: &str) -> CatalogueResult<tc_core::StopId> {
    catalogue
        .find_stop(name)
        .ok_or_else(|| CatalogueError::UnknownStop(name.to_owned()))
}
