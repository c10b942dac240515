//! Stops, buses and directional road distances.
//!
//! # Distances
//!
//! Distances are integer metres keyed by an *ordered* stop pair.  The road
//! from A to B may be longer than the road back, so `A→B` and `B→A` are
//! stored independently.  [`Catalogue::distance`] falls back to the reverse
//! direction when only one was recorded.
//!
//! # Round trips
//!
//! A round-trip bus is stored as its closed cycle: if the stop list given to
//! [`Catalogue::add_bus`] does not end at its first stop, the first stop is
//! appended.  A non-round-trip bus is stored as its outbound half; it runs
//! back along the same stops in reverse.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tc_core::{BusId, GeoPoint, StopId};

use crate::{CatalogueError, CatalogueResult};

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub name:        String,
    pub coordinates: GeoPoint,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bus {
    pub name:         String,
    /// Closed cycle for round trips, outbound half otherwise.
    pub stops:        Vec<StopId>,
    pub is_roundtrip: bool,
}

impl Bus {
    /// Every stop visited in one full trip, in order.
    ///
    /// For a non-round-trip bus `A B C` this is `A B C B A`.
    pub fn route(&self) -> Vec<StopId> {
        if self.is_roundtrip {
            return self.stops.clone();
        }
        let mut route = self.stops.clone();
        route.extend(self.stops.iter().rev().skip(1));
        route
    }
}

/// Per-bus summary statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct BusStat {
    /// Stops visited in one full trip, counting repeats.
    pub stop_count:        usize,
    pub unique_stop_count: usize,
    /// Road length of one full trip, metres.
    pub route_length:      u64,
    /// Road length divided by great-circle length.  1.0 when every stop
    /// sits at the same coordinates.
    pub curvature:         f64,
}

// ── Catalogue ─────────────────────────────────────────────────────────────────

/// The transit network: stops, buses and the distances between stops.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalogue {
    stops:      Vec<Stop>,
    buses:      Vec<Bus>,
    stop_index: HashMap<String, StopId>,
    bus_index:  HashMap<String, BusId>,
    // BTreeMap so iteration (and therefore snapshots) is deterministic.
    distances:  BTreeMap<(StopId, StopId), u32>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Add a stop and return its `StopId` (sequential from 0).
    pub fn add_stop(&mut self, name: impl Into<String>, coordinates: GeoPoint) -> CatalogueResult<StopId> {
        let name = name.into();
        if self.stop_index.contains_key(&name) {
            return Err(CatalogueError::DuplicateStop(name));
        }
        let id = StopId(self.stops.len() as u32);
        self.stop_index.insert(name.clone(), id);
        self.stops.push(Stop { name, coordinates });
        Ok(id)
    }

    /// Add a bus over stops given by name.  Every stop must already exist.
    pub fn add_bus(&mut self, name: impl Into<String>, stops: &[&str], is_roundtrip: bool) -> CatalogueResult<BusId> {
        let ids = stops
            .iter()
            .map(|s| self.find_stop(s).ok_or_else(|| CatalogueError::UnknownStop((*s).to_owned())))
            .collect::<CatalogueResult<Vec<_>>>()?;
        self.add_bus_stops(name, ids, is_roundtrip)
    }

    /// Add a bus over stops given by id.
    pub fn add_bus_stops(
        &mut self,
        name:         impl Into<String>,
        mut stops:    Vec<StopId>,
        is_roundtrip: bool,
    ) -> CatalogueResult<BusId> {
        let name = name.into();
        if self.bus_index.contains_key(&name) {
            return Err(CatalogueError::DuplicateBus(name));
        }
        if stops.is_empty() {
            return Err(CatalogueError::EmptyBus(name));
        }
        if let Some(bad) = stops.iter().find(|s| s.index() >= self.stops.len()) {
            return Err(CatalogueError::UnknownStop(bad.to_string()));
        }
        if is_roundtrip && stops.first() != stops.last() {
            stops.push(stops[0]);
        }

        let id = BusId(self.buses.len() as u32);
        self.bus_index.insert(name.clone(), id);
        self.buses.push(Bus { name, stops, is_roundtrip });
        Ok(id)
    }

    /// Record the road distance from `from` to `to`.  Overwrites any earlier
    /// value for the same ordered pair.
    pub fn set_distance(&mut self, from: StopId, to: StopId, metres: u32) -> CatalogueResult<()> {
        for id in [from, to] {
            if id.index() >= self.stops.len() {
                return Err(CatalogueError::UnknownStop(id.to_string()));
            }
        }
        self.distances.insert((from, to), metres);
        Ok(())
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Road distance from `from` to `to`, falling back to `to → from`.
    pub fn distance(&self, from: StopId, to: StopId) -> Option<u32> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
    }

    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id.index())
    }

    pub fn bus(&self, id: BusId) -> Option<&Bus> {
        self.buses.get(id.index())
    }

    pub fn find_stop(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    pub fn find_bus(&self, name: &str) -> Option<BusId> {
        self.bus_index.get(name).copied()
    }

    /// All stops in insertion order; position is the `StopId`.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// All buses in insertion order; position is the `BusId`.
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    /// Every recorded `(from, to, metres)` triple, ordered by `(from, to)`.
    pub fn distances(&self) -> impl Iterator<Item = (StopId, StopId, u32)> + '_ {
        self.distances.iter().map(|(&(from, to), &m)| (from, to, m))
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    // ── Statistics ────────────────────────────────────────────────────────

    /// Names of the buses that call at `stop`, sorted and de-duplicated.
    pub fn buses_through(&self, stop: StopId) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .buses
            .iter()
            .filter(|b| b.stops.contains(&stop))
            .map(|b| b.name.as_str())
            .collect();
        names.into_iter().collect()
    }

    /// Stop counts, road length and curvature of one full trip of `bus`.
    ///
    /// Returns `Ok(None)` for an unknown bus.
    pub fn bus_stat(&self, bus: BusId) -> CatalogueResult<Option<BusStat>> {
        let Some(bus) = self.bus(bus) else {
            return Ok(None);
        };
        let route = bus.route();

        let mut route_length = 0u64;
        let mut geo_length = 0.0f64;
        for pair in route.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let metres = self.distance(a, b).ok_or_else(|| CatalogueError::MissingDistance {
                from: self.stops[a.index()].name.clone(),
                to:   self.stops[b.index()].name.clone(),
            })?;
            route_length += u64::from(metres);
            geo_length += self.stops[a.index()]
                .coordinates
                .distance_m(self.stops[b.index()].coordinates);
        }

        let unique: BTreeSet<StopId> = route.iter().copied().collect();
        let curvature = if geo_length > 0.0 { route_length as f64 / geo_length } else { 1.0 };

        Ok(Some(BusStat {
            stop_count: route.len(),
            unique_stop_count: unique.len(),
            route_length,
            curvature,
        }))
    }
}
