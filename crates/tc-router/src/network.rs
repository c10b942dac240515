//! Catalogue → routing graph.
//!
//! # Vertex scheme
//!
//! One vertex per stop served by at least one bus, meaning "standing at this
//! stop, about to wait for a bus".  Vertices are numbered in catalogue stop
//! order; stops no bus calls at get no vertex and are unreachable.
//!
//! # Edge scheme
//!
//! For every bus run and every ordered pair of positions `i < j` on it, one
//! edge `stop_i → stop_j` with weight
//!
//! ```text
//! bus_wait_time + distance(i..j) / bus_velocity
//! ```
//!
//! so one edge is "wait, board, ride `j - i` stops, get off".  A shortest path
//! with k boardings therefore has exactly k edges, and riding through an
//! intermediate stop is never charged a second wait.
//!
//! A round-trip bus has one run (its closed cycle).  Any other bus has two:
//! outbound and back.  Pairs that start and end at the same stop add no edge.

use tc_catalogue::Catalogue;
use tc_core::{BusId, RoutingSettings, StopId, VertexId};
use tracing::debug;

use crate::{Graph, GraphBuilder, RouterError, RouterResult};

// ── Ride ──────────────────────────────────────────────────────────────────────

/// What an edge means to a passenger.  Indexed by `EdgeId`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ride {
    pub bus:        BusId,
    /// Stops travelled without getting off.
    pub span_count: u32,
    /// Minutes on board (excludes the wait).
    pub ride_time:  f64,
}

// ── VertexMap ─────────────────────────────────────────────────────────────────

/// Bidirectional stop ↔ vertex mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexMap {
    /// Indexed by `StopId`.
    stop_vertices: Vec<Option<VertexId>>,
    /// Indexed by `VertexId`.
    vertex_stops:  Vec<StopId>,
}

impl VertexMap {
    /// Rebuild from the per-vertex stop list.
    ///
    /// Fails if a stop id is `>= stop_count` or appears twice.
    pub fn from_vertex_stops(stop_count: usize, vertex_stops: Vec<StopId>) -> RouterResult<Self> {
        let mut stop_vertices = vec![None; stop_count];
        for (v, stop) in vertex_stops.iter().enumerate() {
            let slot = stop_vertices
                .get_mut(stop.index())
                .ok_or(RouterError::InvalidStop(*stop))?;
            if slot.is_some() {
                return Err(RouterError::Inconsistent(format!("{stop} mapped to two vertices")));
            }
            *slot = Some(VertexId(v as u32));
        }
        Ok(Self { stop_vertices, vertex_stops })
    }

    pub fn vertex_of(&self, stop: StopId) -> Option<VertexId> {
        self.stop_vertices.get(stop.index()).copied().flatten()
    }

    pub fn stop_of(&self, vertex: VertexId) -> Option<StopId> {
        self.vertex_stops.get(vertex.index()).copied()
    }

    /// Stop of each vertex, indexed by `VertexId`.
    pub fn vertex_stops(&self) -> &[StopId] {
        &self.vertex_stops
    }

    /// Number of catalogue stops covered (with or without a vertex).
    pub fn stop_count(&self) -> usize {
        self.stop_vertices.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_stops.len()
    }
}

// ── TransitGraph ──────────────────────────────────────────────────────────────

/// Output of [`build_transit_graph`].
#[derive(Clone, Debug)]
pub struct TransitGraph {
    pub graph: Graph,
    pub stops: VertexMap,
    /// Indexed by `EdgeId`.
    pub rides: Vec<Ride>,
}

/// Build the routing graph for `catalogue`.
///
/// Deterministic: the same catalogue and settings always give the same
/// vertex and edge numbering.
///
/// Adjacent-stop distances are looked up in the travel direction, falling
/// back to the reverse direction; if neither is recorded the build fails with
/// [`RouterError::MissingDistance`].
pub fn build_transit_graph(catalogue: &Catalogue, settings: &RoutingSettings) -> RouterResult<TransitGraph> {
    settings.validate()?;

    // ── Vertices: served stops in catalogue order ─────────────────────────
    let mut served = vec![false; catalogue.stop_count()];
    for bus in catalogue.buses() {
        for stop in &bus.stops {
            served[stop.index()] = true;
        }
    }
    let vertex_stops: Vec<StopId> = served
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s)
        .map(|(i, _)| StopId(i as u32))
        .collect();
    let stops = VertexMap::from_vertex_stops(catalogue.stop_count(), vertex_stops)?;

    let mut builder = GraphBuilder::new();
    builder.add_vertex_range(stops.vertex_count());
    let mut rides = Vec::new();

    // ── Edges: every reachable pair on every run ──────────────────────────
    for (bus_index, bus) in catalogue.buses().iter().enumerate() {
        let bus_id = BusId(bus_index as u32);
        if bus.is_roundtrip {
            add_run(catalogue, settings, &stops, bus_id, &bus.stops, &mut builder, &mut rides)?;
        } else {
            let back: Vec<StopId> = bus.stops.iter().rev().copied().collect();
            add_run(catalogue, settings, &stops, bus_id, &bus.stops, &mut builder, &mut rides)?;
            add_run(catalogue, settings, &stops, bus_id, &back, &mut builder, &mut rides)?;
        }
    }

    let graph = builder.build();
    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "transit graph built"
    );
    Ok(TransitGraph { graph, stops, rides })
}

// ── Internals ─────────────────────────────────────────────────────────────────

fn add_run(
    catalogue: &Catalogue,
    settings:  &RoutingSettings,
    stops:     &VertexMap,
    bus:       BusId,
    run:       &[StopId],
    builder:   &mut GraphBuilder,
    rides:     &mut Vec<Ride>,
) -> RouterResult<()> {
    // Cumulative road distance from the start of the run, in metres.
    let mut cumulative = Vec::with_capacity(run.len());
    cumulative.push(0u64);
    for pair in run.windows(2) {
        let metres = catalogue
            .distance(pair[0], pair[1])
            .ok_or_else(|| missing_distance(catalogue, pair[0], pair[1]))?;
        cumulative.push(cumulative[cumulative.len() - 1] + u64::from(metres));
    }

    for i in 0..run.len() {
        let from = vertex(stops, run[i])?;
        for j in i + 1..run.len() {
            if run[i] == run[j] {
                continue;
            }
            let to = vertex(stops, run[j])?;
            let ride_time = settings.ride_time((cumulative[j] - cumulative[i]) as f64);
            builder.add_edge(from, to, settings.bus_wait_time + ride_time)?;
            rides.push(Ride { bus, span_count: (j - i) as u32, ride_time });
        }
    }
    Ok(())
}

fn vertex(stops: &VertexMap, stop: StopId) -> RouterResult<VertexId> {
    stops.vertex_of(stop).ok_or(RouterError::InvalidStop(stop))
}

fn missing_distance(catalogue: &Catalogue, from: StopId, to: StopId) -> RouterError {
    let name = |s: StopId| {
        catalogue
            .stop(s)
            .map_or_else(|| s.to_string(), |stop| stop.name.clone())
    };
    RouterError::MissingDistance { from: name(from), to: name(to) }
}
