//! Snapshot encoding and validated decoding.
//!
//! Two snapshot kinds share the header in [`crate::header`]:
//!
//! - **router**: graph and route table only ([`encode_router`]).
//! - **network**: catalogue, routing settings, stop ↔ vertex map, ride
//!   metadata and router ([`encode_network`]).  Flagged with
//!   [`FLAG_NETWORK`].
//!
//! Decoding never trusts the payload.  Every id, length and weight is checked
//! while the in-memory types are rebuilt, and any failure is reported as
//! [`PersistError::CorruptData`].  Decoding into existing state
//! ([`restore_router`], [`restore_network`]) replaces it only once the whole
//! snapshot has been accepted.

use tc_catalogue::Catalogue;
use tc_core::{BusId, EdgeId, GeoPoint, RoutingSettings, StopId, VertexId};
use tc_router::{GraphBuilder, Ride, RouteEntry, Router, TransportRouter, VertexMap};
use tracing::{info, warn};

use crate::header::{FLAG_NETWORK, unwrap_header, wrap_with_header};
use crate::wire::{
    BusWire, CatalogueWire, DistanceWire, EdgeWire, GraphWire, NetworkWire, RideWire, RouteWire,
    RouterWire, StopWire,
};
use crate::{PersistError, PersistResult};

/// A decoded network snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedNetwork {
    pub catalogue: Catalogue,
    pub router:    TransportRouter,
}

// ── Router snapshots ──────────────────────────────────────────────────────────

/// Serialise `router` (graph and route table).
pub fn encode_router(router: &Router) -> PersistResult<Vec<u8>> {
    let payload = bitcode::encode(&router_to_wire(router));
    let bytes = wrap_with_header(0, &payload)?;
    info!(bytes = bytes.len(), vertices = router.vertex_count(), "router encoded");
    Ok(bytes)
}

/// Rebuild a [`Router`] from bytes written by [`encode_router`].
///
/// A network snapshot is accepted too; its router part is returned.
pub fn decode_router(bytes: &[u8]) -> PersistResult<Router> {
    let decoded = try_decode_router(bytes);
    match &decoded {
        Ok(router) => info!(vertices = router.vertex_count(), "router decoded"),
        Err(e) => warn!(error = %e, "router snapshot rejected"),
    }
    decoded
}

/// Decode `bytes` into `target`.  On error `target` is left untouched.
pub fn restore_router(bytes: &[u8], target: &mut Router) -> PersistResult<()> {
    *target = decode_router(bytes)?;
    Ok(())
}

// ── Network snapshots ─────────────────────────────────────────────────────────

/// Serialise `catalogue` together with the `router` built from it.
///
/// Fails with [`PersistError::Mismatch`] when `router` covers a different
/// number of stops or buses than `catalogue`.
pub fn encode_network(catalogue: &Catalogue, router: &TransportRouter) -> PersistResult<Vec<u8>> {
    if router.stops().stop_count() != catalogue.stop_count() {
        return Err(PersistError::Mismatch(format!(
            "router covers {} stops, catalogue has {}",
            router.stops().stop_count(),
            catalogue.stop_count()
        )));
    }
    if let Some(ride) = router.rides().iter().find(|r| r.bus.index() >= catalogue.bus_count()) {
        return Err(PersistError::Mismatch(format!(
            "ride on {} but catalogue has {} buses",
            ride.bus,
            catalogue.bus_count()
        )));
    }

    let settings = router.settings();
    let wire = NetworkWire {
        catalogue:     catalogue_to_wire(catalogue),
        bus_wait_time: settings.bus_wait_time,
        bus_velocity:  settings.bus_velocity,
        vertex_stops:  router.stops().vertex_stops().iter().map(|s| s.0).collect(),
        rides:         router
            .rides()
            .iter()
            .map(|r| RideWire { bus: r.bus.0, span_count: r.span_count, ride_time: r.ride_time })
            .collect(),
        router:        router_to_wire(router.router()),
    };
    let bytes = wrap_with_header(FLAG_NETWORK, &bitcode::encode(&wire))?;
    info!(
        bytes = bytes.len(),
        stops = catalogue.stop_count(),
        buses = catalogue.bus_count(),
        "network encoded"
    );
    Ok(bytes)
}

/// Rebuild catalogue and transport router from bytes written by
/// [`encode_network`].
pub fn decode_network(bytes: &[u8]) -> PersistResult<LoadedNetwork> {
    let decoded = try_decode_network(bytes);
    match &decoded {
        Ok(loaded) => info!(
            stops = loaded.catalogue.stop_count(),
            buses = loaded.catalogue.bus_count(),
            vertices = loaded.router.router().vertex_count(),
            "network decoded"
        ),
        Err(e) => warn!(error = %e, "network snapshot rejected"),
    }
    decoded
}

/// Decode `bytes` into `target`, replacing catalogue and router together.
/// On error `target` is left untouched.
pub fn restore_network(bytes: &[u8], target: &mut LoadedNetwork) -> PersistResult<()> {
    *target = decode_network(bytes)?;
    Ok(())
}

// ── To wire ───────────────────────────────────────────────────────────────────

fn router_to_wire(router: &Router) -> RouterWire {
    let graph = router.graph();
    RouterWire {
        graph:  GraphWire {
            vertex_count: graph.vertex_count() as u32,
            edges:        graph
                .edges()
                .iter()
                .map(|e| EdgeWire { from: e.from.0, to: e.to.0, weight: e.weight })
                .collect(),
        },
        routes: router
            .rows()
            .map(|row| {
                row.iter()
                    .map(|slot| {
                        slot.map(|e| RouteWire { weight: e.weight, prev_edge: e.prev_edge.map(|p| p.0) })
                    })
                    .collect()
            })
            .collect(),
    }
}

fn catalogue_to_wire(catalogue: &Catalogue) -> CatalogueWire {
    CatalogueWire {
        stops:     catalogue
            .stops()
            .iter()
            .map(|s| StopWire { name: s.name.clone(), lat: s.coordinates.lat, lon: s.coordinates.lon })
            .collect(),
        buses:     catalogue
            .buses()
            .iter()
            .map(|b| BusWire {
                name:         b.name.clone(),
                stops:        b.stops.iter().map(|s| s.0).collect(),
                is_roundtrip: b.is_roundtrip,
            })
            .collect(),
        distances: catalogue
            .distances()
            .map(|(from, to, metres)| DistanceWire { from: from.0, to: to.0, metres })
            .collect(),
    }
}

// ── From wire ─────────────────────────────────────────────────────────────────

fn try_decode_router(bytes: &[u8]) -> PersistResult<Router> {
    let (header, payload) = unwrap_header(bytes)?;
    let wire = if header.has_flag(FLAG_NETWORK) {
        decode_payload::<NetworkWire>(payload)?.router
    } else {
        decode_payload::<RouterWire>(payload)?
    };
    router_from_wire(wire)
}

fn try_decode_network(bytes: &[u8]) -> PersistResult<LoadedNetwork> {
    let (header, payload) = unwrap_header(bytes)?;
    if !header.has_flag(FLAG_NETWORK) {
        return Err(corrupt("router-only snapshot has no catalogue"));
    }
    network_from_wire(decode_payload::<NetworkWire>(payload)?)
}

fn decode_payload<T: bitcode::DecodeOwned>(payload: &[u8]) -> PersistResult<T> {
    bitcode::decode(payload).map_err(|e| corrupt(format!("payload: {e}")))
}

fn router_from_wire(wire: RouterWire) -> PersistResult<Router> {
    let n = wire.graph.vertex_count as usize;
    // Checked before anything is sized by `n`.
    if wire.routes.len() != n {
        return Err(corrupt(format!(
            "route table has {} rows for {n} vertices",
            wire.routes.len()
        )));
    }

    let mut builder = GraphBuilder::with_capacity(wire.graph.edges.len());
    builder.add_vertex_range(n);
    for e in &wire.graph.edges {
        builder
            .add_edge(VertexId(e.from), VertexId(e.to), e.weight)
            .map_err(|err| corrupt(format!("edge: {err}")))?;
    }
    let graph = builder.build();

    let mut table = Vec::new();
    for (i, row) in wire.routes.into_iter().enumerate() {
        if row.len() != n {
            return Err(corrupt(format!("row {i} has {} entries, expected {n}", row.len())));
        }
        table.extend(row.into_iter().map(|slot| {
            slot.map(|r| RouteEntry { weight: r.weight, prev_edge: r.prev_edge.map(EdgeId) })
        }));
    }

    Router::from_parts(graph, table).map_err(|e| corrupt(format!("route table: {e}")))
}

fn catalogue_from_wire(wire: CatalogueWire) -> PersistResult<Catalogue> {
    let mut catalogue = Catalogue::new();
    for stop in wire.stops {
        catalogue
            .add_stop(stop.name, GeoPoint::new(stop.lat, stop.lon))
            .map_err(|e| corrupt(format!("stop: {e}")))?;
    }
    for bus in wire.buses {
        catalogue
            .add_bus_stops(bus.name, bus.stops.into_iter().map(StopId).collect(), bus.is_roundtrip)
            .map_err(|e| corrupt(format!("bus: {e}")))?;
    }
    for d in wire.distances {
        catalogue
            .set_distance(StopId(d.from), StopId(d.to), d.metres)
            .map_err(|e| corrupt(format!("distance: {e}")))?;
    }
    Ok(catalogue)
}

fn network_from_wire(wire: NetworkWire) -> PersistResult<LoadedNetwork> {
    let catalogue = catalogue_from_wire(wire.catalogue)?;
    let settings = RoutingSettings { bus_wait_time: wire.bus_wait_time, bus_velocity: wire.bus_velocity };
    let stops = VertexMap::from_vertex_stops(
        catalogue.stop_count(),
        wire.vertex_stops.into_iter().map(StopId).collect(),
    )
    .map_err(|e| corrupt(format!("vertex map: {e}")))?;

    let rides = wire
        .rides
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            if r.bus as usize >= catalogue.bus_count() {
                return Err(corrupt(format!("ride {i} names unknown bus {}", r.bus)));
            }
            if r.span_count == 0 || !(r.ride_time.is_finite() && r.ride_time >= 0.0) {
                return Err(corrupt(format!(
                    "ride {i} has span {} and time {}",
                    r.span_count, r.ride_time
                )));
            }
            Ok(Ride { bus: BusId(r.bus), span_count: r.span_count, ride_time: r.ride_time })
        })
        .collect::<PersistResult<Vec<_>>>()?;

    let router = router_from_wire(wire.router)?;
    let router = TransportRouter::from_parts(settings, stops, rides, router)
        .map_err(|e| corrupt(format!("transport router: {e}")))?;
    Ok(LoadedNetwork { catalogue, router })
}

fn corrupt(msg: impl Into<String>) -> PersistError {
    PersistError::CorruptData(msg.into())
}
