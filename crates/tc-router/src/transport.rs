//! Stop-level routing: the face of the engine seen by the query layer.
//!
//! [`TransportRouter`] ties a [`Router`] to the catalogue's stops and buses
//! and turns vertex itineraries into passenger legs.

use tc_catalogue::Catalogue;
use tc_core::{BusId, EdgeId, RoutingSettings, StopId, VertexId};
use tracing::info;

use crate::{Ride, Router, RouterError, RouterResult, VertexMap, build_transit_graph};

// ── Journey ───────────────────────────────────────────────────────────────────

/// One boarding: wait at `from`, ride `bus` for `span_count` stops to `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct Leg {
    pub from:       StopId,
    pub to:         StopId,
    pub bus:        BusId,
    pub span_count: u32,
    pub wait_time:  f64,
    pub ride_time:  f64,
}

/// A flattened itinerary step, as a timetable would print it.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteItem {
    Wait { stop: StopId, time: f64 },
    Ride { bus: BusId, span_count: u32, time: f64 },
}

/// Fastest way from one stop to another.
#[derive(Clone, Debug, PartialEq)]
pub struct Journey {
    /// Minutes, wait times included.
    pub total_time: f64,
    pub legs:       Vec<Leg>,
}

impl Journey {
    /// Origin and destination are the same stop.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Alternate `Wait` / `Ride` items, two per leg.
    pub fn items(&self) -> Vec<RouteItem> {
        self.legs
            .iter()
            .flat_map(|leg| {
                [
                    RouteItem::Wait { stop: leg.from, time: leg.wait_time },
                    RouteItem::Ride { bus: leg.bus, span_count: leg.span_count, time: leg.ride_time },
                ]
            })
            .collect()
    }
}

// ── TransportRouter ───────────────────────────────────────────────────────────

/// Routing settings, stop ↔ vertex map, per-edge ride metadata and the
/// precomputed [`Router`].
#[derive(Clone, Debug, PartialEq)]
pub struct TransportRouter {
    settings: RoutingSettings,
    stops:    VertexMap,
    rides:    Vec<Ride>,
    router:   Router,
}

impl TransportRouter {
    /// Build the graph for `catalogue` and precompute every route.
    pub fn new(catalogue: &Catalogue, settings: RoutingSettings) -> RouterResult<Self> {
        let transit = build_transit_graph(catalogue, &settings)?;
        let router = Router::build(transit.graph);
        info!(
            stops = catalogue.stop_count(),
            buses = catalogue.bus_count(),
            vertices = router.vertex_count(),
            "transport router ready"
        );
        Ok(Self { settings, stops: transit.stops, rides: transit.rides, router })
    }

    /// Reassemble from persisted parts without recomputing anything.
    ///
    /// The vertex map must cover exactly the router's vertices and `rides`
    /// must have one entry per graph edge.
    pub fn from_parts(
        settings: RoutingSettings,
        stops:    VertexMap,
        rides:    Vec<Ride>,
        router:   Router,
    ) -> RouterResult<Self> {
        settings.validate()?;
        if stops.vertex_count() != router.vertex_count() {
            return Err(RouterError::Inconsistent(format!(
                "{} mapped stops for {} vertices",
                stops.vertex_count(),
                router.vertex_count()
            )));
        }
        if rides.len() != router.graph().edge_count() {
            return Err(RouterError::Inconsistent(format!(
                "{} rides for {} edges",
                rides.len(),
                router.graph().edge_count()
            )));
        }
        Ok(Self { settings, stops, rides, router })
    }

    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn stops(&self) -> &VertexMap {
        &self.stops
    }

    /// Ride metadata, indexed by `EdgeId`.
    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    pub fn ride(&self, edge: EdgeId) -> Option<&Ride> {
        self.rides.get(edge.index())
    }

    /// Fastest journey from `from` to `to`; `None` if there is none.
    ///
    /// A stop no bus serves can only reach itself.
    pub fn route(&self, from: StopId, to: StopId) -> RouterResult<Option<Journey>> {
        for stop in [from, to] {
            if stop.index() >= self.stops.stop_count() {
                return Err(RouterError::InvalidStop(stop));
            }
        }
        if from == to {
            return Ok(Some(Journey { total_time: 0.0, legs: vec![] }));
        }
        let (Some(vf), Some(vt)) = (self.stops.vertex_of(from), self.stops.vertex_of(to)) else {
            return Ok(None);
        };
        let Some(itinerary) = self.router.shortest(vf, vt)? else {
            return Ok(None);
        };

        let legs = itinerary
            .edges
            .iter()
            .map(|&edge_id| self.leg(edge_id))
            .collect::<RouterResult<Vec<_>>>()?;
        Ok(Some(Journey { total_time: itinerary.total_weight, legs }))
    }

    /// [`route`](Self::route) by stop name.
    pub fn route_by_name(&self, catalogue: &Catalogue, from: &str, to: &str) -> RouterResult<Option<Journey>> {
        let lookup = |name: &str| {
            catalogue
                .find_stop(name)
                .ok_or_else(|| RouterError::UnknownStopName(name.to_owned()))
        };
        self.route(lookup(from)?, lookup(to)?)
    }

    fn leg(&self, edge_id: EdgeId) -> RouterResult<Leg> {
        let inconsistent = || RouterError::Inconsistent(format!("no ride data for {edge_id}"));
        let edge = self.router.graph().edge(edge_id).ok_or_else(inconsistent)?;
        let ride = self.ride(edge_id).ok_or_else(inconsistent)?;
        let stop = |v: VertexId| {
            self.stops
                .stop_of(v)
                .ok_or_else(|| RouterError::Inconsistent(format!("{v} has no stop")))
        };
        Ok(Leg {
            from:       stop(edge.from)?,
            to:         stop(edge.to)?,
            bus:        ride.bus,
            span_count: ride.span_count,
            wait_time:  self.settings.bus_wait_time,
            ride_time:  ride.ride_time,
        })
    }
}
