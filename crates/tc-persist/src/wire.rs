//! On-disk payload schema.
//!
//! Plain bitcode structs that mirror the in-memory types with raw integer
//! ids.  Nothing here is validated; `codec` does that while converting back.

use bitcode::{Decode, Encode};

#[derive(Encode, Decode, Clone, Debug, PartialEq)]
pub(crate) struct EdgeWire {
    pub from:   u32,
    pub to:     u32,
    pub weight: f64,
}

#[derive(Encode, Decode, Clone, Debug, PartialEq)]
pub(crate) struct GraphWire {
    pub vertex_count: u32,
    pub edges:        Vec<EdgeWire>,
}

#[derive(Encode, Decode, Clone, Debug, PartialEq)]
pub(crate) struct RouteWire {
    pub weight:    f64,
    pub prev_edge: Option<u32>,
}

/// Graph plus one row of route entries per vertex.
#[derive(Encode, Decode, Clone, Debug, PartialEq)]
pub(crate) struct RouterWire {
    pub graph:  GraphWire,
    pub routes: Vec<Vec<Option<RouteWire>>>,
}

#[derive(Encode, Decode, Clone, Debug, PartialEq)]
pub(crate) struct StopWire {
    pub name: String,
    pub lat:  f64,
    pub lon:  f64,
}

#[derive(Encode, Decode, Clone, Debug, PartialEq)]
pub(crate) struct BusWire {
    pub name:         String,
    pub stops:        Vec<u32>,
    pub is_roundtrip: bool,
}

#[derive(Encode, Decode, Clone, Debug, PartialEq)]
pub(crate) struct DistanceWire {
    pub from:   u32,
    pub to:     u32,
    pub metres: u32,
}

#[derive(Encode, Decode, Clone, Debug, PartialEq)]
pub(crate) struct CatalogueWire {
    pub stops:     Vec<StopWire>,
    pub buses:     Vec<BusWire>,
    pub distances: Vec<DistanceWire>,
}

#[derive(Encode, Decode, Clone, Debug, PartialEq)]
pub(crate) struct RideWire {
    pub bus:        u32,
    pub span_count: u32,
    pub ride_time:  f64,
}

#[derive(Encode, Decode, Clone, Debug, PartialEq)]
pub(crate) struct NetworkWire {
    pub catalogue:     CatalogueWire,
    pub bus_wait_time: f64,
    pub bus_velocity:  f64,
    /// Stop of each vertex, indexed by vertex.
    pub vertex_stops:  Vec<u32>,
    /// Indexed by edge.
    pub rides:         Vec<RideWire>,
    pub router:        RouterWire,
}
