//! `tc-router` — transit graph, all-pairs route table, itinerary lookup.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`graph`]     | `Graph` (CSR, immutable), `GraphBuilder`, `Edge`           |
//! | [`network`]   | `build_transit_graph`, `TransitGraph`, `VertexMap`, `Ride` |
//! | [`router`]    | `Router` (Floyd–Warshall table), `RouteEntry`, `Itinerary` |
//! | [`transport`] | `TransportRouter`, `Journey`, `Leg`, `RouteItem`           |
//! | [`error`]     | `RouterError`, `RouterResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Relaxes the rows of each precomputation pass with Rayon.   |

pub mod error;
pub mod graph;
pub mod network;
pub mod router;
pub mod transport;

#[cfg(test)]
mod tests;

pub use error::{RouterError, RouterResult};
pub use graph::{Edge, Graph, GraphBuilder};
pub use network::{Ride, TransitGraph, VertexMap, build_transit_graph};
pub use router::{Itinerary, RouteEntry, Router};
pub use transport::{Journey, Leg, RouteItem, TransportRouter};
