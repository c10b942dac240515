//! `tc-core` — foundational types for the transit routing engine.
//!
//! Every other `tc-*` crate depends on this one.  It has no `tc-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `StopId`, `BusId`, `VertexId`, `EdgeId`               |
//! | [`geo`]         | `GeoPoint`, great-circle distance                     |
//! | [`settings`]    | `RoutingSettings` (wait time, bus velocity)           |
//! | [`error`]       | `CoreError`, `CoreResult`                             |

pub mod error;
pub mod geo;
pub mod ids;
pub mod settings;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{BusId, EdgeId, StopId, VertexId};
pub use settings::RoutingSettings;
