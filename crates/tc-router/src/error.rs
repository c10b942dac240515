//! Routing-subsystem error type.
//!
//! "No route" is not an error: queries return `Ok(None)` for it.

use thiserror::Error;

use tc_core::{CoreError, StopId, VertexId};

/// Errors produced by `tc-router`.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("vertex {vertex} out of range (graph has {count} vertices)")]
    InvalidVertex { vertex: VertexId, count: usize },

    #[error("edge weight {0} is negative or not finite")]
    InvalidWeight(f64),

    #[error("no distance recorded between adjacent stops {from:?} and {to:?}")]
    MissingDistance { from: String, to: String },

    #[error("stop {0} not found in catalogue")]
    InvalidStop(StopId),

    #[error("unknown stop {0:?}")]
    UnknownStopName(String),

    #[error("route table is inconsistent: {0}")]
    Inconsistent(String),

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type RouterResult<T> = Result<T, RouterError>;
