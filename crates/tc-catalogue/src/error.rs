//! Catalogue error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("unknown stop {0:?}")]
    UnknownStop(String),

    #[error("stop {0:?} is already defined")]
    DuplicateStop(String),

    #[error("bus {0:?} is already defined")]
    DuplicateBus(String),

    #[error("bus {0:?} has no stops")]
    EmptyBus(String),

    #[error("no distance recorded between {from:?} and {to:?}")]
    MissingDistance { from: String, to: String },

    #[error("catalogue parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CatalogueResult<T> = Result<T, CatalogueError>;
