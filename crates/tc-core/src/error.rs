//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where settings validation can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
