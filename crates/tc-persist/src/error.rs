//! Persistence error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    /// The bytes are not a well-formed, self-consistent snapshot.
    #[error("corrupt snapshot: {0}")]
    CorruptData(String),

    #[error("snapshot format version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Encoding was asked to pair a catalogue with a router built from a
    /// different one.
    #[error("catalogue does not match router: {0}")]
    Mismatch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PersistResult<T> = Result<T, PersistError>;
