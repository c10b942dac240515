//! `tc-persist` — binary snapshots of the routing engine.
//!
//! A snapshot lets a query process start from a precomputed route table
//! instead of rerunning the O(V³) build.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`header`] | 20-byte file header: magic, version, flags, length, checksum |
//! | [`codec`]  | `encode_router` / `decode_router`, `encode_network` / `decode_network` |
//! | [`file`]   | `save_to_file` (atomic), `load_from_file`                    |
//! | [`error`]  | `PersistError`, `PersistResult<T>`                           |
//!
//! # File layout
//!
//! ```text
//! [ header (20 bytes) ][ bitcode payload ]
//! ```
//!
//! The payload schema lives in the private `wire` module.

pub mod codec;
pub mod error;
pub mod file;
pub mod header;

mod wire;


pub use codec::{
    LoadedNetwork, decode_network, decode_router, encode_network, encode_router, restore_network,
    restore_router,
};
pub use error::{PersistError, PersistResult};
pub use file::{load_from_file, save_to_file};
