//! `tc-catalogue` — the transit network the router is built from.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`catalogue`] | `Catalogue`, `Stop`, `Bus`, `BusStat`                 |
//! | [`loader`]    | `load_catalogue_reader`, `load_catalogue_dir` (CSV)   |
//! | [`error`]     | `CatalogueError`, `CatalogueResult<T>`                |
//!
//! The catalogue is filled once and then frozen: nothing in the routing
//! crates mutates it.

pub mod catalogue;
pub mod error;
pub mod loader;


pub use catalogue::{Bus, BusStat, Catalogue, Stop};
pub use error::{CatalogueError, CatalogueResult};
pub use loader::{load_catalogue_dir, load_catalogue_reader};
