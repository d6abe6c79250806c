//! `velo-spatial` — continuous 2-D position tracking and neighbor queries.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`index`] | `CorridorIndex`, `Direction`, `Neighbor`                  |
//! | [`error`] | `SpatialError`, `SpatialResult<T>`                        |
//!
//! The index is mutated only during the commit/evict/admit steps of a tick;
//! the decide phase holds it by shared reference and issues read-only
//! queries.

pub mod error;
pub mod index;


pub use error::{SpatialError, SpatialResult};
pub use index::{CorridorIndex, Direction, Neighbor};
