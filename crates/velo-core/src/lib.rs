//! `velo-core` — foundational types for the `velo` bike-path simulation.
//!
//! This crate is a dependency of every other `velo-*` crate.  It intentionally
//! has no `velo-*` dependencies and minimal external ones (only `rand`,
//! `rand_distr`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `AgentId`                                             |
//! | [`corridor`] | `Point2`, `Corridor`, `BoundaryPolicy`                |
//! | [`time`]     | `Tick`, `SimClock`                                    |
//! | [`config`]   | `ScenarioConfig`, `DemandSegment`                     |
//! | [`rng`]      | `ScenarioRng` (single seeded stream)                  |
//! | [`error`]    | `VeloError`, `VeloResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod corridor;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DemandSegment, ScenarioConfig};
pub use corridor::{BoundaryPolicy, Corridor, Point2};
pub use error::{VeloError, VeloResult};
pub use ids::AgentId;
pub use rng::ScenarioRng;
pub use time::{SimClock, Tick};
