//! `velo-model` — the per-tick agent decision model.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`context`]  | `TickContext<'a>` — read-only tick snapshot shared by all agents |
//! | [`model`]    | `DecisionModel` trait                                          |
//! | [`envelope`] | `SafetyEnvelope` — speed-dependent gap requirements            |
//! | [`ndm`]      | `NecessaryDeceleration` — car-following + lateral control      |
//! | [`cruise`]   | `Cruise` — free-flow model that ignores neighbors              |
//! | [`error`]    | `ModelError`, `ModelResult<T>`                                 |
//!
//! # Design notes
//!
//! The two-phase tick loop in velo-sim works as follows:
//!
//! 1. **Decide phase**: for every active agent, call
//!    [`DecisionModel::decide`] against one shared [`TickContext`].  All
//!    reads see committed state only; no mutation, so iteration order (or
//!    parallel execution) cannot change any agent's result.
//!
//! 2. **Commit phase** (sequential, ascending id): the collected `Pending`
//!    values become committed state and the spatial index is updated.
//!
//! Only one concrete agent kind exists, but the decision capability stays
//! behind a trait so other models can be slotted in without touching the
//! scheduler.

pub mod context;
pub mod cruise;
pub mod envelope;
pub mod error;
pub mod model;
pub mod ndm;


pub use context::TickContext;
pub use cruise::Cruise;
pub use envelope::SafetyEnvelope;
pub use error::{ModelError, ModelResult};
pub use model::DecisionModel;
pub use ndm::NecessaryDeceleration;
