//! `velo-sim` — the synchronized two-phase tick scheduler.
//!
//! # One tick
//!
//! ```text
//! advance():
//!   ① Decide — every active agent computes a pending state from the
//!              committed snapshot (parallel with the `parallel` feature).
//!   ② Commit — pending states become committed, ascending AgentId;
//!              the spatial index follows.
//!   ③ Evict  — agents past the corridor end leave, batch computed from
//!              the post-commit snapshot.
//!   ④ Admit  — at most one scheduled entry spawns a new agent.
//!   ⑤ The clock advances.
//! ```
//!
//! Run-length control belongs to the caller: `advance` is the only stepping
//! primitive, and [`Sim::run_ticks`] is a thin loop over it that fires
//! observer callbacks.  A failed tick aborts the run — ticks are pure
//! transitions and are never replayed.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                          |
//! |------------|-------------------------------------------------|
//! | `parallel` | Runs the decide phase on Rayon's thread pool.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use velo_core::ScenarioConfig;
//! use velo_model::NecessaryDeceleration;
//! use velo_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(ScenarioConfig::baseline(),
//!                               NecessaryDeceleration::default()).build()?;
//! sim.run_ticks(3_600, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{AgentSample, NoopObserver, SimObserver};
pub use sim::{Sim, TickStats};
