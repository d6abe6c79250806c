//! `velo-inflow` — converts a piecewise demand profile into an ordered
//! schedule of agent entry ticks.
//!
//! # Crate layout
//!
//! | Module       | Contents                                    |
//! |--------------|---------------------------------------------|
//! | [`schedule`] | `EntrySchedule` with its monotonic cursor   |
//! | [`error`]    | `InflowError`, `InflowResult<T>`            |
//!
//! # Headway model
//!
//! Arrivals within a segment are deterministic and equally spaced: the
//! headway is `3600 / rate` seconds, entries start at the segment's start
//! offset and end strictly before its end offset.  Segment schedules are
//! concatenated into one globally non-decreasing tick list.  (A stochastic
//! headway variant would slot in as an alternative constructor; the fixed
//! spacing here is the authoritative behavior.)

pub mod error;
pub mod schedule;

#[cfg(test)]
mod tests;

pub use error::{InflowError, InflowResult};
pub use schedule::EntrySchedule;
