//! Simulation observer trait for progress reporting and data collection.

use velo_core::{AgentId, Tick};

use crate::sim::TickStats;

/// A read-only snapshot of one agent's committed state, handed to observers
/// once per tick after the commit/evict/admit phases complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSample {
    pub id:    AgentId,
    /// Longitudinal position in metres from the entry boundary.
    pub long:  f64,
    /// Lateral position in metres from the right corridor edge.
    pub lat:   f64,
    /// Committed speed in m/s.
    pub speed: f64,
}

/// Callbacks invoked by [`Sim::run_ticks`][crate::Sim::run_ticks] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, stats: &TickStats) {
///         if stats.tick.0 % self.interval == 0 {
///             println!("tick {}: {} active", stats.tick, stats.active);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with that tick's bookkeeping counts.
    fn on_tick_end(&mut self, _stats: &TickStats) {}

    /// Called once per tick after `on_tick_end` with the committed state of
    /// every active agent, in ascending id order.  Output writers record
    /// trajectories from here without the sim knowing about any format.
    fn on_snapshot(&mut self, _tick: Tick, _samples: &[AgentSample]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run_ticks`
/// but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
