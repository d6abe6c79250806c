//! Read-only simulation state passed to every decide call.

use velo_agent::Population;
use velo_core::{Corridor, Tick};
use velo_spatial::CorridorIndex;

/// A read-only snapshot of the simulation state shared (immutably) across
/// all [`DecisionModel::decide`][crate::DecisionModel::decide] calls of one
/// tick.
///
/// # Lifetimes
///
/// All borrows live for the duration of one tick's decide phase.  velo-sim
/// never allows mutable access to these structures while a `TickContext` is
/// live, which is what makes pending state invisible to other agents.
pub struct TickContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// Simulated seconds one tick represents.
    pub dt: f64,

    /// Committed state of every active agent, id-ordered.
    pub population: &'a Population,

    /// Position index answering directional neighbor queries.
    pub index: &'a CorridorIndex,

    /// Corridor geometry (for lateral bounds).
    pub corridor: &'a Corridor,

    /// Forward neighbor-search radius, metres.
    pub look_ahead_dist: f64,

    /// Backward neighbor-search radius, metres, for
    /// [`Direction::Behind`][velo_spatial::Direction] queries.  The
    /// baseline model reads only leaders; follower-aware models (e.g. a
    /// yield-before-merge rule) query behind with this radius.
    pub look_back_dist: f64,
}

impl<'a> TickContext<'a> {
    /// Build a new context for a single tick.
    #[inline]
    pub fn new(
        tick:            Tick,
        dt:              f64,
        population:      &'a Population,
        index:           &'a CorridorIndex,
        corridor:        &'a Corridor,
        look_ahead_dist: f64,
        look_back_dist:  f64,
    ) -> Self {
        Self {
            tick,
            dt,
            population,
            index,
            corridor,
            look_ahead_dist,
            look_back_dist,
        }
    }
}
