//! The `Sim` struct and its tick loop.

use velo_agent::{Bicycle, Pending, Population};
use velo_core::{AgentId, ScenarioConfig, ScenarioRng, SimClock, Tick};
use velo_inflow::EntrySchedule;
use velo_model::{DecisionModel, TickContext};
use velo_spatial::CorridorIndex;

use crate::{AgentSample, SimError, SimObserver, SimResult};

// ── TickStats ─────────────────────────────────────────────────────────────────

/// Bookkeeping counts for one completed tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TickStats {
    /// The tick these counts describe.
    pub tick: Tick,
    /// Active agents after the admit phase.
    pub active: usize,
    /// Agents admitted this tick (0 or 1).
    pub admitted: usize,
    /// Agents evicted this tick.
    pub evicted: usize,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<M>` holds all simulation state and drives the five-phase tick loop:
///
/// 1. **Decide** (optionally parallel with the `parallel` feature): for each
///    active agent, ascending id, call [`DecisionModel::decide`] against a
///    read-only [`TickContext`].  No pending state is visible to any agent.
/// 2. **Commit** (sequential, ascending `AgentId`): pending states become
///    committed; lateral-bounds and monotonic-progress invariants are
///    checked; the spatial index is updated in lockstep.
/// 3. **Evict**: the batch of agents with committed longitudinal position
///    at or past the corridor end, computed from the post-commit snapshot,
///    is removed from the population and the index.
/// 4. **Admit**: if the entry schedule has an arrival at this tick, exactly
///    one bicycle spawns at the entry boundary.
/// 5. The clock advances.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: DecisionModel> {
    /// Scenario configuration (geometry, limits, demand, seed).
    pub config: ScenarioConfig,

    /// Simulation clock — tracks the current tick and maps to sim seconds.
    pub clock: SimClock,

    /// Committed state of every active agent, plus the id allocator.
    pub population: Population,

    /// Position index, kept in lockstep with the population.
    pub index: CorridorIndex,

    /// Precomputed entry ticks with a consuming cursor.
    pub schedule: EntrySchedule,

    /// The decision model.  Called once per active agent per tick.
    pub model: M,

    /// The single run-level RNG.  Consumed only at admission, in strict
    /// creation order, which is what makes runs reproducible.
    pub rng: ScenarioRng,

    /// Total agents admitted since construction.
    pub total_admitted: u64,

    /// Total agents evicted since construction.
    pub total_evicted: u64,
}

impl<M: DecisionModel> Sim<M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance the simulation by exactly one tick.
    ///
    /// Runs the decide → commit → evict → admit phases in that order, then
    /// advances the clock.  An error from any phase aborts the tick and
    /// leaves the sim in an unspecified state — a failed run is never
    /// resumed.
    pub fn advance(&mut self) -> SimResult<TickStats> {
        let now = self.clock.current_tick;

        // ── Phase 1: decide ───────────────────────────────────────────────
        //
        // The context borrows population and index immutably for the whole
        // phase, so no pending state can leak into any decision.
        let pending = self.decide(now)?;

        // ── Phase 2: commit ───────────────────────────────────────────────
        self.commit(pending)?;

        // ── Phase 3: evict ────────────────────────────────────────────────
        //
        // The batch is computed from the post-commit snapshot before any
        // removal, so membership during the scan is fixed.
        let exited: Vec<AgentId> = self
            .population
            .iter()
            .filter(|b| b.state.long >= self.config.corridor.length)
            .map(|b| b.id)
            .collect();
        let evicted = exited.len();
        for id in exited {
            self.population.remove(id)?;
            self.index.remove(id)?;
        }
        self.total_evicted += evicted as u64;

        // ── Phase 4: admit ────────────────────────────────────────────────
        let mut admitted = 0;
        if self.schedule.take_entry(now) {
            let id = self.population.alloc_id();
            let bike = Bicycle::spawn(id, &self.config, &mut self.rng);
            self.index.insert(id, bike.position())?;
            self.population.admit(bike)?;
            self.total_admitted += 1;
            admitted = 1;
        }

        // ── Phase 5: advance the clock ────────────────────────────────────
        self.clock.advance();

        Ok(TickStats {
            tick: now,
            active: self.population.len(),
            admitted,
            evicted,
        })
    }

    /// Run exactly `n` ticks from the current position.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            let stats = self.advance()?;
            observer.on_tick_end(&stats);
            observer.on_snapshot(now, &self.samples());
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Committed state of every active agent, in ascending id order.
    pub fn samples(&self) -> Vec<AgentSample> {
        self.population
            .iter()
            .map(|b| AgentSample {
                id:    b.id,
                long:  b.state.long,
                lat:   b.state.lat,
                speed: b.state.speed,
            })
            .collect()
    }

    // ── Decide phase ──────────────────────────────────────────────────────

    /// Compute every active agent's pending state for tick `now`.
    ///
    /// Results come back paired with their id in ascending order, so the
    /// commit phase is deterministic regardless of how this phase was
    /// scheduled.  With the `parallel` Cargo feature the per-agent calls
    /// run on Rayon's thread pool.
    fn decide(&self, now: Tick) -> SimResult<Vec<(AgentId, Pending)>> {
        let ctx = TickContext::new(
            now,
            self.clock.tick_duration_secs,
            &self.population,
            &self.index,
            &self.config.corridor,
            self.config.look_ahead_dist,
            self.config.look_back_dist,
        );
        let ids = self.population.ids();

        #[cfg(not(feature = "parallel"))]
        {
            ids.into_iter()
                .map(|id| Ok((id, self.model.decide(id, &ctx)?)))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            ids.into_par_iter()
                .map(|id| Ok((id, self.model.decide(id, &ctx)?)))
                .collect()
        }
    }

    // ── Commit phase ──────────────────────────────────────────────────────

    /// Apply pending states in ascending id order, checking per-agent
    /// invariants and keeping the index in lockstep.
    fn commit(&mut self, pending: Vec<(AgentId, Pending)>) -> SimResult<()> {
        let width = self.config.corridor.width();
        for (id, next) in pending {
            let bike = self.population.get_mut(id).ok_or_else(|| {
                SimError::Invariant(format!("pending state for inactive agent {id}"))
            })?;

            if next.long < bike.state.long {
                return Err(SimError::Invariant(format!(
                    "agent {id} moved backward: {} -> {}",
                    bike.state.long, next.long
                )));
            }
            if !(0.0..=width).contains(&next.lat) {
                return Err(SimError::Invariant(format!(
                    "agent {id} lateral position {} outside [0, {width}]",
                    next.lat
                )));
            }

            bike.state.long = next.long;
            bike.state.lat = next.lat;
            bike.state.speed = next.speed;
            self.index.update(id, bike.position())?;
        }
        Ok(())
    }
}
