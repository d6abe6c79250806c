//! Fluent builder for constructing a [`Sim`].

use velo_agent::Population;
use velo_core::{ScenarioConfig, ScenarioRng};
use velo_inflow::EntrySchedule;
use velo_model::DecisionModel;
use velo_spatial::CorridorIndex;

use crate::{Sim, SimResult};

/// Builder for [`Sim<M>`].
///
/// Validates the scenario configuration, seeds the run-level RNG, expands
/// the demand profile into an [`EntrySchedule`], and constructs an empty
/// population and spatial index.  The corridor always starts empty; agents
/// only ever appear through the admit phase.
///
/// # Example
///
/// ```rust,ignore
/// let config = ScenarioConfig::baseline();
/// let mut sim = SimBuilder::new(config, NecessaryDeceleration::default()).build()?;
/// sim.run_ticks(3_600, &mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: DecisionModel> {
    config: ScenarioConfig,
    model:  M,
}

impl<M: DecisionModel> SimBuilder<M> {
    /// Create a builder from a scenario configuration and a decision model.
    pub fn new(config: ScenarioConfig, model: M) -> Self {
        Self { config, model }
    }

    /// Validate the configuration and return a ready-to-run [`Sim`].
    ///
    /// Fails with [`SimError::Config`][crate::SimError::Config] on any
    /// invalid scenario parameter or demand profile; nothing is checked
    /// again at tick time.
    pub fn build(self) -> SimResult<Sim<M>> {
        self.config.validate()?;

        let rng = ScenarioRng::from_config(&self.config)?;
        let schedule =
            EntrySchedule::from_profile(&self.config.demand, self.config.tick_duration_secs)?;
        let index = CorridorIndex::new(self.config.corridor, self.config.boundary);
        let clock = self.config.make_clock();

        Ok(Sim {
            config: self.config,
            clock,
            population: Population::new(),
            index,
            schedule,
            model: self.model,
            rng,
            total_admitted: 0,
            total_evicted: 0,
        })
    }
}
