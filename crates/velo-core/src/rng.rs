//! Deterministic scenario-level RNG.
//!
//! # Determinism strategy
//!
//! One `SmallRng` seeded from the scenario seed is the *only* source of
//! randomness in a run, and it is consumed exclusively at agent creation, in
//! strict creation order: first the desired speed, then the desired lateral
//! offset.  Every tick after creation is a pure function of committed state,
//! so two runs with identical configuration replay byte-identically.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

use crate::config::ScenarioConfig;
use crate::error::{VeloError, VeloResult};

/// The single seeded random stream for one simulation run.
///
/// The type is `!Sync` on purpose — there is exactly one consumer (the
/// admission step of the scheduler) and it must never be shared.
pub struct ScenarioRng {
    rng:           SmallRng,
    desired_speed: Normal<f64>,
    desired_lat:   Uniform<f64>,
}

impl ScenarioRng {
    /// Build the stream from a validated configuration.
    pub fn from_config(config: &ScenarioConfig) -> VeloResult<Self> {
        let desired_speed = Normal::new(config.desired_speed_mean, config.desired_speed_std)
            .map_err(|e| VeloError::Config(format!("desired-speed distribution: {e}")))?;
        let desired_lat = Uniform::new_inclusive(
            config.desired_lat_center - config.desired_lat_half_range,
            config.desired_lat_center + config.desired_lat_half_range,
        );
        Ok(Self {
            rng: SmallRng::seed_from_u64(config.seed),
            desired_speed,
            desired_lat,
        })
    }

    /// Draw a desired speed, m/s.
    ///
    /// Gaussian draws are rejection-sampled until strictly positive: a
    /// non-positive desired speed would strand an agent in the corridor
    /// forever.  Still deterministic for a fixed seed.
    pub fn sample_desired_speed(&mut self) -> f64 {
        loop {
            let v = self.desired_speed.sample(&mut self.rng);
            if v > 0.0 {
                return v;
            }
        }
    }

    /// Draw a desired lateral offset, metres from the right edge.
    pub fn sample_desired_lat(&mut self) -> f64 {
        self.desired_lat.sample(&mut self.rng)
    }

    /// Expose the inner `SmallRng` for tests that need raw draws.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}
