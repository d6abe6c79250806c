//! A free-flow model — agents ignore their neighbors.

use velo_agent::Pending;
use velo_core::AgentId;

use crate::error::{ModelError, ModelResult};
use crate::model::DecisionModel;
use crate::TickContext;

/// A [`DecisionModel`] that accelerates toward the desired speed and drifts
/// toward the desired lateral offset without looking at anyone.
///
/// Useful as a scheduler exerciser in tests and for "empty road" scenarios
/// where interaction never occurs.
pub struct Cruise;

impl DecisionModel for Cruise {
    fn decide(&self, agent: AgentId, ctx: &TickContext<'_>) -> ModelResult<Pending> {
        let bike = ctx
            .population
            .get(agent)
            .ok_or(ModelError::MissingAgent(agent))?;
        let params = &bike.params;
        let state = &bike.state;
        let dt = ctx.dt;

        let speed = (state.speed + params.accel_limit * dt).min(params.desired_speed);

        let half = params.width / 2.0;
        let step = (params.desired_lat - state.lat)
            .clamp(-params.lat_speed_limit * dt, params.lat_speed_limit * dt);
        let lat = (state.lat + step).clamp(half, ctx.corridor.width() - half);

        Ok(Pending {
            long: state.long + speed * dt,
            lat,
            speed,
        })
    }
}
