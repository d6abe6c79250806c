//! `NecessaryDeceleration` — the concrete car-following + lateral model.
//!
//! # Longitudinal control
//!
//! For every leader within the look-ahead radius the envelope yields a speed
//! cap from a one-tick projection against the leader's worst-case motion:
//! the leader may brake to `v_L_eff = max(v_L − leader.brake_limit·dt, 0)`
//! and may shift laterally by up to its `lat_speed_limit·dt`.  Solving
//! `gap + (v_L_eff − v)·dt ≥ ov · long_req(v)` for `v` gives
//!
//! ```text
//! v ≤ (gap + v_L_eff·dt − ov·min_gap) / (dt + ov·time_gap)
//! ```
//!
//! where `ov` is the band overlap evaluated at the lateral separation the
//! pair can reach within the tick (the follower's own committed next lateral
//! position minus the leader's lateral reach) and at the highest speed the
//! follower can carry out of the tick.  The binding cap is the minimum over
//! leaders.  The agent then accelerates toward its desired speed, or brakes
//! toward the cap, bounded by its acceleration and braking limits and
//! floored at zero — so longitudinal position is non-decreasing.
//!
//! Whenever the chosen speed satisfies the cap, the post-commit gap respects
//! `ov·long_req` no matter what the leader does this tick.  The cap can sit
//! below what one tick of braking reaches (an agent enters at its desired
//! speed regardless of traffic); the braking limit then wins and the agent
//! sheds speed as fast as physics allows until the cap is reachable again.
//!
//! # Lateral control
//!
//! The lateral target is the agent's sampled desired offset.  Under
//! congestion — the binding cap forces the speed below both the current and
//! the desired speed — the target shifts past the binding leader toward the
//! shoulder side with more free room, far enough to zero the band overlap
//! against the leader's reach; if neither side has room the agent queues at
//! its desired offset.  Movement toward the target is capped at
//! `lat_speed_limit·dt` per tick and the result keeps the whole body inside
//! the corridor.

use velo_agent::{Bicycle, Pending};
use velo_core::AgentId;
use velo_spatial::Direction;

use crate::envelope::SafetyEnvelope;
use crate::error::{ModelError, ModelResult};
use crate::model::DecisionModel;
use crate::TickContext;

const CONGESTION_EPS: f64 = 1e-9;

/// The bicycle-following model used by the baseline scenario.
#[derive(Default)]
pub struct NecessaryDeceleration {
    pub envelope: SafetyEnvelope,
}

impl NecessaryDeceleration {
    pub fn new(envelope: SafetyEnvelope) -> Self {
        Self { envelope }
    }

    /// Largest next-tick speed that keeps `gap + (v_lead − v)·dt` at or
    /// above `ov·long_req(v)`.
    fn allowed_speed(&self, gap: f64, v_lead: f64, ov: f64, dt: f64) -> f64 {
        (gap + v_lead * dt - ov * self.envelope.min_gap) / (dt + ov * self.envelope.time_gap)
    }
}

/// The slowest speed the leader can hold through the coming tick.
fn braked_speed(leader: &Bicycle, dt: f64) -> f64 {
    (leader.state.speed - leader.params.brake_limit * dt).max(0.0)
}

impl DecisionModel for NecessaryDeceleration {
    fn decide(&self, agent: AgentId, ctx: &TickContext<'_>) -> ModelResult<Pending> {
        let bike = ctx
            .population
            .get(agent)
            .ok_or(ModelError::MissingAgent(agent))?;
        let params = &bike.params;
        let state = &bike.state;
        let dt = ctx.dt;

        let neighbors = ctx
            .index
            .neighbors(agent, ctx.look_ahead_dist, Direction::Ahead)?;
        let mut leaders = Vec::with_capacity(neighbors.len());
        for neighbor in &neighbors {
            let leader = ctx
                .population
                .get(neighbor.id)
                .ok_or(ModelError::MissingAgent(neighbor.id))?;
            leaders.push((leader, neighbor.gap));
        }

        // Highest speed this agent can carry out of the tick; band overlaps
        // are evaluated at it so the cap never understates the requirement.
        let reach_speed = state.speed + params.accel_limit * dt;

        // ── Congestion check at committed positions ───────────────────────
        let mut cap_now = f64::INFINITY;
        let mut binding: Option<&Bicycle> = None;
        for &(leader, gap) in &leaders {
            let d_lat = (leader.state.lat - state.lat).abs();
            let ov = self
                .envelope
                .overlap(params.width, leader.params.width, d_lat, state.speed);
            if ov <= 0.0 {
                continue;
            }
            let allowed = self.allowed_speed(gap, braked_speed(leader, dt), ov, dt);
            if allowed < cap_now {
                cap_now = allowed;
                binding = Some(leader);
            }
        }
        let congested = cap_now < state.speed.min(params.desired_speed) - CONGESTION_EPS;

        // ── Lateral: desired offset, or an overtaking/queueing deviation ──
        let half = params.width / 2.0;
        let lat_lo = half;
        let lat_hi = ctx.corridor.width() - half;

        let mut target_lat = params.desired_lat;
        if congested {
            if let Some(leader) = binding {
                // Offset from the leader at which band overlap stays zero
                // even if the leader swings toward us for a tick.
                let clear = (params.width + leader.params.width) / 2.0
                    + self.envelope.lat_req(reach_speed)
                    + leader.params.lat_speed_limit * dt;
                let left = leader.state.lat + clear;
                let right = leader.state.lat - clear;
                let room_left = lat_hi - left;
                let room_right = right - lat_lo;
                if room_left >= 0.0 || room_right >= 0.0 {
                    target_lat = if room_left >= room_right { left } else { right };
                }
                // Neither side fits: queue behind at the desired offset.
            }
        }

        let step = (target_lat - state.lat).clamp(-params.lat_speed_limit * dt,
                                                  params.lat_speed_limit * dt);
        let lat = (state.lat + step).clamp(lat_lo, lat_hi);

        // ── Longitudinal: binding cap against worst-case leader motion ────
        let mut cap = f64::INFINITY;
        for &(leader, gap) in &leaders {
            let d_lat = ((leader.state.lat - lat).abs()
                - leader.params.lat_speed_limit * dt)
                .max(0.0);
            let ov = self
                .envelope
                .overlap(params.width, leader.params.width, d_lat, reach_speed);
            if ov <= 0.0 {
                continue;
            }
            cap = cap.min(self.allowed_speed(gap, braked_speed(leader, dt), ov, dt));
        }

        let v_floor = (state.speed - params.brake_limit * dt).max(0.0);
        let v_ceil = (state.speed + params.accel_limit * dt)
            .min(params.desired_speed)
            .max(v_floor);
        let speed = params.desired_speed.min(cap).max(v_floor).min(v_ceil);

        Ok(Pending {
            long: state.long + speed * dt,
            lat,
            speed,
        })
    }
}
