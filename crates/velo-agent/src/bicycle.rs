//! The bicycle agent record: fixed parameters plus committed kinematics.

use velo_core::{AgentId, Point2, ScenarioConfig, ScenarioRng};

// ── BicycleParams ─────────────────────────────────────────────────────────────

/// Fixed physical and behavioral parameters, set once at creation.
///
/// `desired_speed` and `desired_lat` are drawn from the scenario's
/// distributions by the single run-level RNG, in strict creation order;
/// everything else is shared scenario configuration copied in so the decide
/// phase needs no access to the config object.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BicycleParams {
    /// Physical length, metres.
    pub length: f64,
    /// Physical width (handlebar span), metres.
    pub width: f64,
    /// Sampled desired longitudinal speed, m/s.
    pub desired_speed: f64,
    /// Sampled desired lateral offset from the right edge, metres.
    pub desired_lat: f64,
    /// Desired/feasible acceleration, m/s².
    pub accel_limit: f64,
    /// Maximum braking deceleration, m/s².
    pub brake_limit: f64,
    /// Maximum lateral speed, m/s.
    pub lat_speed_limit: f64,
}

// ── Kinematic state ───────────────────────────────────────────────────────────

/// Committed kinematic state — what every other agent sees this tick.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kinematics {
    /// Longitudinal position, metres from the corridor entry.
    pub long: f64,
    /// Lateral position, metres from the right corridor edge.
    pub lat: f64,
    /// Longitudinal speed, m/s.
    pub speed: f64,
}

impl Kinematics {
    #[inline]
    pub fn position(&self) -> Point2 {
        Point2::new(self.long, self.lat)
    }
}

/// A speculative next state, produced by the decide phase and applied by the
/// commit phase of the same tick.  Never visible to other agents' decisions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pending {
    pub long: f64,
    pub lat: f64,
    pub speed: f64,
}

// ── Bicycle ───────────────────────────────────────────────────────────────────

/// One bicycle agent: identity, fixed parameters, committed state.
///
/// There is no inheritance hierarchy and no per-agent behavior object — all
/// bicycles are the same record type, and "compute next state from
/// neighbors" lives behind the `DecisionModel` seam in `velo-model`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bicycle {
    pub id: AgentId,
    pub params: BicycleParams,
    pub state: Kinematics,
}

impl Bicycle {
    /// Create a bicycle at the corridor entry.
    ///
    /// Initial state per the lifecycle contract: longitudinal 0, lateral at
    /// the configured entry offset, speed equal to the freshly sampled
    /// desired speed.  Consumes exactly two draws from `rng` (speed, then
    /// lateral offset).
    pub fn spawn(id: AgentId, config: &ScenarioConfig, rng: &mut ScenarioRng) -> Self {
        let desired_speed = rng.sample_desired_speed();
        let desired_lat = rng.sample_desired_lat();
        Self {
            id,
            params: BicycleParams {
                length:          config.bike_length,
                width:           config.bike_width,
                desired_speed,
                desired_lat,
                accel_limit:     config.accel_limit,
                brake_limit:     config.brake_limit,
                lat_speed_limit: config.lat_speed_limit,
            },
            state: Kinematics {
                long:  0.0,
                lat:   config.entry_lat_offset,
                speed: desired_speed,
            },
        }
    }

    /// Committed position as a corridor point.
    #[inline]
    pub fn position(&self) -> Point2 {
        self.state.position()
    }
}
