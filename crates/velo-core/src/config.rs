//! Scenario configuration.
//!
//! One immutable `ScenarioConfig` is passed into the simulation's
//! constructor; nothing is module-global, so multiple independent runs can
//! coexist in one process.  All validation happens in
//! [`ScenarioConfig::validate`] and fails fast — invalid values are rejected
//! with [`VeloError::Config`], never clamped or defaulted.

use crate::corridor::{BoundaryPolicy, Corridor};
use crate::error::{VeloError, VeloResult};

// ── DemandSegment ─────────────────────────────────────────────────────────────

/// One piece of the piecewise inflow demand profile.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandSegment {
    /// How long this demand level lasts, simulated seconds.
    pub duration_secs: f64,
    /// Arrival rate, bicycles per hour.
    pub rate_per_hour: f64,
}

impl DemandSegment {
    /// Fixed spacing between consecutive arrivals in this segment, seconds.
    #[inline]
    pub fn headway_secs(&self) -> f64 {
        3_600.0 / self.rate_per_hour
    }
}

// ── ScenarioConfig ────────────────────────────────────────────────────────────

/// Construction-time configuration for one simulation run.
///
/// There is no `Default` impl: every field, including the backward search
/// radius, must be spelled out.  [`ScenarioConfig::baseline`] provides the
/// reference scenario for tests and demos.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioConfig {
    /// Corridor geometry (length, core-lane width, shoulder width per side).
    pub corridor: Corridor,

    /// Neighbor-query behavior at the corridor ends.
    pub boundary: BoundaryPolicy,

    /// Simulated seconds per tick.
    pub tick_duration_secs: f64,

    // ── Bicycle dimensions ────────────────────────────────────────────────
    /// Physical length of every bicycle, metres.
    pub bike_length: f64,
    /// Physical width (handlebar span) of every bicycle, metres.
    pub bike_width: f64,

    // ── Sampled per-agent attributes ──────────────────────────────────────
    /// Mean of the Gaussian desired-speed distribution, m/s.
    pub desired_speed_mean: f64,
    /// Standard deviation of the desired-speed distribution, m/s.
    pub desired_speed_std: f64,
    /// Center of the uniform desired-lateral-offset distribution, metres
    /// from the right corridor edge.
    pub desired_lat_center: f64,
    /// Half-range of the desired-lateral-offset distribution, metres.
    pub desired_lat_half_range: f64,

    // ── Kinematic limits (shared by all agents) ───────────────────────────
    /// Desired/feasible acceleration, m/s².
    pub accel_limit: f64,
    /// Maximum braking deceleration, m/s².
    pub brake_limit: f64,
    /// Maximum lateral speed, m/s.
    pub lat_speed_limit: f64,

    // ── Neighbor search radii ─────────────────────────────────────────────
    /// Forward (leader) search radius, metres.
    pub look_ahead_dist: f64,
    /// Backward (follower) search radius, metres.  Required — there is no
    /// sensible universal default.
    pub look_back_dist: f64,

    // ── Entry & demand ────────────────────────────────────────────────────
    /// Lateral position every agent enters at, metres from the right edge.
    pub entry_lat_offset: f64,
    /// Piecewise (duration, rate) inflow demand profile.
    pub demand: Vec<DemandSegment>,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl ScenarioConfig {
    /// The reference scenario: a 300 m corridor with a 2 m lane and 0.5 m
    /// shoulders, 1 s ticks, and a one-hour two-level demand profile.
    pub fn baseline() -> Self {
        Self {
            corridor:               Corridor::new(300.0, 2.0, 0.5),
            boundary:               BoundaryPolicy::Clamp,
            tick_duration_secs:     1.0,
            bike_length:            2.0,
            bike_width:             0.8,
            desired_speed_mean:     4.0,
            desired_speed_std:      1.0,
            desired_lat_center:     1.0,
            desired_lat_half_range: 0.2,
            accel_limit:            1.4,
            brake_limit:            2.0,
            lat_speed_limit:        0.5,
            look_ahead_dist:        50.0,
            look_back_dist:         10.0,
            entry_lat_offset:       1.0,
            demand: vec![
                DemandSegment { duration_secs: 1_800.0, rate_per_hour: 750.0 },
                DemandSegment { duration_secs: 1_800.0, rate_per_hour: 100.0 },
            ],
            seed: 4,
        }
    }

    /// Check every field, failing fast with [`VeloError::Config`] on the
    /// first problem found.  Nothing is ever clamped or defaulted.
    pub fn validate(&self) -> VeloResult<()> {
        fn positive(name: &str, v: f64) -> VeloResult<()> {
            if v > 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(VeloError::Config(format!("{name} must be positive, got {v}")))
            }
        }
        fn non_negative(name: &str, v: f64) -> VeloResult<()> {
            if v >= 0.0 && v.is_finite() {
                Ok(())
            } else {
                Err(VeloError::Config(format!("{name} must be non-negative, got {v}")))
            }
        }

        positive("tick_duration_secs", self.tick_duration_secs)?;
        positive("corridor.length", self.corridor.length)?;
        positive("corridor.lane_width", self.corridor.lane_width)?;
        non_negative("corridor.shoulder_width", self.corridor.shoulder_width)?;

        positive("bike_length", self.bike_length)?;
        positive("bike_width", self.bike_width)?;
        if self.bike_width > self.corridor.width() {
            return Err(VeloError::Config(format!(
                "bike_width {} exceeds corridor width {}",
                self.bike_width,
                self.corridor.width()
            )));
        }

        positive("desired_speed_mean", self.desired_speed_mean)?;
        non_negative("desired_speed_std", self.desired_speed_std)?;
        non_negative("desired_lat_half_range", self.desired_lat_half_range)?;

        positive("accel_limit", self.accel_limit)?;
        positive("brake_limit", self.brake_limit)?;
        positive("lat_speed_limit", self.lat_speed_limit)?;

        positive("look_ahead_dist", self.look_ahead_dist)?;
        positive("look_back_dist", self.look_back_dist)?;

        // The whole body must fit inside the corridor at every lateral
        // position an agent can be created with.
        let half = self.bike_width / 2.0;
        let lat_lo = self.desired_lat_center - self.desired_lat_half_range;
        let lat_hi = self.desired_lat_center + self.desired_lat_half_range;
        for (name, lat) in [
            ("entry_lat_offset", self.entry_lat_offset),
            ("desired lateral offset (low end)", lat_lo),
            ("desired lateral offset (high end)", lat_hi),
        ] {
            if lat < half || lat > self.corridor.width() - half {
                return Err(VeloError::Config(format!(
                    "{name} {lat} leaves the body outside the corridor \
                     (valid range {half}..{})",
                    self.corridor.width() - half
                )));
            }
        }

        if self.demand.is_empty() {
            return Err(VeloError::Config("demand profile is empty".into()));
        }
        for (i, seg) in self.demand.iter().enumerate() {
            positive(&format!("demand[{i}].duration_secs"), seg.duration_secs)?;
            positive(&format!("demand[{i}].rate_per_hour"), seg.rate_per_hour)?;
        }

        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> crate::SimClock {
        crate::SimClock::new(self.tick_duration_secs)
    }
}
