//! The speed-dependent safety envelope.
//!
//! A follower must keep a longitudinal gap to any leader intruding on its
//! lateral band.  The envelope is rectangular directly ahead — full
//! `long_req` depth while the bodies overlap laterally — and triangular for
//! partial overlap: the required depth tapers linearly to zero as the
//! lateral separation grows from body contact to body contact plus
//! `lat_req`.  Both requirements grow with speed, so faster riders demand
//! larger gaps.

/// Gap-requirement parameters shared by every agent.
///
/// All gaps are center-to-center longitudinal separations in metres.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SafetyEnvelope {
    /// Longitudinal requirement at standstill, metres.
    pub min_gap: f64,
    /// Additional longitudinal requirement per m/s of speed, seconds.
    pub time_gap: f64,
    /// Lateral taper width at standstill, metres.
    pub lat_base: f64,
    /// Additional lateral taper width per m/s of speed, seconds.
    pub lat_coeff: f64,
}

impl Default for SafetyEnvelope {
    /// Calibrated so that at the 4 m/s mean desired speed the requirements
    /// match the reference scenario's static values: `long_req(4) = 6 m`,
    /// `lat_req(4) = 0.2 m`.
    fn default() -> Self {
        Self {
            min_gap:   2.0,
            time_gap:  1.0,
            lat_base:  0.1,
            lat_coeff: 0.025,
        }
    }
}

impl SafetyEnvelope {
    /// Required longitudinal gap at full lateral overlap, metres.
    #[inline]
    pub fn long_req(&self, speed: f64) -> f64 {
        self.min_gap + self.time_gap * speed
    }

    /// Width of the lateral taper band beyond body contact, metres.
    #[inline]
    pub fn lat_req(&self, speed: f64) -> f64 {
        self.lat_base + self.lat_coeff * speed
    }

    /// Fraction of the longitudinal requirement a leader at lateral
    /// separation `d_lat` imposes, in `[0, 1]`.
    ///
    /// `1` while the bodies overlap (
    /// `d_lat ≤ (follower_width + leader_width) / 2`), linearly down to `0`
    /// at body contact plus `lat_req(speed)`.
    pub fn overlap(
        &self,
        follower_width: f64,
        leader_width:   f64,
        d_lat:          f64,
        speed:          f64,
    ) -> f64 {
        let body = (follower_width + leader_width) / 2.0;
        let taper = self.lat_req(speed);
        if d_lat <= body {
            1.0
        } else if d_lat >= body + taper {
            0.0
        } else {
            1.0 - (d_lat - body) / taper
        }
    }
}
