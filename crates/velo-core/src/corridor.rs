//! Corridor geometry: continuous 2-D coordinates and the bounded rectangle
//! every agent lives in.
//!
//! Coordinates are plain metres, not geographic: `long` runs along the path
//! from the entry (0) to the exit (`Corridor::length`), `lat` runs across it
//! from the right edge (0) to the left edge (`Corridor::width()`).  The core
//! lane occupies the middle band; a shoulder of `shoulder_width` metres on
//! each side is transient-use space for overtaking and queueing.

use std::fmt;

// ── Point2 ────────────────────────────────────────────────────────────────────

/// A continuous position inside the corridor.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    /// Distance along the corridor from the entry, metres.
    pub long: f64,
    /// Distance across the corridor from the right edge, metres.
    pub lat: f64,
}

impl Point2 {
    #[inline]
    pub fn new(long: f64, lat: f64) -> Self {
        Self { long, lat }
    }

    /// Straight-line distance to `other`, metres.
    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        let dl = other.long - self.long;
        let dt = other.lat - self.lat;
        (dl * dl + dt * dt).sqrt()
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.long, self.lat)
    }
}

// ── BoundaryPolicy ────────────────────────────────────────────────────────────

/// How longitudinal separation behaves at the corridor ends.
///
/// The choice changes which agents count as neighbors near the ends, so it
/// is an explicit configuration value rather than an implicit default.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryPolicy {
    /// The corridor ends are hard edges: separation is the plain coordinate
    /// difference and nothing is visible "around" an end.  This is the
    /// baseline policy — agents enter at 0 and leave at `length`.
    Clamp,
    /// The corridor closes into a ring: separation is taken modulo the
    /// corridor length, the shorter way around.
    Wrap,
}

// ── Corridor ──────────────────────────────────────────────────────────────────

/// The bounded rectangle all agents move in: `[0, length] × [0, width()]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Corridor {
    /// Longitudinal extent, metres.
    pub length: f64,
    /// Width of the core lane, metres.
    pub lane_width: f64,
    /// Width of each of the two shoulders, metres.
    pub shoulder_width: f64,
}

impl Corridor {
    pub fn new(length: f64, lane_width: f64, shoulder_width: f64) -> Self {
        Self {
            length,
            lane_width,
            shoulder_width,
        }
    }

    /// Full lateral extent: core lane plus both shoulders.
    #[inline]
    pub fn width(&self) -> f64 {
        self.lane_width + 2.0 * self.shoulder_width
    }

    /// `true` if `p` lies inside `[0, length] × [0, width()]`.
    #[inline]
    pub fn contains(&self, p: Point2) -> bool {
        p.long >= 0.0 && p.long <= self.length && p.lat >= 0.0 && p.lat <= self.width()
    }

    /// Signed longitudinal separation from `from` to `to` under `policy`.
    ///
    /// Positive means `to` is ahead of `from`.  Under [`BoundaryPolicy::Wrap`]
    /// the result is folded into `(-length/2, length/2]`.
    pub fn long_separation(&self, from: f64, to: f64, policy: BoundaryPolicy) -> f64 {
        let raw = to - from;
        match policy {
            BoundaryPolicy::Clamp => raw,
            BoundaryPolicy::Wrap => {
                let half = self.length / 2.0;
                let mut sep = raw % self.length;
                if sep > half {
                    sep -= self.length;
                } else if sep <= -half {
                    sep += self.length;
                }
                sep
            }
        }
    }
}
