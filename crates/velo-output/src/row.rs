//! Plain data row types written by output backends.

/// One agent's committed state at one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRow {
    pub agent_id: u32,
    pub tick:     u64,
    /// Longitudinal position, metres from the corridor entry.
    pub long:     f64,
    /// Lateral position, metres from the right corridor edge.
    pub lat:      f64,
    /// Longitudinal speed, m/s.
    pub speed:    f64,
}

/// Bookkeeping counts for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickStatsRow {
    pub tick:     u64,
    pub active:   u64,
    pub admitted: u64,
    pub evicted:  u64,
}
