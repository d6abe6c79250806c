//! `EntrySchedule` — the ordered list of agent entry ticks and its cursor.
//!
//! # Cursor contract
//!
//! [`EntrySchedule::take_entry`] answers "is an entry scheduled at tick T?"
//! and advances a monotonic cursor past every entry at or before T.  Once it
//! has answered for a tick it never re-triggers for an earlier or equal one,
//! so at most one agent is admitted per tick and a skipped tick cannot
//! replay its arrivals later.

use velo_core::{DemandSegment, Tick};

use crate::error::{InflowError, InflowResult};

/// The precomputed, globally non-decreasing list of entry ticks.
pub struct EntrySchedule {
    entries: Vec<Tick>,
    cursor: usize,
}

impl EntrySchedule {
    /// Expand a piecewise `(duration, rate)` profile into entry ticks.
    ///
    /// Per segment the headway is `3600 / rate` seconds; arrivals sit at the
    /// segment's start offset plus integer multiples of the headway, strictly
    /// before the segment's end offset.  Arrival times are exact in seconds
    /// and only rounded to ticks at the end, so the per-segment count is
    /// `ceil(duration · rate / 3600)` regardless of tick resolution.
    pub fn from_profile(
        demand:             &[DemandSegment],
        tick_duration_secs: f64,
    ) -> InflowResult<Self> {
        if !(tick_duration_secs > 0.0) {
            return Err(InflowError::Profile(format!(
                "tick duration must be positive, got {tick_duration_secs}"
            )));
        }
        if demand.is_empty() {
            return Err(InflowError::Profile("no demand segments".into()));
        }

        let mut entries = Vec::new();
        let mut offset_secs = 0.0;
        for (i, seg) in demand.iter().enumerate() {
            if !(seg.duration_secs > 0.0) || !(seg.rate_per_hour > 0.0) {
                return Err(InflowError::Profile(format!(
                    "segment {i} must have positive duration and rate, got \
                     ({}, {})",
                    seg.duration_secs, seg.rate_per_hour
                )));
            }
            // Count first, then place: `k·headway < duration` as a float
            // loop guard can admit one arrival too many when the product
            // lands a hair under the boundary.
            let headway = seg.headway_secs();
            let count = (seg.duration_secs * seg.rate_per_hour / 3_600.0).ceil() as u64;
            for k in 0..count {
                let t = offset_secs + k as f64 * headway;
                entries.push(Tick((t / tick_duration_secs).round() as u64));
            }
            offset_secs += seg.duration_secs;
        }

        // Offsets accumulate and rounding is monotone, so concatenation
        // preserves global order.
        debug_assert!(entries.windows(2).all(|w| w[0] <= w[1]));

        Ok(Self { entries, cursor: 0 })
    }

    /// `true` iff an entry is scheduled at exactly `tick` and the cursor has
    /// not yet passed it.  Advances the cursor past every entry ≤ `tick`;
    /// entries colliding on one tick collapse to a single admission.
    pub fn take_entry(&mut self, tick: Tick) -> bool {
        let mut scheduled = false;
        while let Some(&next) = self.entries.get(self.cursor) {
            if next > tick {
                break;
            }
            if next == tick {
                scheduled = true;
            }
            self.cursor += 1;
        }
        scheduled
    }

    /// Total number of scheduled entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries the cursor has not yet passed.
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// The full entry-tick list, for inspection.
    pub fn entries(&self) -> &[Tick] {
        &self.entries
    }
}
