//! `RecordingObserver<W>` — bridges `SimObserver` to a `TrajectoryWriter`.

use velo_core::Tick;
use velo_sim::{AgentSample, SimObserver, TickStats};

use crate::row::{TickStatsRow, TrajectoryRow};
use crate::writer::TrajectoryWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes trajectories and tick stats to any
/// [`TrajectoryWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `run_ticks` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct RecordingObserver<W: TrajectoryWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: TrajectoryWriter> RecordingObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TrajectoryWriter> SimObserver for RecordingObserver<W> {
    fn on_tick_end(&mut self, stats: &TickStats) {
        let row = TickStatsRow {
            tick:     stats.tick.0,
            active:   stats.active as u64,
            admitted: stats.admitted as u64,
            evicted:  stats.evicted as u64,
        };
        let result = self.writer.write_tick_stats(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, samples: &[AgentSample]) {
        let rows: Vec<TrajectoryRow> = samples
            .iter()
            .map(|s| TrajectoryRow {
                agent_id: s.id.0,
                tick:     tick.0,
                long:     s.long,
                lat:      s.lat,
                speed:    s.speed,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_samples(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
