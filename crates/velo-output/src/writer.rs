//! The `TrajectoryWriter` trait implemented by all backend writers.

use crate::{OutputResult, TickStatsRow, TrajectoryRow};

/// Trait implemented by trajectory-recording backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`RecordingObserver::take_error`][crate::RecordingObserver::take_error].
pub trait TrajectoryWriter {
    /// Write one tick's batch of agent trajectory rows.
    fn write_samples(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()>;

    /// Write one tick's bookkeeping counts.
    fn write_tick_stats(&mut self, row: &TickStatsRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
