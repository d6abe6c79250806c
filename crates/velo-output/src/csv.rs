//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `trajectories.csv`
//! - `tick_stats.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TrajectoryWriter;
use crate::{OutputResult, TickStatsRow, TrajectoryRow};

/// Writes simulation output to two CSV files.
pub struct CsvTrajectoryWriter {
    trajectories: Writer<File>,
    stats:        Writer<File>,
    finished:     bool,
}

impl CsvTrajectoryWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trajectories = Writer::from_path(dir.join("trajectories.csv"))?;
        trajectories.write_record(["agent_id", "tick", "long", "lat", "speed"])?;

        let mut stats = Writer::from_path(dir.join("tick_stats.csv"))?;
        stats.write_record(["tick", "active", "admitted", "evicted"])?;

        Ok(Self {
            trajectories,
            stats,
            finished: false,
        })
    }
}

impl TrajectoryWriter for CsvTrajectoryWriter {
    fn write_samples(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()> {
        for row in rows {
            self.trajectories.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.long.to_string(),
                row.lat.to_string(),
                row.speed.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_stats(&mut self, row: &TickStatsRow) -> OutputResult<()> {
        self.stats.write_record(&[
            row.tick.to_string(),
            row.active.to_string(),
            row.admitted.to_string(),
            row.evicted.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trajectories.flush()?;
        self.stats.flush()?;
        Ok(())
    }
}
