//! `velo-output` — trajectory recording for the velo simulation.
//!
//! The corridor's observable surface is the per-tick stream of committed
//! agent states; this crate turns that stream into files.  The CSV backend
//! creates two of them:
//!
//! | File               | One row per                           |
//! |--------------------|---------------------------------------|
//! | `trajectories.csv` | active agent per tick                 |
//! | `tick_stats.csv`   | tick (active/admitted/evicted counts) |
//!
//! Backends implement [`TrajectoryWriter`] and are driven by
//! [`RecordingObserver`], which implements `velo_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use velo_output::{CsvTrajectoryWriter, RecordingObserver};
//!
//! let writer = CsvTrajectoryWriter::new(Path::new("./output"))?;
//! let mut obs = RecordingObserver::new(writer);
//! sim.run_ticks(3_600, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvTrajectoryWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RecordingObserver;
pub use row::{TickStatsRow, TrajectoryRow};
pub use writer::TrajectoryWriter;
