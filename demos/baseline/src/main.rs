//! baseline — the reference one-hour bike-path scenario.
//!
//! A 300 m single-direction corridor fed by a two-level demand profile:
//! 750 riders/h for the first half hour, 100 riders/h for the second.
//! Trajectories and per-tick counts land in `output/baseline/` as CSV.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use velo_core::{ScenarioConfig, Tick};
use velo_model::NecessaryDeceleration;
use velo_output::{CsvTrajectoryWriter, RecordingObserver, TrajectoryWriter};
use velo_sim::{SimBuilder, SimObserver, TickStats};

// ── Constants ─────────────────────────────────────────────────────────────────

const TOTAL_TICKS:    u64 = 3_600; // one hour at 1 s ticks
const PROGRESS_TICKS: u64 = 300;   // progress line every 5 sim minutes

// ── Observer wrapper for progress + peak tracking ─────────────────────────────

struct ProgressObserver<W: TrajectoryWriter> {
    inner:       RecordingObserver<W>,
    peak_active: usize,
    rows:        usize,
}

impl<W: TrajectoryWriter> ProgressObserver<W> {
    fn new(inner: RecordingObserver<W>) -> Self {
        Self {
            inner,
            peak_active: 0,
            rows: 0,
        }
    }
}

impl<W: TrajectoryWriter> SimObserver for ProgressObserver<W> {
    fn on_tick_end(&mut self, stats: &TickStats) {
        self.peak_active = self.peak_active.max(stats.active);
        if stats.tick.0 % PROGRESS_TICKS == 0 {
            println!(
                "  t = {:>4} s  |  active {:>3}  |  +{} / -{}",
                stats.tick.0, stats.active, stats.admitted, stats.evicted
            );
        }
        self.inner.on_tick_end(stats);
    }

    fn on_snapshot(&mut self, tick: Tick, samples: &[velo_sim::AgentSample]) {
        self.rows += samples.len();
        self.inner.on_snapshot(tick, samples);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = ScenarioConfig::baseline();

    println!("=== baseline — velo bike-path simulation ===");
    println!(
        "Corridor: {} m × {} m  |  Seed: {}  |  {} ticks at {} s",
        config.corridor.length,
        config.corridor.width(),
        config.seed,
        TOTAL_TICKS,
        config.tick_duration_secs
    );
    for (i, seg) in config.demand.iter().enumerate() {
        println!(
            "Demand[{i}]: {} riders/h for {} s (headway {:.1} s)",
            seg.rate_per_hour,
            seg.duration_secs,
            seg.headway_secs()
        );
    }
    println!();

    let mut sim = SimBuilder::new(config, NecessaryDeceleration::default()).build()?;
    println!("Scheduled entries: {}", sim.schedule.remaining());
    println!();

    std::fs::create_dir_all("output/baseline")?;
    let writer = CsvTrajectoryWriter::new(Path::new("output/baseline"))?;
    let mut obs = ProgressObserver::new(RecordingObserver::new(writer));

    let t0 = Instant::now();
    sim.run_ticks(TOTAL_TICKS, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  admitted    : {}", sim.total_admitted);
    println!("  evicted     : {}", sim.total_evicted);
    println!("  still active: {}", sim.population.len());
    println!("  peak active : {}", obs.peak_active);
    println!("  trajectories.csv : {} rows", obs.rows);

    Ok(())
}
