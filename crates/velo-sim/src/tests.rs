//! Integration tests for velo-sim.

use std::collections::{BTreeMap, BTreeSet};

use velo_agent::{Bicycle, BicycleParams, Kinematics};
use velo_core::{AgentId, BoundaryPolicy, Corridor, DemandSegment, ScenarioConfig, Tick};
use velo_model::{Cruise, NecessaryDeceleration};

use crate::{AgentSample, SimBuilder, SimError, SimObserver, TickStats};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Records every tick's stats and post-tick snapshot.
#[derive(Default)]
struct Recorder {
    stats:  Vec<TickStats>,
    frames: Vec<(Tick, Vec<AgentSample>)>,
    ended:  bool,
}

impl SimObserver for Recorder {
    fn on_tick_end(&mut self, stats: &TickStats) {
        self.stats.push(*stats);
    }
    fn on_snapshot(&mut self, tick: Tick, samples: &[AgentSample]) {
        self.frames.push((tick, samples.to_vec()));
    }
    fn on_sim_end(&mut self, _final_tick: Tick) {
        self.ended = true;
    }
}

/// A narrow corridor (1 m usable width) where lateral overtaking never fits,
/// so followers always queue in the single band.
fn narrow_config() -> ScenarioConfig {
    ScenarioConfig {
        corridor: Corridor {
            length:         400.0,
            lane_width:     1.0,
            shoulder_width: 0.0,
        },
        boundary:               BoundaryPolicy::Clamp,
        tick_duration_secs:     1.0,
        bike_length:            2.0,
        bike_width:             0.8,
        desired_speed_mean:     4.0,
        desired_speed_std:      1.0,
        desired_lat_center:     0.5,
        desired_lat_half_range: 0.05,
        accel_limit:            1.4,
        brake_limit:            2.0,
        lat_speed_limit:        0.5,
        look_ahead_dist:        50.0,
        look_back_dist:         10.0,
        entry_lat_offset:       0.5,
        demand: vec![DemandSegment {
            duration_secs: 1.0,
            rate_per_hour: 1.0,
        }],
        seed: 7,
    }
}

/// The baseline corridor cross-section over a 400 m stretch, with a
/// one-entry demand so hand-placed riders dominate the run.
fn wide_config() -> ScenarioConfig {
    let mut config = narrow_config();
    config.corridor.lane_width = 2.0;
    config.corridor.shoulder_width = 0.5;
    config.desired_lat_center = 1.0;
    config.desired_lat_half_range = 0.2;
    config.entry_lat_offset = 1.0;
    config
}

/// Hand-place a bicycle with fixed parameters, bypassing the entry schedule.
fn place(
    sim:           &mut crate::Sim<NecessaryDeceleration>,
    long:          f64,
    lat:           f64,
    speed:         f64,
    desired_speed: f64,
) -> AgentId {
    place_with_heading(sim, long, lat, lat, speed, desired_speed)
}

/// As [`place`], but with a desired lateral offset away from the current
/// one, so the rider merges laterally as it travels.
fn place_with_heading(
    sim:           &mut crate::Sim<NecessaryDeceleration>,
    long:          f64,
    lat:           f64,
    desired_lat:   f64,
    speed:         f64,
    desired_speed: f64,
) -> AgentId {
    let id = sim.population.alloc_id();
    let bike = Bicycle {
        id,
        params: BicycleParams {
            length:          sim.config.bike_length,
            width:           sim.config.bike_width,
            desired_speed,
            desired_lat,
            accel_limit:     sim.config.accel_limit,
            brake_limit:     sim.config.brake_limit,
            lat_speed_limit: sim.config.lat_speed_limit,
        },
        state: Kinematics { long, lat, speed },
    };
    sim.index.insert(id, bike.position()).unwrap();
    sim.population.admit(bike).unwrap();
    id
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

mod builder_tests {
    use super::*;

    #[test]
    fn baseline_config_builds() {
        let sim = SimBuilder::new(ScenarioConfig::baseline(), NecessaryDeceleration::default())
            .build()
            .unwrap();
        assert!(sim.population.is_empty());
        assert_eq!(sim.schedule.remaining(), 425);
        assert_eq!(sim.clock.current_tick, Tick::ZERO);
    }

    #[test]
    fn invalid_config_is_a_config_error() {
        let mut config = ScenarioConfig::baseline();
        config.tick_duration_secs = 0.0;
        assert!(matches!(
            SimBuilder::new(config, NecessaryDeceleration::default()).build(),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn empty_demand_is_a_config_error() {
        let mut config = ScenarioConfig::baseline();
        config.demand.clear();
        assert!(matches!(
            SimBuilder::new(config, NecessaryDeceleration::default()).build(),
            Err(SimError::Config(_))
        ));
    }
}

// ── Lifecycle: admission and eviction ─────────────────────────────────────────

mod lifecycle {
    use super::*;

    #[test]
    fn first_agent_enters_at_tick_zero_with_entry_state() {
        let mut sim = SimBuilder::new(ScenarioConfig::baseline(), Cruise)
            .build()
            .unwrap();
        let stats = sim.advance().unwrap();

        assert_eq!(stats.tick, Tick::ZERO);
        assert_eq!(stats.admitted, 1);
        assert_eq!(stats.evicted, 0);
        assert_eq!(stats.active, 1);

        let samples = sim.samples();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].id, AgentId(0));
        assert_eq!(samples[0].long, 0.0);
        assert_eq!(samples[0].lat, sim.config.entry_lat_offset);
        assert!(samples[0].speed > 0.0);
    }

    #[test]
    fn one_admission_per_tick_at_most() {
        let mut sim = SimBuilder::new(ScenarioConfig::baseline(), Cruise)
            .build()
            .unwrap();
        for _ in 0..200 {
            let stats = sim.advance().unwrap();
            assert!(stats.admitted <= 1);
        }
    }

    #[test]
    fn evicted_ids_never_reappear() {
        let mut sim = SimBuilder::new(ScenarioConfig::baseline(), Cruise)
            .build()
            .unwrap();
        let mut gone: BTreeSet<AgentId> = BTreeSet::new();
        let mut prev: BTreeSet<AgentId> = BTreeSet::new();
        for _ in 0..600 {
            sim.advance().unwrap();
            let now: BTreeSet<AgentId> = sim.samples().iter().map(|s| s.id).collect();
            for id in prev.difference(&now) {
                gone.insert(*id);
            }
            for id in &now {
                assert!(!gone.contains(id), "evicted agent {id} reappeared");
            }
            prev = now;
        }
        assert!(!gone.is_empty(), "no agent exited in 600 ticks");
        assert_eq!(gone.len() as u64, sim.total_evicted);
    }

    #[test]
    fn admitted_minus_evicted_equals_active() {
        let mut sim = SimBuilder::new(ScenarioConfig::baseline(), Cruise)
            .build()
            .unwrap();
        let mut admitted = 0u64;
        let mut evicted = 0u64;
        for _ in 0..500 {
            let stats = sim.advance().unwrap();
            admitted += stats.admitted as u64;
            evicted += stats.evicted as u64;
            assert_eq!(stats.active, sim.population.len());
            assert_eq!(admitted - evicted, sim.population.len() as u64);
        }
        assert_eq!(admitted, sim.total_admitted);
        assert_eq!(evicted, sim.total_evicted);
    }
}

// ── Per-tick invariants over a real run ───────────────────────────────────────

mod invariants {
    use super::*;

    #[test]
    fn longitudinal_progress_is_monotonic() {
        let mut sim =
            SimBuilder::new(ScenarioConfig::baseline(), NecessaryDeceleration::default())
                .build()
                .unwrap();
        let mut recorder = Recorder::default();
        sim.run_ticks(400, &mut recorder).unwrap();

        let mut last_long: BTreeMap<AgentId, f64> = BTreeMap::new();
        for (_, frame) in &recorder.frames {
            for s in frame {
                if let Some(&prev) = last_long.get(&s.id) {
                    assert!(
                        s.long >= prev,
                        "agent {} moved backward: {prev} -> {}",
                        s.id,
                        s.long
                    );
                }
                last_long.insert(s.id, s.long);
            }
        }
        assert!(recorder.ended);
    }

    #[test]
    fn positions_stay_inside_the_corridor() {
        let config = ScenarioConfig::baseline();
        let length = config.corridor.length;
        let half = config.bike_width / 2.0;
        let lat_hi = config.corridor.width() - half;

        let mut sim = SimBuilder::new(config, NecessaryDeceleration::default())
            .build()
            .unwrap();
        let mut recorder = Recorder::default();
        sim.run_ticks(400, &mut recorder).unwrap();

        for (tick, frame) in &recorder.frames {
            for s in frame {
                // Snapshots are post-evict, so nothing at or past the end.
                assert!(
                    (0.0..length).contains(&s.long),
                    "tick {tick}: agent {} at long {}",
                    s.id,
                    s.long
                );
                assert!(
                    (half..=lat_hi).contains(&s.lat),
                    "tick {tick}: agent {} at lat {}",
                    s.id,
                    s.lat
                );
                assert!(s.speed >= 0.0);
            }
        }
    }

    #[test]
    fn samples_are_id_ordered() {
        let mut sim = SimBuilder::new(ScenarioConfig::baseline(), Cruise)
            .build()
            .unwrap();
        for _ in 0..100 {
            sim.advance().unwrap();
            let samples = sim.samples();
            for pair in samples.windows(2) {
                assert!(pair[0].id < pair[1].id);
            }
        }
    }
}

// ── Reproducibility ───────────────────────────────────────────────────────────

mod reproducibility {
    use super::*;

    #[test]
    fn identical_seed_gives_identical_trajectories() {
        let run = || {
            let mut sim =
                SimBuilder::new(ScenarioConfig::baseline(), NecessaryDeceleration::default())
                    .build()
                    .unwrap();
            let mut recorder = Recorder::default();
            sim.run_ticks(400, &mut recorder).unwrap();
            recorder.frames
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn different_seed_differs() {
        let run = |seed| {
            let mut config = ScenarioConfig::baseline();
            config.seed = seed;
            let mut sim = SimBuilder::new(config, NecessaryDeceleration::default())
                .build()
                .unwrap();
            let mut recorder = Recorder::default();
            sim.run_ticks(100, &mut recorder).unwrap();
            recorder.frames
        };
        assert_ne!(run(4), run(5));
    }
}

// ── Car-following safety in a closed scenario ─────────────────────────────────

mod safety {
    use super::*;
    use velo_model::SafetyEnvelope;

    /// Checks every post-commit follower/leader pair against the tapered
    /// envelope.  A follower inside its requirement must be shedding speed
    /// at its physical braking limit — the one state the model cannot
    /// avoid, since entrants spawn at their desired speed regardless of the
    /// traffic ahead.  Followers absent from the previous snapshot have not
    /// decided yet and are skipped.
    fn assert_envelope_or_max_braking(
        frames:      &[(Tick, Vec<AgentSample>)],
        width:       f64,
        brake_limit: f64,
        dt:          f64,
    ) {
        let env = SafetyEnvelope::default();
        let mut prev_speed: BTreeMap<AgentId, f64> = BTreeMap::new();
        for (tick, frame) in frames {
            for f in frame {
                let Some(&before) = prev_speed.get(&f.id) else {
                    continue;
                };
                let max_braked = (before - brake_limit * dt).max(0.0);
                for l in frame {
                    let gap = l.long - f.long;
                    if gap <= 0.0 || gap > 15.0 {
                        continue;
                    }
                    let ov = env.overlap(width, width, (l.lat - f.lat).abs(), f.speed);
                    let required = ov * env.long_req(f.speed);
                    assert!(
                        gap >= required - 1e-6 || f.speed <= max_braked + 1e-9,
                        "tick {tick}: {} is {gap:.3} m behind {}, needs {required:.3} m \
                         at speed {:.3} (was {before:.3})",
                        f.id,
                        l.id,
                        f.speed
                    );
                }
            }
            prev_speed = frame.iter().map(|s| (s.id, s.speed)).collect();
        }
    }

    /// A fast follower catches a slow leader in a corridor too narrow to
    /// overtake.  The follower brakes against the leader's worst-case
    /// (fully braked) motion, so after every commit the gap respects the
    /// envelope with room for a panic stop ahead; the speed settles on the
    /// leader's with the gap at `long_req(2) + brake_limit·(dt + time_gap)·dt`.
    #[test]
    fn follower_settles_behind_slow_leader() {
        let mut sim = SimBuilder::new(narrow_config(), NecessaryDeceleration::default())
            .build()
            .unwrap();
        let leader = place(&mut sim, 62.0, 0.5, 2.0, 2.0);
        let follower = place(&mut sim, 50.0, 0.5, 5.0, 5.0);

        let min_gap = 2.0;
        let time_gap = 1.0;
        for _ in 0..100 {
            sim.advance().unwrap();
            let l = sim.population.get(leader).unwrap().state;
            let f = sim.population.get(follower).unwrap().state;
            let gap = l.long - f.long;
            assert!(gap > 0.0, "follower passed through the leader");
            assert!(
                gap >= min_gap + time_gap * f.speed - 1e-9,
                "envelope violated: gap {gap}, speed {}",
                f.speed
            );
            // Free-flow leader never deviates.
            assert_eq!(l.speed, 2.0);
        }
        let l = sim.population.get(leader).unwrap().state;
        let f = sim.population.get(follower).unwrap().state;
        assert!((f.speed - 2.0).abs() < 1e-3, "did not settle: {}", f.speed);
        assert!((l.long - f.long - 6.0).abs() < 1e-3);
    }

    /// A rider merging laterally toward an occupied line must be braked
    /// for while the bands are still apart: by the time the bodies align
    /// the gap behind it already satisfies the envelope.
    #[test]
    fn merging_rider_is_braked_for_before_the_bands_touch() {
        let mut sim = SimBuilder::new(wide_config(), NecessaryDeceleration::default())
            .build()
            .unwrap();
        let head = place(&mut sim, 85.0, 1.0, 1.0, 1.0);
        let mid = place_with_heading(&mut sim, 40.0, 2.3, 1.0, 5.0, 5.0);
        let tail = place(&mut sim, 30.0, 1.0, 6.0, 6.0);

        // First tick: the merging rider sits 1.3 m off the tail's line —
        // beyond body contact plus taper — yet one tick of lateral reach
        // could close that to body contact, so the tail already yields:
        // cap = (10 + (5 − 2)·1 − 2) / (1 + 1) = 5.5 m/s.
        let mut frames = Vec::new();
        let stats = sim.advance().unwrap();
        frames.push((stats.tick, sim.samples()));
        let t = sim.population.get(tail).unwrap().state;
        assert!((t.speed - 5.5).abs() < 1e-9, "tail did not yield: {}", t.speed);

        for _ in 0..60 {
            let stats = sim.advance().unwrap();
            frames.push((stats.tick, sim.samples()));
        }
        let config = sim.config.clone();
        assert_envelope_or_max_braking(
            &frames,
            config.bike_width,
            config.brake_limit,
            config.tick_duration_secs,
        );

        // Bodies never ride through each other.
        for (tick, frame) in &frames {
            for a in frame {
                for b in frame {
                    if a.id < b.id && (a.lat - b.lat).abs() < config.bike_width {
                        assert!(
                            (a.long - b.long).abs() > 1.0,
                            "tick {tick}: {} and {} collide",
                            a.id,
                            b.id
                        );
                    }
                }
            }
        }

        // All three stayed in play on the 400 m stretch.
        assert!(sim.population.contains(head));
        assert!(sim.population.contains(mid));
        assert!(sim.population.contains(tail));
    }

    /// The envelope property over a long stretch of the reference
    /// scenario, entries, evictions, overtakes and all.
    #[test]
    fn envelope_holds_for_every_pair_with_braking_in_reserve() {
        let config = ScenarioConfig::baseline();
        let width = config.bike_width;
        let brake = config.brake_limit;
        let dt = config.tick_duration_secs;

        let mut sim = SimBuilder::new(config, NecessaryDeceleration::default())
            .build()
            .unwrap();
        let mut recorder = Recorder::default();
        sim.run_ticks(2_000, &mut recorder).unwrap();

        assert_envelope_or_max_braking(&recorder.frames, width, brake, dt);
    }

    /// Every same-band pair stays strictly ordered, including the agent the
    /// schedule admits at tick 0 behind the hand-placed pair.
    #[test]
    fn same_band_agents_never_swap() {
        let mut sim = SimBuilder::new(narrow_config(), NecessaryDeceleration::default())
            .build()
            .unwrap();
        place(&mut sim, 62.0, 0.5, 2.0, 2.0);
        place(&mut sim, 50.0, 0.5, 5.0, 5.0);

        for _ in 0..100 {
            sim.advance().unwrap();
            let samples = sim.samples();
            for a in &samples {
                for b in &samples {
                    if a.id < b.id && (a.lat - b.lat).abs() <= sim.config.bike_width {
                        assert!(
                            (a.long - b.long).abs() > 0.0,
                            "agents {} and {} coincide",
                            a.id,
                            b.id
                        );
                    }
                }
            }
        }
        assert_eq!(sim.total_admitted, 1);
    }
}

// ── The reference scenario, end to end ────────────────────────────────────────

mod end_to_end {
    use super::*;

    #[test]
    fn baseline_hour_flushes_the_demand_profile() {
        let mut sim =
            SimBuilder::new(ScenarioConfig::baseline(), NecessaryDeceleration::default())
                .build()
                .unwrap();
        let mut recorder = Recorder::default();
        sim.run_ticks(3_600, &mut recorder).unwrap();

        // 1800 s at 750/h plus 1800 s at 100/h.
        assert_eq!(sim.total_admitted, 425);
        assert_eq!(sim.schedule.remaining(), 0);
        // Late entries may still be en route; the bulk has exited.
        assert!(sim.total_evicted >= 350, "only {} exited", sim.total_evicted);
        assert_eq!(
            sim.total_admitted - sim.total_evicted,
            sim.population.len() as u64
        );
        assert_eq!(sim.clock.current_tick, Tick(3_600));
        assert_eq!(recorder.stats.len(), 3_600);
    }
}
