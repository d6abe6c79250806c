//! Unit tests for velo-inflow.

use velo_core::{DemandSegment, Tick};

use crate::EntrySchedule;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn seg(duration_secs: f64, rate_per_hour: f64) -> DemandSegment {
    DemandSegment { duration_secs, rate_per_hour }
}

/// The reference profile: 750/h for half an hour, then 100/h for half an hour.
fn reference() -> Vec<DemandSegment> {
    vec![seg(1_800.0, 750.0), seg(1_800.0, 100.0)]
}

#[cfg(test)]
mod schedule_build {
    use super::*;

    #[test]
    fn reference_profile_counts() {
        // Per segment: rate × duration / 3600 entries.
        let schedule = EntrySchedule::from_profile(&reference(), 1.0).unwrap();
        assert_eq!(schedule.len(), 375 + 50);
    }

    #[test]
    fn segments_are_equally_spaced_in_seconds() {
        let schedule = EntrySchedule::from_profile(&reference(), 1.0).unwrap();
        let entries = schedule.entries();

        // Second segment: headway 3600/100 = 36 s, exact at 1 s ticks.
        let second = &entries[375..];
        assert_eq!(second[0], Tick(1_800));
        for pair in second.windows(2) {
            assert_eq!(pair[1] - pair[0], 36);
        }

        // First segment: headway 4.8 s; at 1 s ticks consecutive rounded
        // entries differ by 4 or 5, averaging 4.8.
        let first = &entries[..375];
        assert_eq!(first[0], Tick(0));
        assert_eq!(*first.last().unwrap(), Tick((374.0_f64 * 4.8).round() as u64));
        for pair in first.windows(2) {
            let d = pair[1] - pair[0];
            assert!(d == 4 || d == 5, "spacing {d}");
        }
    }

    #[test]
    fn concatenated_list_is_globally_non_decreasing() {
        let schedule = EntrySchedule::from_profile(&reference(), 1.0).unwrap();
        assert!(schedule.entries().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn integral_headway_is_exact() {
        // 3600/600 = 6 s headway, 60 s segment → entries 0,6,…,54.
        let schedule = EntrySchedule::from_profile(&[seg(60.0, 600.0)], 1.0).unwrap();
        let expect: Vec<Tick> = (0..10).map(|k| Tick(k * 6)).collect();
        assert_eq!(schedule.entries(), expect.as_slice());
    }

    #[test]
    fn segment_end_is_exclusive() {
        // Headway 10 s over 30 s → entries at 0, 10, 20 but not 30.
        let schedule = EntrySchedule::from_profile(&[seg(30.0, 360.0)], 1.0).unwrap();
        assert_eq!(schedule.entries(), &[Tick(0), Tick(10), Tick(20)]);
    }

    #[test]
    fn coarser_ticks_round_entry_times() {
        // 6 s headway at 4 s ticks: 0 s → T0, 6 s → T2 (1.5 rounds up), 12 s → T3.
        let schedule = EntrySchedule::from_profile(&[seg(18.0, 600.0)], 4.0).unwrap();
        assert_eq!(schedule.entries(), &[Tick(0), Tick(2), Tick(3)]);
    }

    #[test]
    fn malformed_profiles_rejected() {
        assert!(EntrySchedule::from_profile(&[], 1.0).is_err());
        assert!(EntrySchedule::from_profile(&[seg(0.0, 100.0)], 1.0).is_err());
        assert!(EntrySchedule::from_profile(&[seg(60.0, -1.0)], 1.0).is_err());
        assert!(EntrySchedule::from_profile(&reference(), 0.0).is_err());
    }
}

#[cfg(test)]
mod cursor {
    use super::*;

    #[test]
    fn fires_exactly_on_scheduled_ticks() {
        let mut schedule = EntrySchedule::from_profile(&[seg(30.0, 360.0)], 1.0).unwrap();
        assert!(schedule.take_entry(Tick(0)));
        assert!(!schedule.take_entry(Tick(1)));
        assert!(!schedule.take_entry(Tick(9)));
        assert!(schedule.take_entry(Tick(10)));
        assert!(schedule.take_entry(Tick(20)));
        assert_eq!(schedule.remaining(), 0);
    }

    #[test]
    fn never_retriggers_for_earlier_or_equal_ticks() {
        let mut schedule = EntrySchedule::from_profile(&[seg(30.0, 360.0)], 1.0).unwrap();
        assert!(schedule.take_entry(Tick(10)));
        // Same tick again, and an earlier one: both consumed or passed.
        assert!(!schedule.take_entry(Tick(10)));
        assert!(!schedule.take_entry(Tick(0)));
    }

    #[test]
    fn skipped_entries_do_not_replay() {
        let mut schedule = EntrySchedule::from_profile(&[seg(30.0, 360.0)], 1.0).unwrap();
        // Jump straight to tick 20: entries at 0 and 10 are passed over.
        assert!(schedule.take_entry(Tick(20)));
        assert_eq!(schedule.remaining(), 0);
        assert!(!schedule.take_entry(Tick(25)));
    }
}
