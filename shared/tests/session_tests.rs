//! Roast session and timeline tests
//!
//! Tests for the session lifecycle including:
//! - Start gating on profile presence
//! - Clamped sampling past the end of the profile
//! - Time to first crack on a simulated clock
//! - Timeline filtering and clearing

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use shared::statistics::{latest_temperature, peak_temperature, time_to_first_crack};
use shared::{
    generate, BeanType, CrackTiming, EventTimeline, ManualClock, RoastError, RoastEventKind,
    RoastLevel, RoastSession, RoastStatistics, SessionState,
};

fn simulated_session() -> (RoastSession, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 9, 14, 7, 30, 0).unwrap());
    (RoastSession::with_clock(Arc::new(clock.clone())), clock)
}

// ============================================================================
// End-to-End Scenarios
// ============================================================================

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn test_medium_roast_first_crack_at_eight_minutes() {
        let (mut session, clock) = simulated_session();
        let profile = generate(BeanType::Arabica, RoastLevel::Medium, 190.0, 20.0).unwrap();
        let expected_at_8 = profile.temperature_at(8.0).unwrap();

        session.set_profile(profile).unwrap();
        session.start().unwrap();

        clock.advance_minutes(8.0);
        session.record_event(RoastEventKind::FirstCrack, "").unwrap();

        let temp = session.sample(8.0).unwrap();
        assert_eq!(temp, expected_at_8);
        let curve = session.profile().unwrap().samples();
        assert!(curve
            .iter()
            .any(|s| s.elapsed_minutes == 8.0 && s.temperature_celsius == temp));

        let timing = time_to_first_crack(session.timeline(), session.start_instant());
        assert_eq!(timing, CrackTiming::Observed { minutes: 8.0 });
    }

    #[test]
    fn test_clear_empties_every_kind() {
        let (mut session, clock) = simulated_session();
        session
            .set_profile(generate(BeanType::Robusta, RoastLevel::Dark, 200.0, 22.0).unwrap())
            .unwrap();
        session.start().unwrap();
        clock.advance_minutes(9.0);
        session.record_event(RoastEventKind::FirstCrack, "").unwrap();
        clock.advance_minutes(2.5);
        session.record_event(RoastEventKind::SecondCrack, "").unwrap();
        session.finish().unwrap();
        assert!(!session.timeline().is_empty());

        session.clear_events();
        assert!(session.timeline().is_empty());
        for kind in RoastEventKind::ALL {
            assert_eq!(session.timeline().events_of(kind).count(), 0);
        }
    }

    #[test]
    fn test_full_roast_statistics() {
        let (mut session, clock) = simulated_session();
        session
            .set_profile(generate(BeanType::Arabica, RoastLevel::Light, 185.0, 20.0).unwrap())
            .unwrap();

        let idle_stats = RoastStatistics::derive(&session);
        assert_eq!(idle_stats.latest_temperature, None);
        assert_eq!(idle_stats.time_to_first_crack, CrackTiming::NotObserved);

        session.start().unwrap();
        for _ in 0..6 {
            session.tick().unwrap();
            clock.advance_minutes(1.5);
        }
        session
            .record_event(RoastEventKind::FirstCrack, "audible")
            .unwrap();
        session.tick().unwrap();
        session.finish().unwrap();

        let stats = RoastStatistics::derive(&session);
        assert_eq!(stats.readings, 7);
        assert_eq!(stats.time_to_first_crack, CrackTiming::Observed { minutes: 9.0 });
        assert_eq!(stats.elapsed_minutes, Some(9.0));
        assert_eq!(stats.latest_temperature, stats.peak_temperature);
        assert_eq!(
            stats.latest_temperature,
            Some(session.profile().unwrap().temperature_at(9.0).unwrap())
        );
    }

    #[test]
    fn test_event_order_follows_lifecycle() {
        let (mut session, clock) = simulated_session();
        session
            .set_profile(generate(BeanType::Blend, RoastLevel::French, 210.0, 25.0).unwrap())
            .unwrap();
        session.start().unwrap();
        clock.advance_minutes(3.0);
        session
            .record_event(RoastEventKind::TemperatureAdjustment, "gas 70%")
            .unwrap();
        clock.advance_minutes(11.0);
        session.finish().unwrap();

        let kinds: Vec<_> = session.timeline().events().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RoastEventKind::ProfileGenerated,
                RoastEventKind::RoastStarted,
                RoastEventKind::TemperatureAdjustment,
                RoastEventKind::RoastCompleted,
            ]
        );
        for w in session.timeline().events().windows(2) {
            assert!(w[1].timestamp >= w[0].timestamp);
        }
        assert_eq!(
            session.timeline().last().unwrap().details,
            "Duration: 14.0 minutes"
        );
    }

    #[test]
    fn test_second_roast_after_reset_ignores_earlier_crack() {
        let (mut session, clock) = simulated_session();
        session
            .set_profile(generate(BeanType::Arabica, RoastLevel::Medium, 190.0, 20.0).unwrap())
            .unwrap();
        session.start().unwrap();
        clock.advance_minutes(8.0);
        session.record_event(RoastEventKind::FirstCrack, "").unwrap();
        clock.advance_minutes(3.0);
        session.finish().unwrap();

        session.reset().unwrap();
        clock.advance_minutes(5.0);
        session.start().unwrap();

        let timing = time_to_first_crack(session.timeline(), session.start_instant());
        assert_eq!(timing, CrackTiming::NotObserved);
        assert_eq!(
            RoastStatistics::derive(&session).time_to_first_crack,
            CrackTiming::NotObserved
        );

        clock.advance_minutes(9.5);
        session.record_event(RoastEventKind::FirstCrack, "").unwrap();
        let timing = time_to_first_crack(session.timeline(), session.start_instant());
        assert_eq!(timing, CrackTiming::Observed { minutes: 9.5 });
    }
}

// ============================================================================
// State Machine Tests
// ============================================================================

#[cfg(test)]
mod state_machine {
    use super::*;

    #[test]
    fn test_start_before_profile_fails_then_succeeds() {
        let (mut session, _) = simulated_session();
        assert!(matches!(
            session.start(),
            Err(RoastError::InvalidTransition { .. })
        ));

        session
            .set_profile(generate(BeanType::Arabica, RoastLevel::Medium, 190.0, 20.0).unwrap())
            .unwrap();
        session.start().unwrap();
        assert_eq!(session.state(), SessionState::InProgress);
        assert!(session.start_instant().is_some());
    }

    #[test]
    fn test_completed_is_terminal_without_reset() {
        let (mut session, _) = simulated_session();
        session
            .set_profile(generate(BeanType::Arabica, RoastLevel::Medium, 190.0, 20.0).unwrap())
            .unwrap();
        session.start().unwrap();
        session.finish().unwrap();

        assert!(session.start().is_err());
        assert!(session.finish().is_err());
        assert!(session.tick().is_err());
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[test]
    fn test_statistics_no_data_before_ticks() {
        let (mut session, _) = simulated_session();
        session
            .set_profile(generate(BeanType::Arabica, RoastLevel::Medium, 190.0, 20.0).unwrap())
            .unwrap();
        session.start().unwrap();
        assert!(matches!(
            latest_temperature(session.trace()),
            Err(RoastError::NoData(_))
        ));
        assert!(matches!(
            peak_temperature(session.trace()),
            Err(RoastError::NoData(_))
        ));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn event_kind_strategy() -> impl Strategy<Value = RoastEventKind> {
        prop::sample::select(RoastEventKind::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// An appended event is returned by its own kind and excluded from others
        #[test]
        fn prop_events_of_matches_kind(
            appended in event_kind_strategy(),
            queried in event_kind_strategy()
        ) {
            let mut timeline = EventTimeline::new();
            timeline.append(appended, "note");

            let found: Vec<_> = timeline.events_of(queried).collect();
            if appended == queried {
                prop_assert_eq!(found.len(), 1);
                prop_assert_eq!(found[0].kind, appended);
            } else {
                prop_assert!(found.is_empty());
            }
        }

        /// Filtering preserves append order
        #[test]
        fn prop_events_of_preserves_order(kinds in prop::collection::vec(event_kind_strategy(), 0..40)) {
            let mut timeline = EventTimeline::new();
            let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            for (i, kind) in kinds.iter().enumerate() {
                timeline
                    .append_at(*kind, i.to_string(), start + chrono::Duration::seconds(i as i64))
                    .unwrap();
            }

            for kind in RoastEventKind::ALL {
                let indices: Vec<usize> = timeline
                    .events_of(kind)
                    .map(|e| e.details.parse().unwrap())
                    .collect();
                let expected: Vec<usize> = kinds
                    .iter()
                    .enumerate()
                    .filter(|(_, k)| **k == kind)
                    .map(|(i, _)| i)
                    .collect();
                prop_assert_eq!(indices, expected);
            }
        }

        /// Sampling past the profile never fails and returns the final temperature
        #[test]
        fn prop_session_sample_clamps(overshoot in 0.0f64..500.0) {
            let (mut session, _) = simulated_session();
            let profile = generate(BeanType::Arabica, RoastLevel::Dark, 195.0, 20.0).unwrap();
            let last = *profile.last_sample().unwrap();
            session.set_profile(profile).unwrap();
            session.start().unwrap();

            let t = session.sample(last.elapsed_minutes + overshoot).unwrap();
            prop_assert_eq!(t, last.temperature_celsius);
        }

        /// Time to first crack equals the simulated minutes before the event
        #[test]
        fn prop_time_to_first_crack_matches_clock(tenths in 1u32..300) {
            let minutes = tenths as f64 / 10.0;
            let (mut session, clock) = simulated_session();
            session
                .set_profile(generate(BeanType::Arabica, RoastLevel::Medium, 190.0, 20.0).unwrap())
                .unwrap();
            session.start().unwrap();
            clock.advance_minutes(minutes);
            session.record_event(RoastEventKind::FirstCrack, "").unwrap();

            let timing = time_to_first_crack(session.timeline(), session.start_instant());
            let observed = timing.minutes().unwrap();
            prop_assert!((observed - minutes).abs() < 1e-6);
        }
    }
}
