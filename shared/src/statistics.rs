//! Roast statistics derived from a session's live trace and timeline

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clock::minutes_between;
use crate::error::{RoastError, RoastResult};
use crate::models::{RoastEventKind, TraceSample};
use crate::session::RoastSession;
use crate::timeline::EventTimeline;

/// Time from roast start to the first `FirstCrack` event
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CrackTiming {
    NotObserved,
    Observed { minutes: f64 },
}

impl CrackTiming {
    pub fn minutes(&self) -> Option<f64> {
        match self {
            CrackTiming::NotObserved => None,
            CrackTiming::Observed { minutes } => Some(*minutes),
        }
    }
}

impl fmt::Display for CrackTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrackTiming::NotObserved => write!(f, "N/A"),
            CrackTiming::Observed { minutes } => write!(f, "{:.1} min", minutes),
        }
    }
}

/// Last recorded temperature
pub fn latest_temperature(trace: &[TraceSample]) -> RoastResult<f64> {
    trace
        .last()
        .map(|s| s.temperature_celsius)
        .ok_or(RoastError::NoData("no temperature recorded yet"))
}

/// Highest recorded temperature so far
pub fn peak_temperature(trace: &[TraceSample]) -> RoastResult<f64> {
    trace
        .iter()
        .map(|s| s.temperature_celsius)
        .reduce(f64::max)
        .ok_or(RoastError::NoData("no temperature recorded yet"))
}

/// Minutes between `start_instant` and the first `FirstCrack` event of the
/// current roast. Cracks logged before `start_instant` belong to an earlier
/// roast on the same timeline and are ignored.
///
/// A missing crack or a session that never started is a displayable state,
/// not an error.
pub fn time_to_first_crack(
    timeline: &EventTimeline,
    start_instant: Option<DateTime<Utc>>,
) -> CrackTiming {
    let Some(start) = start_instant else {
        return CrackTiming::NotObserved;
    };
    timeline
        .events_of(RoastEventKind::FirstCrack)
        .find(|crack| crack.timestamp >= start)
        .map_or(CrackTiming::NotObserved, |crack| CrackTiming::Observed {
            minutes: minutes_between(start, crack.timestamp),
        })
}

/// Display metrics for a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoastStatistics {
    pub latest_temperature: Option<f64>,
    pub peak_temperature: Option<f64>,
    pub time_to_first_crack: CrackTiming,
    pub elapsed_minutes: Option<f64>,
    pub readings: usize,
}

impl RoastStatistics {
    pub fn derive(session: &RoastSession) -> Self {
        let trace = session.trace();
        Self {
            latest_temperature: latest_temperature(trace).ok(),
            peak_temperature: peak_temperature(trace).ok(),
            time_to_first_crack: time_to_first_crack(session.timeline(), session.start_instant()),
            elapsed_minutes: session.elapsed_minutes(),
            readings: trace.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn reading(elapsed_minutes: f64, temperature_celsius: f64) -> TraceSample {
        TraceSample {
            elapsed_minutes,
            temperature_celsius,
        }
    }

    #[test]
    fn test_latest_and_peak() {
        let trace = vec![reading(0.0, 190.0), reading(1.0, 205.0), reading(2.0, 201.0)];
        assert_eq!(latest_temperature(&trace).unwrap(), 201.0);
        assert_eq!(peak_temperature(&trace).unwrap(), 205.0);
    }

    #[test]
    fn test_empty_trace_is_no_data() {
        assert!(matches!(latest_temperature(&[]), Err(RoastError::NoData(_))));
        assert!(matches!(peak_temperature(&[]), Err(RoastError::NoData(_))));
    }

    #[test]
    fn test_time_to_first_crack() {
        let start = Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap();
        let mut timeline = EventTimeline::new();
        timeline
            .append_at(RoastEventKind::RoastStarted, "", start)
            .unwrap();
        assert_eq!(
            time_to_first_crack(&timeline, Some(start)),
            CrackTiming::NotObserved
        );

        timeline
            .append_at(
                RoastEventKind::FirstCrack,
                "",
                start + Duration::seconds(8 * 60 + 30),
            )
            .unwrap();
        timeline
            .append_at(RoastEventKind::FirstCrack, "again", start + Duration::minutes(9))
            .unwrap();
        assert_eq!(
            time_to_first_crack(&timeline, Some(start)),
            CrackTiming::Observed { minutes: 8.5 }
        );
    }

    #[test]
    fn test_crack_before_start_is_ignored() {
        let earlier = Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap();
        let mut timeline = EventTimeline::new();
        timeline
            .append_at(RoastEventKind::FirstCrack, "", earlier + Duration::minutes(8))
            .unwrap();

        let start = earlier + Duration::minutes(20);
        assert_eq!(
            time_to_first_crack(&timeline, Some(start)),
            CrackTiming::NotObserved
        );

        timeline
            .append_at(RoastEventKind::FirstCrack, "", start + Duration::minutes(7))
            .unwrap();
        assert_eq!(
            time_to_first_crack(&timeline, Some(start)),
            CrackTiming::Observed { minutes: 7.0 }
        );
    }

    #[test]
    fn test_time_to_first_crack_without_start() {
        let mut timeline = EventTimeline::new();
        timeline.append(RoastEventKind::FirstCrack, "");
        assert_eq!(time_to_first_crack(&timeline, None), CrackTiming::NotObserved);
    }

    #[test]
    fn test_crack_timing_display() {
        assert_eq!(CrackTiming::NotObserved.to_string(), "N/A");
        assert_eq!(CrackTiming::Observed { minutes: 8.0 }.to_string(), "8.0 min");
        assert_eq!(CrackTiming::Observed { minutes: 8.0 }.minutes(), Some(8.0));
    }
}
