//! Roast event models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RoastError, RoastResult};

/// Kinds of events recorded on a roast timeline
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoastEventKind {
    ProfileGenerated,
    RoastStarted,
    FirstCrack,
    SecondCrack,
    TemperatureAdjustment,
    Other,
    RoastCompleted,
}

impl RoastEventKind {
    pub const ALL: [RoastEventKind; 7] = [
        RoastEventKind::ProfileGenerated,
        RoastEventKind::RoastStarted,
        RoastEventKind::FirstCrack,
        RoastEventKind::SecondCrack,
        RoastEventKind::TemperatureAdjustment,
        RoastEventKind::Other,
        RoastEventKind::RoastCompleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoastEventKind::ProfileGenerated => "profile_generated",
            RoastEventKind::RoastStarted => "roast_started",
            RoastEventKind::FirstCrack => "first_crack",
            RoastEventKind::SecondCrack => "second_crack",
            RoastEventKind::TemperatureAdjustment => "temperature_adjustment",
            RoastEventKind::Other => "other",
            RoastEventKind::RoastCompleted => "roast_completed",
        }
    }

    /// Kinds an operator may record by hand during a roast.
    /// The rest are written by session transitions.
    pub fn is_operator_event(&self) -> bool {
        matches!(
            self,
            RoastEventKind::FirstCrack
                | RoastEventKind::SecondCrack
                | RoastEventKind::TemperatureAdjustment
                | RoastEventKind::Other
        )
    }
}

impl std::fmt::Display for RoastEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoastEventKind::ProfileGenerated => write!(f, "Profile Generated"),
            RoastEventKind::RoastStarted => write!(f, "Roast Started"),
            RoastEventKind::FirstCrack => write!(f, "First Crack"),
            RoastEventKind::SecondCrack => write!(f, "Second Crack"),
            RoastEventKind::TemperatureAdjustment => write!(f, "Temperature Adjustment"),
            RoastEventKind::Other => write!(f, "Other"),
            RoastEventKind::RoastCompleted => write!(f, "Roast Completed"),
        }
    }
}

impl std::str::FromStr for RoastEventKind {
    type Err = RoastError;

    /// Accepts both `first_crack` and `First Crack`
    fn from_str(s: &str) -> RoastResult<Self> {
        let normalized = s.trim().replace(' ', "_");
        RoastEventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| {
                RoastError::invalid_parameter("kind", format!("`{}` is not a roast event kind", s))
            })
    }
}

/// A single entry on the event timeline. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoastEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: RoastEventKind,
    pub details: String,
}

/// Flat row for tabular display and CSV export
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventRow {
    pub timestamp: String,
    pub event_type: String,
    pub details: String,
}

impl From<&RoastEvent> for EventRow {
    fn from(event: &RoastEvent) -> Self {
        Self {
            timestamp: event.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type: event.kind.to_string(),
            details: event.details.clone(),
        }
    }
}
