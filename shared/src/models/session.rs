//! Roast session state models

use serde::{Deserialize, Serialize};

/// Session lifecycle state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    InProgress,
    Completed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::InProgress => "in_progress",
            SessionState::Completed => "completed",
        }
    }

    pub fn is_started(&self) -> bool {
        !matches!(self, SessionState::Idle)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::InProgress => write!(f, "in progress"),
            SessionState::Completed => write!(f, "completed"),
        }
    }
}

/// A temperature reading taken from the profile on a polling tick
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TraceSample {
    pub elapsed_minutes: f64,
    pub temperature_celsius: f64,
}
