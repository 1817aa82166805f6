//! Error taxonomy for the roast simulation core
//!
//! Every condition here is local and recoverable. The core never retries;
//! callers decide whether to re-prompt the operator.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::SessionState;

/// Errors returned by the profile generator, timeline and session
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoastError {
    /// Bad generation input (or an unrecognized label)
    #[error("Invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    /// State-machine misuse
    #[error("Cannot {action} while session is {state}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    /// Explicit-timestamp append that would break timeline ordering
    #[error("Timestamp {attempted} precedes last recorded event at {last}")]
    NonMonotonicTimestamp {
        last: DateTime<Utc>,
        attempted: DateTime<Utc>,
    },

    /// Statistics or lookup requested before anything was recorded
    #[error("No data: {0}")]
    NoData(&'static str),
}

impl RoastError {
    pub fn invalid_parameter(parameter: &'static str, reason: impl Into<String>) -> Self {
        RoastError::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            RoastError::InvalidParameter { .. } => "INVALID_PARAMETER",
            RoastError::InvalidTransition { .. } => "INVALID_TRANSITION",
            RoastError::NonMonotonicTimestamp { .. } => "NON_MONOTONIC_TIMESTAMP",
            RoastError::NoData(_) => "NO_DATA",
        }
    }
}

/// Result type alias for core operations
pub type RoastResult<T> = Result<T, RoastError>;
