//! Roast session coordinator
//!
//! Owns the active profile, the event timeline and the lifecycle state
//! (`Idle -> InProgress -> Completed`). Every mutation goes through the
//! methods here; invalid-state calls are rejected with `InvalidTransition`
//! rather than relying on the caller to hide the action. Wall-clock time is
//! read, never used to trigger a transition.
//!
//! A session is single-writer. When shared across threads it belongs behind
//! one mutex per session.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::clock::{minutes_between, Clock, SystemClock};
use crate::error::{RoastError, RoastResult};
use crate::models::{BatchInfo, RoastEvent, RoastEventKind, RoastProfile, SessionState, TraceSample};
use crate::timeline::EventTimeline;

pub struct RoastSession {
    state: SessionState,
    profile: Option<RoastProfile>,
    timeline: EventTimeline,
    start_instant: Option<DateTime<Utc>>,
    finish_instant: Option<DateTime<Utc>>,
    trace: Vec<TraceSample>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for RoastSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoastSession")
            .field("state", &self.state)
            .field("has_profile", &self.profile.is_some())
            .field("events", &self.timeline.len())
            .field("start_instant", &self.start_instant)
            .field("trace_len", &self.trace.len())
            .finish()
    }
}

impl Default for RoastSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RoastSession {
    /// New idle session on the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: SessionState::Idle,
            profile: None,
            timeline: EventTimeline::new(),
            start_instant: None,
            finish_instant: None,
            trace: Vec::new(),
            clock,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn profile(&self) -> Option<&RoastProfile> {
        self.profile.as_ref()
    }

    pub fn timeline(&self) -> &EventTimeline {
        &self.timeline
    }

    pub fn start_instant(&self) -> Option<DateTime<Utc>> {
        self.start_instant
    }

    pub fn finish_instant(&self) -> Option<DateTime<Utc>> {
        self.finish_instant
    }

    /// Temperatures recorded by [`RoastSession::tick`]
    pub fn trace(&self) -> &[TraceSample] {
        &self.trace
    }

    /// Minutes since the roast started; frozen at the finish instant once
    /// completed, `None` while idle.
    pub fn elapsed_minutes(&self) -> Option<f64> {
        let start = self.start_instant?;
        let end = self.finish_instant.unwrap_or_else(|| self.clock.now());
        Some(minutes_between(start, end))
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Store a freshly generated profile. Idle only; state is unchanged.
    pub fn set_profile(&mut self, profile: RoastProfile) -> RoastResult<&RoastEvent> {
        self.require(SessionState::Idle, "set profile")?;

        let details = format!(
            "{} {} profile created",
            profile.bean_type, profile.target_roast_level
        );
        self.profile = Some(profile);
        self.timeline
            .record(RoastEventKind::ProfileGenerated, details, self.clock.now());

        tracing::info!("Roast profile set");
        self.last_event()
    }

    /// Begin the roast. Requires an idle session with a profile.
    pub fn start(&mut self) -> RoastResult<&RoastEvent> {
        self.begin(String::new())
    }

    /// Begin the roast, recording the batch in the start event
    pub fn start_batch(&mut self, batch: &BatchInfo) -> RoastResult<&RoastEvent> {
        self.begin(batch.describe())
    }

    fn begin(&mut self, details: String) -> RoastResult<&RoastEvent> {
        self.require(SessionState::Idle, "start")?;
        if self.profile.is_none() {
            return Err(RoastError::InvalidTransition {
                action: "start without a profile",
                state: self.state,
            });
        }

        let now = self.clock.now();
        self.start_instant = Some(now);
        self.finish_instant = None;
        self.trace.clear();
        self.state = SessionState::InProgress;
        self.timeline.record(RoastEventKind::RoastStarted, details, now);

        tracing::info!(start = %now, "Roast started");
        self.last_event()
    }

    /// Record an operator event (cracks, adjustments, notes). In progress only.
    pub fn record_event(
        &mut self,
        kind: RoastEventKind,
        details: impl Into<String>,
    ) -> RoastResult<&RoastEvent> {
        self.require(SessionState::InProgress, "record an event")?;
        if !kind.is_operator_event() {
            return Err(RoastError::InvalidTransition {
                action: "record a lifecycle event by hand",
                state: self.state,
            });
        }

        self.timeline.record(kind, details, self.clock.now());
        tracing::debug!(%kind, "Roast event recorded");
        self.last_event()
    }

    /// Finish the roast, recording its duration
    pub fn finish(&mut self) -> RoastResult<&RoastEvent> {
        self.require(SessionState::InProgress, "finish")?;

        let now = self.clock.now();
        let start = self.start_instant.unwrap_or(now);
        let duration = minutes_between(start, now);
        self.finish_instant = Some(now);
        self.state = SessionState::Completed;
        self.timeline.record(
            RoastEventKind::RoastCompleted,
            format!("Duration: {:.1} minutes", duration),
            now,
        );

        tracing::info!(duration_minutes = duration, "Roast completed");
        self.last_event()
    }

    /// Return to idle so a new profile can be set. Not allowed mid-roast.
    /// The profile and timeline are kept.
    pub fn reset(&mut self) -> RoastResult<()> {
        if self.state == SessionState::InProgress {
            return Err(RoastError::InvalidTransition {
                action: "reset",
                state: self.state,
            });
        }
        self.state = SessionState::Idle;
        self.start_instant = None;
        self.finish_instant = None;
        self.trace.clear();
        tracing::info!("Roast session reset");
        Ok(())
    }

    /// Discard all events. Allowed in any state.
    pub fn clear_events(&mut self) {
        self.timeline.clear();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Expected temperature at `elapsed_minutes` into the roast.
    ///
    /// Clamps to the final sample past the end of the profile.
    pub fn sample(&self, elapsed_minutes: f64) -> RoastResult<f64> {
        if !self.state.is_started() {
            return Err(RoastError::InvalidTransition {
                action: "sample",
                state: self.state,
            });
        }
        self.profile
            .as_ref()
            .ok_or(RoastError::NoData("no profile generated"))?
            .temperature_at(elapsed_minutes)
    }

    /// Polling tick: sample the profile at the current elapsed time and add
    /// the reading to the live trace. In progress only.
    pub fn tick(&mut self) -> RoastResult<TraceSample> {
        self.require(SessionState::InProgress, "take a reading")?;

        let elapsed_minutes = self.elapsed_minutes().unwrap_or(0.0).max(0.0);
        let temperature_celsius = self.sample(elapsed_minutes)?;
        let reading = TraceSample {
            elapsed_minutes,
            temperature_celsius,
        };
        self.trace.push(reading);
        Ok(reading)
    }

    fn require(&self, expected: SessionState, action: &'static str) -> RoastResult<()> {
        if self.state != expected {
            return Err(RoastError::InvalidTransition {
                action,
                state: self.state,
            });
        }
        Ok(())
    }

    fn last_event(&self) -> RoastResult<&RoastEvent> {
        self.timeline
            .last()
            .ok_or(RoastError::NoData("timeline is empty"))
    }
}
