//! Append-only roast event timeline
//!
//! Events are kept in non-decreasing timestamp order. The implicit-"now"
//! append path never fails: if the wall clock steps backwards the new event
//! is stamped with the previous timestamp instead. Only an explicit
//! timestamp that precedes the last event is rejected.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{RoastError, RoastResult};
use crate::models::{EventRow, RoastEvent, RoastEventKind};

#[derive(Debug, Clone, Default, Serialize)]
pub struct EventTimeline {
    events: Vec<RoastEvent>,
}

impl EventTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event stamped with the current time
    pub fn append(&mut self, kind: RoastEventKind, details: impl Into<String>) -> RoastEvent {
        self.record(kind, details, Utc::now())
    }

    /// Append an event at an explicit instant.
    ///
    /// Fails with `NonMonotonicTimestamp` if `at` precedes the last event.
    pub fn append_at(
        &mut self,
        kind: RoastEventKind,
        details: impl Into<String>,
        at: DateTime<Utc>,
    ) -> RoastResult<RoastEvent> {
        if let Some(last) = self.last_timestamp() {
            if at < last {
                return Err(RoastError::NonMonotonicTimestamp { last, attempted: at });
            }
        }
        Ok(self.push(kind, details.into(), at))
    }

    /// Clock-driven append; stamps with `max(now, last)`
    pub(crate) fn record(
        &mut self,
        kind: RoastEventKind,
        details: impl Into<String>,
        now: DateTime<Utc>,
    ) -> RoastEvent {
        let timestamp = match self.last_timestamp() {
            Some(last) if now < last => last,
            _ => now,
        };
        self.push(kind, details.into(), timestamp)
    }

    fn push(&mut self, kind: RoastEventKind, details: String, timestamp: DateTime<Utc>) -> RoastEvent {
        let event = RoastEvent {
            timestamp,
            kind,
            details,
        };
        self.events.push(event.clone());
        event
    }

    /// Events of one kind, in order. The iterator is `Clone`, so it can be
    /// replayed.
    pub fn events_of(
        &self,
        kind: RoastEventKind,
    ) -> impl Iterator<Item = &RoastEvent> + Clone + '_ {
        self.events.iter().filter(move |event| event.kind == kind)
    }

    pub fn first_of(&self, kind: RoastEventKind) -> Option<&RoastEvent> {
        self.events_of(kind).next()
    }

    /// Discard every event
    pub fn clear(&mut self) {
        tracing::debug!(discarded = self.events.len(), "Cleared roast events");
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn events(&self) -> &[RoastEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&RoastEvent> {
        self.events.last()
    }

    fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.events.last().map(|event| event.timestamp)
    }

    /// Rows for the event log table
    pub fn rows(&self) -> Vec<EventRow> {
        self.events.iter().map(EventRow::from).collect()
    }
}
