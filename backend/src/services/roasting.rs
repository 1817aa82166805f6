//! Roast session service
//!
//! Holds live roast sessions in memory. Each session sits behind its own
//! mutex, which is the single writer boundary for that session; the registry
//! lock is only held long enough to look a session up.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    generate_from_labels, BatchInfo, BeanType, Clock, Origin, RoastEvent, RoastEventKind,
    RoastLevel, RoastProfile, RoastSession, RoastStatistics, SessionState, TraceSample,
};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

type SharedSession = Arc<Mutex<RoastSession>>;

struct SessionEntry {
    created_at: DateTime<Utc>,
    session: SharedSession,
}

/// Service managing the in-memory roast session registry
#[derive(Clone)]
pub struct RoastingService {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    max_sessions: usize,
    default_batch_size_g: u32,
    clock: Arc<dyn Clock>,
}

/// Input for generating a roast profile
#[derive(Debug, Deserialize)]
pub struct GenerateProfileInput {
    pub bean_type: String,
    pub roast_level: String,
    pub charge_temp: f64,
    pub development_time_pct: f64,
}

/// Input for starting a roast
#[derive(Debug, Default, Deserialize, Validate)]
pub struct StartRoastInput {
    pub bean_type: Option<String>,
    pub origin: Option<String>,
    #[validate(range(min = 100, max = 1000))]
    pub batch_size_g: Option<u32>,
}

/// Input for recording an operator event
#[derive(Debug, Deserialize, Validate)]
pub struct RecordEventInput {
    pub kind: String,
    #[validate(length(max = 500))]
    pub details: Option<String>,
}

/// Read-only view of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub state: SessionState,
    pub created_at: DateTime<Utc>,
    pub start_instant: Option<DateTime<Utc>>,
    pub profile: Option<RoastProfile>,
    pub events: Vec<RoastEvent>,
    pub trace: Vec<TraceSample>,
    pub statistics: RoastStatistics,
}

/// Row in the session listing
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub state: SessionState,
    pub created_at: DateTime<Utc>,
    pub roast_level: Option<RoastLevel>,
    pub bean_type: Option<BeanType>,
    pub event_count: usize,
}

/// Expected temperature at an elapsed time
#[derive(Debug, Clone, Serialize)]
pub struct SampleReading {
    pub elapsed_minutes: f64,
    pub temperature_celsius: f64,
}

/// Display statistics plus a formatted first-crack label
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsView {
    #[serde(flatten)]
    pub statistics: RoastStatistics,
    pub time_to_first_crack_label: String,
}

impl From<RoastStatistics> for StatisticsView {
    fn from(statistics: RoastStatistics) -> Self {
        let label = statistics.time_to_first_crack.to_string();
        Self {
            statistics,
            time_to_first_crack_label: label,
        }
    }
}

fn snapshot(id: Uuid, created_at: DateTime<Utc>, session: &RoastSession) -> SessionSnapshot {
    SessionSnapshot {
        id,
        state: session.state(),
        created_at,
        start_instant: session.start_instant(),
        profile: session.profile().cloned(),
        events: session.timeline().events().to_vec(),
        trace: session.trace().to_vec(),
        statistics: RoastStatistics::derive(session),
    }
}

impl RoastingService {
    /// Create a new RoastingService instance
    pub fn new(max_sessions: usize, default_batch_size_g: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
            default_batch_size_g,
            clock,
        }
    }

    // ========================================================================
    // Registry
    // ========================================================================

    /// Open a new idle session
    pub async fn create_session(&self) -> AppResult<SessionSnapshot> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(AppError::SessionLimitReached(self.max_sessions));
        }

        let id = Uuid::new_v4();
        let created_at = self.clock.now();
        let session = RoastSession::with_clock(self.clock.clone());
        let view = snapshot(id, created_at, &session);
        sessions.insert(
            id,
            SessionEntry {
                created_at,
                session: Arc::new(Mutex::new(session)),
            },
        );

        tracing::info!(session_id = %id, "Roast session created");
        Ok(view)
    }

    /// List open sessions, oldest first
    pub async fn list_sessions(&self) -> Vec<SessionSummary> {
        let entries: Vec<(Uuid, DateTime<Utc>, SharedSession)> = {
            let sessions = self.sessions.read().await;
            sessions
                .iter()
                .map(|(id, entry)| (*id, entry.created_at, entry.session.clone()))
                .collect()
        };

        let mut summaries = Vec::with_capacity(entries.len());
        for (id, created_at, session) in entries {
            let session = session.lock().await;
            summaries.push(SessionSummary {
                id,
                state: session.state(),
                created_at,
                roast_level: session.profile().map(|p| p.target_roast_level),
                bean_type: session.profile().map(|p| p.bean_type),
                event_count: session.timeline().len(),
            });
        }
        summaries.sort_by_key(|s| s.created_at);
        summaries
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Get a snapshot of a session
    pub async fn get_session(&self, id: Uuid) -> AppResult<SessionSnapshot> {
        let (created_at, session) = self.lookup(id).await?;
        let session = session.lock().await;
        Ok(snapshot(id, created_at, &session))
    }

    /// Drop a session from the registry
    pub async fn delete_session(&self, id: Uuid) -> AppResult<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| tracing::info!(session_id = %id, "Roast session deleted"))
            .ok_or_else(|| AppError::NotFound("Roast session".to_string()))
    }

    async fn lookup(&self, id: Uuid) -> AppResult<(DateTime<Utc>, SharedSession)> {
        self.sessions
            .read()
            .await
            .get(&id)
            .map(|entry| (entry.created_at, entry.session.clone()))
            .ok_or_else(|| AppError::NotFound("Roast session".to_string()))
    }

    /// Run `f` against a session while holding its lock, then snapshot it
    async fn mutate<F>(&self, id: Uuid, f: F) -> AppResult<SessionSnapshot>
    where
        F: FnOnce(&mut RoastSession) -> AppResult<()>,
    {
        let (created_at, session) = self.lookup(id).await?;
        let mut session = session.lock().await;
        f(&mut session)?;
        Ok(snapshot(id, created_at, &session))
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Generate a profile and attach it to an idle session
    pub async fn set_profile(
        &self,
        id: Uuid,
        input: GenerateProfileInput,
    ) -> AppResult<SessionSnapshot> {
        let profile = generate_profile(&input)?;
        self.mutate(id, move |session| {
            session.set_profile(profile)?;
            Ok(())
        })
        .await
    }

    /// Start the roast, optionally naming the batch
    pub async fn start(&self, id: Uuid, input: StartRoastInput) -> AppResult<SessionSnapshot> {
        input.validate()?;
        let batch = self.batch_from(&input)?;
        self.mutate(id, move |session| {
            match &batch {
                Some(batch) => session.start_batch(batch)?,
                None => session.start()?,
            };
            Ok(())
        })
        .await
    }

    fn batch_from(&self, input: &StartRoastInput) -> AppResult<Option<BatchInfo>> {
        match (&input.bean_type, &input.origin) {
            (Some(bean_type), Some(origin)) => {
                let bean_type: BeanType = bean_type.parse()?;
                let origin: Origin = origin.parse()?;
                let size = input.batch_size_g.unwrap_or(self.default_batch_size_g);
                Ok(Some(BatchInfo::new(bean_type, origin, size)?))
            }
            (None, None) => Ok(None),
            (Some(_), None) => Err(AppError::Validation {
                field: "origin".to_string(),
                message: "Origin is required when bean type is given".to_string(),
                message_th: "ต้องระบุแหล่งปลูกเมื่อระบุชนิดเมล็ด".to_string(),
            }),
            (None, Some(_)) => Err(AppError::Validation {
                field: "bean_type".to_string(),
                message: "Bean type is required when origin is given".to_string(),
                message_th: "ต้องระบุชนิดเมล็ดเมื่อระบุแหล่งปลูก".to_string(),
            }),
        }
    }

    /// Record an operator event on an in-progress roast
    pub async fn record_event(&self, id: Uuid, input: RecordEventInput) -> AppResult<RoastEvent> {
        input.validate()?;
        let kind: RoastEventKind = input.kind.parse()?;
        let details = input.details.unwrap_or_default();

        let (_, session) = self.lookup(id).await?;
        let mut session = session.lock().await;
        let event = session.record_event(kind, details)?.clone();
        Ok(event)
    }

    /// Finish an in-progress roast
    pub async fn finish(&self, id: Uuid) -> AppResult<SessionSnapshot> {
        self.mutate(id, |session| {
            session.finish()?;
            Ok(())
        })
        .await
    }

    /// Return a finished session to idle
    pub async fn reset(&self, id: Uuid) -> AppResult<SessionSnapshot> {
        self.mutate(id, |session| Ok(session.reset()?)).await
    }

    /// Discard all recorded events
    pub async fn clear_events(&self, id: Uuid) -> AppResult<SessionSnapshot> {
        self.mutate(id, |session| {
            session.clear_events();
            Ok(())
        })
        .await
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Events in order, optionally filtered by kind
    pub async fn events(&self, id: Uuid, kind: Option<&str>) -> AppResult<Vec<RoastEvent>> {
        let kind = kind.map(str::parse::<RoastEventKind>).transpose()?;

        let (_, session) = self.lookup(id).await?;
        let session = session.lock().await;
        let timeline = session.timeline();
        let events = match kind {
            Some(kind) => timeline.events_of(kind).cloned().collect(),
            None => timeline.events().to_vec(),
        };
        Ok(events)
    }

    /// Take a live reading at the current elapsed time
    pub async fn tick(&self, id: Uuid) -> AppResult<TraceSample> {
        let (_, session) = self.lookup(id).await?;
        let mut session = session.lock().await;
        Ok(session.tick()?)
    }

    /// Expected temperature at an elapsed time
    pub async fn sample(&self, id: Uuid, elapsed_minutes: f64) -> AppResult<SampleReading> {
        let (_, session) = self.lookup(id).await?;
        let session = session.lock().await;
        let temperature_celsius = session.sample(elapsed_minutes)?;
        Ok(SampleReading {
            elapsed_minutes,
            temperature_celsius,
        })
    }

    pub async fn statistics(&self, id: Uuid) -> AppResult<StatisticsView> {
        let (_, session) = self.lookup(id).await?;
        let session = session.lock().await;
        Ok(RoastStatistics::derive(&session).into())
    }

    /// Export rows as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record).map_err(|e| {
                AppError::Internal(format!("CSV serialization error: {}", e))
            })?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

/// Generate a profile from form labels
pub fn generate_profile(input: &GenerateProfileInput) -> AppResult<RoastProfile> {
    Ok(generate_from_labels(
        &input.bean_type,
        &input.roast_level,
        input.charge_temp,
        input.development_time_pct,
    )?)
}
