//! In-memory registry of analysis sessions
//!
//! Each session moves through `Initializing -> ReadingFiles -> Analyzing`
//! and ends in `Completed` or `Error`. The store is shared between the
//! worker running the analysis and whoever polls for progress.

use crate::loader::load_records;
use chrono::{DateTime, Utc};
use geoprox_core::{Error, Result};
use geoprox_proximity::{analyze, Analysis, MatchConfig, MatchRow, ProgressSink, ProgressUpdate, SummaryStatistics};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

pub type SessionId = Uuid;

/// Number of recent rows kept for live display
pub const DEFAULT_TAIL_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Initializing,
    ReadingFiles,
    Analyzing,
    Completed,
    Error,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Error)
    }
}

/// Point-in-time copy of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub status: SessionStatus,
    pub processed: usize,
    pub total: usize,
    /// Most recent rows, oldest first
    pub recent_rows: Vec<MatchRow>,
    pub summary: Option<SummaryStatistics>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

struct Session {
    status: SessionStatus,
    processed: usize,
    total: usize,
    recent_rows: VecDeque<MatchRow>,
    analysis: Option<Arc<Analysis>>,
    error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Session {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            status: SessionStatus::Initializing,
            processed: 0,
            total: 0,
            recent_rows: VecDeque::new(),
            analysis: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn snapshot(&self, id: SessionId) -> SessionSnapshot {
        SessionSnapshot {
            id,
            status: self.status,
            processed: self.processed,
            total: self.total,
            recent_rows: self.recent_rows.iter().cloned().collect(),
            summary: self.analysis.as_ref().map(|a| a.summary.clone()),
            error: self.error.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Thread-safe session registry
pub struct AnalysisStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
    tail_len: usize,
}

impl Default for AnalysisStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::with_tail_len(DEFAULT_TAIL_LEN)
    }

    pub fn with_tail_len(tail_len: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            tail_len,
        }
    }

    pub fn create(&self) -> SessionId {
        let id = Uuid::new_v4();
        self.sessions.write().insert(id, Session::new());
        id
    }

    pub fn get(&self, id: &SessionId) -> Option<SessionSnapshot> {
        self.sessions.read().get(id).map(|s| s.snapshot(*id))
    }

    /// Full result of a completed session
    pub fn analysis(&self, id: &SessionId) -> Option<Arc<Analysis>> {
        self.sessions.read().get(id).and_then(|s| s.analysis.clone())
    }

    pub fn remove(&self, id: &SessionId) -> bool {
        self.sessions.write().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    fn update<T>(&self, id: &SessionId, f: impl FnOnce(&mut Session) -> T) -> Result<T> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;
        let out = f(session);
        session.updated_at = Utc::now();
        Ok(out)
    }

    pub fn set_status(&self, id: &SessionId, status: SessionStatus) -> Result<()> {
        self.update(id, |s| s.status = status)
    }

    pub fn set_total(&self, id: &SessionId, total: usize) -> Result<()> {
        self.update(id, |s| s.total = total)
    }

    /// Record a progress report. The latest row joins the tail unless it is
    /// the one already at the back.
    pub fn record_progress(&self, id: &SessionId, update: &ProgressUpdate<'_>) -> Result<()> {
        let tail_len = self.tail_len;
        self.update(id, |s| {
            s.processed = update.processed;
            s.total = update.total;
            if let Some(row) = update.latest_row {
                if tail_len > 0 && s.recent_rows.back() != Some(row) {
                    if s.recent_rows.len() == tail_len {
                        s.recent_rows.pop_front();
                    }
                    s.recent_rows.push_back(row.clone());
                }
            }
        })
    }

    pub fn complete(&self, id: &SessionId, analysis: Analysis) -> Result<()> {
        self.update(id, |s| {
            s.status = SessionStatus::Completed;
            s.processed = s.total.max(analysis.outcome.processed);
            s.analysis = Some(Arc::new(analysis));
        })
    }

    pub fn fail(&self, id: &SessionId, message: impl Into<String>) -> Result<()> {
        let message = message.into();
        self.update(id, |s| {
            s.status = SessionStatus::Error;
            s.error = Some(message);
        })
    }

    /// Sink that forwards matcher progress into session `id`
    pub fn progress_sink(&self, id: SessionId) -> SessionProgress<'_> {
        SessionProgress { store: self, id }
    }
}

pub struct SessionProgress<'a> {
    store: &'a AnalysisStore,
    id: SessionId,
}

impl ProgressSink for SessionProgress<'_> {
    fn report(&mut self, update: &ProgressUpdate<'_>) {
        if let Err(e) = self.store.record_progress(&self.id, update) {
            warn!("Dropping progress for session {}: {}", self.id, e);
        }
    }
}

/// Read both files and analyze them, tracking status in the store
pub fn run_session(
    store: &AnalysisStore,
    id: SessionId,
    government_path: &Path,
    candidate_path: &Path,
    config: &MatchConfig,
) -> Result<()> {
    store.set_status(&id, SessionStatus::ReadingFiles)?;
    let government = load_records(government_path)?;
    let candidates = load_records(candidate_path)?;

    store.set_total(&id, government.len())?;
    store.set_status(&id, SessionStatus::Analyzing)?;

    let mut sink = store.progress_sink(id);
    let analysis = analyze(&government, &candidates, config, Some(&mut sink))?;
    info!(
        "Session {} completed: {} rows from {} government records",
        id,
        analysis.outcome.rows.len(),
        analysis.outcome.processed
    );
    store.complete(&id, analysis)
}

/// Mark session `id` as failed with `err`; a session removed meanwhile is
/// only logged
fn record_failure(store: &AnalysisStore, id: SessionId, err: &Error) {
    error!("Session {} failed: {}", id, err);
    if let Err(e) = store.fail(&id, err.to_string()) {
        warn!("Could not record failure for session {}: {}", id, e);
    }
}

/// Create a session and run it on a dedicated worker thread.
///
/// Failures are recorded on the session as `Error` with the message; the
/// worker's result carries the same error.
pub fn spawn_analysis(
    store: Arc<AnalysisStore>,
    government_path: PathBuf,
    candidate_path: PathBuf,
    config: MatchConfig,
) -> Result<(SessionId, JoinHandle<Result<()>>)> {
    let id = store.create();
    let handle = std::thread::Builder::new()
        .name(format!("analysis-{}", id))
        .spawn(move || {
            let result = run_session(&store, id, &government_path, &candidate_path, &config);
            if let Err(e) = &result {
                record_failure(&store, id, e);
            }
            result
        })?;
    Ok((id, handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoprox_core::RecordSet;
    use serde_json::json;

    fn sample_analysis(n: usize) -> Analysis {
        let government = RecordSet::new(
            vec!["BemisCode".into(), "X-Cord".into(), "Y-Cord".into()],
            (0..n).map(|i| vec![json!(format!("G{}", i)), json!(30.0), json!(70.0)]).collect(),
        );
        let candidates = RecordSet::new(
            vec!["Source".into(), "_xCord".into(), "_yCord".into()],
            vec![vec![json!("BEF"), json!(70.0), json!(30.01)]],
        );
        analyze(&government, &candidates, &MatchConfig::default(), None).unwrap()
    }

    #[test]
    fn test_lifecycle() {
        let store = AnalysisStore::new();
        let id = store.create();
        let snap = store.get(&id).unwrap();
        assert_eq!(snap.status, SessionStatus::Initializing);
        assert_eq!(snap.processed, 0);
        assert!(snap.summary.is_none());

        store.set_status(&id, SessionStatus::ReadingFiles).unwrap();
        store.set_total(&id, 3).unwrap();
        store.set_status(&id, SessionStatus::Analyzing).unwrap();
        store.complete(&id, sample_analysis(3)).unwrap();

        let snap = store.get(&id).unwrap();
        assert_eq!(snap.status, SessionStatus::Completed);
        assert!(snap.status.is_terminal());
        assert_eq!(snap.processed, 3);
        assert_eq!(snap.summary.unwrap().total_rows, 3);
        assert_eq!(store.analysis(&id).unwrap().outcome.rows.len(), 3);
        assert!(snap.updated_at >= snap.created_at);
    }

    #[test]
    fn test_progress_tail_is_bounded() {
        let store = AnalysisStore::with_tail_len(2);
        let id = store.create();
        let analysis = sample_analysis(4);
        let rows = &analysis.outcome.rows;

        let mut sink = store.progress_sink(id);
        for (i, row) in rows.iter().enumerate() {
            sink.report(&ProgressUpdate { processed: i + 1, total: 4, latest_row: Some(row) });
            // Repeated report of the same row is not duplicated
            sink.report(&ProgressUpdate { processed: i + 1, total: 4, latest_row: Some(row) });
        }

        let snap = store.get(&id).unwrap();
        assert_eq!(snap.processed, 4);
        assert_eq!(snap.total, 4);
        assert_eq!(snap.recent_rows.len(), 2);
        assert_eq!(snap.recent_rows[0], rows[2]);
        assert_eq!(snap.recent_rows[1], rows[3]);
    }

    #[test]
    fn test_fail_and_unknown_session() {
        let store = AnalysisStore::new();
        let id = store.create();
        store.fail(&id, "missing latitude").unwrap();
        let snap = store.get(&id).unwrap();
        assert_eq!(snap.status, SessionStatus::Error);
        assert_eq!(snap.error.as_deref(), Some("missing latitude"));

        let unknown = Uuid::new_v4();
        assert!(store.get(&unknown).is_none());
        assert!(matches!(
            store.set_status(&unknown, SessionStatus::Analyzing),
            Err(Error::SessionNotFound(_))
        ));
        assert!(store.remove(&id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_record_failure_on_removed_session() {
        let store = AnalysisStore::new();
        let id = store.create();
        record_failure(&store, id, &Error::Parse("bad header".to_string()));
        let snap = store.get(&id).unwrap();
        assert_eq!(snap.status, SessionStatus::Error);
        assert_eq!(snap.error.as_deref(), Some("Parse error: bad header"));

        assert!(store.remove(&id));
        record_failure(&store, id, &Error::Parse("bad header".to_string()));
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn test_snapshot_serializes_status() {
        let store = AnalysisStore::new();
        let id = store.create();
        store.set_status(&id, SessionStatus::ReadingFiles).unwrap();
        let json = serde_json::to_value(store.get(&id).unwrap()).unwrap();
        assert_eq!(json["status"], "reading_files");
        assert_eq!(json["id"], id.to_string());
    }
}
