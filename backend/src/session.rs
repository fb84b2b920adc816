// src/session.rs

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{
    design::TreatmentDesign,
    progress::ProgressState,
    quiz::{QuizResult, ShortAnswers},
};

/// Latest graded attempt at the final quiz plus its short answers.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    pub result: QuizResult,
    pub short_answers: ShortAnswers,
}

/// Everything one student accumulates during a lesson. Lives only in memory.
#[derive(Debug, Clone)]
pub struct Session {
    pub progress: ProgressState,
    pub design: Option<TreatmentDesign>,
    pub quiz: Option<QuizAttempt>,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            progress: ProgressState::new(),
            design: None,
            quiz: None,
            created_at: now,
            last_seen: now,
        }
    }
}

/// In-memory session registry.
///
/// Every access runs a synchronous closure under the lock, so one handler's
/// read-modify-write on a session completes before the next begins.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: i64::try_from(ttl_seconds)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a fresh session and drops the ones idle past the TTL.
    pub fn create(&self) -> Uuid {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let mut sessions = self.lock();

        let before = sessions.len();
        sessions.retain(|_, s| now - s.last_seen <= self.ttl);
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::info!("Pruned {} idle session(s)", pruned);
        }

        sessions.insert(id, Session::new(now));
        id
    }

    /// Runs `f` against the session, if it exists, and marks it as seen.
    pub fn with_session<R>(&self, id: &Uuid, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(id)?;
        session.last_seen = Utc::now();
        Some(f(session))
    }

    /// Discards the session. Returns whether it existed.
    pub fn remove(&self, id: &Uuid) -> bool {
        self.lock().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
