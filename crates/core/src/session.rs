//! Review-session state and the session-store abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Stage of a review session.
///
/// `Idle` is the stage of a user with no stored record; it never appears
/// inside the store itself. `start-review` moves any stage to
/// `QuestionAsked`, `answer-review` requires and keeps `QuestionAsked`,
/// and `end-review` moves to `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewStage {
    Idle,
    QuestionAsked,
    Closed,
}

/// One per-user review cycle: the current topic, the question the next
/// answer will be graded against, and the provenance flag of the last
/// posed question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSession {
    pub user_id: String,
    pub topic: String,
    pub last_question: String,
    pub stage: ReviewStage,
    pub from_training_material: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReviewSession {
    /// Fresh session in the `QuestionAsked` stage.
    pub fn new(
        user_id: impl Into<String>,
        topic: impl Into<String>,
        last_question: impl Into<String>,
        from_training_material: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            topic: topic.into(),
            last_question: last_question.into(),
            stage: ReviewStage::QuestionAsked,
            from_training_material,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage == ReviewStage::QuestionAsked
    }
}

/// Keyed storage for review sessions.
///
/// Each operation is atomic with respect to the others; the backing
/// implementation can be swapped (e.g. for a persistent store) without
/// changing the engine's contract.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Option<ReviewSession>;
    /// Whole-record insert-or-replace keyed by the session's `user_id`.
    async fn put(&self, session: ReviewSession);
    async fn delete(&self, user_id: &str);
}

/// Process-lifetime in-memory store.
///
/// Abandoned sessions are never evicted; for this scope that is an
/// accepted resource cost, bounded by the process lifetime.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, ReviewSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: &str) -> Option<ReviewSession> {
        self.sessions.lock().await.get(user_id).cloned()
    }

    async fn put(&self, session: ReviewSession) {
        self.sessions
            .lock()
            .await
            .insert(session.user_id.clone(), session);
    }

    async fn delete(&self, user_id: &str) {
        self.sessions.lock().await.remove(user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = InMemorySessionStore::new();
        store
            .put(ReviewSession::new("u1", "resistencia", "¿Qué es?", true))
            .await;

        let session = store.get("u1").await.unwrap();
        assert_eq!(session.topic, "resistencia");
        assert_eq!(session.stage, ReviewStage::QuestionAsked);
        assert!(session.is_active());
        assert!(store.get("u2").await.is_none());
    }

    #[tokio::test]
    async fn put_replaces_the_whole_record() {
        let store = InMemorySessionStore::new();
        store
            .put(ReviewSession::new("u1", "resistencia", "primera", true))
            .await;
        store
            .put(ReviewSession::new("u1", "ley de ohm", "segunda", false))
            .await;

        let session = store.get("u1").await.unwrap();
        assert_eq!(session.topic, "ley de ohm");
        assert_eq!(session.last_question, "segunda");
        assert!(!session.from_training_material);
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let store = InMemorySessionStore::new();
        store
            .put(ReviewSession::new("u1", "resistencia", "p", true))
            .await;
        store.delete("u1").await;
        assert!(store.get("u1").await.is_none());
    }

    #[test]
    fn session_serde_round_trips() {
        let session = ReviewSession::new("u1", "resistencia", "¿Qué es?", true);
        let json = serde_json::to_string(&session).unwrap();
        let back: ReviewSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_id, session.user_id);
        assert_eq!(back.stage, ReviewStage::QuestionAsked);
        assert_eq!(back.created_at, session.created_at);
    }
}
