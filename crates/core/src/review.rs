//! Review-session interaction engine.
//!
//! Drives the question → answer → correction → next-question cycle for one
//! user at a time. The engine owns no state of its own: sessions live in a
//! [`SessionStore`], the corpus blob is loaded once at startup and shared
//! read-only, and the provenance flag is re-derived on every
//! question-generation step.

use crate::coverage::{CoverageEstimator, info_source_label};
use crate::error::{TutorError, require};
use crate::llm_client::{ChatMessage, CompletionClient, DEFAULT_TEMPERATURE};
use crate::prompt::{PromptLibrary, attribution_footer, source_instruction};
use crate::session::{ReviewSession, ReviewStage, SessionStore};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of starting (or restarting) a review cycle.
#[derive(Debug, Clone)]
pub struct ReviewStart {
    pub question: String,
    pub info_source: String,
}

/// Result of one answer turn: the graded correction plus the next question.
#[derive(Debug, Clone)]
pub struct ReviewTurn {
    pub correction: String,
    pub next_question: String,
    pub info_source_next: String,
}

/// Result of explicitly closing a review cycle.
#[derive(Debug, Clone)]
pub struct ReviewClose {
    pub user_id: String,
    pub topic: String,
}

pub struct ReviewEngine {
    store: Arc<dyn SessionStore>,
    oracle: Arc<dyn CompletionClient>,
    coverage: Arc<dyn CoverageEstimator>,
    prompts: PromptLibrary,
    corpus: Arc<String>,
}

impl ReviewEngine {
    pub fn new(
        store: Arc<dyn SessionStore>,
        oracle: Arc<dyn CompletionClient>,
        coverage: Arc<dyn CoverageEstimator>,
        prompts: PromptLibrary,
        corpus: Arc<String>,
    ) -> Self {
        Self {
            store,
            oracle,
            coverage,
            prompts,
            corpus,
        }
    }

    /// Starts a review cycle on `topic`, overwriting any prior session for
    /// the user. Returns the first question and its provenance label.
    pub async fn start_review(
        &self,
        user_id: &str,
        topic: &str,
    ) -> Result<ReviewStart, TutorError> {
        let user_id = require(user_id, "userId")?;
        let topic = require(topic, "topic")?;

        let from_material = self.coverage.covers(&self.corpus, topic);
        let question = self.next_question(topic, from_material).await?;

        self.store
            .put(ReviewSession::new(user_id, topic, question.as_str(), from_material))
            .await;
        info!(user_id, topic, from_material, "Review session started");

        Ok(ReviewStart {
            question,
            info_source: info_source_label(from_material).to_string(),
        })
    }

    /// Grades the student's answer to the last posed question, then poses
    /// the next question on the same topic.
    ///
    /// Issues two oracle calls per turn (grading + next question); the
    /// turn stays synchronous and the session record is the only state
    /// carried between turns.
    pub async fn answer_review(
        &self,
        user_id: &str,
        answer: &str,
    ) -> Result<ReviewTurn, TutorError> {
        let user_id = require(user_id, "userId")?;
        let answer = require(answer, "answer")?;

        let stored = self.store.get(user_id).await;
        let stage = stored
            .as_ref()
            .map(|s| s.stage)
            .unwrap_or(ReviewStage::Idle);
        let Some(mut session) = stored.filter(ReviewSession::is_active) else {
            debug!(user_id, ?stage, "Rejected answer without an active session");
            return Err(TutorError::NoActiveSession(user_id.to_string()));
        };

        let correction_prompt =
            self.prompts
                .review_correction(&session.topic, &session.last_question, answer);
        let messages = vec![
            ChatMessage::system(source_instruction(session.from_training_material)),
            ChatMessage::user(correction_prompt),
        ];
        let graded = self.oracle.complete(messages, DEFAULT_TEMPERATURE).await?;
        let correction = format!("{}\n\n{}", graded.trim(), attribution_footer(false));

        // Provenance is re-derived for the next turn rather than cached.
        let from_material = self.coverage.covers(&self.corpus, &session.topic);
        let next_question = self.next_question(&session.topic, from_material).await?;

        session.last_question = next_question.clone();
        session.from_training_material = from_material;
        session.stage = ReviewStage::QuestionAsked;
        session.updated_at = Utc::now();
        self.store.put(session).await;
        info!(user_id, from_material, "Review turn completed");

        Ok(ReviewTurn {
            correction,
            next_question,
            info_source_next: info_source_label(from_material).to_string(),
        })
    }

    /// Closes the user's active review cycle. No oracle call is made; a
    /// later `start_review` begins a fresh cycle.
    pub async fn end_review(&self, user_id: &str) -> Result<ReviewClose, TutorError> {
        let user_id = require(user_id, "userId")?;

        let Some(mut session) = self
            .store
            .get(user_id)
            .await
            .filter(ReviewSession::is_active)
        else {
            return Err(TutorError::NoActiveSession(user_id.to_string()));
        };

        session.stage = ReviewStage::Closed;
        session.updated_at = Utc::now();
        let topic = session.topic.clone();
        self.store.put(session).await;
        info!(user_id, topic, "Review session closed");

        Ok(ReviewClose {
            user_id: user_id.to_string(),
            topic,
        })
    }

    async fn next_question(
        &self,
        topic: &str,
        from_material: bool,
    ) -> Result<String, TutorError> {
        let messages = vec![
            ChatMessage::system(source_instruction(from_material)),
            ChatMessage::user(self.prompts.review_question(&self.corpus, topic)),
        ];
        self.oracle.complete(messages, DEFAULT_TEMPERATURE).await
    }
}
