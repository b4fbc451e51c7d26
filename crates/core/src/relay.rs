//! Direct question answering (non-review mode).

use crate::error::{TutorError, require};
use crate::llm_client::{ChatMessage, CompletionClient, DEFAULT_TEMPERATURE};
use crate::prompt::{PromptLibrary, attribution_footer};
use crate::sources::extract_sources;
use std::sync::Arc;
use tracing::info;

/// A shaped answer: footer appended, cited links extracted when the
/// caller asked for external-source augmentation.
#[derive(Debug, Clone)]
pub struct AskOutcome {
    pub answer: String,
    pub sources: Option<Vec<String>>,
}

/// Thin mapping from an inbound question to one oracle call plus response
/// shaping.
pub struct AnswerRelay {
    oracle: Arc<dyn CompletionClient>,
    prompts: PromptLibrary,
    corpus: Arc<String>,
}

impl AnswerRelay {
    pub fn new(
        oracle: Arc<dyn CompletionClient>,
        prompts: PromptLibrary,
        corpus: Arc<String>,
    ) -> Self {
        Self {
            oracle,
            prompts,
            corpus,
        }
    }

    /// Answers a student question against the corpus. With `augment`, the
    /// model may draw on trusted external sources and every well-formed
    /// URL in its answer is returned separately.
    pub async fn ask(&self, question: &str, augment: bool) -> Result<AskOutcome, TutorError> {
        let question = require(question, "question")?;

        let prompt = if augment {
            self.prompts.augmented_question(&self.corpus, question)
        } else {
            self.prompts.direct_question(&self.corpus, question)
        };

        let raw = self
            .oracle
            .complete(vec![ChatMessage::user(prompt)], DEFAULT_TEMPERATURE)
            .await?;

        let sources = augment.then(|| extract_sources(&raw));
        let answer = format!("{}\n\n{}", raw.trim(), attribution_footer(augment));
        info!(
            augment,
            sources = sources.as_ref().map(Vec::len).unwrap_or(0),
            "Answered direct question"
        );

        Ok(AskOutcome { answer, sources })
    }
}
