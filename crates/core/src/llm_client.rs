use crate::error::TutorError;
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use std::time::Duration;

/// Sampling temperature used for every completion issued by the service.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
}

/// A role-tagged message in a completion request.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// A generic client for a text-completion provider.
///
/// Failures are non-retryable within a single request and surface as
/// [`TutorError::Provider`]; the caller decides how to report them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends a role-tagged message list and returns the generated text.
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
    ) -> Result<String, TutorError>;
}

/// An implementation of [`CompletionClient`] for any OpenAI-compatible API.
///
/// The model identifier is part of the client, not the call; every call is
/// bounded by a wall-clock timeout so that a hung provider surfaces as a
/// `Provider` error instead of stalling the request.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The model identifier to use for chat completions (e.g., "gpt-4").
    /// * `timeout` - Upper bound on the wall-clock duration of one completion call.
    pub fn new(config: OpenAIConfig, model: String, timeout: Duration) -> Self {
        Self {
            client: Client::with_config(config),
            model,
            timeout,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAICompatibleClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
    ) -> Result<String, TutorError> {
        let messages = messages
            .into_iter()
            .map(|msg| match msg.role {
                ChatRole::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(msg.content)
                    .build()
                    .map(ChatCompletionRequestMessage::from),
                ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(msg.content)
                    .build()
                    .map(ChatCompletionRequestMessage::from),
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| TutorError::Provider {
                message: e.to_string(),
            })?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(temperature)
            .build()
            .map_err(|e| TutorError::Provider {
                message: e.to_string(),
            })?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| TutorError::Provider {
                message: format!(
                    "completion request timed out after {}s",
                    self.timeout.as_secs()
                ),
            })?
            .map_err(|e| TutorError::Provider {
                message: e.to_string(),
            })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| TutorError::Provider {
                message: "completion response had no text content".to_string(),
            })?;

        Ok(content.trim().to_string())
    }
}
