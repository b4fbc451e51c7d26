//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling HTTP requests. It uses
//! `utoipa` doc comments to generate OpenAPI documentation. Handlers stay
//! thin: parameter unwrapping and status mapping here, domain logic in
//! `aula-core`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use aula_core::error::TutorError;
use std::sync::Arc;
use tracing::error;

use crate::{
    models::{
        AnswerReviewPayload, AnswerReviewResponse, AskPayload, AskResponse, EndReviewPayload,
        EndReviewResponse, ErrorResponse, HealthResponse, StartReviewPayload, StartReviewResponse,
    },
    state::AppState,
};

pub enum ApiError {
    /// Caller mistake: missing parameter or no active session.
    BadRequest {
        code: &'static str,
        message: String,
    },
    /// Infrastructure failure: corpus storage or the completion provider.
    Internal {
        code: &'static str,
        message: String,
    },
}

impl From<TutorError> for ApiError {
    fn from(err: TutorError) -> Self {
        let code = err.code();
        match err {
            TutorError::MissingParameter(_) | TutorError::NoActiveSession(_) => {
                ApiError::BadRequest {
                    code,
                    message: err.to_string(),
                }
            }
            TutorError::StorageAccess { .. } | TutorError::Provider { .. } => ApiError::Internal {
                code,
                message: err.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest { code, message } => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: code.to_string(),
                    message,
                }),
            )
                .into_response(),
            ApiError::Internal { code, message } => {
                error!(code, %message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: code.to_string(),
                        message,
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Answer a direct student question against the teaching corpus.
#[utoipa::path(
    post,
    path = "/api/ask",
    request_body = AskPayload,
    responses(
        (status = 200, description = "Shaped answer, with cited links when augmentation was requested", body = AskResponse),
        (status = 400, description = "Missing question", body = ErrorResponse),
        (status = 500, description = "Completion provider failure", body = ErrorResponse)
    )
)]
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AskPayload>,
) -> Result<Json<AskResponse>, ApiError> {
    let question = payload.question.as_deref().unwrap_or_default();
    let outcome = state.relay.ask(question, payload.augment).await?;
    Ok(Json(AskResponse {
        answer: outcome.answer,
        sources: outcome.sources,
    }))
}

/// Start (or restart) a review session for a user on a topic.
#[utoipa::path(
    post,
    path = "/api/review/start",
    request_body = StartReviewPayload,
    responses(
        (status = 200, description = "First review question and its provenance label", body = StartReviewResponse),
        (status = 400, description = "Missing userId or topic", body = ErrorResponse),
        (status = 500, description = "Completion provider failure", body = ErrorResponse)
    )
)]
pub async fn start_review(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<StartReviewPayload>,
) -> Result<Json<StartReviewResponse>, ApiError> {
    let user_id = payload.user_id.as_deref().unwrap_or_default();
    let topic = payload.topic.as_deref().unwrap_or_default();
    let start = state.engine.start_review(user_id, topic).await?;
    Ok(Json(StartReviewResponse {
        question: start.question,
        info_source: start.info_source,
    }))
}

/// Grade the student's answer and pose the next review question.
#[utoipa::path(
    post,
    path = "/api/review/answer",
    request_body = AnswerReviewPayload,
    responses(
        (status = 200, description = "Correction plus the next question", body = AnswerReviewResponse),
        (status = 400, description = "Missing field or no active session", body = ErrorResponse),
        (status = 500, description = "Completion provider failure", body = ErrorResponse)
    )
)]
pub async fn answer_review(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnswerReviewPayload>,
) -> Result<Json<AnswerReviewResponse>, ApiError> {
    let user_id = payload.user_id.as_deref().unwrap_or_default();
    let answer = payload.answer.as_deref().unwrap_or_default();
    let turn = state.engine.answer_review(user_id, answer).await?;
    Ok(Json(AnswerReviewResponse {
        correction: turn.correction,
        next_question: turn.next_question,
        info_source_next: turn.info_source_next,
    }))
}

/// Close a user's active review session.
#[utoipa::path(
    post,
    path = "/api/review/end",
    request_body = EndReviewPayload,
    responses(
        (status = 200, description = "Session closed", body = EndReviewResponse),
        (status = 400, description = "Missing userId or no active session", body = ErrorResponse)
    )
)]
pub async fn end_review(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EndReviewPayload>,
) -> Result<Json<EndReviewResponse>, ApiError> {
    let user_id = payload.user_id.as_deref().unwrap_or_default();
    let closed = state.engine.end_review(user_id).await?;
    Ok(Json(EndReviewResponse {
        user_id: closed.user_id,
        topic: closed.topic,
        ended: true,
    }))
}

/// Liveness check; responds even when no API credential is configured.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
