//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API and the OpenAPI documentation.

use crate::{
    handlers,
    models::{
        AnswerReviewPayload, AnswerReviewResponse, AskPayload, AskResponse, EndReviewPayload,
        EndReviewResponse, ErrorResponse, HealthResponse, StartReviewPayload, StartReviewResponse,
    },
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::ask,
        handlers::start_review,
        handlers::answer_review,
        handlers::end_review,
        handlers::health,
    ),
    components(
        schemas(
            AskPayload,
            AskResponse,
            StartReviewPayload,
            StartReviewResponse,
            AnswerReviewPayload,
            AnswerReviewResponse,
            EndReviewPayload,
            EndReviewResponse,
            HealthResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "Aula API", description = "Question answering and review sessions over the teacher's material")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/api/ask", post(handlers::ask))
        .route("/api/review/start", post(handlers::start_review))
        .route("/api/review/answer", post(handlers::answer_review))
        .route("/api/review/end", post(handlers::end_review))
        .route("/health", get(handlers::health))
        // Apply the state ONLY to this group of routes.
        .with_state(app_state);

    // Create the final router that merges the stateful routes
    // with the stateless routes (like Swagger UI).
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
