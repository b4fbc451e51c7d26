//! API Request/Response Models
//!
//! Wire-level payloads for the service. Review fields use camelCase on the
//! wire (`userId`, `infoSource`, ...) to match the established client
//! contract. Required string fields are `Option`s so that an absent field
//! and an empty field both map to the service's own 400 taxonomy instead
//! of a deserialization rejection.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct AskPayload {
    #[schema(example = "¿Qué es la resistencia eléctrica?")]
    pub question: Option<String>,
    /// When true, the model may draw on trusted external sources and the
    /// response carries the extracted links.
    #[serde(default)]
    pub augment: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct AskResponse {
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartReviewPayload {
    #[schema(example = "alumno-42")]
    pub user_id: Option<String>,
    #[schema(example = "resistencia")]
    pub topic: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StartReviewResponse {
    pub question: String,
    #[schema(example = "Material provisto por el Profesor")]
    pub info_source: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerReviewPayload {
    pub user_id: Option<String>,
    pub answer: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AnswerReviewResponse {
    pub correction: String,
    pub next_question: String,
    pub info_source_next: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndReviewPayload {
    pub user_id: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EndReviewResponse {
    pub user_id: String,
    pub topic: String,
    pub ended: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

/// Error body: `error` is a short machine-readable code, `message` a
/// human-readable explanation that never carries provider stack traces.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorResponse {
    #[schema(example = "missing_parameter")]
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_payload_defaults_augment_to_false() {
        let payload: AskPayload =
            serde_json::from_str(r#"{"question": "¿Qué es la resistencia?"}"#).unwrap();
        assert_eq!(payload.question.as_deref(), Some("¿Qué es la resistencia?"));
        assert!(!payload.augment);
    }

    #[test]
    fn test_ask_payload_accepts_missing_question() {
        // The handler, not serde, turns this into a 400.
        let payload: AskPayload = serde_json::from_str(r#"{"augment": true}"#).unwrap();
        assert!(payload.question.is_none());
        assert!(payload.augment);
    }

    #[test]
    fn test_ask_response_omits_absent_sources() {
        let without = AskResponse {
            answer: "respuesta".to_string(),
            sources: None,
        };
        assert_eq!(
            serde_json::to_string(&without).unwrap(),
            r#"{"answer":"respuesta"}"#
        );

        let with = AskResponse {
            answer: "respuesta".to_string(),
            sources: Some(vec!["https://es.wikipedia.org/wiki/Resistencia".to_string()]),
        };
        let json = serde_json::to_string(&with).unwrap();
        assert!(json.contains("https://es.wikipedia.org/wiki/Resistencia"));
    }

    #[test]
    fn test_review_payloads_use_camel_case() {
        let start: StartReviewPayload =
            serde_json::from_str(r#"{"userId": "u1", "topic": "resistencia"}"#).unwrap();
        assert_eq!(start.user_id.as_deref(), Some("u1"));
        assert_eq!(start.topic.as_deref(), Some("resistencia"));

        let answer: AnswerReviewPayload =
            serde_json::from_str(r#"{"userId": "u1", "answer": "es la oposición"}"#).unwrap();
        assert_eq!(answer.user_id.as_deref(), Some("u1"));
        assert_eq!(answer.answer.as_deref(), Some("es la oposición"));
    }

    #[test]
    fn test_review_responses_use_camel_case() {
        let start = StartReviewResponse {
            question: "¿Qué es?".to_string(),
            info_source: "Material provisto por el Profesor".to_string(),
        };
        let json = serde_json::to_string(&start).unwrap();
        assert!(json.contains("\"infoSource\""));

        let turn = AnswerReviewResponse {
            correction: "Bien".to_string(),
            next_question: "¿Y ahora?".to_string(),
            info_source_next: "Fuentes externas de confianza".to_string(),
        };
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"nextQuestion\""));
        assert!(json.contains("\"infoSourceNext\""));

        let end = EndReviewResponse {
            user_id: "u1".to_string(),
            topic: "resistencia".to_string(),
            ended: true,
        };
        let json = serde_json::to_string(&end).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"ended\":true"));
    }

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse {
            error: "no_active_session".to_string(),
            message: "No hay una sesión de repaso activa para el usuario 'u1'".to_string(),
        };

        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"error\":\"no_active_session\""));
        assert!(json.contains("sesión de repaso"));
    }
}
