use std::path::PathBuf;

/// The error taxonomy for the tutoring service.
///
/// The first two variants are caller mistakes (400-class at the HTTP
/// boundary); the last two are infrastructure failures (500-class).
#[derive(Debug, thiserror::Error)]
pub enum TutorError {
    #[error("Falta el parámetro obligatorio: {0}")]
    MissingParameter(&'static str),

    #[error("No hay una sesión de repaso activa para el usuario '{0}'")]
    NoActiveSession(String),

    #[error("No se puede acceder al material de entrenamiento en {path}: {source}")]
    StorageAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Falló el servicio de generación de texto: {message}")]
    Provider { message: String },
}

impl TutorError {
    /// Short machine-readable code carried in API error bodies, distinct
    /// from the human-readable message.
    pub fn code(&self) -> &'static str {
        match self {
            TutorError::MissingParameter(_) => "missing_parameter",
            TutorError::NoActiveSession(_) => "no_active_session",
            TutorError::StorageAccess { .. } => "storage_error",
            TutorError::Provider { .. } => "provider_error",
        }
    }
}

/// Validates that a caller-supplied field is present and non-blank.
pub(crate) fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, TutorError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(TutorError::MissingParameter(field))
    } else {
        Ok(trimmed)
    }
}
