use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use alphabet_core::LookupError;
use tts_core::TtsError;

/// Message returned for every synthesis failure; the detail only goes to the log.
pub const SYNTHESIS_FAILURE_MESSAGE: &str = "Erreur interne du serveur lors de la synthèse vocale.";

/// API Error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    NotFound(#[from] LookupError),

    #[error("{0}")]
    UnsupportedLanguage(String),

    #[error("speech synthesis failed: {0}")]
    SynthesisFailure(TtsError),
}

impl From<TtsError> for ApiError {
    fn from(e: TtsError) -> Self {
        if e.is_client_error() {
            ApiError::UnsupportedLanguage(e.to_string())
        } else {
            ApiError::SynthesisFailure(e)
        }
    }
}

/// Error response structure
#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(e) => (StatusCode::NOT_FOUND, e.to_string()),
            ApiError::UnsupportedLanguage(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::SynthesisFailure(e) => {
                tracing::error!("Speech synthesis failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SYNTHESIS_FAILURE_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
