pub mod config;
pub mod error;

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

use alphabet_core::{AlphabetTable, LetterEntry};
use tts_core::{SpeechGateway, SynthesisRequest};

use crate::config::ServerConfig;
use crate::error::ApiError;

const AUDIO_DISPOSITION: &str = "inline; filename=\"speech.mp3\"";

#[derive(Clone)]
pub struct AppState {
    pub alphabet: Arc<AlphabetTable>,
    pub speech: Arc<SpeechGateway>,
}

/// Assemble routes and middleware. Every route is served at the root and under `/api`.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(cors_layer(config))
        .into_inner();

    let api = Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/lettre/{letter}", get(get_letter))
        .route("/lettre/{letter}/{language}", get(get_letter_in_language))
        .route("/generate_audio/{language_code}/{*text}", get(generate_audio));

    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .layer(axum::middleware::from_fn(add_request_id))
        .layer(middleware_stack)
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any)
        .allow_credentials(false);

    match config.cors_allowed_origins {
        Some(ref allowed_origins) => {
            let origins: Vec<HeaderValue> = allowed_origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ALLOWED_ORIGINS is empty, falling back to permissive CORS");
                base.allow_origin(tower_http::cors::Any)
            } else {
                info!("CORS configured for {} origin(s)", origins.len());
                base.allow_origin(tower_http::cors::AllowOrigin::list(origins))
            }
        }
        None => {
            warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (development mode)");
            base.allow_origin(tower_http::cors::Any)
        }
    }
}

// Request ID middleware for tracing
async fn add_request_id(mut request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let header_value = HeaderValue::from_str(&request_id).ok();
    if let Some(ref value) = header_value {
        request.headers_mut().insert("x-request-id", value.clone());
    }
    let mut response = next.run(request).await;
    if let Some(value) = header_value {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

pub async fn health_check() -> &'static str {
    "ok"
}

/// `GET /lettre/{letter}`: the letter in every language, in table order.
pub async fn get_letter(
    State(state): State<AppState>,
    Path(letter): Path<String>,
) -> Result<Json<Vec<LetterEntry>>, ApiError> {
    let entries = state.alphabet.get_letter(&letter)?;
    Ok(Json(entries.to_vec()))
}

/// `GET /lettre/{letter}/{language}`
pub async fn get_letter_in_language(
    State(state): State<AppState>,
    Path((letter, language)): Path<(String, String)>,
) -> Result<Json<LetterEntry>, ApiError> {
    let entry = state.alphabet.get_letter_in(&letter, &language)?;
    Ok(Json(entry.clone()))
}

/// `GET /generate_audio/{language_code}/{*text}`
///
/// The language is checked before the provider is called. The temporary
/// file behind the body is removed once the body is fully sent or dropped,
/// and on every error path before that.
pub async fn generate_audio(
    State(state): State<AppState>,
    Path((language_code, text)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let request = SynthesisRequest::new(&language_code, &text).inspect_err(|e| {
        warn!("Rejected audio request: {e}");
    })?;

    let artifact = state.speech.synthesize(&request).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(artifact.mime_type()));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(artifact.len()));
    headers.insert(header::CONTENT_DISPOSITION, HeaderValue::from_static(AUDIO_DISPOSITION));

    info!(
        language = %request.language(),
        bytes = artifact.len(),
        "streaming synthesized audio"
    );
    let body = Body::from_stream(artifact.into_stream());

    Ok((StatusCode::OK, headers, body).into_response())
}
