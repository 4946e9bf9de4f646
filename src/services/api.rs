//! HTTP routes.

use crate::core::models::{CharactersRequest, CharactersResponse, ErrorBody};
use crate::services::characters::{CharacterGenerator, GenerationError};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub struct AppState {
    pub generator: CharacterGenerator,
}

impl AppState {
    pub fn new(generator: CharacterGenerator) -> Arc<Self> {
        Arc::new(Self { generator })
    }
}

/// Create all HTTP routes.
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/characters", post(create_characters))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn create_characters(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CharactersRequest>, JsonRejection>,
) -> Result<Json<CharactersResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let category = request.category.unwrap_or_default();

    if state.generator.config().fallback {
        let generation = state.generator.generate(&category).await?;
        let warning = generation.warning().map(str::to_string);
        return Ok(Json(CharactersResponse {
            characters: generation.records,
            warning,
        }));
    }

    let characters = state.generator.request(&category).await?;
    Ok(Json(CharactersResponse {
        characters,
        warning: None,
    }))
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::MissingCategory => ApiError::BadRequest(e.to_string()),
            other => {
                log::error!("Error generating characters: {}", other);
                ApiError::Internal("Failed to generate characters".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}
