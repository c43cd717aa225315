//! HTTP surface for Textsum.
//!
//! This module exposes a compact Axum router with two endpoints:
//!
//! - `POST /api/summarize` – Sanitize and chunk raw text, run the abstractive model over
//!   each chunk in order, and return the concatenated summary as `{ "summary": ... }`.
//! - `GET /metrics` – Observe request counters and the last chunk count.
//!
//! Cross-origin requests are permitted from any origin so browser frontends can call the
//! API directly. Validation failures use a stable JSON error shape: missing or malformed
//! bodies yield `{"error": "No text provided"}`, undersized text yields
//! `{"error": "Text too short"}`, both with status 400. Model failures surface as a
//! structured 500 instead of the framework default.

use crate::metrics::MetricsSnapshot;
use crate::processing::{PipelineError, SummarizeApi};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Build the HTTP router exposing the summarization API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: SummarizeApi + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/summarize", post(summarize_text::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .layer(cors)
        .with_state(service)
}

/// Request body for the `POST /api/summarize` endpoint.
#[derive(Deserialize)]
struct SummarizeRequest {
    /// Raw text to summarize.
    #[serde(default)]
    text: Option<String>,
}

/// Success response for the `POST /api/summarize` endpoint.
#[derive(Serialize)]
struct SummarizeResponse {
    /// Concatenated per-chunk abstractive summary.
    summary: String,
}

/// Summarize raw text.
///
/// Absent, malformed, and `text`-less JSON bodies all map to the same `No text provided`
/// error so browser callers get one stable failure shape.
async fn summarize_text<S>(
    State(service): State<Arc<S>>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, AppError>
where
    S: SummarizeApi,
{
    let Ok(Json(request)) = payload else {
        return Err(AppError::MissingInput);
    };
    let Some(text) = request.text else {
        return Err(AppError::MissingInput);
    };

    let request_id = uuid::Uuid::new_v4();
    let outcome = service.summarize(text).await?;
    tracing::info!(
        %request_id,
        chunks = outcome.chunk_count,
        "Summarize request completed"
    );
    Ok(Json(SummarizeResponse {
        summary: outcome.summary,
    }))
}

/// Return a concise metrics snapshot with request and chunk counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: SummarizeApi,
{
    Json(service.metrics_snapshot())
}

enum AppError {
    MissingInput,
    TextTooShort,
    Model(PipelineError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingInput => (StatusCode::BAD_REQUEST, "No text provided".to_string()),
            Self::TextTooShort => (StatusCode::BAD_REQUEST, "Text too short".to_string()),
            Self::Model(error) => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(inner: PipelineError) -> Self {
        match inner {
            PipelineError::TextTooShort => Self::TextTooShort,
            other => Self::Model(other),
        }
    }
}
