//! Web application server.
//!
//! Serves the transcript page and REST endpoints for transcripts,
//! summarization, and prompt template management.

use super::open_prompt_store;
use crate::cli::Output;
use crate::config::Settings;
use crate::error::SkriftError;
use crate::orchestrator::Orchestrator;
use crate::prompt_store::PromptStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

/// The embedded web page.
const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// Shared application state.
struct AppState {
    orchestrator: Orchestrator,
    prompt_store: Arc<dyn PromptStore>,
}

/// Run the web application server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let prompt_store = open_prompt_store(&settings)?;
    let orchestrator = Orchestrator::new(settings)?;

    let state = Arc::new(AppState {
        orchestrator,
        prompt_store,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/transcript", post(transcript))
        .route("/api/summarize", post(summarize))
        .route("/api/prompts", get(list_prompts).post(create_prompt))
        .route("/api/prompts/{id}", put(update_prompt).delete(delete_prompt))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Skrift Web Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Web UI", "GET    /");
    Output::kv("Health", "GET    /health");
    Output::kv("Transcript", "POST   /api/transcript");
    Output::kv("Summarize", "POST   /api/summarize");
    Output::kv("Prompts", "GET    /api/prompts");
    Output::kv("Add Prompt", "POST   /api/prompts");
    Output::kv("Edit Prompt", "PUT    /api/prompts/:id");
    Output::kv("Del Prompt", "DELETE /api/prompts/:id");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Map a pipeline error onto the HTTP status it should surface with.
fn error_status(err: &SkriftError) -> StatusCode {
    match err {
        SkriftError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        SkriftError::VideoNotFound(_)
        | SkriftError::CaptionsUnavailable
        | SkriftError::UnsupportedCaptionFormat
        | SkriftError::PromptNotFound(_) => StatusCode::NOT_FOUND,
        SkriftError::Unparseable => StatusCode::UNPROCESSABLE_ENTITY,
        SkriftError::OpenAI(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct TranscriptRequest {
    /// YouTube video URL
    url: String,
    /// Include [MM:SS] markers
    #[serde(default)]
    include_timestamps: bool,
}

#[derive(Serialize)]
struct TranscriptResponse {
    success: bool,
    video_id: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<u32>,
    transcript: String,
}

#[derive(Deserialize)]
struct SummarizeRequest {
    transcript: String,
    instruction: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Serialize)]
struct SummarizeResponse {
    summary: String,
    model: String,
}

#[derive(Deserialize)]
struct PromptRequest {
    name: String,
    text: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(err: SkriftError) -> axum::response::Response {
    (
        error_status(&err),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn transcript(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranscriptRequest>,
) -> impl IntoResponse {
    match state
        .orchestrator
        .transcript(&req.url, req.include_timestamps)
        .await
    {
        Ok(result) => Json(TranscriptResponse {
            success: true,
            video_id: result.video_id,
            title: result.title,
            channel: result.channel,
            duration: result.duration_seconds,
            transcript: result.transcript,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeRequest>,
) -> impl IntoResponse {
    let title = req.title.unwrap_or_default();
    let model = req
        .model
        .unwrap_or_else(|| state.orchestrator.settings().summarize.model.clone());

    match state
        .orchestrator
        .summarize(&title, &req.transcript, &req.instruction, Some(&model))
        .await
    {
        Ok(summary) => Json(SummarizeResponse { summary, model }).into_response(),
        Err(e) => error_response(e),
    }
}

async fn list_prompts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.prompt_store.list().await {
        Ok(templates) => Json(templates).into_response(),
        Err(e) => error_response(e),
    }
}

async fn create_prompt(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PromptRequest>,
) -> impl IntoResponse {
    match state.prompt_store.create(&req.name, &req.text).await {
        Ok(template) => (StatusCode::CREATED, Json(template)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn update_prompt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<PromptRequest>,
) -> impl IntoResponse {
    match state.prompt_store.update(id, &req.name, &req.text).await {
        Ok(template) => Json(template).into_response(),
        Err(e) => error_response(e),
    }
}

async fn delete_prompt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.prompt_store.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&SkriftError::InvalidInput("bad url".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&SkriftError::CaptionsUnavailable),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&SkriftError::Unparseable),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            error_status(&SkriftError::OpenAI("timeout".to_string())),
            StatusCode::BAD_GATEWAY
        );
    }
}
