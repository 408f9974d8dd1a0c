//! HTTP front end.
//!
//! Exposes the reply policy as a small JSON API so any chat transport (or
//! a browser) can drive the search pipeline.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/search` | Direct reply for `{ "query": "..." }` |
//! | `POST` | `/inline` | Inline answer for `{ "query": "..." }` |
//! | `GET`  | `/help` | Introduction text; optional `?name=` |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "query must not be empty" } }
//! ```
//!
//! A blank query is a `400 bad_request`. Search failures are not HTTP
//! errors; they come back as the regular notice reply.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use github_repos_core::gateway::SearchGateway;
use github_repos_core::render::InlineAnswer;

use crate::config::Config;
use crate::github::GitHubClient;
use crate::intro::introduction_text;
use crate::reply::{answer_inline, answer_message, MessageReply};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    gateway: Arc<dyn SearchGateway>,
}

/// Build the router over any gateway.
pub fn router(gateway: Arc<dyn SearchGateway>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search", post(handle_search))
        .route("/inline", post(handle_inline))
        .route("/help", get(handle_help))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(AppState { gateway })
}

/// Starts the HTTP server on `[server].bind` with the GitHub gateway.
///
/// Runs until ctrl-c, then releases the GitHub session.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let github = Arc::new(GitHubClient::new(&config.github));
    let app = router(github.clone());

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::warn!("Server stopped");
    github.close();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

// ============ POST /search, POST /inline ============

#[derive(Deserialize)]
struct QueryRequest {
    query: String,
}

fn blank_query() -> AppError {
    bad_request("query must not be empty")
}

async fn handle_search(
    State(state): State<AppState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<MessageReply>, AppError> {
    let Json(req) = body?;
    answer_message(state.gateway.as_ref(), &req.query)
        .await
        .map(Json)
        .ok_or_else(blank_query)
}

async fn handle_inline(
    State(state): State<AppState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<InlineAnswer>, AppError> {
    let Json(req) = body?;
    answer_inline(state.gateway.as_ref(), &req.query)
        .await
        .map(Json)
        .ok_or_else(blank_query)
}

// ============ GET /help ============

#[derive(Deserialize)]
struct HelpParams {
    name: Option<String>,
}

#[derive(Serialize)]
struct HelpResponse {
    text: String,
}

async fn handle_help(Query(params): Query<HelpParams>) -> Json<HelpResponse> {
    let name = params.name.as_deref().unwrap_or("there");
    Json(HelpResponse {
        text: introduction_text(name),
    })
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
