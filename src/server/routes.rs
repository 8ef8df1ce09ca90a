//! API routes for the Pulse server
//!
//! `POST /v1/session` runs one reasoning session; `GET /v1/health`
//! reports liveness.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use crate::agent::{Orchestrator, SessionStatus};
use crate::core::Transcript;

/// Application state shared across handlers
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub default_goal: String,
}

type AppStateArc = Arc<AppState>;

/// Build the application router
pub fn router(state: AppStateArc) -> Router {
    Router::new()
        .route("/v1/session", post(run_session))
        .route("/v1/health", get(health))
        .with_state(state)
}

/// Inbound session request; the goal is optional
#[derive(Debug, Default, Deserialize)]
pub struct SessionRequest {
    #[serde(default)]
    pub goal: Option<String>,
}

/// Session outcome returned to the caller.
///
/// The conversation is always present, even when persistence failed;
/// `result` is absent when the round ceiling stopped the loop.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub conversation: Transcript,
}

/// Structured error body for inference faults
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn run_session(
    State(state): State<AppStateArc>,
    body: Option<Json<SessionRequest>>,
) -> Result<Json<SessionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let goal = body
        .and_then(|Json(request)| request.goal)
        .unwrap_or_else(|| state.default_goal.clone());

    match state.orchestrator.run(&goal).await {
        Ok(outcome) => Ok(Json(SessionResponse {
            session_id: outcome.session_id,
            status: outcome.status,
            result: outcome.result,
            conversation: outcome.transcript,
        })),
        Err(e) => {
            error!(error = %e, "session failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                    detail: format!("{e:?}"),
                }),
            ))
        }
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
