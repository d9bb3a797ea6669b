//! `/health`: liveness plus a few numbers worth watching
//!
//! Reports `degraded` when no questions are loaded, since every add would
//! then land at the origin.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

const MODULE_NAME: &str = "compass-ai";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`
    pub status: String,
    pub module: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Size of the question table in use
    pub questions: usize,
    /// Most recent model or storage failure, omitted until one happens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

fn service_status(questions: usize) -> &'static str {
    if questions == 0 {
        "degraded"
    } else {
        "ok"
    }
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let questions = state.pipeline.questions().len();
    let uptime_seconds = Utc::now()
        .signed_duration_since(state.startup_time)
        .num_seconds()
        .max(0) as u64;

    Json(HealthResponse {
        status: service_status(questions).to_string(),
        module: MODULE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        questions,
        last_error: state.last_error.read().await.clone(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
