//! HTTP API handlers for compass-ai
//!
//! - `GET  /api/people`                 list people
//! - `POST /api/people`                 manual add
//! - `POST /api/people/ai-add`          buffered AI add
//! - `POST /api/people/ai-add-stream`   streaming AI add (SSE)
//! - `GET  /health`

pub mod ai_add;
pub mod health;
pub mod people;

pub use health::health_routes;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Build people routes
pub fn people_routes() -> Router<AppState> {
    Router::new()
        .route("/api/people", get(people::list_people).post(people::add_person))
        .route("/api/people/ai-add", post(ai_add::ai_add))
        .route("/api/people/ai-add-stream", post(ai_add::ai_add_stream))
}
