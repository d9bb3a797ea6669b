//! People listing and manual add

use axum::{body::Bytes, extract::State, Json};

use crate::db::people;
use crate::error::{ApiError, ApiResult};
use crate::models::{NewPerson, Person};
use crate::services::pipeline::DUPLICATE_MESSAGE;
use crate::services::StoreError;
use crate::AppState;

/// GET /api/people
pub async fn list_people(State(state): State<AppState>) -> ApiResult<Json<Vec<Person>>> {
    match people::list_people(&state.db).await {
        Ok(people) => Ok(Json(people)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list people");
            state.record_error(&e).await;
            Err(ApiError::Internal("Failed to fetch people".to_string()))
        }
    }
}

/// POST /api/people
///
/// Stores a person with caller-supplied coordinates; no model calls. The
/// body is read as JSON whatever its content type.
pub async fn add_person(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Person>> {
    let record = serde_json::from_slice::<NewPerson>(&body)
        .ok()
        .and_then(NewPerson::into_record)
        .ok_or_else(|| ApiError::BadRequest("Invalid data".to_string()))?;

    match people::insert_person(&state.db, &record).await {
        Ok(person) => {
            tracing::info!(id = person.id, name = %person.name, "Person added manually");
            Ok(Json(person))
        }
        Err(StoreError::Duplicate(_)) => Err(ApiError::Conflict(DUPLICATE_MESSAGE.to_string())),
        Err(e) => {
            tracing::error!(error = %e, "Failed to add person");
            state.record_error(&e).await;
            Err(ApiError::Internal("Failed to add person".to_string()))
        }
    }
}
