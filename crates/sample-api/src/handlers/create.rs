//! Create interaction handler.
//!
//! `POST /tasks` creates a task under its client-assigned id.

use axum::{
    Json,
    http::{StatusCode, header},
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{ApiJson, Authorized};
use crate::handlers::authority;
use crate::model::CreateTaskRequest;
use crate::routes::TASKS_PATH;
use crate::state::AppState;
use crate::store::StoreError;

/// Handler for `POST /tasks`.
///
/// # Response
///
/// - `201 Created` with a `Location` header pointing at the new instance
/// - `400 Bad Request` - body did not deserialize
/// - `400 Constraint Violation` - field rules failed
/// - `409 Conflict` - the id is already taken
pub async fn create_handler(
    State(state): State<AppState>,
    _auth: Authorized<authority::Create>,
    ApiJson(request): ApiJson<CreateTaskRequest>,
) -> ApiResult<Response> {
    request.validate()?;

    let created = state
        .store()
        .insert(request.into_task())
        .map_err(|err| match err {
            StoreError::DuplicateId(id) => ApiError::duplicate_id(&id),
            other => ApiError::internal(other.to_string()),
        })?;

    let location = format!("{}{}/{}", state.base_url(), TASKS_PATH, created.id);
    debug!(id = %created.id, "task created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    )
        .into_response())
}
