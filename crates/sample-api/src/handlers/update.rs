//! Update interaction handler.
//!
//! `POST /tasks/{id}` replaces the mutable fields of a task. When the
//! `version` query parameter is present the update only applies if the
//! stored version matches, otherwise it fails with `409 Conflict`.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{ApiJson, ApiQuery, Authorized};
use crate::handlers::authority;
use crate::model::{Task, UpdateTaskRequest};
use crate::state::AppState;
use crate::store::StoreError;

/// Query parameters accepted by the update interaction.
#[derive(Debug, Deserialize)]
pub struct UpdateParams {
    /// Expected stored version for a conditional update.
    pub version: Option<u64>,
}

/// Handler for `POST /tasks/{id}`.
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: Authorized<authority::Update>,
    ApiQuery(params): ApiQuery<UpdateParams>,
    ApiJson(request): ApiJson<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    request.validate()?;

    let updated = state
        .store()
        .update_with(&id, params.version, |task| request.apply_to(task))
        .map_err(|err| match err {
            StoreError::NotFound(_) => ApiError::update_not_found(&id),
            StoreError::VersionMismatch { requested, .. } => {
                ApiError::optimistic_lock(&id, requested)
            }
            other => ApiError::internal(other.to_string()),
        })?;

    debug!(id = %updated.id, version = updated.version, "task updated");
    Ok(Json(updated))
}
