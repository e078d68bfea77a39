//! Patch interaction handler.
//!
//! `PATCH /tasks/{id}` applies an RFC 7386 merge patch to the mutable
//! fields of a task. The stored task is projected onto its update form,
//! merged with the patch document, re-validated and written back.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, ApiResult, Violation};
use crate::extractors::{ApiJson, Authorized};
use crate::handlers::authority;
use crate::model::{Task, UpdateTaskRequest};
use crate::state::AppState;
use crate::store::StoreError;

/// Handler for `PATCH /tasks/{id}`.
pub async fn patch_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: Authorized<authority::Patch>,
    ApiJson(patch): ApiJson<Value>,
) -> ApiResult<Json<Task>> {
    let current = state
        .store()
        .get(&id)
        .map_err(|_| ApiError::update_not_found(&id))?;

    let mut document = serde_json::to_value(UpdateTaskRequest::from_task(&current))
        .map_err(|err| ApiError::internal(err.to_string()))?;
    json_patch::merge(&mut document, &patch);

    // A null member in a merge patch removes the field, so a nulled required
    // field surfaces here as a missing key.
    let mut violations = Vec::new();
    for field in ["title", "priority"] {
        if document.get(field).is_none() {
            violations.push(Violation::new(field, "must not be null"));
        }
    }
    if !violations.is_empty() {
        return Err(violations.into());
    }

    let merged: UpdateTaskRequest = serde_json::from_value(document)?;
    merged.validate()?;

    let patched = state
        .store()
        .update_with(&id, None, |task| merged.apply_to(task))
        .map_err(|err| match err {
            StoreError::NotFound(_) => ApiError::update_not_found(&id),
            other => ApiError::internal(other.to_string()),
        })?;

    debug!(id = %patched.id, version = patched.version, "task patched");
    Ok(Json(patched))
}
