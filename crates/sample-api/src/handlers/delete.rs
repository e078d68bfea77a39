//! Delete interaction handler.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::extractors::Authorized;
use crate::handlers::authority;
use crate::model::Task;
use crate::state::AppState;

/// Handler for `DELETE /tasks/{id}`.
///
/// Removes the task and returns its last stored state in the body.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: Authorized<authority::Delete>,
) -> ApiResult<Json<Task>> {
    let removed = state
        .store()
        .remove(&id)
        .map_err(|_| ApiError::delete_not_found(&id))?;

    debug!(id = %removed.id, "task deleted");
    Ok(Json(removed))
}
