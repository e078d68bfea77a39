//! Read interaction handler.

use axum::{Json, extract::Path, extract::State};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::extractors::Authorized;
use crate::handlers::authority;
use crate::model::Task;
use crate::state::AppState;

/// Handler for `GET /tasks/{id}`.
///
/// Returns the stored task, or a `404` problem when the id is unknown.
pub async fn read_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: Authorized<authority::Get>,
) -> ApiResult<Json<Task>> {
    let task = state
        .store()
        .get(&id)
        .map_err(|_| ApiError::read_not_found(&id))?;

    debug!(id = %task.id, version = task.version, "task read");
    Ok(Json(task))
}
