//! Truncate interaction handler.

use axum::{extract::State, http::StatusCode};
use tracing::debug;

use crate::error::ApiResult;
use crate::extractors::Authorized;
use crate::handlers::authority;
use crate::state::AppState;

/// Handler for `DELETE /tasks`.
///
/// Removes every task in the collection and returns `204 No Content`.
pub async fn truncate_handler(
    State(state): State<AppState>,
    _auth: Authorized<authority::Truncate>,
) -> ApiResult<StatusCode> {
    let removed = state.store().len();
    state.store().clear();

    debug!(removed, "collection truncated");
    Ok(StatusCode::NO_CONTENT)
}
