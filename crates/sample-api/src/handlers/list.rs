//! List interaction handler.
//!
//! `GET /tasks` returns one page of tasks in id order. Pages are linked by an
//! opaque cursor: the response's `chunk.pagination_token` is present exactly
//! when further elements remain, and feeding it back as `next` resumes after
//! the last returned element.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{ApiQuery, Authorized};
use crate::handlers::authority;
use crate::model::ListResponse;
use crate::state::AppState;
use crate::store::PageCursor;

/// Query parameters for the list interaction.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Requested page size; clamped to `1..=max_page_size`.
    pub size: Option<usize>,

    /// Cursor from the previous page's `pagination_token`.
    pub next: Option<String>,
}

/// Handler for `GET /tasks`.
pub async fn list_handler(
    State(state): State<AppState>,
    _auth: Authorized<authority::List>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<ListResponse>> {
    let size = params
        .size
        .unwrap_or(state.default_page_size())
        .clamp(1, state.max_page_size());

    let after = match &params.next {
        Some(raw) => {
            let cursor = PageCursor::decode(raw).map_err(|err| {
                ApiError::bad_request(format!("Invalid pagination token: {err}"))
            })?;
            Some(cursor.last_id().to_string())
        }
        None => None,
    };

    let (elements, next_id) = state.store().page(after.as_deref(), size);
    debug!(
        size,
        returned = elements.len(),
        has_more = next_id.is_some(),
        "listing tasks"
    );

    let token = next_id.map(|id| PageCursor::new(id).encode());
    Ok(Json(ListResponse::new(elements, token)))
}
