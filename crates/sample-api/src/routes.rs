//! Route table for the task service.
//!
//! | Method   | Path            | Handler            |
//! |----------|-----------------|--------------------|
//! | `GET`    | `/tasks`        | [`list_handler`]   |
//! | `POST`   | `/tasks`        | [`create_handler`] |
//! | `DELETE` | `/tasks`        | [`truncate_handler`] |
//! | `GET`    | `/tasks/{id}`   | [`read_handler`]   |
//! | `POST`   | `/tasks/{id}`   | [`update_handler`] |
//! | `PUT`    | `/tasks/{id}`   | [`upsert_handler`] |
//! | `PATCH`  | `/tasks/{id}`   | [`patch_handler`]  |
//! | `DELETE` | `/tasks/{id}`   | [`delete_handler`] |

use axum::{Router, routing::get};

use crate::handlers::{
    create_handler, delete_handler, list_handler, patch_handler, read_handler, truncate_handler,
    update_handler, upsert_handler,
};
use crate::state::AppState;

/// Path of the task collection.
pub const TASKS_PATH: &str = "/tasks";

/// Builds the application router with all task routes registered.
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route(
            TASKS_PATH,
            get(list_handler).post(create_handler).delete(truncate_handler),
        )
        .route(
            "/tasks/{id}",
            get(read_handler)
                .post(update_handler)
                .put(upsert_handler)
                .patch(patch_handler)
                .delete(delete_handler),
        )
        .with_state(state)
}
