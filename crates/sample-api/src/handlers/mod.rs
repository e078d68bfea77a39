//! HTTP request handlers for the task API.
//!
//! One module per interaction:
//!
//! - [`list`] - List tasks with cursor pagination
//! - [`create`] - Create a task under its client-assigned id
//! - [`read`] - Read a task by id
//! - [`update`] - Replace a task's mutable fields, optionally version-checked
//! - [`patch`] - Apply an RFC 7386 merge document
//! - [`delete`] - Delete a task, returning the removed body
//! - [`upsert`] - Create or replace at a known id
//! - [`truncate`] - Empty the whole collection

pub mod create;
pub mod delete;
pub mod list;
pub mod patch;
pub mod read;
pub mod truncate;
pub mod update;
pub mod upsert;

// Re-export handlers for convenience
pub use create::create_handler;
pub use delete::delete_handler;
pub use list::list_handler;
pub use patch::patch_handler;
pub use read::read_handler;
pub use truncate::truncate_handler;
pub use update::update_handler;
pub use upsert::upsert_handler;

/// Authority demanded by each route, enforced by the [`Authorized`]
/// extractor before anything else about the request is processed. The `ROOT`
/// role implies all of them.
///
/// [`Authorized`]: crate::extractors::Authorized
pub mod authority {
    use crate::extractors::Authority;

    /// List the collection.
    pub struct List;
    impl Authority for List {
        const NAME: &'static str = "tasks:list";
    }

    /// Create a task.
    pub struct Create;
    impl Authority for Create {
        const NAME: &'static str = "tasks:create";
    }

    /// Read a single task.
    pub struct Get;
    impl Authority for Get {
        const NAME: &'static str = "tasks:get";
    }

    /// Update a task.
    pub struct Update;
    impl Authority for Update {
        const NAME: &'static str = "tasks:update";
    }

    /// Merge-patch a task.
    pub struct Patch;
    impl Authority for Patch {
        const NAME: &'static str = "tasks:patch";
    }

    /// Delete a task.
    pub struct Delete;
    impl Authority for Delete {
        const NAME: &'static str = "tasks:delete";
    }

    /// Create or replace a task at a known id.
    pub struct Upsert;
    impl Authority for Upsert {
        const NAME: &'static str = "tasks:upsert";
    }

    /// Empty the collection.
    pub struct Truncate;
    impl Authority for Truncate {
        const NAME: &'static str = "tasks:truncate";
    }
}
