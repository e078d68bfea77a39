//! Task resource model and request validation.
//!
//! The wire model is deliberately small: a task has a client-assigned
//! identifier, a title, an optional description, a priority, and a
//! server-managed version number used for optimistic locking.
//!
//! # Validation Rules
//!
//! | Field | Rule |
//! |-------|------|
//! | `id` | must match `[a-z0-9][a-z0-9-]{0,63}` |
//! | `title` | must not be blank, at most 64 characters |
//! | `priority` | between 1 and 9 inclusive |
//!
//! Rule failures surface as [`Violation`] entries in a constraint-violation
//! response; a body that does not deserialize at all (for example a missing
//! required field) is rejected before validation runs.

use restcheck_conformance::Identified;
use serde::{Deserialize, Serialize};

use crate::error::Violation;

/// Longest permitted task identifier, in bytes.
pub const ID_MAX_LEN: usize = 64;

/// Longest permitted title, in characters.
pub const TITLE_MAX_LEN: usize = 64;

/// Lowest permitted priority.
pub const PRIORITY_MIN: u8 = 1;

/// Highest permitted priority.
pub const PRIORITY_MAX: u8 = 9;

/// Priority assigned when a create request omits one.
pub const DEFAULT_PRIORITY: u8 = 5;

/// A task resource as stored and returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Client-assigned identifier.
    pub id: String,

    /// Short human-readable title.
    pub title: String,

    /// Optional free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Priority from 1 (highest) to 9 (lowest).
    pub priority: u8,

    /// Version number, starting at 0 and incremented on every update.
    pub version: u64,
}

impl Task {
    /// Creates a fresh task at version 0.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: Option<String>,
        priority: u8,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description,
            priority,
            version: 0,
        }
    }
}

impl Identified for Task {
    fn id(&self) -> Option<String> {
        Some(self.id.clone())
    }
}

/// Body of `POST /tasks` and `PUT /tasks/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    /// Client-assigned identifier.
    pub id: String,

    /// Title for the new task.
    pub title: String,

    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,

    /// Optional priority; defaults to [`DEFAULT_PRIORITY`].
    #[serde(default)]
    pub priority: Option<u8>,
}

impl CreateTaskRequest {
    /// Checks all field rules, collecting every violation.
    pub fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        violations.extend(validate_id(&self.id));
        violations.extend(validate_title(&self.title));
        if let Some(priority) = self.priority {
            violations.extend(validate_priority(priority));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Consumes the request and builds the task to store.
    pub fn into_task(self) -> Task {
        Task::new(
            self.id,
            self.title,
            self.description,
            self.priority.unwrap_or(DEFAULT_PRIORITY),
        )
    }
}

/// Body of `POST /tasks/{id}` and the shape a merge patch must resolve to.
///
/// An update replaces the mutable fields wholesale: omitting `description`
/// clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    /// Replacement title.
    pub title: String,

    /// Replacement description; absent means cleared.
    #[serde(default)]
    pub description: Option<String>,

    /// Replacement priority.
    pub priority: u8,
}

impl UpdateTaskRequest {
    /// Checks all field rules, collecting every violation.
    pub fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        violations.extend(validate_title(&self.title));
        violations.extend(validate_priority(self.priority));
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Projects the mutable fields of an existing task, the document a merge
    /// patch is applied to.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
        }
    }

    /// Writes the replacement fields into `task`.
    pub fn apply_to(self, task: &mut Task) {
        task.title = self.title;
        task.description = self.description;
        task.priority = self.priority;
    }
}

/// Validates a task identifier.
pub fn validate_id(id: &str) -> Option<Violation> {
    let mut chars = id.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_lowercase() || first.is_ascii_digit() => {
            id.len() <= ID_MAX_LEN
                && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        }
        _ => false,
    };
    if valid {
        None
    } else {
        Some(Violation::new("id", "must match [a-z0-9][a-z0-9-]{0,63}"))
    }
}

/// Validates a task title.
pub fn validate_title(title: &str) -> Option<Violation> {
    if title.trim().is_empty() {
        Some(Violation::new("title", "must not be blank"))
    } else if title.chars().count() > TITLE_MAX_LEN {
        Some(Violation::new(
            "title",
            "must be at most 64 characters long",
        ))
    } else {
        None
    }
}

/// Validates a task priority.
pub fn validate_priority(priority: u8) -> Option<Violation> {
    if (PRIORITY_MIN..=PRIORITY_MAX).contains(&priority) {
        None
    } else {
        Some(Violation::new("priority", "must be between 1 and 9"))
    }
}

/// Page metadata returned alongside list elements.
#[derive(Debug, Serialize)]
pub struct ChunkMeta {
    /// Number of elements on this page.
    pub size: usize,

    /// Cursor for the next page; absent on the final page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination_token: Option<String>,
}

/// Envelope for list elements.
#[derive(Debug, Serialize)]
pub struct Embedded {
    /// The elements on this page.
    pub elements: Vec<Task>,
}

/// Response body of `GET /tasks`.
///
/// `_embedded` is omitted entirely on an empty page rather than carrying an
/// empty array.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Page metadata.
    pub chunk: ChunkMeta,

    /// The page contents, absent when empty.
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<Embedded>,
}

impl ListResponse {
    /// Builds a page from its elements and the encoded next-page cursor.
    pub fn new(elements: Vec<Task>, pagination_token: Option<String>) -> Self {
        Self {
            chunk: ChunkMeta {
                size: elements.len(),
                pagination_token,
            },
            embedded: if elements.is_empty() {
                None
            } else {
                Some(Embedded { elements })
            },
        }
    }
}
